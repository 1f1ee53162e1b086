mod auth;
mod classify;
mod credentials;
mod errors;
mod ports;

// Re-export the domain boundary types and ports.
pub use auth::AuthResult;
pub use classify::{MessageType, classify};
pub use credentials::{Credentials, SignUpRequest, VerifyPasswordRequest};
pub use errors::{
    AuthFailure, AuthServiceError, DecodingFailure, TransportFailure, TransportFailureKind,
};
pub use ports::{Endpoint, IdentityTransport, ProviderReply};
