pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use domain::{
    AuthFailure, AuthResult, AuthServiceError, DecodingFailure, MessageType, SignUpRequest,
    TransportFailure, TransportFailureKind, VerifyPasswordRequest,
};
pub use frameworks::config::{ClientConfig, ConfigError, build_service};
pub use interface_adapters::clients::IdentityToolkitClient;
pub use use_cases::AuthService;
