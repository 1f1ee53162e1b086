use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::TransportFailure;

// Provider operations the service can dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    SignUp,
    VerifyPassword,
}

impl Endpoint {
    // Path segment appended to the configured base url.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::SignUp => "accounts:signUp",
            Endpoint::VerifyPassword => "accounts:signInWithPassword",
        }
    }
}

// Raw HTTP outcome; status interpretation is left to the service.
#[derive(Clone, Debug)]
pub struct ProviderReply {
    pub status: u16,
    pub body: String,
}

impl ProviderReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// The service depends on this trait, not the concrete reqwest client.
#[async_trait]
pub trait IdentityTransport: Send + Sync {
    async fn post_json(
        &self,
        endpoint: Endpoint,
        body: Value,
    ) -> Result<ProviderReply, TransportFailure>;
}
