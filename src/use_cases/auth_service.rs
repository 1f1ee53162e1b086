use crate::domain::{
    AuthFailure, AuthServiceError, Credentials, DecodingFailure, Endpoint, IdentityTransport,
    ProviderReply,
};
use crate::interface_adapters::protocol::{self, ErrorEnvelope, TokenResponse};

/// Password sign-up and sign-in against the identity provider.
///
/// Holds nothing but the transport, so one instance can serve concurrent
/// callers. Each operation is a single request/response exchange with no
/// retries; see `sign_up_new_user` and `verify_password`.
pub struct AuthService<T> {
    transport: T,
}

impl<T> AuthService<T>
where
    T: IdentityTransport,
{
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // Shared request/response mapping for both operations.
    pub(crate) async fn exchange(
        &self,
        endpoint: Endpoint,
        credentials: &Credentials,
    ) -> Result<TokenResponse, AuthServiceError> {
        let body = protocol::credentials_body(credentials);
        tracing::debug!(?endpoint, "dispatching identity request.");

        let reply = self
            .transport
            .post_json(endpoint, body)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, ?endpoint, "identity transport failed.");
            })?;

        if !reply.is_success() {
            let failure = rejection(&reply);
            tracing::warn!(
                status = failure.status,
                message_type = %failure.message_type,
                raw_message = %failure.raw_message,
                "identity provider rejected request."
            );
            return Err(failure.into());
        }

        serde_json::from_str::<TokenResponse>(&reply.body).map_err(|err| {
            tracing::error!(error = %err, ?endpoint, "identity success body did not decode.");
            DecodingFailure::from(err).into()
        })
    }
}

// Classify a non-2xx reply; bodies without the error envelope become `Unknown`.
fn rejection(reply: &ProviderReply) -> AuthFailure {
    match serde_json::from_str::<ErrorEnvelope>(&reply.body) {
        Ok(envelope) => {
            let reasons = envelope.error.reasons();
            tracing::debug!(code = ?envelope.error.code, ?reasons, "provider error envelope.");
            AuthFailure::from_upstream(reply.status, envelope.error.message)
        }
        Err(_) => AuthFailure::from_upstream(reply.status, format!("HTTP {}", reply.status)),
    }
}
