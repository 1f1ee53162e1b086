use crate::domain::{AuthResult, AuthServiceError, Endpoint, IdentityTransport, SignUpRequest};
use crate::use_cases::AuthService;

impl<T> AuthService<T>
where
    T: IdentityTransport,
{
    /// Creates an email/password account and returns its first session tokens.
    ///
    /// Empty emails or passwords are sent as-is; the provider decides what is
    /// valid. `registered` is never set on the result.
    #[tracing::instrument(
        name = "sign_up_new_user",
        skip_all,
        fields(email = %request.credentials.email)
    )]
    pub async fn sign_up_new_user(
        &self,
        request: SignUpRequest,
    ) -> Result<AuthResult, AuthServiceError> {
        let res = self.exchange(Endpoint::SignUp, &request.credentials).await?;

        tracing::info!(local_id = %res.local_id, "account created.");

        Ok(AuthResult {
            registered: None,
            ..res.into()
        })
    }
}
