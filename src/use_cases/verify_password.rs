use crate::domain::{
    AuthResult, AuthServiceError, DecodingFailure, Endpoint, IdentityTransport,
    VerifyPasswordRequest,
};
use crate::use_cases::AuthService;

impl<T> AuthService<T>
where
    T: IdentityTransport,
{
    /// Signs in with email and password.
    ///
    /// Same contract as `sign_up_new_user`, but the provider must also report
    /// `registered`; a success body without it is a decoding failure. Note the
    /// provider answers an empty email here with `INVALID_EMAIL`, not
    /// `MISSING_EMAIL` as sign-up does. That code is passed through unchanged.
    #[tracing::instrument(
        name = "verify_password",
        skip_all,
        fields(email = %request.credentials.email)
    )]
    pub async fn verify_password(
        &self,
        request: VerifyPasswordRequest,
    ) -> Result<AuthResult, AuthServiceError> {
        let res = self
            .exchange(Endpoint::VerifyPassword, &request.credentials)
            .await?;

        let Some(registered) = res.registered else {
            tracing::error!("sign-in success body has no registered flag.");
            return Err(DecodingFailure::new("missing field `registered`").into());
        };

        tracing::info!(local_id = %res.local_id, registered, "password verified.");

        Ok(AuthResult {
            registered: Some(registered),
            ..res.into()
        })
    }
}
