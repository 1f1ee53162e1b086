use std::fmt;

// Email/password pair forwarded to the provider as-is.
// Validity is decided upstream, so nothing is checked here.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// Payload for creating a new email/password account.
#[derive(Clone, Debug)]
pub struct SignUpRequest {
    pub credentials: Credentials,
}

impl SignUpRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(email, password),
        }
    }
}

// Payload for signing in an existing account.
#[derive(Clone, Debug)]
pub struct VerifyPasswordRequest {
    pub credentials: Credentials,
}

impl VerifyPasswordRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(email, password),
        }
    }
}
