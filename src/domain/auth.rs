use serde::Serialize;

// Tokens and account data returned by a successful sign-up or sign-in.
// The serialization within this layer is a dependency leak, kept so the CLI can print results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthResult {
    pub id_token: String,
    pub refresh_token: String,
    pub local_id: String,
    pub email: String,
    pub expires_in_seconds: u64,
    // Only sign-in reports this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered: Option<bool>,
}
