use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};

use crate::domain::{AuthResult, Credentials};

// Body shared by the sign-up and sign-in endpoints.
pub fn credentials_body(credentials: &Credentials) -> Value {
    json!({
        "email": credentials.email,
        "password": credentials.password,
        "returnSecureToken": true,
    })
}

// Success payload for both endpoints; `registered` is only sent on sign-in.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub id_token: String,
    pub email: String,
    pub refresh_token: String,
    #[serde(deserialize_with = "expires_in_seconds")]
    pub expires_in: u64,
    pub local_id: String,
    #[serde(default)]
    pub registered: Option<bool>,
}

impl From<TokenResponse> for AuthResult {
    fn from(res: TokenResponse) -> Self {
        AuthResult {
            id_token: res.id_token,
            refresh_token: res.refresh_token,
            local_id: res.local_id,
            email: res.email,
            expires_in_seconds: res.expires_in,
            registered: res.registered,
        }
    }
}

// Provider error envelope: `{"error": {"code": 400, "message": "EMAIL_EXISTS", ...}}`.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

// Only `message` is required; the extras are read leniently because they are only logged.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub errors: Value,
}

impl ErrorBody {
    // String `reason` of each detail entry; anything else is skipped.
    pub fn reasons(&self) -> Vec<&str> {
        self.errors
            .as_array()
            .map(|details| {
                details
                    .iter()
                    .filter_map(|detail| detail.get("reason").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Seconds {
    Text(String),
    Number(u64),
}

// The provider sends `expiresIn` as a decimal string; accept plain integers too.
fn expires_in_seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Seconds::deserialize(deserializer)? {
        Seconds::Number(value) => Ok(value),
        Seconds::Text(text) => text.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("expiresIn is not a number of seconds: {text:?}"))
        }),
    }
}
