use crate::domain::classify::{MessageType, classify};
use std::fmt;

// Provider rejected the credentials; carries the classified reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthFailure {
    pub message_type: MessageType,
    pub raw_message: String,
    pub status: u16,
}

impl AuthFailure {
    pub fn from_upstream(status: u16, raw_message: impl Into<String>) -> Self {
        let raw_message = raw_message.into();
        Self {
            message_type: classify(&raw_message),
            raw_message,
            status,
        }
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "provider rejected request ({}, status {}): {}",
            self.message_type, self.status, self.raw_message
        )
    }
}

impl std::error::Error for AuthFailure {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportFailureKind {
    Timeout,
    Connect,
    Other,
}

// Network-level fault; the request may or may not have reached the provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportFailure {
    pub kind: TransportFailureKind,
    pub message: String,
}

impl TransportFailure {
    pub fn new(kind: TransportFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TransportFailureKind::Timeout => {
                write!(f, "identity transport timed out: {}", self.message)
            }
            TransportFailureKind::Connect => {
                write!(f, "identity transport could not connect: {}", self.message)
            }
            TransportFailureKind::Other => {
                write!(f, "identity transport error: {}", self.message)
            }
        }
    }
}

impl std::error::Error for TransportFailure {}

// A 2xx body that does not match the expected success shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodingFailure {
    pub message: String,
}

impl DecodingFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for DecodingFailure {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl fmt::Display for DecodingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "identity response decode error: {}", self.message)
    }
}

impl std::error::Error for DecodingFailure {}

// Exactly one of these is returned when an operation does not succeed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthServiceError {
    Auth(AuthFailure),
    Transport(TransportFailure),
    Decoding(DecodingFailure),
}

impl AuthServiceError {
    // Classified reason when the provider rejected the call.
    pub fn message_type(&self) -> Option<MessageType> {
        match self {
            AuthServiceError::Auth(failure) => Some(failure.message_type),
            _ => None,
        }
    }
}

impl fmt::Display for AuthServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthServiceError::Auth(err) => err.fmt(f),
            AuthServiceError::Transport(err) => err.fmt(f),
            AuthServiceError::Decoding(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for AuthServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthServiceError::Auth(err) => Some(err),
            AuthServiceError::Transport(err) => Some(err),
            AuthServiceError::Decoding(err) => Some(err),
        }
    }
}

impl From<AuthFailure> for AuthServiceError {
    fn from(err: AuthFailure) -> Self {
        AuthServiceError::Auth(err)
    }
}

impl From<TransportFailure> for AuthServiceError {
    fn from(err: TransportFailure) -> Self {
        AuthServiceError::Transport(err)
    }
}

impl From<DecodingFailure> for AuthServiceError {
    fn from(err: DecodingFailure) -> Self {
        AuthServiceError::Decoding(err)
    }
}
