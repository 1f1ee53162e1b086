use std::fmt;

// Normalized reasons the provider gives for rejecting a credential call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageType {
    EmailExists,
    WeakPassword,
    InvalidEmail,
    MissingPassword,
    MissingEmail,
    EmailNotFound,
    InvalidPassword,
    UserDisabled,
    Unknown,
}

// Upstream literals, matched against the leading code token of an error message.
const KNOWN_CODES: [(&str, MessageType); 8] = [
    ("EMAIL_EXISTS", MessageType::EmailExists),
    ("WEAK_PASSWORD", MessageType::WeakPassword),
    ("INVALID_EMAIL", MessageType::InvalidEmail),
    ("MISSING_PASSWORD", MessageType::MissingPassword),
    ("MISSING_EMAIL", MessageType::MissingEmail),
    ("EMAIL_NOT_FOUND", MessageType::EmailNotFound),
    ("INVALID_PASSWORD", MessageType::InvalidPassword),
    ("USER_DISABLED", MessageType::UserDisabled),
];

impl MessageType {
    // The provider code this variant was classified from.
    pub fn code(self) -> Option<&'static str> {
        KNOWN_CODES
            .iter()
            .find(|(_, message_type)| *message_type == self)
            .map(|(code, _)| *code)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code().unwrap_or("UNKNOWN"))
    }
}

/// Maps a provider error message to a [`MessageType`].
///
/// The provider sometimes appends detail after the code, as in
/// `"WEAK_PASSWORD : Password should be at least 6 characters"`, so only the
/// leading run of `[A-Z0-9_]` is compared. Anything unrecognized is
/// [`MessageType::Unknown`]; this never fails.
pub fn classify(message: &str) -> MessageType {
    let code = leading_code(message);

    KNOWN_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, message_type)| *message_type)
        .unwrap_or(MessageType::Unknown)
}

fn leading_code(message: &str) -> &str {
    let trimmed = message.trim_start();
    let end = trimmed
        .find(|c: char| !(c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'))
        .unwrap_or(trimmed.len());
    &trimmed[..end]
}
