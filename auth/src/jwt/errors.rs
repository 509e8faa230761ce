use thiserror::Error;

/// Error constructing the shared signing material or token settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("Signing secret too short: minimum {min} bytes, got {actual}")]
    SecretTooShort { min: usize, actual: usize },

    #[error("Token lifetime must be positive")]
    NonPositiveLifetime,

    #[error("Token lifetime must be at least one second")]
    SubSecondLifetime,

    #[error("Duration for {0} is out of range")]
    DurationOutOfRange(&'static str),

    #[error("Validation leeway must not be negative")]
    NegativeLeeway,
}

/// Error type for token issuance.
#[derive(Debug, Clone, Error)]
pub enum IssueError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Reason a presented token was rejected.
///
/// Every variant is a rejection. Callers at an external boundary should
/// collapse them into one signal and keep the variant for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature does not match")]
    BadSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is not yet valid")]
    NotYetValid,
}

impl ValidationError {
    /// Stable label used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationError::Malformed => "malformed",
            ValidationError::BadSignature => "bad_signature",
            ValidationError::Expired => "expired",
            ValidationError::NotYetValid => "not_yet_valid",
        }
    }
}
