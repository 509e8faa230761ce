use std::fmt;
use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::IssueError;
use super::key::SigningKey;
use super::key::TokenSettings;

/// Opaque bearer token: `header.claims.signature`, each segment base64url.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

// Bearer tokens grant access to whoever holds them; keep them out of logs.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(..)")
    }
}

/// Mints signed, time-bounded tokens.
///
/// Holds only the shared key and the configured lifetime, so a single
/// instance can be used from any number of threads.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    key: Arc<SigningKey>,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(key: Arc<SigningKey>, settings: TokenSettings) -> Self {
        Self {
            key,
            lifetime: settings.lifetime(),
        }
    }

    /// Issue a token for a verified principal, valid from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue(&self, subject: &str, role: &str) -> Result<Token, IssueError> {
        self.issue_at(subject, role, Utc::now())
    }

    /// Issue a token with an explicit issuance instant.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue_at(
        &self,
        subject: &str,
        role: &str,
        now: DateTime<Utc>,
    ) -> Result<Token, IssueError> {
        let claims = Claims::new(subject, role, now, self.lifetime);
        self.sign(&claims)
    }

    /// Sign already minted claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn sign(&self, claims: &Claims) -> Result<Token, IssueError> {
        let header = Header::new(SigningKey::ALGORITHM);

        encode(&header, claims, self.key.encoding_key())
            .map(Token)
            .map_err(|e| IssueError::EncodingFailed(e.to_string()))
    }
}
