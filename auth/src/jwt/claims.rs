use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Signed facts about an authenticated principal.
///
/// Field names follow RFC 7519 registered claims plus a private `role` claim.
/// Serialization order is fixed by declaration order, which makes the encoding
/// canonical for a given value; decoding accepts any field order.
///
/// Claims are immutable once minted: there are no setters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (principal identifier)
    sub: String,

    /// Authorization role of the principal
    role: String,

    /// Issued at (Unix timestamp)
    iat: i64,

    /// Expiration time (Unix timestamp)
    exp: i64,
}

impl Claims {
    /// Mint claims for a principal.
    ///
    /// # Arguments
    /// * `subject` - Principal identifier
    /// * `role` - Authorization role
    /// * `issued_at` - Issuance instant (truncated to whole seconds)
    /// * `lifetime` - Time until expiry
    pub fn new(
        subject: impl Into<String>,
        role: impl Into<String>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: subject.into(),
            role: role.into(),
            iat,
            exp: iat + lifetime.num_seconds(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.sub
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    /// Issued at (Unix timestamp).
    pub fn issued_at(&self) -> i64 {
        self.iat
    }

    /// Expiration time (Unix timestamp).
    pub fn expires_at(&self) -> i64 {
        self.exp
    }

    /// Whether the validity window is well formed (`exp` strictly after `iat`).
    pub fn has_valid_window(&self) -> bool {
        self.exp > self.iat
    }

    /// Check if token is expired at `now`, tolerating `leeway` seconds.
    ///
    /// The boundary is inclusive: a token checked exactly at `exp` is not expired.
    pub fn is_expired(&self, now: i64, leeway: i64) -> bool {
        now > self.exp.saturating_add(leeway)
    }

    /// Check if token was issued after `now`, tolerating `leeway` seconds.
    pub fn is_issued_in_future(&self, now: i64, leeway: i64) -> bool {
        self.iat > now.saturating_add(leeway)
    }
}
