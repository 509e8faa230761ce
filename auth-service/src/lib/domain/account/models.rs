use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::errors::EmailError;
use crate::account::errors::RoleError;

/// Account aggregate entity.
///
/// Written by the registration path (or the startup seed) and read-only to
/// login. The email is the principal identifier bound into tokens.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Authorization role tag carried in tokens (e.g. `ADMIN`, `USER`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role(String);

impl Role {
    const MAX_LENGTH: usize = 64;

    /// Create a new valid role.
    ///
    /// # Errors
    /// * `Empty` - Role is empty
    /// * `TooLong` - Role longer than 64 characters
    /// * `InvalidCharacters` - Contains characters other than alphanumeric and `_`
    pub fn new(role: String) -> Result<Self, RoleError> {
        if role.is_empty() {
            return Err(RoleError::Empty);
        }
        if role.len() > Self::MAX_LENGTH {
            return Err(RoleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: role.len(),
            });
        }
        if !role.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(RoleError::InvalidCharacters);
        }
        Ok(Self(role))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to log in with a principal identifier and a raw secret.
///
/// The secret lives only as long as the command.
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Command to insert an account at startup if none exists for its email.
pub struct SeedAccountCommand {
    pub email: EmailAddress,
    pub password: String,
    pub role: Role,
}

impl SeedAccountCommand {
    pub fn new(email: EmailAddress, password: String, role: Role) -> Self {
        Self {
            email,
            password,
            role,
        }
    }
}

impl fmt::Debug for SeedAccountCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedAccountCommand")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}
