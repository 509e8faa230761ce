use std::sync::Arc;

use crate::jwt::Claims;
use crate::jwt::IssueError;
use crate::jwt::SigningKey;
use crate::jwt::Token;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenSettings;
use crate::jwt::TokenValidator;
use crate::jwt::ValidationError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authorization scheme expected in front of a presented token.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Authentication coordinator combining credential verification, token
/// issuance and token validation.
///
/// Holds no mutable state: every field is immutable after construction and
/// the signing key is shared by reference, so one instance can serve
/// concurrent requests without locking.
#[derive(Debug, Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    issuer: TokenIssuer,
    validator: TokenValidator,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Signed bearer token
    pub access_token: Token,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Issue(#[from] IssueError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `key` - Shared signing key, loaded once per process
    /// * `settings` - Token lifetime and validation leeway
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(key: Arc<SigningKey>, settings: TokenSettings) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            issuer: TokenIssuer::new(Arc::clone(&key), settings),
            validator: TokenValidator::new(key, settings),
        }
    }

    /// Hash a secret for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, secret: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(secret)
    }

    /// Check a presented secret against a stored hash. Fails closed.
    pub fn verify_password(&self, secret: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(secret, stored_hash)
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `secret` - Plaintext secret to verify
    /// * `stored_hash` - Stored hash of the principal's secret
    /// * `subject` - Principal identifier to bind into the token
    /// * `role` - Authorization role to bind into the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Secret does not match
    /// * `Issue` - Token generation failed
    pub fn authenticate(
        &self,
        secret: &str,
        stored_hash: &str,
        subject: &str,
        role: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(secret, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issuer.issue(subject, role)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token without credential verification.
    ///
    /// # Errors
    /// * `IssueError` - Token generation failed
    pub fn generate_token(&self, subject: &str, role: &str) -> Result<Token, IssueError> {
        self.issuer.issue(subject, role)
    }

    /// Validate a raw token and recover its claims.
    ///
    /// # Errors
    /// * `ValidationError` - Token was rejected
    pub fn validate_token(&self, token: &str) -> Result<Claims, ValidationError> {
        self.validator.validate(token)
    }

    /// Validate the value of an `Authorization` header.
    ///
    /// # Errors
    /// * `Malformed` - Value does not carry the bearer prefix
    /// * `ValidationError` - Token was rejected
    pub fn check_authorization(&self, header_value: &str) -> Result<Claims, ValidationError> {
        let token = strip_bearer_prefix(header_value).ok_or(ValidationError::Malformed)?;
        self.validator.validate(token)
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub fn validator(&self) -> &TokenValidator {
        &self.validator
    }
}

/// Return the token following the bearer prefix, if present.
pub fn strip_bearer_prefix(header_value: &str) -> Option<&str> {
    header_value.strip_prefix(BEARER_PREFIX)
}
