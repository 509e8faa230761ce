use async_trait::async_trait;
use auth::Claims;
use auth::Token;
use auth::ValidationError;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::EmailAddress;
use crate::account::models::LoginCommand;
use crate::account::models::SeedAccountCommand;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a token.
    ///
    /// Unknown identifier and wrong secret both yield `Ok(None)`; callers
    /// cannot tell them apart.
    ///
    /// # Arguments
    /// * `command` - Principal identifier and raw secret
    ///
    /// # Returns
    /// Signed token on success, `None` on rejection
    ///
    /// # Errors
    /// * `DatabaseError` - Account lookup failed
    /// * `TokenIssue` - Token generation failed
    async fn login(&self, command: LoginCommand) -> Result<Option<Token>, AccountError>;

    /// Validate a bearer-prefixed `Authorization` header value locally.
    ///
    /// # Returns
    /// Recovered claims
    ///
    /// # Errors
    /// * `ValidationError` - Header or token was rejected
    fn check_authorization(&self, header_value: &str) -> Result<Claims, ValidationError>;

    /// Insert an account unless one already exists for its email.
    ///
    /// # Returns
    /// Whether a new account was inserted
    ///
    /// # Errors
    /// * `Password` - Hashing the secret failed
    /// * `DatabaseError` - Database operation failed
    async fn seed_account(&self, command: SeedAccountCommand) -> Result<bool, AccountError>;
}

/// Identity lookup over the external account store.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Retrieve account by email address.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;

    /// Persist an account unless its email is already taken.
    ///
    /// # Returns
    /// Whether the account was inserted
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn insert_if_absent(&self, account: Account) -> Result<bool, AccountError>;
}
