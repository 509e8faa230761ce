use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;
use auth::Token;
use auth::ValidationError;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::LoginCommand;
use crate::account::models::SeedAccountCommand;
use crate::account::ports::AccountRepository;
use crate::account::ports::AuthServicePort;

// Hashed once at construction; verified against when the identifier is
// unknown so both rejection paths pay for one Argon2 verification.
const DECOY_SECRET: &str = "decoy-secret-never-matches-a-login";

/// Domain service implementation for login and boundary validation.
///
/// Orchestrates identity lookup, credential verification and token issuance.
pub struct AuthService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
    decoy_hash: String,
}

impl<AR> AuthService<AR>
where
    AR: AccountRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account store implementation
    /// * `authenticator` - Verifier, issuer and validator over the shared key
    ///
    /// # Errors
    /// * `Password` - Hashing the decoy credential failed
    pub fn new(
        repository: Arc<AR>,
        authenticator: Arc<Authenticator>,
    ) -> Result<Self, AccountError> {
        let decoy_hash = authenticator.hash_password(DECOY_SECRET)?;

        Ok(Self {
            repository,
            authenticator,
            decoy_hash,
        })
    }
}

#[async_trait]
impl<AR> AuthServicePort for AuthService<AR>
where
    AR: AccountRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<Option<Token>, AccountError> {
        let Some(account) = self
            .repository
            .find_by_email(&command.email)
            .await
            .map_err(lookup_failure)?
        else {
            let _ = self
                .authenticator
                .verify_password(&command.password, &self.decoy_hash);
            tracing::info!(
                principal = %command.email,
                outcome = "unknown_principal",
                "Login rejected"
            );
            return Ok(None);
        };

        let result = self.authenticator.authenticate(
            &command.password,
            &account.password_hash,
            account.email.as_str(),
            account.role.as_str(),
        );

        match result {
            Ok(result) => {
                tracing::info!(
                    account_id = %account.id,
                    role = %account.role,
                    "Login succeeded"
                );
                Ok(Some(result.access_token))
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::info!(
                    principal = %command.email,
                    outcome = "credential_mismatch",
                    "Login rejected"
                );
                Ok(None)
            }
            Err(AuthenticationError::Issue(e)) => Err(e.into()),
        }
    }

    fn check_authorization(&self, header_value: &str) -> Result<Claims, ValidationError> {
        self.authenticator
            .check_authorization(header_value)
            .inspect_err(|e| {
                tracing::warn!(reason = e.as_str(), "Token validation failed");
            })
    }

    async fn seed_account(&self, command: SeedAccountCommand) -> Result<bool, AccountError> {
        let password_hash = self.authenticator.hash_password(&command.password)?;

        let account = Account {
            id: AccountId::new(),
            email: command.email,
            password_hash,
            role: command.role,
            created_at: Utc::now(),
        };

        let email = account.email.clone();
        let inserted = self.repository.insert_if_absent(account).await?;
        tracing::info!(principal = %email, inserted, "Seed account processed");

        Ok(inserted)
    }
}

// The command was validated when it was built, so a validation error coming
// back from the store describes a stored record and must not reach the caller
// as a bad request.
fn lookup_failure(err: AccountError) -> AccountError {
    match err {
        AccountError::InvalidEmail(_) | AccountError::InvalidRole(_) => {
            AccountError::DatabaseError(err.to_string())
        }
        other => other,
    }
}
