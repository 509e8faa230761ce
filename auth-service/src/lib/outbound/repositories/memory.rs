use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AccountRepository;

/// Account store held in process memory, keyed by email.
///
/// Selected when no `[database]` section is configured.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<EmailAddress, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.read().await.get(email).cloned())
    }

    async fn insert_if_absent(&self, account: Account) -> Result<bool, AccountError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.email) {
            return Ok(false);
        }
        accounts.insert(account.email.clone(), account);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::account::models::AccountId;
    use crate::domain::account::models::Role;

    fn account(email: &str, role: &str) -> Account {
        Account {
            id: AccountId::new(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            role: Role::new(role.to_string()).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repository = InMemoryAccountRepository::new();
        let email = EmailAddress::new("testuser@test.com".to_string()).unwrap();

        assert!(repository.find_by_email(&email).await.unwrap().is_none());
        assert!(repository
            .insert_if_absent(account("testuser@test.com", "ADMIN"))
            .await
            .unwrap());

        let found = repository.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(found.role.as_str(), "ADMIN");
    }

    #[tokio::test]
    async fn test_insert_keeps_existing_account() {
        let repository = InMemoryAccountRepository::new();
        let email = EmailAddress::new("testuser@test.com".to_string()).unwrap();

        assert!(repository
            .insert_if_absent(account("testuser@test.com", "ADMIN"))
            .await
            .unwrap());
        assert!(!repository
            .insert_if_absent(account("testuser@test.com", "USER"))
            .await
            .unwrap());

        let found = repository.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(found.role.as_str(), "ADMIN");
    }
}
