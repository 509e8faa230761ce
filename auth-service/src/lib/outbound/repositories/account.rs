use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Role;
use crate::domain::account::ports::AccountRepository;
use crate::account::errors::AccountError;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Rows written by the registration path may not satisfy this service's value
// objects; that is a store fault, never a caller input error.
fn account_from_row(row: PgRow) -> Result<Account, AccountError> {
    let database_error = |e: sqlx::Error| AccountError::DatabaseError(e.to_string());
    let stored_value_error =
        |e: AccountError| AccountError::DatabaseError(format!("Stored account is invalid: {}", e));

    let id: Uuid = row.try_get("id").map_err(database_error)?;
    let email: String = row.try_get("email").map_err(database_error)?;
    let password_hash: String = row.try_get("password_hash").map_err(database_error)?;
    let role: String = row.try_get("role").map_err(database_error)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(database_error)?;

    Ok(Account {
        id: AccountId(id),
        email: EmailAddress::new(email)
            .map_err(|e| stored_value_error(e.into()))?,
        password_hash,
        role: Role::new(role).map_err(|e| stored_value_error(e.into()))?,
        created_at,
    })
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, role, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(account_from_row).transpose()
    }

    async fn insert_if_absent(&self, account: Account) -> Result<bool, AccountError> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (id, email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(account.id.0)
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }
}
