//! Stateless bearer-token trust core
//!
//! Embedded by every service that needs to accept or reject a caller's identity:
//! - Credential verification (Argon2id)
//! - Signed token issuance (HS256 JWT)
//! - Local token validation against a shared key, without calling the issuer
//!
//! The signing key is loaded once per process and shared read-only; nothing in
//! this crate holds mutable state, so all operations are safe to call
//! concurrently.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use std::sync::Arc;
//!
//! use auth::{SigningKey, TokenIssuer, TokenSettings, TokenValidator};
//! use chrono::Duration;
//!
//! let key = Arc::new(SigningKey::from_secret(b"secret_key_at_least_32_bytes_long!").unwrap());
//! let settings = TokenSettings::new(Duration::hours(10), Duration::seconds(30)).unwrap();
//! let issuer = TokenIssuer::new(Arc::clone(&key), settings);
//! let validator = TokenValidator::new(key, settings);
//!
//! let token = issuer.issue("testuser@test.com", "ADMIN").unwrap();
//! let claims = validator.validate(token.as_str()).unwrap();
//! assert_eq!(claims.subject(), "testuser@test.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use std::sync::Arc;
//!
//! use auth::{Authenticator, SigningKey, TokenSettings};
//! use chrono::Duration;
//!
//! let key = SigningKey::from_secret(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let settings = TokenSettings::new(Duration::hours(10), Duration::seconds(30)).unwrap();
//! let auth = Authenticator::new(Arc::new(key), settings);
//!
//! // Stored by the registration path
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue
//! let result = auth
//!     .authenticate("password123", &hash, "testuser@test.com", "ADMIN")
//!     .unwrap();
//!
//! // Any service holding the same key validates locally
//! let header = format!("Bearer {}", result.access_token.as_str());
//! let claims = auth.check_authorization(&header).unwrap();
//! assert_eq!(claims.role(), "ADMIN");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::IssueError;
pub use jwt::KeyError;
pub use jwt::SigningKey;
pub use jwt::Token;
pub use jwt::TokenIssuer;
pub use jwt::TokenSettings;
pub use jwt::TokenValidator;
pub use jwt::ValidationError;
pub use password::PasswordError;
pub use password::PasswordHasher;
