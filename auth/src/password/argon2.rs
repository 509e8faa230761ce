use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Credential verifier backed by Argon2id.
///
/// Stored credentials are PHC strings carrying algorithm, parameters and salt,
/// so verification never needs anything besides the stored string itself.
/// Digest comparison inside `argon2` is constant-time.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher instance configured with secure defaults
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext secret for storage.
    ///
    /// Uses Argon2id with random salt generation.
    ///
    /// # Arguments
    /// * `secret` - Plaintext secret to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash(&self, secret: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a presented secret against a stored hash.
    ///
    /// Fails closed: a stored hash that cannot be parsed yields `false`
    /// rather than an error.
    ///
    /// # Arguments
    /// * `secret` - Plaintext secret presented at login
    /// * `stored_hash` - Stored hash in PHC string format
    ///
    /// # Returns
    /// True only if the secret matches the stored hash
    pub fn verify(&self, secret: &str, stored_hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(stored_hash) {
            Ok(parsed_hash) => parsed_hash,
            Err(e) => {
                tracing::warn!(error = %e, "Stored credential is not a valid PHC string");
                return false;
            }
        };

        Argon2::default()
            .verify_password(secret.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let secret = "password123";

        let hash = hasher.hash(secret).expect("Failed to hash secret");
        assert!(hash.starts_with("$argon2id$"));

        assert!(hasher.verify(secret, &hash));
        assert!(!hasher.verify("wrongpassword", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("password123").expect("Failed to hash secret");
        let second = hasher.hash("password123").expect("Failed to hash secret");

        assert_ne!(first, second);
        assert!(hasher.verify("password123", &first));
        assert!(hasher.verify("password123", &second));
    }

    #[test]
    fn test_verify_malformed_hash_fails_closed() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password123", "invalid_hash"));
        assert!(!hasher.verify("password123", ""));
        assert!(!hasher.verify("", "$argon2id$v=19$m=19456,t=2,p=1$broken"));
    }

    #[test]
    fn test_verify_empty_secret_against_real_hash() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("password123").expect("Failed to hash secret");

        assert!(!hasher.verify("", &hash));
    }
}
