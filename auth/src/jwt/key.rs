use std::fmt;

use chrono::Duration;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;

use super::errors::KeyError;

/// Shared HMAC signing material.
///
/// Loaded once per process from configuration and shared read-only between
/// the issuer and every validator. Rotating it invalidates all outstanding
/// tokens.
pub struct SigningKey {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SigningKey {
    /// Minimum secret length for HS256 (256 bits).
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Signature algorithm used for every token.
    pub const ALGORITHM: Algorithm = Algorithm::HS256;

    /// Build signing material from a raw secret.
    ///
    /// # Errors
    /// * `SecretTooShort` - Secret is shorter than 32 bytes
    pub fn from_secret(secret: &[u8]) -> Result<Self, KeyError> {
        if secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(KeyError::SecretTooShort {
                min: Self::MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        })
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("algorithm", &Self::ALGORITHM)
            .finish_non_exhaustive()
    }
}

/// Lifetime of issued tokens and clock-skew tolerance of validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSettings {
    lifetime: Duration,
    leeway: Duration,
}

impl TokenSettings {
    /// Claims carry whole-second timestamps, so the lifetime must span at
    /// least one second for `exp` to land after `iat`.
    ///
    /// # Errors
    /// * `NonPositiveLifetime` - Lifetime is zero or negative
    /// * `SubSecondLifetime` - Lifetime is positive but under one second
    /// * `NegativeLeeway` - Leeway is negative
    pub fn new(lifetime: Duration, leeway: Duration) -> Result<Self, KeyError> {
        if lifetime <= Duration::zero() {
            return Err(KeyError::NonPositiveLifetime);
        }
        if lifetime.num_seconds() < 1 {
            return Err(KeyError::SubSecondLifetime);
        }
        if leeway < Duration::zero() {
            return Err(KeyError::NegativeLeeway);
        }
        Ok(Self { lifetime, leeway })
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    pub fn leeway(&self) -> Duration {
        self.leeway
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_too_short() {
        let result = SigningKey::from_secret(b"short");
        assert_eq!(
            result.unwrap_err(),
            KeyError::SecretTooShort { min: 32, actual: 5 }
        );
    }

    #[test]
    fn test_secret_minimum_length_accepted() {
        assert!(SigningKey::from_secret(&[7u8; 32]).is_ok());
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let key = SigningKey::from_secret(b"a_very_secret_value_of_32_bytes!").unwrap();
        let rendered = format!("{:?}", key);
        assert!(!rendered.contains("a_very_secret"));
    }

    #[test]
    fn test_settings_validation() {
        assert_eq!(
            TokenSettings::new(Duration::zero(), Duration::zero()).unwrap_err(),
            KeyError::NonPositiveLifetime
        );
        assert_eq!(
            TokenSettings::new(Duration::hours(1), Duration::seconds(-1)).unwrap_err(),
            KeyError::NegativeLeeway
        );

        let settings = TokenSettings::new(Duration::hours(10), Duration::seconds(30)).unwrap();
        assert_eq!(settings.lifetime(), Duration::hours(10));
        assert_eq!(settings.leeway(), Duration::seconds(30));
    }

    #[test]
    fn test_sub_second_lifetime_rejected() {
        assert_eq!(
            TokenSettings::new(Duration::milliseconds(500), Duration::zero()).unwrap_err(),
            KeyError::SubSecondLifetime
        );
        assert!(TokenSettings::new(Duration::seconds(1), Duration::zero()).is_ok());
    }
}
