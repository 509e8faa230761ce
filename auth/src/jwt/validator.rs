use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::crypto;
use jsonwebtoken::decode;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::ValidationError;
use super::key::SigningKey;
use super::key::TokenSettings;

const SEGMENT_COUNT: usize = 3;

/// Recovers signed claims from a presented token, locally.
///
/// Validation needs nothing but the shared key and the wall clock: no call to
/// the issuer and no shared mutable state. Steps run in a fixed order and the
/// claims segment is only parsed once its signature has been checked.
///
/// 1. structure: three non-empty base64url segments, else `Malformed`
/// 2. signature over `header.claims`, constant-time, else `BadSignature`
/// 3. claims decoding and window sanity, else `Malformed`
/// 4. `iat`/`exp` against the clock with leeway, else `NotYetValid`/`Expired`
#[derive(Debug, Clone)]
pub struct TokenValidator {
    key: Arc<SigningKey>,
    leeway: Duration,
    trusted_payload: Validation,
}

impl TokenValidator {
    pub fn new(key: Arc<SigningKey>, settings: TokenSettings) -> Self {
        // Only used after the signature has been verified here, so the
        // library's own signature and time checks are switched off.
        let mut trusted_payload = Validation::new(SigningKey::ALGORITHM);
        trusted_payload.insecure_disable_signature_validation();
        trusted_payload.required_spec_claims.clear();
        trusted_payload.validate_exp = false;

        Self {
            key,
            leeway: settings.leeway(),
            trusted_payload,
        }
    }

    /// Validate a token against the current time.
    ///
    /// # Errors
    /// * `Malformed` - Token structure or claims cannot be decoded
    /// * `BadSignature` - Signature does not match the signing input
    /// * `Expired` - Token is past `exp` plus leeway
    /// * `NotYetValid` - Token `iat` is ahead of the clock plus leeway
    pub fn validate(&self, token: &str) -> Result<Claims, ValidationError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token against an explicit instant.
    ///
    /// # Errors
    /// See [`TokenValidator::validate`].
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, ValidationError> {
        let (signing_input, signature) = split_token(token)?;

        let signature_matches = crypto::verify(
            signature,
            signing_input.as_bytes(),
            self.key.decoding_key(),
            SigningKey::ALGORITHM,
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "Signature verification could not run");
            ValidationError::Malformed
        })?;

        if !signature_matches {
            return Err(ValidationError::BadSignature);
        }

        let claims = decode::<Claims>(token, self.key.decoding_key(), &self.trusted_payload)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::warn!(error = %e, "Signed token carries undecodable claims");
                ValidationError::Malformed
            })?;

        if !claims.has_valid_window() {
            return Err(ValidationError::Malformed);
        }

        let now = now.timestamp();
        let leeway = self.leeway.num_seconds();

        if claims.is_issued_in_future(now, leeway) {
            return Err(ValidationError::NotYetValid);
        }

        if claims.is_expired(now, leeway) {
            return Err(ValidationError::Expired);
        }

        Ok(claims)
    }
}

/// Split into `(header.claims, signature)` after checking segment structure.
fn split_token(token: &str) -> Result<(&str, &str), ValidationError> {
    let segments = token.split('.');
    let mut count = 0;
    for segment in segments {
        count += 1;
        if segment.is_empty() || !segment.bytes().all(is_base64url) {
            return Err(ValidationError::Malformed);
        }
    }

    if count != SEGMENT_COUNT {
        return Err(ValidationError::Malformed);
    }

    token.rsplit_once('.').ok_or(ValidationError::Malformed)
}

fn is_base64url(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_'
}
