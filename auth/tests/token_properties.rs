use std::sync::Arc;
use std::thread;

use auth::Claims;
use auth::SigningKey;
use auth::TokenIssuer;
use auth::TokenSettings;
use auth::TokenValidator;
use auth::ValidationError;
use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use proptest::prelude::*;

const SECRET: &[u8] = b"property-test-secret-at-least-32-bytes";
const LIFETIME_HOURS: i64 = 10;

fn fixture() -> (TokenIssuer, TokenValidator) {
    let key = Arc::new(SigningKey::from_secret(SECRET).expect("Valid secret"));
    let settings =
        TokenSettings::new(Duration::hours(LIFETIME_HOURS), Duration::zero()).expect("Valid settings");
    (
        TokenIssuer::new(Arc::clone(&key), settings),
        TokenValidator::new(key, settings),
    )
}

fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    /// Property: every issued token validates back to exactly the minted claims.
    #[test]
    fn issued_tokens_round_trip(
        subject in "[a-z0-9._%+-]{1,24}@[a-z0-9-]{1,16}\\.[a-z]{2,6}",
        role in "[A-Z_]{1,12}",
        issued in 1_000_000_000i64..2_000_000_000i64,
    ) {
        let (issuer, validator) = fixture();
        let now = at(issued);

        let token = issuer.issue_at(&subject, &role, now).unwrap();
        let claims = validator.validate_at(token.as_str(), now).unwrap();

        prop_assert_eq!(claims, Claims::new(subject, role, now, Duration::hours(LIFETIME_HOURS)));
    }

    /// Property: flipping any single bit of a token's ASCII text never yields success.
    ///
    /// Bit 7 is left alone: setting it on an ASCII byte yields invalid UTF-8,
    /// which cannot reach the `&str` API at all.
    #[test]
    fn single_bit_flips_are_rejected(
        subject in "[a-z]{1,12}@test\\.com",
        position in any::<prop::sample::Index>(),
        bit in 0u8..7,
    ) {
        let (issuer, validator) = fixture();
        let now = at(1_700_000_000);
        let token = issuer.issue_at(&subject, "USER", now).unwrap().into_string();

        let mut bytes = token.into_bytes();
        let index = position.index(bytes.len());
        bytes[index] ^= 1 << bit;
        let tampered = String::from_utf8(bytes).unwrap();

        let result = validator.validate_at(&tampered, now);
        prop_assert!(
            matches!(result, Err(ValidationError::BadSignature) | Err(ValidationError::Malformed)),
            "tampered token accepted or misclassified: {:?}",
            result
        );
    }
}

#[test]
fn test_every_position_and_bit_is_tamper_sensitive() {
    let (issuer, validator) = fixture();
    let now = at(1_700_000_000);
    let token = issuer
        .issue_at("testuser@test.com", "ADMIN", now)
        .unwrap()
        .into_string();

    for index in 0..token.len() {
        // Bits 0..7 only; bit 7 would make the text invalid UTF-8.
        for bit in 0..7 {
            let mut bytes = token.clone().into_bytes();
            bytes[index] ^= 1 << bit;
            let tampered = String::from_utf8(bytes).unwrap();

            let result = validator.validate_at(&tampered, now);
            assert!(
                matches!(
                    result,
                    Err(ValidationError::BadSignature) | Err(ValidationError::Malformed)
                ),
                "position {} bit {} produced {:?}",
                index,
                bit,
                result
            );
        }
    }
}

#[test]
fn test_concurrent_issue_and_validate() {
    let key = Arc::new(SigningKey::from_secret(SECRET).expect("Valid secret"));
    let settings =
        TokenSettings::new(Duration::hours(1), Duration::seconds(5)).expect("Valid settings");
    let issuer = Arc::new(TokenIssuer::new(Arc::clone(&key), settings));
    let validator = Arc::new(TokenValidator::new(key, settings));

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let issuer = Arc::clone(&issuer);
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                for round in 0..50 {
                    let subject = format!("user{}-{}@test.com", worker, round);
                    let token = issuer.issue(&subject, "USER").expect("Issue failed");
                    let claims = validator
                        .validate(token.as_str())
                        .expect("Concurrently issued token rejected");
                    assert_eq!(claims.subject(), subject);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
}
