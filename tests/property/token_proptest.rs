//! Property-based tests for access tokens and password hashing

use chrono::Duration;
use crm_hrms::backend::auth::{PasswordHasher, TokenCodec, TokenError};
use proptest::prelude::*;

fn codec(secret: &str) -> TokenCodec {
    TokenCodec::new(secret, "HS256", Duration::minutes(30)).unwrap()
}

proptest! {
    #[test]
    fn test_token_roundtrips_subject(subject in "[a-zA-Z0-9-]{1,64}") {
        let codec = codec("proptest-secret");
        let token = codec.issue(&subject, None).unwrap();
        prop_assert_eq!(codec.decode(&token).unwrap(), subject);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected(
        subject in "[a-z0-9-]{1,36}",
        secret in "[a-z]{8,32}",
    ) {
        prop_assume!(secret != "proptest-secret");
        let token = codec(&secret).issue(&subject, None).unwrap();
        prop_assert_eq!(
            codec("proptest-secret").decode(&token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_expired_token_is_rejected(minutes in 0i64..10_000) {
        let codec = codec("proptest-secret");
        let token = codec.issue("user-1", Some(Duration::minutes(-minutes))).unwrap();
        prop_assert_eq!(codec.decode(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_garbage_never_decodes(input in "[a-zA-Z0-9._-]{0,80}") {
        prop_assert!(codec("proptest-secret").decode(&input).is_err());
    }
}

proptest! {
    // bcrypt is slow even at the minimum cost
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn test_password_hash_verifies(password in "[ -~]{1,40}") {
        let hasher = PasswordHasher::new(4);
        let hash = hasher.hash(&password).unwrap();
        prop_assert!(hasher.verify(&password, &hash));
        let wrong = format!("{}x", password);
        prop_assert!(!hasher.verify(&wrong, &hash));
    }
}
