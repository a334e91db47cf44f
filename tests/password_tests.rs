//! PasswordHasher contract tests

mod common;

use botadmin::auth::password::{PasswordError, PasswordHasher};
use common::{create_test_config, random_string};

#[test]
fn test_hash_and_verify() {
    let hasher = PasswordHasher::new();

    let hashed = hasher.hash("secret1").expect("hashing should succeed");
    assert!(hashed.contains("$argon2"));

    hasher
        .verify("secret1", &hashed)
        .expect("correct password should verify");

    assert_eq!(
        hasher.verify("secret2", &hashed),
        Err(PasswordError::Mismatch)
    );
}

#[test]
fn test_hash_is_salted_per_call() {
    let hasher = PasswordHasher::new();
    let password = random_string(8);

    let hash1 = hasher.hash(&password).unwrap();
    let hash2 = hasher.hash(&password).unwrap();

    // Fresh salt every call
    assert_ne!(hash1, hash2);

    // Both still verify the same plaintext
    hasher.verify(&password, &hash1).unwrap();
    hasher.verify(&password, &hash2).unwrap();
}

#[test]
fn test_wrong_password_is_mismatch_not_error() {
    let hasher = PasswordHasher::new();

    let hashed = hasher.hash(&random_string(8)).unwrap();
    let result = hasher.verify(&random_string(8), &hashed);

    assert_eq!(result, Err(PasswordError::Mismatch));
}

#[test]
fn test_malformed_hash_is_distinct_from_mismatch() {
    let hasher = PasswordHasher::new();

    assert_eq!(
        hasher.verify("secret1", "not-a-phc-string"),
        Err(PasswordError::MalformedHash)
    );
    assert_eq!(
        hasher.verify("secret1", ""),
        Err(PasswordError::MalformedHash)
    );
}

#[test]
fn test_empty_password_round_trips() {
    let hasher = PasswordHasher::new();

    let hashed = hasher.hash("").unwrap();
    hasher.verify("", &hashed).unwrap();

    assert_eq!(
        hasher.verify("password", &hashed),
        Err(PasswordError::Mismatch)
    );
}

#[test]
fn test_unicode_password() {
    let hasher = PasswordHasher::new();
    let password = "pass-wörd-試験-🔒";

    let hashed = hasher.hash(password).unwrap();
    hasher.verify(password, &hashed).unwrap();

    assert_eq!(
        hasher.verify("pass-word-試験-🔒", &hashed),
        Err(PasswordError::Mismatch)
    );
}

#[test]
fn test_policy_min_length() {
    let config = create_test_config();

    assert!(PasswordHasher::validate_password_policy("secret1", &config).is_ok());
    assert!(PasswordHasher::validate_password_policy("short", &config).is_err());
}

#[test]
fn test_policy_character_classes() {
    let mut config = create_test_config();
    config.security.password_require_uppercase = true;
    config.security.password_require_digit = true;
    config.security.password_require_special = true;

    assert!(PasswordHasher::validate_password_policy("Secret1!", &config).is_ok());
    assert!(PasswordHasher::validate_password_policy("secret1!", &config).is_err());
    assert!(PasswordHasher::validate_password_policy("Secrets!", &config).is_err());
    assert!(PasswordHasher::validate_password_policy("Secret12", &config).is_err());
}
