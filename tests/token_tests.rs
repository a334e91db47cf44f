//! TokenMaker contract tests, run against both implementations

mod common;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use botadmin::token::{self, JwtMaker, PasetoMaker, Payload, TokenError, TokenMaker};
use chrono::{Duration, Utc};
use common::{create_test_config, random_int, random_phone, random_secret, random_string};

/// Round-trip law: verifying a freshly created token returns a payload
/// matching the identity it was created for.
fn assert_round_trip(maker: &dyn TokenMaker) {
    let phone = random_phone();
    let user_id = random_int(1, 1000);
    let company_id = random_int(1, 1000);
    let name = random_string(6);
    let duration = Duration::minutes(1);

    let issued_at = Utc::now();
    let expired_at = issued_at + duration;

    let (token, payload) = maker
        .create_token(&phone, user_id, &name, company_id, duration)
        .unwrap();
    assert!(!token.is_empty());
    assert_eq!(payload.phone, phone);

    let verified = maker.verify_token(&token).unwrap();
    assert!(!verified.id.is_nil());
    assert_eq!(verified.id, payload.id);
    assert_eq!(verified.phone, phone);
    assert_eq!(verified.user_id, user_id);
    assert_eq!(verified.name, name);
    assert_eq!(verified.company_id, company_id);
    assert!((verified.issued_at - issued_at).num_seconds().abs() <= 1);
    assert!((verified.expired_at - expired_at).num_seconds().abs() <= 1);
}

fn assert_expired(maker: &dyn TokenMaker) {
    let (token, payload) = maker
        .create_token(&random_phone(), 7, "Jane", 3, Duration::minutes(-1))
        .unwrap();
    assert!(!token.is_empty());
    assert!(payload.expired_at < Utc::now());

    assert_eq!(maker.verify_token(&token), Err(TokenError::Expired));
}

#[test]
fn test_jwt_round_trip() {
    let maker = JwtMaker::new(&random_secret()).unwrap();
    assert_round_trip(&maker);
}

#[test]
fn test_paseto_round_trip() {
    let maker = PasetoMaker::new(&random_secret()).unwrap();
    assert_round_trip(&maker);
}

#[test]
fn test_access_token_scenario() {
    // Concrete flow: a one-minute token for a known identity
    let maker = PasetoMaker::new(&random_secret()).unwrap();

    let issued_at = Utc::now();
    let (token, _) = maker
        .create_token("+25470000001", 7, "Jane", 3, Duration::minutes(1))
        .unwrap();

    let payload = maker.verify_token(&token).unwrap();
    assert!(!payload.id.is_nil());
    assert_eq!(payload.phone, "+25470000001");
    assert_eq!(payload.user_id, 7);
    assert_eq!(payload.name, "Jane");
    assert_eq!(payload.company_id, 3);
    assert!((payload.issued_at - issued_at).num_seconds().abs() <= 1);
    assert!((payload.expired_at - (issued_at + Duration::minutes(1)))
        .num_seconds()
        .abs()
        <= 1);
}

#[test]
fn test_jwt_expired_token() {
    let maker = JwtMaker::new(&random_secret()).unwrap();
    assert_expired(&maker);
}

#[test]
fn test_paseto_expired_token() {
    let maker = PasetoMaker::new(&random_secret()).unwrap();
    assert_expired(&maker);
}

#[test]
fn test_jwt_rejects_alg_none() {
    // A token signed with the "none" algorithm must never verify, no matter
    // how well-formed its claims are
    let payload = Payload::new(&random_phone(), 7, "Jane", 3, Duration::minutes(1));

    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap());
    let unsigned = format!("{}.{}.", header, claims);

    let maker = JwtMaker::new(&random_secret()).unwrap();
    assert_eq!(maker.verify_token(&unsigned), Err(TokenError::Invalid));
}

#[test]
fn test_jwt_rejects_tampered_signature() {
    let maker = JwtMaker::new(&random_secret()).unwrap();
    let (token, _) = maker
        .create_token(&random_phone(), 7, "Jane", 3, Duration::minutes(1))
        .unwrap();

    let mut parts: Vec<String> = token.split('.').map(|s| s.to_string()).collect();
    assert_eq!(parts.len(), 3);

    let mut sig = parts[2].clone().into_bytes();
    let mid = sig.len() / 2;
    sig[mid] = if sig[mid] == b'A' { b'B' } else { b'A' };
    parts[2] = String::from_utf8(sig).unwrap();

    let tampered = parts.join(".");
    assert_ne!(tampered, token);
    assert_eq!(maker.verify_token(&tampered), Err(TokenError::Invalid));
}

#[test]
fn test_paseto_rejects_tampered_token() {
    let maker = PasetoMaker::new(&random_secret()).unwrap();
    let (token, _) = maker
        .create_token(&random_phone(), 7, "Jane", 3, Duration::minutes(1))
        .unwrap();

    // Flip one byte inside the encrypted payload section
    let mut bytes = token.clone().into_bytes();
    let idx = "v4.local.".len() + 10;
    bytes[idx] = if bytes[idx] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(bytes).unwrap();

    assert_ne!(tampered, token);
    assert_eq!(maker.verify_token(&tampered), Err(TokenError::Invalid));
}

#[test]
fn test_jwt_rejects_foreign_secret() {
    let maker = JwtMaker::new(&random_secret()).unwrap();
    let other = JwtMaker::new(&random_secret()).unwrap();

    let (token, _) = maker
        .create_token(&random_phone(), 7, "Jane", 3, Duration::minutes(1))
        .unwrap();

    assert_eq!(other.verify_token(&token), Err(TokenError::Invalid));
}

#[test]
fn test_paseto_rejects_foreign_secret() {
    let maker = PasetoMaker::new(&random_secret()).unwrap();
    let other = PasetoMaker::new(&random_secret()).unwrap();

    let (token, _) = maker
        .create_token(&random_phone(), 7, "Jane", 3, Duration::minutes(1))
        .unwrap();

    assert_eq!(other.verify_token(&token), Err(TokenError::Invalid));
}

#[test]
fn test_cross_format_tokens_are_invalid() {
    let secret = random_secret();
    let jwt = JwtMaker::new(&secret).unwrap();
    let paseto = PasetoMaker::new(&secret).unwrap();

    let (jwt_token, _) = jwt
        .create_token(&random_phone(), 7, "Jane", 3, Duration::minutes(1))
        .unwrap();
    let (paseto_token, _) = paseto
        .create_token(&random_phone(), 7, "Jane", 3, Duration::minutes(1))
        .unwrap();

    assert_eq!(paseto.verify_token(&jwt_token), Err(TokenError::Invalid));
    assert_eq!(jwt.verify_token(&paseto_token), Err(TokenError::Invalid));
}

#[test]
fn test_from_config_selects_paseto() {
    let config = create_test_config();
    let maker = token::from_config(&config).unwrap();

    let (token, _) = maker
        .create_token(&random_phone(), 7, "Jane", 3, Duration::minutes(1))
        .unwrap();
    assert!(token.starts_with("v4.local."));

    assert_round_trip(maker.as_ref());
}

#[test]
fn test_from_config_selects_jwt() {
    let mut config = create_test_config();
    config.security.token_provider = "jwt".to_string();
    let maker = token::from_config(&config).unwrap();

    let (token, _) = maker
        .create_token(&random_phone(), 7, "Jane", 3, Duration::minutes(1))
        .unwrap();
    assert_eq!(token.split('.').count(), 3);

    assert_round_trip(maker.as_ref());
}
