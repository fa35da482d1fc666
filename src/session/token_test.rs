use super::*;
use crate::session::error::ApiError;
use crate::session::test_support::token_with_exp;

#[test]
fn decode_claims_reads_subject_and_expiry() {
    let token = token_with_exp(42, 1_900_000_000);
    let claims = decode_claims(&token).expect("claims");
    assert_eq!(claims.sub, 42);
    assert_eq!(claims.exp, 1_900_000_000);
}

#[test]
fn decode_claims_accepts_string_subject() {
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

    let payload = URL_SAFE_NO_PAD.encode(r#"{"sub":"7","exp":100}"#);
    let token = format!("h.{payload}.s");
    let claims = decode_claims(&token).expect("claims");
    assert_eq!(claims.sub, 7);
}

#[test]
fn decode_claims_rejects_wrong_segment_count() {
    assert!(matches!(decode_claims("only.two"), Err(ApiError::Decode(_))));
    assert!(matches!(decode_claims("a.b.c.d"), Err(ApiError::Decode(_))));
}

#[test]
fn decode_claims_rejects_bad_base64() {
    assert!(matches!(decode_claims("h.!!!.s"), Err(ApiError::Decode(_))));
}

#[test]
fn decode_claims_rejects_non_claim_payload() {
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

    let payload = URL_SAFE_NO_PAD.encode(r#"{"not":"claims"}"#);
    assert!(matches!(
        decode_claims(&format!("h.{payload}.s")),
        Err(ApiError::Decode(_))
    ));
}

#[test]
fn expiry_is_inclusive_at_the_boundary() {
    let claims = Claims { sub: 1, exp: 1000, username: None, email: None };
    assert!(claims.is_expired(1000));
    assert!(claims.is_expired(1001));
    assert!(!claims.is_expired(999));
}

#[test]
fn wall_clock_is_sane() {
    // 2020-01-01 as a floor; catches a zeroed or negative clock.
    assert!(now_epoch_secs() > 1_577_836_800);
}
