use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use locshare::types::ListScope;
use locshare::utils::*;

// Helper function to build an unsigned token around the given claims
fn create_test_token(claims: &str) -> String {
    format!(
        "{}.{}.signature",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","kid":"test"}"#),
        URL_SAFE_NO_PAD.encode(claims)
    )
}

#[test]
fn test_bearer_token_strips_prefix() {
    assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
    assert_eq!(bearer_token("Bearer   padded  "), Some("padded"));
}

#[test]
fn test_bearer_token_without_prefix() {
    // Other schemes are not recognised; the whole value is the token.
    assert_eq!(bearer_token("abc"), Some("abc"));
    assert_eq!(bearer_token("bearer abc"), Some("bearer abc"));
}

#[test]
fn test_bearer_token_empty() {
    assert_eq!(bearer_token(""), None);
    assert_eq!(bearer_token("Bearer "), None);
    assert_eq!(bearer_token("Bearer \t "), None);
    assert_eq!(bearer_token("   "), None);
}

#[test]
fn test_decode_token_claims() {
    let token = create_test_token(
        r#"{"sub":"uid-42","aud":"demo-project","iss":"https://securetoken.google.com/demo-project","exp":1900000000,"phone_number":"+17206453833"}"#,
    );

    let claims = decode_token_claims(&token).unwrap();

    assert_eq!(claims.sub, "uid-42");
    assert_eq!(claims.aud, "demo-project");
    assert_eq!(claims.iss, "https://securetoken.google.com/demo-project");
    assert_eq!(claims.exp, 1_900_000_000);
}

#[test]
fn test_decode_token_claims_accepts_padding() {
    let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"sub":"a"}"#);
    let token = format!("h.{payload}.s");

    assert_eq!(decode_token_claims(&token).unwrap().sub, "a");
}

#[test]
fn test_decode_token_claims_wrong_segment_count() {
    for token in ["", "one", "one.two", "a.b.c.d"] {
        let err = decode_token_claims(token).unwrap_err();
        assert!(err.contains("three"), "token {token:?}: {err}");
    }
}

#[test]
fn test_decode_token_claims_bad_payload() {
    let err = decode_token_claims("head.!!!.sig").unwrap_err();
    assert!(err.contains("base64url"));

    let not_json = format!("head.{}.sig", URL_SAFE_NO_PAD.encode("plain text"));
    let err = decode_token_claims(&not_json).unwrap_err();
    assert!(err.contains("JSON"));
}

#[test]
fn test_list_scope_parsing() {
    assert_eq!("all".parse::<ListScope>(), Ok(ListScope::All));
    assert_eq!(" Subject ".parse::<ListScope>(), Ok(ListScope::Subject));
    assert!("everyone".parse::<ListScope>().is_err());
    assert_eq!(ListScope::default(), ListScope::All);
    assert_eq!(ListScope::Subject.to_string(), "subject");
}

#[test]
fn test_validate_phone_number_accepts_e164() {
    assert!(validate_phone_number("+14155552671").is_ok());
    assert!(validate_phone_number("+17206453833").is_ok());
    assert!(validate_phone_number("+12").is_ok());
    assert!(validate_phone_number("+123456789012345").is_ok());
}

#[test]
fn test_validate_phone_number_rejects_other_formats() {
    // missing plus
    assert!(validate_phone_number("14155552671").is_err());
    // leading zero country code
    assert!(validate_phone_number("+04155552671").is_err());
    // too short, too long
    assert!(validate_phone_number("+1").is_err());
    assert!(validate_phone_number("+1234567890123456").is_err());
    // separators
    assert!(validate_phone_number("+1 415 555 2671").is_err());
    assert!(validate_phone_number("+1-415-555-2671").is_err());
    assert!(validate_phone_number("").is_err());
    assert!(validate_phone_number("+").is_err());

    let err = validate_phone_number("555").unwrap_err();
    assert!(err.contains("E.164"));
}
