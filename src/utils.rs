use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

use crate::types::TokenClaims;

const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the credential from an `Authorization` header value.
///
/// A leading `"Bearer "` is stripped when present; a header without the
/// prefix is taken whole. Returns `None` when nothing but whitespace remains.
///
/// # Example
///
/// ```
/// assert_eq!(bearer_token("Bearer abc"), Some("abc"));
/// assert_eq!(bearer_token("abc"), Some("abc"));
/// assert_eq!(bearer_token("Bearer "), None);
/// ```
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let token = header_value
        .strip_prefix(BEARER_PREFIX)
        .unwrap_or(header_value)
        .trim();

    if token.is_empty() { None } else { Some(token) }
}

/// Decodes the claims segment of a compact JWT without checking its signature.
///
/// Signature verification is left to the identity provider; this only reads
/// the payload so obviously wrong tokens can be turned away locally.
pub fn decode_token_claims(token: &str) -> Result<TokenClaims, String> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err("expected three dot-separated segments".to_string());
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| format!("claims segment is not base64url: {e}"))?;

    serde_json::from_slice(&bytes).map_err(|e| format!("claims segment is not JSON: {e}"))
}

/// Checks that `phone` is an E.164 number: `+`, a non-zero digit, then at
/// most fourteen more digits (`+14155552671`).
pub fn validate_phone_number(phone: &str) -> Result<(), String> {
    let valid = phone.strip_prefix('+').is_some_and(|digits| {
        (2..=15).contains(&digits.len())
            && digits.bytes().all(|b| b.is_ascii_digit())
            && !digits.starts_with('0')
    });

    if valid {
        Ok(())
    } else {
        Err(format!("'{phone}' is not in E.164 format (e.g. +14155552671)"))
    }
}
