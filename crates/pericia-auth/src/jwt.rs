use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde_json::{json, Map, Value};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

/// Why a token failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum VerifyError {
    /// Not three dot-separated segments.
    Malformed,
    /// Recomputed signature does not match the one presented.
    Signature,
    /// `exp` lies in the past.
    Expired,
    /// Payload segment failed to decode or parse.
    Error,
}

impl VerifyError {
    #[must_use]
    pub fn reason(self) -> &'static str {
        match self {
            Self::Malformed => "malformed",
            Self::Signature => "signature",
            Self::Expired => "expired",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for VerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason())
    }
}

impl std::error::Error for VerifyError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenError(pub String);

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for TokenError {}

/// Seconds since the Unix epoch.
#[must_use]
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() as i64)
}

/// Issues an HS256 token: base64url(header) `.` base64url(payload) `.`
/// base64url(HMAC-SHA256 over the first two segments). `iat`/`exp` are
/// merged into the payload with `exp = now + ttl_seconds`.
pub fn issue_token(
    payload: &Map<String, Value>,
    secret: &str,
    ttl_seconds: i64,
    now: i64,
) -> Result<String, TokenError> {
    let header = json!({"alg": "HS256", "typ": "JWT"});

    let mut full_payload = payload.clone();
    full_payload.insert(String::from("iat"), json!(now));
    full_payload.insert(String::from("exp"), json!(now + ttl_seconds));

    let header_bytes =
        serde_json::to_vec(&header).map_err(|e| TokenError(e.to_string()))?;
    let payload_bytes =
        serde_json::to_vec(&Value::Object(full_payload)).map_err(|e| TokenError(e.to_string()))?;

    let data = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header_bytes),
        URL_SAFE_NO_PAD.encode(payload_bytes)
    );

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| TokenError(e.to_string()))?;
    mac.update(data.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{data}.{signature}"))
}

/// Verifies a token and returns its payload.
///
/// Pure in `(token, secret, now)`: signature is checked before the payload
/// is decoded, and `exp` is compared against the supplied clock, so an
/// expired token is rejected post hoc without any external state.
pub fn verify_token(
    token: &str,
    secret: &str,
    now: i64,
) -> Result<Map<String, Value>, VerifyError> {
    let parts: Vec<&str> = token.split('.').collect();
    let [header_part, payload_part, sig_part] = parts.as_slice() else {
        return Err(VerifyError::Malformed);
    };

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| VerifyError::Error)?;
    mac.update(format!("{header_part}.{payload_part}").as_bytes());
    let presented = URL_SAFE_NO_PAD
        .decode(sig_part)
        .map_err(|_| VerifyError::Signature)?;
    mac.verify_slice(&presented)
        .map_err(|_| VerifyError::Signature)?;

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload_part)
        .map_err(|_| VerifyError::Error)?;
    let payload: Value =
        serde_json::from_slice(&payload_bytes).map_err(|_| VerifyError::Error)?;
    let Value::Object(payload) = payload else {
        return Err(VerifyError::Error);
    };

    if let Some(exp) = payload.get("exp").and_then(Value::as_i64) {
        if now > exp {
            return Err(VerifyError::Expired);
        }
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn sub_payload(sub: &str) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert(String::from("sub"), json!(sub));
        payload
    }

    #[test]
    fn issued_token_verifies_immediately_and_carries_claims() {
        let now = 1_700_000_000;
        let token = issue_token(&sub_payload("perito"), SECRET, 60, now).expect("issue");
        let payload = verify_token(&token, SECRET, now).expect("verify");
        assert_eq!(payload.get("sub").and_then(Value::as_str), Some("perito"));
        assert_eq!(payload.get("iat").and_then(Value::as_i64), Some(now));
        assert_eq!(payload.get("exp").and_then(Value::as_i64), Some(now + 60));
    }

    #[test]
    fn token_expires_once_the_clock_passes_ttl() {
        let now = 1_700_000_000;
        let token = issue_token(&sub_payload("perito"), SECRET, 60, now).expect("issue");
        assert!(verify_token(&token, SECRET, now + 60).is_ok());
        assert_eq!(
            verify_token(&token, SECRET, now + 61),
            Err(VerifyError::Expired)
        );
    }

    #[test]
    fn tampering_with_the_payload_breaks_the_signature() {
        let now = 1_700_000_000;
        let token = issue_token(&sub_payload("perito"), SECRET, 60, now).expect("issue");
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let flipped = if parts[1].starts_with('A') { "B" } else { "A" };
        parts[1].replace_range(0..1, flipped);
        let tampered = parts.join(".");
        assert_eq!(
            verify_token(&tampered, SECRET, now),
            Err(VerifyError::Signature)
        );
    }

    #[test]
    fn wrong_secret_is_a_signature_failure() {
        let now = 1_700_000_000;
        let token = issue_token(&sub_payload("perito"), SECRET, 60, now).expect("issue");
        assert_eq!(
            verify_token(&token, "other-secret", now),
            Err(VerifyError::Signature)
        );
    }

    #[test]
    fn malformed_tokens_are_rejected_by_shape() {
        assert_eq!(
            verify_token("only.two", SECRET, 0),
            Err(VerifyError::Malformed)
        );
        assert_eq!(verify_token("", SECRET, 0), Err(VerifyError::Malformed));
        assert_eq!(
            verify_token("a.b.c.d", SECRET, 0),
            Err(VerifyError::Malformed)
        );
    }

    #[test]
    fn garbage_signature_segment_is_a_signature_failure() {
        let now = 1_700_000_000;
        let token = issue_token(&sub_payload("perito"), SECRET, 60, now).expect("issue");
        let data = token.rsplit_once('.').expect("segments").0;
        assert_eq!(
            verify_token(&format!("{data}.!!!"), SECRET, now),
            Err(VerifyError::Signature)
        );
    }

    #[test]
    fn segments_use_the_url_safe_alphabet_without_padding() {
        let token = issue_token(&sub_payload("perito"), SECRET, 60, 1_700_000_000).expect("issue");
        assert!(!token.contains('='));
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
    }
}
