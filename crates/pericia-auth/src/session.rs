use crate::cookie::parse_cookies;
use crate::jwt::{issue_token, verify_token, TokenError};
use serde_json::{json, Map, Value};

/// Name of the session cookie. The token is the only session state.
pub const SESSION_COOKIE: &str = "session";

/// Sessions last eight hours; expiry is enforced at verification time.
pub const SESSION_TTL_SECONDS: i64 = 8 * 60 * 60;

/// A verified operator session derived from the cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
}

/// Issues the signed session token with `sub = username`.
pub fn issue_session_token(username: &str, secret: &str, now: i64) -> Result<String, TokenError> {
    let mut payload = Map::new();
    payload.insert(String::from("sub"), json!(username));
    issue_token(&payload, secret, SESSION_TTL_SECONDS, now)
}

/// Gate decision for protected pages. Fails closed: an unconfigured secret,
/// a missing cookie, or a token that does not verify all mean "not
/// authenticated".
#[must_use]
pub fn session_from_cookie_header(
    cookie_header: Option<&str>,
    secret: Option<&str>,
    now: i64,
) -> Option<Session> {
    let secret = secret?.trim();
    if secret.is_empty() {
        return None;
    }
    let cookies = parse_cookies(cookie_header?);
    let token = cookies.get(SESSION_COOKIE)?;
    let payload = verify_token(token, secret, now).ok()?;
    let username = payload
        .get("sub")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Some(Session { username })
}

/// Login route target carrying the originally requested path, so the client
/// can return after authenticating.
#[must_use]
pub fn login_redirect_target(requested_path: &str) -> String {
    let path = if requested_path.is_empty() {
        "/"
    } else {
        requested_path
    };
    format!("/login?returnTo={}", urlencoding::encode(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "gate-secret";

    #[test]
    fn valid_cookie_yields_the_operator_session() {
        let now = 1_700_000_000;
        let token = issue_session_token("perito", SECRET, now).expect("issue");
        let header = format!("theme=dark; {SESSION_COOKIE}={token}");
        let session = session_from_cookie_header(Some(&header), Some(SECRET), now);
        assert_eq!(
            session,
            Some(Session {
                username: String::from("perito")
            })
        );
    }

    #[test]
    fn gate_fails_closed_without_secret_cookie_or_valid_token() {
        let now = 1_700_000_000;
        let token = issue_session_token("perito", SECRET, now).expect("issue");
        let header = format!("{SESSION_COOKIE}={token}");

        assert!(session_from_cookie_header(Some(&header), None, now).is_none());
        assert!(session_from_cookie_header(Some(&header), Some("  "), now).is_none());
        assert!(session_from_cookie_header(None, Some(SECRET), now).is_none());
        assert!(session_from_cookie_header(Some("other=1"), Some(SECRET), now).is_none());
        assert!(
            session_from_cookie_header(Some(&header), Some(SECRET), now + SESSION_TTL_SECONDS + 1)
                .is_none()
        );
        assert!(session_from_cookie_header(Some(&header), Some("wrong"), now).is_none());
    }

    #[test]
    fn redirect_target_url_encodes_the_requested_path() {
        assert_eq!(
            login_redirect_target("/processes/12"),
            "/login?returnTo=%2Fprocesses%2F12"
        );
        assert_eq!(login_redirect_target(""), "/login?returnTo=%2F");
    }
}
