#![forbid(unsafe_code)]
//! Stateless session authentication for the back-office.
//!
//! The session is a signed, time-limited token carried in an HTTP-only
//! cookie; there is no server-side session store. Nothing in this crate
//! touches HTTP types — the server wires these pieces into handlers and
//! middleware.

mod cookie;
mod credentials;
mod jwt;
mod session;

pub use cookie::{parse_cookies, serialize_cookie, CookieOptions, SameSite};
pub use credentials::{CredentialsNotConfigured, ExpectedCredentials};
pub use jwt::{issue_token, unix_now, verify_token, TokenError, VerifyError};
pub use session::{
    issue_session_token, login_redirect_target, session_from_cookie_header, Session,
    SESSION_COOKIE, SESSION_TTL_SECONDS,
};

pub const CRATE_NAME: &str = "pericia-auth";
