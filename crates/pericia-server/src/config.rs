use pericia_auth::{CredentialsNotConfigured, ExpectedCredentials};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_ALLOWED_HEADERS: &str =
    "Origin, X-Requested-With, Content-Type, Accept, Authorization";
pub const DEFAULT_ALLOWED_METHODS: &str = "GET,POST,PUT,PATCH,DELETE,OPTIONS";
pub const DEFAULT_PORT: u16 = 3000;

/// Environment-driven server configuration, read once at startup.
///
/// Auth values stay optional: an unconfigured login answers 500 at request
/// time with a descriptive message rather than falling back to an insecure
/// default, and a missing database path drives the 204 fallback signal.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub db_path: Option<PathBuf>,
    pub auth_username: Option<String>,
    pub auth_password: Option<String>,
    pub session_secret: Option<String>,
    pub cors_origin: Option<String>,
    pub cors_allowed_headers: String,
    pub cors_allowed_methods: String,
    pub cookie_secure: Option<bool>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            db_path: None,
            auth_username: None,
            auth_password: None,
            session_secret: None,
            cors_origin: None,
            cors_allowed_headers: String::from(DEFAULT_ALLOWED_HEADERS),
            cors_allowed_methods: String::from(DEFAULT_ALLOWED_METHODS),
            cookie_secure: None,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            port: env_u16("PERICIA_PORT", DEFAULT_PORT),
            db_path: env_opt("PERICIA_DB").map(PathBuf::from),
            auth_username: env_opt("AUTH_USERNAME"),
            auth_password: env_opt("AUTH_PASSWORD"),
            session_secret: env_opt("SESSION_SECRET"),
            cors_origin: env_opt("CORS_ORIGIN"),
            cors_allowed_headers: env_opt("CORS_ALLOWED_HEADERS")
                .unwrap_or_else(|| String::from(DEFAULT_ALLOWED_HEADERS)),
            cors_allowed_methods: env_opt("CORS_ALLOWED_METHODS")
                .unwrap_or_else(|| String::from(DEFAULT_ALLOWED_METHODS)),
            cookie_secure: env_bool_opt("COOKIE_SECURE"),
        }
    }

    pub fn expected_credentials(&self) -> Result<ExpectedCredentials, CredentialsNotConfigured> {
        ExpectedCredentials::new(self.auth_username.clone(), self.auth_password.clone())
    }

    #[must_use]
    pub fn auth_configured(&self) -> bool {
        self.expected_credentials().is_ok()
            && self
                .session_secret
                .as_deref()
                .is_some_and(|s| !s.trim().is_empty())
    }

    /// Startup contract: a partially configured login is an operator error;
    /// fully absent auth is allowed (the login endpoint reports it per
    /// request).
    pub fn validate_startup(&self) -> Result<(), String> {
        let set = [
            self.auth_username.is_some(),
            self.auth_password.is_some(),
            self.session_secret.is_some(),
        ];
        let configured = set.iter().filter(|v| **v).count();
        if configured != 0 && configured != set.len() {
            return Err(String::from(
                "autenticação parcialmente configurada: defina AUTH_USERNAME, AUTH_PASSWORD e \
                 SESSION_SECRET juntos",
            ));
        }
        Ok(())
    }
}

fn env_opt(name: &str) -> Option<String> {
    let value = env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u16>().ok())
        .unwrap_or(default)
}

fn env_bool_opt(name: &str) -> Option<bool> {
    match env::var(name).ok()?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
