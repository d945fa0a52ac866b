use subtle::ConstantTimeEq;
use thiserror::Error;

/// The operator login was never configured. Distinct from a wrong password
/// so operators can tell "nobody set this up" apart from "bad credentials".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("credenciais de login não configuradas")]
pub struct CredentialsNotConfigured;

/// Expected operator credentials from configuration. Construction fails when
/// either value is absent or blank — a missing login is never treated as an
/// empty one.
#[derive(Clone)]
pub struct ExpectedCredentials {
    username: String,
    password: String,
}

impl ExpectedCredentials {
    pub fn new(
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self, CredentialsNotConfigured> {
        let username = username.unwrap_or_default();
        let password = password.unwrap_or_default();
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(CredentialsNotConfigured);
        }
        Ok(Self { username, password })
    }

    /// Best-effort constant-time acceptance check. Both comparisons always
    /// run; equal-length inputs compare without data-dependent branches.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = constant_time_str_eq(username, &self.username);
        let pass_ok = constant_time_str_eq(password, &self.password);
        user_ok & pass_ok
    }
}

impl std::fmt::Debug for ExpectedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpectedCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn constant_time_str_eq(given: &str, expected: &str) -> bool {
    given.len() == expected.len()
        && bool::from(given.as_bytes().ct_eq(expected.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_the_exact_pair() {
        let expected = ExpectedCredentials::new(
            Some(String::from("perito")),
            Some(String::from("s3nh4-forte")),
        )
        .expect("configured");
        assert!(expected.verify("perito", "s3nh4-forte"));
        assert!(!expected.verify("perito", "errada"));
        assert!(!expected.verify("outro", "s3nh4-forte"));
        assert!(!expected.verify("", ""));
    }

    #[test]
    fn absent_or_blank_configuration_is_a_distinct_error() {
        assert!(ExpectedCredentials::new(None, Some(String::from("x"))).is_err());
        assert!(
            ExpectedCredentials::new(Some(String::from("perito")), Some(String::from("  ")))
                .is_err()
        );
    }

    #[test]
    fn debug_output_redacts_the_password() {
        let expected =
            ExpectedCredentials::new(Some(String::from("perito")), Some(String::from("segredo")))
                .expect("configured");
        let debug = format!("{expected:?}");
        assert!(!debug.contains("segredo"));
    }
}
