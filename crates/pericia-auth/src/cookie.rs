use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Lax,
    Strict,
    None,
}

impl SameSite {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lax => "Lax",
            Self::Strict => "Strict",
            Self::None => "None",
        }
    }
}

/// Attributes for a `Set-Cookie` header. Only attributes explicitly set are
/// emitted.
#[derive(Debug, Clone, Default)]
pub struct CookieOptions {
    pub http_only: bool,
    pub secure: bool,
    pub path: Option<String>,
    pub same_site: Option<SameSite>,
    pub max_age: Option<i64>,
}

/// Builds a `Set-Cookie` header value:
/// `name=value; Path=...; HttpOnly; Secure; SameSite=...; Max-Age=...`.
#[must_use]
pub fn serialize_cookie(name: &str, value: &str, options: &CookieOptions) -> String {
    let mut parts = vec![format!("{name}={value}")];
    if let Some(path) = &options.path {
        parts.push(format!("Path={path}"));
    }
    if options.http_only {
        parts.push(String::from("HttpOnly"));
    }
    if options.secure {
        parts.push(String::from("Secure"));
    }
    if let Some(same_site) = options.same_site {
        parts.push(format!("SameSite={}", same_site.as_str()));
    }
    if let Some(max_age) = options.max_age {
        parts.push(format!("Max-Age={max_age}"));
    }
    parts.join("; ")
}

/// Parses a `Cookie` request header into a name→value map. Segments without
/// `=` are skipped; values are URL-decoded, falling back to the raw text
/// when decoding fails.
#[must_use]
pub fn parse_cookies(header: &str) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for part in header.split(';') {
        let Some((name, value)) = part.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let raw = value.trim();
        let decoded = urlencoding::decode(raw)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| raw.to_string());
        out.insert(name.to_string(), decoded);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_only_the_attributes_that_are_set() {
        let header = serialize_cookie(
            "session",
            "tok",
            &CookieOptions {
                http_only: true,
                secure: false,
                path: Some(String::from("/")),
                same_site: Some(SameSite::Lax),
                max_age: Some(28_800),
            },
        );
        assert_eq!(header, "session=tok; Path=/; HttpOnly; SameSite=Lax; Max-Age=28800");

        let bare = serialize_cookie("session", "tok", &CookieOptions::default());
        assert_eq!(bare, "session=tok");
    }

    #[test]
    fn expiring_cookie_uses_empty_value_and_zero_max_age() {
        let header = serialize_cookie(
            "session",
            "",
            &CookieOptions {
                http_only: true,
                path: Some(String::from("/")),
                same_site: Some(SameSite::Lax),
                max_age: Some(0),
                ..CookieOptions::default()
            },
        );
        assert_eq!(header, "session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    }

    #[test]
    fn parse_recovers_serialized_name_and_value() {
        let options = CookieOptions {
            http_only: true,
            path: Some(String::from("/")),
            ..CookieOptions::default()
        };
        let header = serialize_cookie("session", "abc.def.ghi", &options);
        let cookies = parse_cookies(&header);
        assert_eq!(cookies.get("session").map(String::as_str), Some("abc.def.ghi"));
    }

    #[test]
    fn parse_splits_trims_and_url_decodes() {
        let cookies = parse_cookies("a=1; session=tok%2Fx ;b=2");
        assert_eq!(cookies.get("a").map(String::as_str), Some("1"));
        assert_eq!(cookies.get("session").map(String::as_str), Some("tok/x"));
        assert_eq!(cookies.get("b").map(String::as_str), Some("2"));
    }

    #[test]
    fn segments_without_an_equals_sign_are_skipped() {
        let cookies = parse_cookies("garbage; a=1; ;");
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies.get("a").map(String::as_str), Some("1"));
    }

    #[test]
    fn undecodable_values_fall_back_to_raw_text() {
        let cookies = parse_cookies("a=%zz");
        assert_eq!(cookies.get("a").map(String::as_str), Some("%zz"));
    }
}
