use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::http::{ok_empty, parse_json_body};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{HeaderMap, HeaderValue, SET_COOKIE};
use axum::response::{IntoResponse, Response};
use pericia_auth::{
    issue_session_token, serialize_cookie, unix_now, CookieOptions, SameSite, SESSION_COOKIE,
    SESSION_TTL_SECONDS,
};
use serde_json::Value;
use tracing::{info, warn};

pub(crate) async fn login_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let payload: Value = parse_json_body(&body)?;
    let (Some(username), Some(password)) = (
        payload.get("username").and_then(Value::as_str),
        payload.get("password").and_then(Value::as_str),
    ) else {
        return Err(ApiError::bad_request("Parâmetros ausentes"));
    };

    let Some(secret) = state
        .config
        .session_secret
        .as_deref()
        .map(str::trim)
        .filter(|secret| !secret.is_empty())
    else {
        return Err(misconfigured());
    };
    let expected = state
        .config
        .expected_credentials()
        .map_err(|_| misconfigured())?;

    if !expected.verify(username, password) {
        warn!(username, "tentativa de login recusada");
        return Err(ApiError::unauthorized("Credenciais inválidas"));
    }

    let token = issue_session_token(username, secret, unix_now())
        .map_err(|e| ApiError::internal(e.to_string()))?;
    let secure = cookie_secure(&state.config, &headers);
    if secure && forwarded_proto(&headers) != Some("https") {
        warn!("cookie Secure ativo sem x-forwarded-proto=https; confirme o TLS do proxy");
    }

    let cookie = serialize_cookie(
        SESSION_COOKIE,
        &token,
        &CookieOptions {
            http_only: true,
            secure,
            path: Some(String::from("/")),
            same_site: Some(SameSite::Lax),
            max_age: Some(SESSION_TTL_SECONDS),
        },
    );
    info!(username, "sessão iniciada");
    Ok(with_cookie(ok_empty().into_response(), &cookie)?)
}

pub(crate) async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let cookie = serialize_cookie(
        SESSION_COOKIE,
        "",
        &CookieOptions {
            http_only: true,
            secure: cookie_secure(&state.config, &headers),
            path: Some(String::from("/")),
            same_site: Some(SameSite::Lax),
            max_age: Some(0),
        },
    );
    Ok(with_cookie(ok_empty().into_response(), &cookie)?)
}

fn with_cookie(mut response: Response, cookie: &str) -> Result<Response, ApiError> {
    let value =
        HeaderValue::from_str(cookie).map_err(|e| ApiError::internal(e.to_string()))?;
    response.headers_mut().insert(SET_COOKIE, value);
    Ok(response)
}

fn misconfigured() -> ApiError {
    ApiError::internal(
        "Autenticação não configurada (defina AUTH_USERNAME, AUTH_PASSWORD e SESSION_SECRET).",
    )
}

fn forwarded_proto(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
}

/// `Secure` resolution: explicit override, then forwarded-protocol
/// detection, then secure-by-default in release builds.
fn cookie_secure(config: &ServerConfig, headers: &HeaderMap) -> bool {
    if let Some(explicit) = config.cookie_secure {
        return explicit;
    }
    if let Some(proto) = forwarded_proto(headers) {
        return proto == "https";
    }
    cfg!(not(debug_assertions))
}
