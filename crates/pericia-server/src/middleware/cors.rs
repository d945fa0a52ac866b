use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::header::{HeaderMap, HeaderValue, VARY};
use axum::http::{Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Cross-origin policy, applied before any handler logic on the API router.
///
/// `OPTIONS` preflights are answered `200` with no body right here — a
/// short-circuit, not a pass-through. Every response gets the policy
/// headers, including error responses from inner handlers.
pub(crate) async fn cors_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let origin = allowed_origin(&state, request.headers());
    let preflight = request.method() == Method::OPTIONS;

    let mut response = if preflight {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    insert_header(headers, "access-control-allow-origin", &origin);
    headers.insert(VARY, HeaderValue::from_static("Origin"));
    headers.insert(
        "access-control-allow-credentials",
        HeaderValue::from_static("true"),
    );
    insert_header(
        headers,
        "access-control-allow-headers",
        &state.config.cors_allowed_headers,
    );
    insert_header(
        headers,
        "access-control-allow-methods",
        &state.config.cors_allowed_methods,
    );
    response
}

fn insert_header(headers: &mut HeaderMap, name: &'static str, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(name, value);
    }
}

/// Allowed-origin precedence: configured origin, the request's own `Origin`
/// reflected back, a `proto://host` synthesized from forwarded headers, and
/// finally the wildcard.
fn allowed_origin(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(configured) = &state.config.cors_origin {
        return configured.clone();
    }
    if let Some(origin) = header_str(headers, "origin") {
        return origin.to_string();
    }
    if let Some(host) = header_str(headers, "host") {
        let proto = header_str(headers, "x-forwarded-proto").unwrap_or(default_proto());
        return format!("{proto}://{host}");
    }
    String::from("*")
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

const fn default_proto() -> &'static str {
    if cfg!(debug_assertions) { "http" } else { "https" }
}
