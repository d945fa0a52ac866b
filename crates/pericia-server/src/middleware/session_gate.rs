use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::header::COOKIE;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use pericia_auth::{login_redirect_target, session_from_cookie_header, unix_now};
use tracing::debug;

/// Guard for protected back-office pages. Runs before the page handler and
/// fails closed: no configured secret, no cookie, or an invalid token all
/// redirect to the login page carrying the originally requested path.
pub(crate) async fn page_gate_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let cookie_header = request
        .headers()
        .get(COOKIE)
        .and_then(|value| value.to_str().ok());
    let secret = state.config.session_secret.as_deref();

    let Some(session) = session_from_cookie_header(cookie_header, secret, unix_now()) else {
        let requested = request
            .uri()
            .path_and_query()
            .map_or("/", |pq| pq.as_str());
        debug!(requested, "acesso não autenticado, redirecionando para login");
        return Redirect::temporary(&login_redirect_target(requested)).into_response();
    };

    debug!(operator = %session.username, "sessão válida");
    next.run(request).await
}
