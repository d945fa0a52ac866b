#![forbid(unsafe_code)]
//! HTTP service for the perícia back-office.
//!
//! Routing layers, outermost first: request tracing on everything, the CORS
//! policy filter on the API (with the `OPTIONS` short-circuit), and the
//! session gate on protected pages. Handlers speak the `{ok, data|error}`
//! envelope; storage unavailability surfaces as a bare `204` so clients can
//! fall back to mock data.

mod config;
mod error;
mod http;
mod middleware;

use axum::routing::{get, post, put};
use axum::{middleware as axum_middleware, Router};
use pericia_store::{ProcessStore, StoreConfig};
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

pub use config::{
    ServerConfig, DEFAULT_ALLOWED_HEADERS, DEFAULT_ALLOWED_METHODS, DEFAULT_PORT,
};
pub use error::ApiError;

pub const CRATE_NAME: &str = "pericia-server";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub store: Arc<ProcessStore>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let store_config = StoreConfig {
            db_path: config.db_path.clone(),
        };
        Self {
            config: Arc::new(config),
            store: Arc::new(ProcessStore::new(store_config)),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/login", post(http::auth::login_handler))
        .route("/logout", post(http::auth::logout_handler))
        .route(
            "/processes",
            get(http::processes::list_handler).post(http::processes::create_handler),
        )
        .route(
            "/processes/{id}",
            get(http::processes::fetch_handler).put(http::processes::update_handler),
        )
        .route(
            "/processes/{id}/fees",
            get(http::fees::list_handler).post(http::fees::create_handler),
        )
        .route(
            "/processes/{id}/fees/{fee_id}",
            put(http::fees::update_handler).delete(http::fees::delete_handler),
        )
        .route(
            "/processes/{id}/payments",
            get(http::payments::list_handler).post(http::payments::create_handler),
        )
        .route(
            "/processes/{id}/payments/{payment_id}",
            put(http::payments::update_handler).delete(http::payments::delete_handler),
        )
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::cors::cors_middleware,
        ));

    let protected_pages = Router::new()
        .route("/processes", get(http::pages::processes_page))
        .route("/processes/{id}", get(http::pages::process_detail_page))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::session_gate::page_gate_middleware,
        ));

    Router::new()
        .route("/", get(http::pages::index_page))
        .route("/login", get(http::pages::login_page))
        .route("/healthz", get(http::pages::healthz_handler))
        .merge(protected_pages)
        .nest("/api", api)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .with_state(state)
}
