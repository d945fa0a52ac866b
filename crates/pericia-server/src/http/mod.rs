pub(crate) mod auth;
pub(crate) mod fees;
pub(crate) mod pages;
pub(crate) mod payments;
pub(crate) mod processes;

use crate::error::ApiError;
use axum::body::Bytes;
use axum::response::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

/// Success envelope: `{"ok": true, "data": ...}`.
pub(crate) fn ok_data<T: Serialize>(data: &T) -> Json<Value> {
    Json(json!({"ok": true, "data": data}))
}

pub(crate) fn ok_empty() -> Json<Value> {
    Json(json!({"ok": true}))
}

/// Body parsing stays inside the envelope contract: malformed JSON is a 400
/// with a display message, never a transport-level error page.
pub(crate) fn parse_json_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|_| ApiError::bad_request("Requisição inválida"))
}

pub(crate) fn parse_id(raw: &str, message: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::bad_request(message))
}
