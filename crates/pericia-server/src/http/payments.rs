use crate::error::ApiError;
use crate::http::{ok_data, ok_empty, parse_id, parse_json_body};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use pericia_store::PaymentWrite;
use serde_json::Value;

const NOT_FOUND: &str = "Pagamento não encontrado";
const INVALID_PROCESS_ID: &str = "Identificador de processo inválido";

pub(crate) async fn list_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let proc_id = parse_id(&id, INVALID_PROCESS_ID)?;
    let payments = state
        .store
        .list_payments(proc_id)
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;
    Ok(ok_data(&payments))
}

pub(crate) async fn create_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let proc_id = parse_id(&id, INVALID_PROCESS_ID)?;
    let write: PaymentWrite = parse_json_body(&body)?;
    let payment = state
        .store
        .insert_payment(proc_id, &write)
        .map_err(|e| ApiError::from_store(e, "Processo não encontrado"))?;
    Ok((StatusCode::CREATED, ok_data(&payment)).into_response())
}

pub(crate) async fn update_handler(
    State(state): State<AppState>,
    Path((id, payment_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let proc_id = parse_id(&id, INVALID_PROCESS_ID)?;
    let payment_id = parse_id(&payment_id, "Identificador de pagamento inválido")?;
    let write: PaymentWrite = parse_json_body(&body)?;
    let payment = state
        .store
        .update_payment(proc_id, payment_id, &write)
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;
    Ok(ok_data(&payment))
}

pub(crate) async fn delete_handler(
    State(state): State<AppState>,
    Path((id, payment_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let proc_id = parse_id(&id, INVALID_PROCESS_ID)?;
    let payment_id = parse_id(&payment_id, "Identificador de pagamento inválido")?;
    state
        .store
        .delete_payment(proc_id, payment_id)
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;
    Ok(ok_empty())
}
