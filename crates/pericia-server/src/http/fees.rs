use crate::error::ApiError;
use crate::http::{ok_data, ok_empty, parse_id, parse_json_body};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use pericia_store::FeeWrite;
use serde_json::Value;

const NOT_FOUND: &str = "Proposta não encontrada";
const INVALID_PROCESS_ID: &str = "Identificador de processo inválido";

pub(crate) async fn list_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let proc_id = parse_id(&id, INVALID_PROCESS_ID)?;
    let fees = state
        .store
        .list_fees(proc_id)
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;
    Ok(ok_data(&fees))
}

pub(crate) async fn create_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let proc_id = parse_id(&id, INVALID_PROCESS_ID)?;
    let write: FeeWrite = parse_json_body(&body)?;
    let fee = state
        .store
        .insert_fee(proc_id, &write)
        .map_err(|e| ApiError::from_store(e, "Processo não encontrado"))?;
    Ok((StatusCode::CREATED, ok_data(&fee)).into_response())
}

pub(crate) async fn update_handler(
    State(state): State<AppState>,
    Path((id, fee_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let proc_id = parse_id(&id, INVALID_PROCESS_ID)?;
    let fee_id = parse_id(&fee_id, "Identificador de proposta inválido")?;
    let write: FeeWrite = parse_json_body(&body)?;
    let fee = state
        .store
        .update_fee(proc_id, fee_id, &write)
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;
    Ok(ok_data(&fee))
}

pub(crate) async fn delete_handler(
    State(state): State<AppState>,
    Path((id, fee_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let proc_id = parse_id(&id, INVALID_PROCESS_ID)?;
    let fee_id = parse_id(&fee_id, "Identificador de proposta inválido")?;
    state
        .store
        .delete_fee(proc_id, fee_id)
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;
    Ok(ok_empty())
}
