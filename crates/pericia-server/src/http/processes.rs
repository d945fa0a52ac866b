use crate::error::ApiError;
use crate::http::{ok_data, parse_id, parse_json_body};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::Json;
use pericia_model::JudicialProcess;
use pericia_store::ProcessDraft;
use serde_json::Value;

const NOT_FOUND: &str = "Processo não encontrado";

pub(crate) async fn list_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let processes = state
        .store
        .list_processes()
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;
    Ok(ok_data(&processes))
}

pub(crate) async fn create_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let body: JudicialProcess = parse_json_body(&body)?;
    let draft = ProcessDraft::from_body(&body).map_err(|e| ApiError::from_store(e, NOT_FOUND))?;
    let created = state
        .store
        .insert_process(&draft)
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;
    Ok(ok_data(&created))
}

pub(crate) async fn fetch_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "Identificador inválido")?;
    let process = state
        .store
        .fetch_process(id)
        .map_err(|e| ApiError::from_store(e, NOT_FOUND))?;
    Ok(ok_data(&process))
}

pub(crate) async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "Identificador inválido")?;
    let body: JudicialProcess = parse_json_body(&body)?;
    let draft = ProcessDraft::from_body(&body).map_err(|e| ApiError::from_store(e, NOT_FOUND))?;
    let updated = state
        .store
        .update_process(id, &draft)
        .map_err(|e| ApiError::from_store(e, "Processo não encontrado para atualização"))?;
    Ok(ok_data(&updated))
}
