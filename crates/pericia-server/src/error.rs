use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use pericia_store::StoreError;
use serde_json::json;
use tracing::warn;

/// Handler-level error carrying the wire status and a display-ready message.
///
/// Storage unavailability is special-cased: it renders as `204 No Content`
/// with an empty body — the fallback signal — and must stay distinct from
/// 404/400, which are client-correctable.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            message: String::new(),
        }
    }

    /// Maps a repository error, supplying the entity-specific not-found
    /// message.
    #[must_use]
    pub fn from_store(err: StoreError, not_found_message: &str) -> Self {
        match err {
            StoreError::Unavailable(reason) => {
                warn!(%reason, "armazenamento indisponível, sinalizando 204");
                Self::unavailable()
            }
            StoreError::NotFound => Self::not_found(not_found_message),
            StoreError::InvalidInput(message) => Self::bad_request(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status == StatusCode::NO_CONTENT {
            return StatusCode::NO_CONTENT.into_response();
        }
        (
            self.status,
            Json(json!({"ok": false, "error": self.message})),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_renders_as_bare_204() {
        let response = ApiError::from_store(
            StoreError::Unavailable(String::from("sem conexão")),
            "Não encontrado",
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn not_found_and_invalid_input_keep_their_statuses() {
        let response =
            ApiError::from_store(StoreError::NotFound, "Processo não encontrado").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::from_store(
            StoreError::InvalidInput(String::from("Data de início inválida")),
            "Processo não encontrado",
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
