use thiserror::Error;

/// Repository error taxonomy.
///
/// `Unavailable` is the fallback signal: callers serve mock data instead of
/// surfacing a hard failure. It must never be conflated with `NotFound`
/// (client asked for a row that does not exist) or `InvalidInput` (client
/// can correct and retry).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("armazenamento indisponível: {0}")]
    Unavailable(String),
    #[error("registro não encontrado")]
    NotFound,
    #[error("{0}")]
    InvalidInput(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => Self::NotFound,
            other => Self::Unavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_rows_maps_to_not_found_and_everything_else_to_unavailable() {
        assert!(matches!(
            StoreError::from(rusqlite::Error::QueryReturnedNoRows),
            StoreError::NotFound
        ));
        assert!(matches!(
            StoreError::from(rusqlite::Error::InvalidQuery),
            StoreError::Unavailable(_)
        ));
    }
}
