#![forbid(unsafe_code)]
//! Client boundary consumed by UI pages and the CLI.
//!
//! Wraps the process API and keeps the caller usable offline: a network
//! failure or the server's explicit `204` unavailability signal is served
//! transparently from an injectable in-memory mock store. A raw transport
//! error never reaches the caller — every operation resolves to data, an
//! empty dataset, or a display-ready message.

mod mock;

use pericia_model::{JudicialProcess, Payment, NEW_PROCESS_ID};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, warn};

pub use mock::MockStore;

pub const CRATE_NAME: &str = "pericia-client";

/// Display-ready failure surfaced to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ServiceError(pub String);

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub struct ProcessService {
    base_url: String,
    http: reqwest::Client,
    mock: MockStore,
}

impl ProcessService {
    /// `base_url` without a trailing slash, e.g. `http://localhost:3000`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, mock: MockStore) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
            mock,
        }
    }

    #[must_use]
    pub fn with_demo_fallback(base_url: impl Into<String>) -> Self {
        Self::new(base_url, MockStore::seeded())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Lists processes. Network failures and the unavailability signal fall
    /// back to the mock dataset; an empty list from a healthy backend stays
    /// an empty list.
    pub async fn get_processes(&self) -> Vec<JudicialProcess> {
        let request = self.http.get(self.url("/api/processes")).send();
        let response = match request.await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "API inacessível, usando dados locais");
                return self.mock.list();
            }
        };
        if response.status() == StatusCode::NO_CONTENT {
            debug!("armazenamento indisponível, usando dados locais");
            return self.mock.list();
        }
        if !response.status().is_success() {
            warn!(status = %response.status(), "falha ao listar processos, usando dados locais");
            return self.mock.list();
        }
        match response.json::<Envelope<Vec<JudicialProcess>>>().await {
            Ok(Envelope {
                ok: true,
                data: Some(data),
                ..
            }) => data,
            _ => self.mock.list(),
        }
    }

    /// Fetches one process. `Ok(None)` means the backend answered and the id
    /// does not exist; fallback applies only when the backend is absent.
    pub async fn get_process_by_id(
        &self,
        id: &str,
    ) -> Result<Option<JudicialProcess>, ServiceError> {
        let request = self.http.get(self.url(&format!("/api/processes/{id}"))).send();
        let response = match request.await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, id, "API inacessível, usando dados locais");
                return Ok(self.mock.find(id));
            }
        };
        match response.status() {
            StatusCode::NO_CONTENT => Ok(self.mock.find(id)),
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                match response.json::<Envelope<JudicialProcess>>().await {
                    Ok(Envelope {
                        ok: true,
                        data: Some(data),
                        ..
                    }) => Ok(Some(data)),
                    _ => Ok(None),
                }
            }
            _ => Err(ServiceError(read_api_error(response).await)),
        }
    }

    /// Payments of one process; empty on a healthy-but-empty backend, mock
    /// payments when the backend is absent.
    pub async fn get_process_payments(&self, process_id: &str) -> Vec<Payment> {
        if process_id.is_empty() {
            return Vec::new();
        }
        let url = self.url(&format!("/api/processes/{process_id}/payments"));
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, process_id, "API inacessível, usando pagamentos locais");
                return self.mock.payments_of(process_id);
            }
        };
        if response.status() == StatusCode::NO_CONTENT {
            return self.mock.payments_of(process_id);
        }
        if !response.status().is_success() {
            warn!(status = %response.status(), process_id, "falha ao buscar pagamentos");
            return Vec::new();
        }
        match response.json::<Envelope<Vec<Payment>>>().await {
            Ok(Envelope {
                ok: true,
                data: Some(data),
                ..
            }) => data,
            _ => Vec::new(),
        }
    }

    /// Saves a process: update when it carries a persistent id, create
    /// otherwise. The authoritative id always comes from storage when it is
    /// reachable; only the fallback path allocates a client-visible
    /// temporary id.
    pub async fn save_process(
        &self,
        process: &JudicialProcess,
    ) -> Result<JudicialProcess, ServiceError> {
        if process.is_new() {
            self.create_process(process).await
        } else {
            self.update_process(process).await
        }
    }

    async fn update_process(
        &self,
        process: &JudicialProcess,
    ) -> Result<JudicialProcess, ServiceError> {
        let url = self.url(&format!("/api/processes/{}", process.id));
        let response = match self.http.put(url).json(process).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, id = %process.id, "API inacessível, atualizando dados locais");
                self.mock.replace(process);
                return Ok(process.clone());
            }
        };
        if response.status() == StatusCode::NO_CONTENT {
            self.mock.replace(process);
            return Ok(process.clone());
        }
        if response.status().is_success() {
            return match response.json::<Envelope<JudicialProcess>>().await {
                Ok(Envelope {
                    ok: true,
                    data: Some(data),
                    ..
                }) => Ok(data),
                _ => Ok(process.clone()),
            };
        }
        Err(ServiceError(read_api_error(response).await))
    }

    async fn create_process(
        &self,
        process: &JudicialProcess,
    ) -> Result<JudicialProcess, ServiceError> {
        let response = match self
            .http
            .post(self.url("/api/processes"))
            .json(process)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "API inacessível, criando processo local");
                return Ok(self.insert_fallback(process));
            }
        };
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(self.insert_fallback(process));
        }
        if response.status().is_success() {
            return match response.json::<Envelope<JudicialProcess>>().await {
                Ok(Envelope {
                    ok: true,
                    data: Some(data),
                    ..
                }) => Ok(data),
                _ => {
                    // Backend answered success without a body worth using;
                    // keep the caller's data but never leak the sentinel id.
                    let mut created = process.clone();
                    if created.is_new() {
                        created.id = fallback_id();
                    }
                    Ok(created)
                }
            };
        }
        Err(ServiceError(read_api_error(response).await))
    }

    fn insert_fallback(&self, process: &JudicialProcess) -> JudicialProcess {
        let mut created = process.clone();
        created.id = fallback_id();
        self.mock.insert(created.clone());
        created
    }
}

/// Millisecond timestamp as the temporary id for fallback-created processes.
fn fallback_id() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or_else(|_| String::from(NEW_PROCESS_ID), |d| d.as_millis().to_string())
}

/// Best display message for a failed response: the envelope's `error`, then
/// `message`, then the HTTP status.
async fn read_api_error(response: Response) -> String {
    let status = response.status();
    if let Ok(envelope) = response.json::<Envelope<serde_json::Value>>().await {
        if let Some(error) = envelope.error {
            return error;
        }
        if let Some(message) = envelope.message {
            return message;
        }
    }
    status
        .canonical_reason()
        .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string)
}
