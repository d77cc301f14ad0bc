//! Single-entity request wrappers with their own loading/error state
//!
//! Every adapter follows the same lifecycle, implemented once by
//! [`RequestStatus::run`]: mark loading and clear the old error, await one
//! request, then either hand back the data or store the error text and
//! return a sentinel. Nothing is retried.

use std::future::Future;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::PokemonApi;
use crate::error::ApiError;
use crate::model::{Pokemon, PokemonData};

/// Loading flag plus the last error message of one request slot
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RequestStatus {
    pub loading: bool,
    pub error: Option<String>,
}

impl RequestStatus {
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn succeed(&mut self) {
        self.loading = false;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Drive one request through the lifecycle. `loading` is false again
    /// once this returns, whichever way the request settled.
    pub async fn run<T, F>(&mut self, request: F) -> Option<T>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.begin();
        match request.await {
            Ok(data) => {
                self.succeed();
                Some(data)
            }
            Err(error) => {
                tracing::warn!(status = ?error.http_status(), %error, "pokemon request failed");
                self.fail(error.to_string());
                None
            }
        }
    }
}

pub struct CreateAdapter {
    api: Arc<dyn PokemonApi>,
    status: RequestStatus,
}

impl CreateAdapter {
    pub fn new(api: Arc<dyn PokemonApi>) -> Self {
        Self {
            api,
            status: RequestStatus::default(),
        }
    }

    pub async fn create(&mut self, data: &PokemonData) -> Option<Pokemon> {
        let created = self.status.run(self.api.create(data)).await;
        if let Some(pokemon) = &created {
            tracing::info!(id = %pokemon.id, name = %pokemon.name, "pokemon created");
        }
        created
    }

    pub fn loading(&self) -> bool {
        self.status.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }
}

pub struct DetailAdapter {
    api: Arc<dyn PokemonApi>,
    status: RequestStatus,
}

impl DetailAdapter {
    pub fn new(api: Arc<dyn PokemonApi>) -> Self {
        Self {
            api,
            status: RequestStatus::default(),
        }
    }

    pub async fn get_by_id(&mut self, id: &str) -> Option<Pokemon> {
        self.status.run(self.api.get_by_id(id)).await
    }

    pub fn loading(&self) -> bool {
        self.status.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }
}

pub struct UpdateAdapter {
    api: Arc<dyn PokemonApi>,
    status: RequestStatus,
}

impl UpdateAdapter {
    pub fn new(api: Arc<dyn PokemonApi>) -> Self {
        Self {
            api,
            status: RequestStatus::default(),
        }
    }

    pub async fn update(&mut self, id: &str, data: &PokemonData) -> Option<Pokemon> {
        let updated = self.status.run(self.api.update(id, data)).await;
        if updated.is_some() {
            tracing::info!(id, "pokemon updated");
        }
        updated
    }

    pub fn loading(&self) -> bool {
        self.status.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }
}

pub struct DeleteAdapter {
    api: Arc<dyn PokemonApi>,
    status: RequestStatus,
}

impl DeleteAdapter {
    pub fn new(api: Arc<dyn PokemonApi>) -> Self {
        Self {
            api,
            status: RequestStatus::default(),
        }
    }

    /// Returns whether the server deleted the entry.
    pub async fn delete(&mut self, id: &str) -> bool {
        let deleted = self.status.run(self.api.delete(id)).await.is_some();
        if deleted {
            tracing::info!(id, "pokemon deleted");
        }
        deleted
    }

    pub fn loading(&self) -> bool {
        self.status.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_success_clears_state() {
        let mut status = RequestStatus {
            loading: false,
            error: Some("old".into()),
        };
        let value = status.run(async { Ok::<_, ApiError>(7) }).await;
        assert_eq!(value, Some(7));
        assert_eq!(status, RequestStatus::default());
    }

    #[tokio::test]
    async fn test_run_failure_records_message() {
        let mut status = RequestStatus::default();
        let value: Option<u8> = status.run(async { Err(ApiError::NotFound) }).await;
        assert_eq!(value, None);
        assert!(!status.loading);
        assert_eq!(status.error(), Some("Pokémon not found"));
    }

    #[test]
    fn test_begin_clears_previous_error() {
        let mut status = RequestStatus::default();
        status.fail("boom");
        status.begin();
        assert!(status.loading);
        assert_eq!(status.error(), None);
    }
}
