use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{normalize_page, PokemonApi};
use crate::error::{ApiError, CONFLICT_FALLBACK};
use crate::model::{ListQuery, ListResult, Pokemon, PokemonData};

/// reqwest-backed client for the `/pokemons` REST resource
pub struct HttpPokemonApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPokemonApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/pokemons", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/pokemons/{}", self.base_url, urlencoding::encode(id))
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(ApiError::from)
}

/// Pull `message` out of an error body, if the server sent one.
async fn error_message(response: Response) -> Option<String> {
    let body: Value = response.json().await.ok()?;
    body.get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

#[async_trait::async_trait]
impl PokemonApi for HttpPokemonApi {
    async fn fetch_page(&self, query: &ListQuery) -> Result<ListResult, ApiError> {
        let url = self.collection_url();
        tracing::debug!(%url, page = query.page, limit = query.limit, search = ?query.search, "fetching pokemon page");

        let response = self
            .client
            .get(url)
            .query(&query.query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status_with_reason(status));
        }

        let body: Value = read_json(response).await?;
        normalize_page(body, query)
    }

    async fn get_by_id(&self, id: &str) -> Result<Pokemon, ApiError> {
        tracing::debug!(id, "fetching pokemon");
        let response = self.client.get(self.item_url(id)).send().await?;

        match response.status() {
            status if status.is_success() => read_json(response).await,
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            status => Err(ApiError::status(status)),
        }
    }

    async fn create(&self, data: &PokemonData) -> Result<Pokemon, ApiError> {
        tracing::debug!(name = %data.name, number = data.number, "creating pokemon");
        let response = self
            .client
            .post(self.collection_url())
            .json(data)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => read_json(response).await,
            StatusCode::BAD_REQUEST => Err(ApiError::InvalidInput),
            StatusCode::CONFLICT => {
                let message = error_message(response)
                    .await
                    .unwrap_or_else(|| CONFLICT_FALLBACK.to_string());
                Err(ApiError::Conflict(message))
            }
            status => Err(ApiError::status(status)),
        }
    }

    async fn update(&self, id: &str, data: &PokemonData) -> Result<Pokemon, ApiError> {
        tracing::debug!(id, name = %data.name, "updating pokemon");
        let response = self
            .client
            .patch(self.item_url(id))
            .json(data)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return read_json(response).await;
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message: format!(
                "Error updating pokemon: {} {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                body
            ),
        })
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        tracing::debug!(id, "deleting pokemon");
        let response = self.client.delete(self.item_url(id)).send().await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            status => Err(ApiError::status(status)),
        }
    }
}
