mod http;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiError;
use crate::model::{ListQuery, ListResult, Pokemon, PokemonData};
use crate::pagination::total_pages;

pub use http::HttpPokemonApi;

/// The remote Pokemon collection.
///
/// The effect runner and the CRUD adapters only talk to this trait, so tests
/// can swap the HTTP client for an in-process fake.
#[async_trait]
pub trait PokemonApi: Send + Sync {
    /// Fetch one page, optionally filtered by `query.search`.
    async fn fetch_page(&self, query: &ListQuery) -> Result<ListResult, ApiError>;

    async fn get_by_id(&self, id: &str) -> Result<Pokemon, ApiError>;

    async fn create(&self, data: &PokemonData) -> Result<Pokemon, ApiError>;

    async fn update(&self, id: &str, data: &PokemonData) -> Result<Pokemon, ApiError>;

    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

/// Turn a raw list body into a [`ListResult`].
///
/// `items` must be an array of Pokemon and `total` a non-negative integer.
/// Missing or zero `page`/`limit` come from the query, and a missing
/// `totalPages` is derived from `total` and the requested limit.
pub fn normalize_page(body: Value, query: &ListQuery) -> Result<ListResult, ApiError> {
    let Value::Object(mut fields) = body else {
        return Err(ApiError::MalformedResponse);
    };

    let items = match fields.remove("items") {
        Some(items @ Value::Array(_)) => {
            serde_json::from_value::<Vec<Pokemon>>(items).map_err(|_| ApiError::MalformedResponse)?
        }
        _ => return Err(ApiError::MalformedResponse),
    };
    let total = fields
        .get("total")
        .and_then(Value::as_u64)
        .ok_or(ApiError::MalformedResponse)?;

    let positive = |key: &str| {
        fields
            .get(key)
            .and_then(Value::as_u64)
            .filter(|value| *value > 0)
            .and_then(|value| u32::try_from(value).ok())
    };

    Ok(ListResult {
        items,
        total,
        page: positive("page").unwrap_or(query.page),
        limit: positive("limit").unwrap_or(query.limit),
        total_pages: positive("totalPages").unwrap_or_else(|| total_pages(total, query.limit)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn query() -> ListQuery {
        ListQuery::new(2, 10, "")
    }

    #[test]
    fn test_full_response_is_kept() {
        let body = json!({
            "items": [{"id": "1", "name": "bulbasaur", "number": 1, "types": ["grass"], "ability": "overgrow", "imageUrl": ""}],
            "total": 31,
            "page": 3,
            "limit": 5,
            "totalPages": 7
        });
        let result = normalize_page(body, &query()).unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].name, "bulbasaur");
        assert_eq!((result.total, result.page, result.limit, result.total_pages), (31, 3, 5, 7));
    }

    #[test]
    fn test_missing_fields_filled_from_query() {
        let result = normalize_page(json!({"items": [], "total": 31}), &query()).unwrap();
        assert_eq!(
            result,
            ListResult {
                items: Vec::new(),
                total: 31,
                page: 2,
                limit: 10,
                total_pages: 4,
            }
        );
    }

    #[test]
    fn test_empty_page_is_not_an_error() {
        let result = normalize_page(json!({"items": [], "total": 0}), &query()).unwrap();
        assert!(result.items.is_empty());
        assert_eq!(result.total_pages, 0);
    }

    #[test]
    fn test_item_with_null_fields_is_kept() {
        let body = json!({
            "items": [
                {"id": "1", "name": "missingno", "number": 0, "types": [], "ability": "", "imageUrl": null},
                {"id": "2", "name": "ditto", "ability": null}
            ],
            "total": 2
        });
        let result = normalize_page(body, &query()).unwrap();
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].name, "missingno");
        assert!(result.items[0].image_url.is_empty());
        assert!(result.items[1].ability.is_empty());
    }

    #[test]
    fn test_missing_items_is_malformed() {
        assert_eq!(
            normalize_page(json!({"total": 3}), &query()),
            Err(ApiError::MalformedResponse)
        );
        assert_eq!(
            normalize_page(json!({"items": null, "total": 3}), &query()),
            Err(ApiError::MalformedResponse)
        );
    }

    #[test]
    fn test_non_numeric_total_is_malformed() {
        assert_eq!(
            normalize_page(json!({"items": [], "total": "3"}), &query()),
            Err(ApiError::MalformedResponse)
        );
        assert_eq!(
            normalize_page(json!({"items": [], "total": -1}), &query()),
            Err(ApiError::MalformedResponse)
        );
    }

    #[test]
    fn test_non_object_body_is_malformed() {
        assert_eq!(
            normalize_page(json!([1, 2, 3]), &query()),
            Err(ApiError::MalformedResponse)
        );
    }
}
