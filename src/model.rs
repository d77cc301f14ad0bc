//! Wire and domain types for the Pokemon collection

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// A Pokemon as stored by the server
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pokemon {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub types: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ability: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
}

/// Optional wire fields may be missing or `null`; both read as the default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Pokemon {
    /// The editable subset, used to seed the edit form
    pub fn data(&self) -> PokemonData {
        PokemonData {
            name: self.name.clone(),
            number: self.number,
            types: self.types.clone(),
            ability: self.ability.clone(),
        }
    }
}

/// Body of create and update requests. The server assigns `id` and `imageUrl`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonData {
    pub name: String,
    pub number: u32,
    pub types: Vec<String>,
    pub ability: String,
}

/// One page request against the list endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    /// Trimmed search term; `None` when blank so the parameter is omitted.
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new(page: u32, limit: u32, search: &str) -> Self {
        let search = search.trim();
        Self {
            page,
            limit,
            search: (!search.is_empty()).then(|| search.to_string()),
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

/// A normalized page from the list endpoint
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListResult {
    pub items: Vec<Pokemon>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// Title-case a hyphenated name: `mr-mime` becomes `Mr Mime`.
pub fn format_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
