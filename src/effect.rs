//! Effects - side effects declared by the reducer

use std::sync::Arc;

use crate::action::Action;
use crate::adapters::{CreateAdapter, DeleteAdapter, DetailAdapter, UpdateAdapter};
use crate::api::PokemonApi;
use crate::list::PageRequest;
use crate::model::{ListQuery, PokemonData};

/// Requests the effect handler turns into tasks
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch one list page; the result is tagged with `generation`
    FetchList { generation: u64, query: ListQuery },
    LoadPokemon { id: String },
    CreatePokemon { data: PokemonData },
    UpdatePokemon { id: String, data: PokemonData },
    DeletePokemon { id: String },
}

impl Effect {
    /// Task slot for this effect. Spawning into an occupied slot cancels the
    /// task already running there, so there is at most one list fetch and
    /// one detail load in flight.
    pub fn task_key(&self) -> String {
        match self {
            Effect::FetchList { .. } => "list".to_string(),
            Effect::LoadPokemon { .. } => "detail".to_string(),
            Effect::CreatePokemon { .. } => "create".to_string(),
            Effect::UpdatePokemon { id, .. } => format!("update_{id}"),
            Effect::DeletePokemon { id } => format!("delete_{id}"),
        }
    }
}

impl From<PageRequest> for Effect {
    fn from(request: PageRequest) -> Self {
        Effect::FetchList {
            generation: request.generation,
            query: request.query,
        }
    }
}

/// Run one effect to completion and report the outcome as an action.
pub async fn perform(api: Arc<dyn PokemonApi>, effect: Effect) -> Action {
    match effect {
        Effect::FetchList { generation, query } => match api.fetch_page(&query).await {
            Ok(result) => Action::ListDidLoad { generation, result },
            Err(error) => {
                tracing::warn!(
                    generation,
                    status = ?error.http_status(),
                    %error,
                    "list fetch failed"
                );
                Action::ListDidError {
                    generation,
                    error: error.to_string(),
                }
            }
        },
        Effect::LoadPokemon { id } => {
            let mut adapter = DetailAdapter::new(api);
            match adapter.get_by_id(&id).await {
                Some(pokemon) => Action::DetailDidLoad(pokemon),
                None => Action::DetailDidError {
                    error: adapter_error(adapter.error()),
                    id,
                },
            }
        }
        Effect::CreatePokemon { data } => {
            let mut adapter = CreateAdapter::new(api);
            match adapter.create(&data).await {
                Some(pokemon) => Action::CreateDidLoad(pokemon),
                None => Action::CreateDidError(adapter_error(adapter.error())),
            }
        }
        Effect::UpdatePokemon { id, data } => {
            let mut adapter = UpdateAdapter::new(api);
            match adapter.update(&id, &data).await {
                Some(pokemon) => Action::UpdateDidLoad(pokemon),
                None => Action::UpdateDidError(adapter_error(adapter.error())),
            }
        }
        Effect::DeletePokemon { id } => {
            let mut adapter = DeleteAdapter::new(api);
            if adapter.delete(&id).await {
                Action::DeleteDidLoad(id)
            } else {
                Action::DeleteDidError(adapter_error(adapter.error()))
            }
        }
    }
}

fn adapter_error(error: Option<&str>) -> String {
    error.unwrap_or("Unknown error").to_string()
}
