//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{DebugSection, DebugState, ron_string};

use crate::adapters::RequestStatus;
use crate::config::PaginationConfig;
use crate::form::{FormMode, PokemonForm};
use crate::list::ListView;
use crate::model::Pokemon;

/// Spinner frame interval
pub const TICK_MS: u64 = 120;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Screen {
    #[default]
    List,
    Detail,
    Form,
}

/// Text being typed into the search bar. Only becomes the list's active
/// filter when submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    pub pagination_config: PaginationConfig,
    pub screen: Screen,

    pub search: SearchState,
    pub list: ListView,
    pub selected_index: usize,

    /// Id the detail screen is showing (or loading)
    pub detail_id: Option<String>,
    pub detail: DataResource<Pokemon>,

    pub form: PokemonForm,
    pub create: RequestStatus,
    pub update: RequestStatus,
    pub delete: RequestStatus,
    pub confirm_delete: bool,

    pub message: Option<String>,
    pub tick: u64,
}

impl AppState {
    pub fn new(pagination_config: PaginationConfig) -> Self {
        Self {
            pagination_config,
            screen: Screen::List,
            search: SearchState::default(),
            list: ListView::new(&pagination_config),
            selected_index: 0,
            detail_id: None,
            detail: DataResource::Empty,
            form: PokemonForm::create(),
            create: RequestStatus::default(),
            update: RequestStatus::default(),
            delete: RequestStatus::default(),
            confirm_delete: false,
            message: None,
            tick: 0,
        }
    }

    pub fn selected_pokemon(&self) -> Option<&Pokemon> {
        self.list.pokemons.get(self.selected_index)
    }

    pub fn set_selected_index(&mut self, index: usize) -> bool {
        if self.list.pokemons.is_empty() {
            self.selected_index = 0;
            return false;
        }
        let bounded = index.min(self.list.pokemons.len() - 1);
        if bounded != self.selected_index {
            self.selected_index = bounded;
            return true;
        }
        false
    }

    /// Request slot backing the form in its current mode
    pub fn form_status(&self) -> &RequestStatus {
        match self.form.mode {
            FormMode::Create => &self.create,
            FormMode::Edit(_) => &self.update,
        }
    }

    pub fn form_status_mut(&mut self) -> &mut RequestStatus {
        match self.form.mode {
            FormMode::Create => &mut self.create,
            FormMode::Edit(_) => &mut self.update,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.list.loading
            || self.detail.is_loading()
            || self.create.loading
            || self.update.loading
            || self.delete.loading
    }

    pub fn spinner(&self) -> &'static str {
        const FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];
        FRAMES[(self.tick % FRAMES.len() as u64) as usize]
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PaginationConfig::default())
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("List")
                .entry("phase", ron_string(&self.list.phase()))
                .entry("search", ron_string(&self.list.active_search))
                .entry("typing", ron_string(&self.search.query))
                .entry("page", ron_string(&self.list.pagination.page()))
                .entry("limit", ron_string(&self.list.pagination.limit()))
                .entry("total", ron_string(&self.list.pagination.total()))
                .entry("generation", ron_string(&self.list.generation))
                .entry("selected", ron_string(&self.selected_index)),
            DebugSection::new("Detail")
                .entry("screen", ron_string(&self.screen))
                .entry("id", ron_string(&self.detail_id))
                .entry("loading", ron_string(&self.detail.is_loading()))
                .entry("error", ron_string(&self.detail.error()))
                .entry("confirm_delete", ron_string(&self.confirm_delete)),
            DebugSection::new("Requests")
                .entry("list_error", ron_string(&self.list.error))
                .entry("create", ron_string(&self.create))
                .entry("update", ron_string(&self.update))
                .entry("delete", ron_string(&self.delete))
                .entry("message", ron_string(&self.message)),
        ]
    }
}
