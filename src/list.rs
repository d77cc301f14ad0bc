//! Paginated list controller
//!
//! Decides when a page fetch fires and folds fetch results back into the
//! view. Each returned [`ListQuery`] comes with a generation number; a
//! result is only applied if its generation is still the latest one issued,
//! so a slow response can never overwrite a newer one.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;
use crate::model::{ListQuery, ListResult, Pokemon};
use crate::pagination::Pagination;

/// What the list area should show
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ListPhase {
    /// No search submitted yet
    Initial,
    Loading,
    Populated,
    Empty,
    Errored,
}

/// A fetch the caller must issue, tagged with its generation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub query: ListQuery,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ListView {
    pub pagination: Pagination,
    pub pokemons: Vec<Pokemon>,
    /// Term used by the current fetch (already trimmed)
    pub active_search: String,
    pub has_searched: bool,
    pub loading: bool,
    pub error: Option<String>,
    /// Generation of the most recently issued fetch
    pub generation: u64,
}

impl ListView {
    pub fn new(config: &PaginationConfig) -> Self {
        Self {
            pagination: Pagination::new(1, config.default_limit, config),
            pokemons: Vec::new(),
            active_search: String::new(),
            has_searched: false,
            loading: false,
            error: None,
            generation: 0,
        }
    }

    /// Submit `term` as the active filter and restart from page one.
    pub fn search(&mut self, term: &str) -> PageRequest {
        self.active_search = term.trim().to_string();
        self.has_searched = true;
        self.pagination.go_to_page(1);
        self.issue(1)
    }

    pub fn go_to_page(&mut self, page: u32) -> Option<PageRequest> {
        let changed = self.pagination.go_to_page(page);
        self.refetch_if(changed)
    }

    pub fn next_page(&mut self) -> Option<PageRequest> {
        let changed = self.pagination.go_to_next();
        self.refetch_if(changed)
    }

    pub fn prev_page(&mut self) -> Option<PageRequest> {
        let changed = self.pagination.go_to_prev();
        self.refetch_if(changed)
    }

    pub fn set_limit(&mut self, limit: u32) -> Option<PageRequest> {
        let changed = self.pagination.set_limit(limit);
        self.refetch_if(changed)
    }

    /// Fetch the current page again, e.g. after a delete.
    pub fn refresh(&mut self) -> Option<PageRequest> {
        self.refetch_if(true)
    }

    /// Apply the outcome of fetch `generation`.
    ///
    /// Returns `None` when the result was stale and ignored, otherwise
    /// `Some(follow_up)` where `follow_up` is a fetch for the page the view
    /// snapped to when the total shrank below the current page.
    pub fn finish(
        &mut self,
        generation: u64,
        result: Result<ListResult, String>,
    ) -> Option<Option<PageRequest>> {
        if generation != self.generation {
            tracing::debug!(generation, latest = self.generation, "dropping stale page");
            return None;
        }
        self.loading = false;

        let snapped = match result {
            Ok(page) => {
                self.error = None;
                self.pokemons = page.items;
                self.pagination.update_total(page.total)
            }
            Err(message) => {
                self.error = Some(message);
                self.pokemons.clear();
                self.pagination.update_total(0)
            }
        };
        Some(self.refetch_if(snapped && self.error.is_none()))
    }

    /// Swap in a fresh copy of an entity that is on the current page.
    pub fn replace(&mut self, pokemon: &Pokemon) -> bool {
        match self.pokemons.iter_mut().find(|entry| entry.id == pokemon.id) {
            Some(entry) => {
                *entry = pokemon.clone();
                true
            }
            None => false,
        }
    }

    pub fn has_results(&self) -> bool {
        !self.pokemons.is_empty()
    }

    pub fn show_empty_state(&self) -> bool {
        self.has_searched && !self.has_results() && !self.loading && self.error.is_none()
    }

    pub fn show_initial_state(&self) -> bool {
        !self.has_searched
    }

    pub fn phase(&self) -> ListPhase {
        if !self.has_searched {
            ListPhase::Initial
        } else if self.loading {
            ListPhase::Loading
        } else if self.error.is_some() {
            ListPhase::Errored
        } else if self.has_results() {
            ListPhase::Populated
        } else {
            ListPhase::Empty
        }
    }

    fn refetch_if(&mut self, changed: bool) -> Option<PageRequest> {
        if changed && self.has_searched {
            Some(self.issue(self.pagination.page()))
        } else {
            None
        }
    }

    fn issue(&mut self, page: u32) -> PageRequest {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        PageRequest {
            generation: self.generation,
            query: ListQuery::new(page, self.pagination.limit(), &self.active_search),
        }
    }
}

impl Default for ListView {
    fn default() -> Self {
        Self::new(&PaginationConfig::default())
    }
}
