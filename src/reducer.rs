//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::form::{FormField, FormMode, PokemonForm};
use crate::list::PageRequest;
use crate::model::{ListResult, format_name};
use crate::state::{AppState, Screen};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Search =====
        Action::SearchStart => {
            if state.screen != Screen::List || state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query = state.list.active_search.clone();
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.query.push(ch);
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if state.search.active && state.search.query.pop().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::SearchSubmit => {
            let term = state.search.query.clone();
            run_search(state, &term)
        }

        Action::SearchRun(term) => {
            state.search.query = term.trim().to_string();
            run_search(state, &term)
        }

        // ===== List =====
        Action::ListDidLoad { generation, result } => finish_list(state, generation, Ok(result)),

        Action::ListDidError { generation, error } => finish_list(state, generation, Err(error)),

        Action::ListSelect(index) => {
            if state.set_selected_index(index) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::ListOpenSelected => match state.selected_pokemon() {
            Some(pokemon) => {
                let id = pokemon.id.clone();
                open_detail(state, id)
            }
            None => DispatchResult::unchanged(),
        },

        // ===== Pagination =====
        Action::PageNext => {
            let request = state.list.next_page();
            page_fetch(state, request)
        }

        Action::PagePrev => {
            let request = state.list.prev_page();
            page_fetch(state, request)
        }

        Action::PageGoto(page) => {
            let request = state.list.go_to_page(page);
            page_fetch(state, request)
        }

        Action::LimitNext => {
            let current = state.list.pagination.limit();
            let options = state.pagination_config.limit_options();
            match options.into_iter().find(|option| *option > current) {
                Some(limit) => change_limit(state, limit),
                None => DispatchResult::unchanged(),
            }
        }

        Action::LimitPrev => {
            let current = state.list.pagination.limit();
            let options = state.pagination_config.limit_options();
            match options.into_iter().rev().find(|option| *option < current) {
                Some(limit) => change_limit(state, limit),
                None => DispatchResult::unchanged(),
            }
        }

        // ===== Detail =====
        Action::DetailOpen(id) => open_detail(state, id),

        Action::DetailDidLoad(pokemon) => {
            if state.detail_id.as_deref() != Some(pokemon.id.as_str()) {
                return DispatchResult::unchanged();
            }
            state.detail = DataResource::Loaded(pokemon);
            DispatchResult::changed()
        }

        Action::DetailDidError { id, error } => {
            if state.detail_id.as_deref() != Some(id.as_str()) {
                return DispatchResult::unchanged();
            }
            state.detail = DataResource::Failed(error);
            DispatchResult::changed()
        }

        Action::DetailBack => {
            if state.screen != Screen::Detail {
                return DispatchResult::unchanged();
            }
            close_detail(state);
            DispatchResult::changed()
        }

        // ===== Form =====
        Action::FormOpenCreate => {
            state.form = PokemonForm::create();
            state.create.reset();
            state.search.active = false;
            state.screen = Screen::Form;
            DispatchResult::changed()
        }

        Action::FormOpenEdit => {
            let Some(pokemon) = state.detail.data() else {
                return DispatchResult::unchanged();
            };
            state.form = PokemonForm::edit(pokemon);
            state.update.reset();
            state.confirm_delete = false;
            state.screen = Screen::Form;
            DispatchResult::changed()
        }

        Action::FormFocusNext => {
            state.form.focus_next();
            DispatchResult::changed()
        }

        Action::FormFocusPrev => {
            state.form.focus_prev();
            DispatchResult::changed()
        }

        Action::FormInput(ch) => {
            state.form.input(ch);
            DispatchResult::changed()
        }

        Action::FormBackspace => {
            state.form.backspace();
            DispatchResult::changed()
        }

        Action::FormAddType => {
            if state.form.focus == FormField::Types && state.form.add_type() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::FormSubmit => submit_form(state),

        Action::FormCancel => {
            if state.screen != Screen::Form {
                return DispatchResult::unchanged();
            }
            state.screen = match state.form.mode {
                FormMode::Create => Screen::List,
                FormMode::Edit(_) => Screen::Detail,
            };
            DispatchResult::changed()
        }

        Action::CreateDidLoad(pokemon) => {
            state.create.succeed();
            state.message = Some(format!("Created {}", format_name(&pokemon.name)));
            // Only navigate if the form is still open
            if state.screen == Screen::Form {
                state.detail_id = Some(pokemon.id.clone());
                state.detail = DataResource::Loaded(pokemon);
                state.confirm_delete = false;
                state.screen = Screen::Detail;
            }
            match state.list.refresh() {
                Some(request) => DispatchResult::changed_with(request.into()),
                None => DispatchResult::changed(),
            }
        }

        Action::CreateDidError(error) => {
            state.create.fail(error);
            DispatchResult::changed()
        }

        Action::UpdateDidLoad(pokemon) => {
            state.update.succeed();
            state.list.replace(&pokemon);
            state.message = Some(format!("Updated {}", format_name(&pokemon.name)));
            let on_form = state.screen == Screen::Form;
            if on_form || state.detail_id.as_deref() == Some(pokemon.id.as_str()) {
                state.detail_id = Some(pokemon.id.clone());
                state.detail = DataResource::Loaded(pokemon);
            }
            if on_form {
                state.screen = Screen::Detail;
            }
            DispatchResult::changed()
        }

        Action::UpdateDidError(error) => {
            state.update.fail(error);
            DispatchResult::changed()
        }

        // ===== Delete =====
        Action::DeleteRequest => {
            if state.screen != Screen::Detail || !state.detail.is_loaded() || state.delete.loading {
                return DispatchResult::unchanged();
            }
            state.confirm_delete = true;
            DispatchResult::changed()
        }

        Action::DeleteCancel => {
            if !state.confirm_delete {
                return DispatchResult::unchanged();
            }
            state.confirm_delete = false;
            DispatchResult::changed()
        }

        Action::DeleteConfirm => {
            if !state.confirm_delete || state.delete.loading {
                return DispatchResult::unchanged();
            }
            state.confirm_delete = false;
            let Some(id) = state.detail_id.clone() else {
                return DispatchResult::changed();
            };
            state.delete.begin();
            DispatchResult::changed_with(Effect::DeletePokemon { id })
        }

        Action::DeleteDidLoad(id) => {
            state.delete.succeed();
            state.message = Some("Pokémon deleted".to_string());
            if state.detail_id.as_deref() == Some(id.as_str()) {
                close_detail(state);
            }
            match state.list.refresh() {
                Some(request) => DispatchResult::changed_with(request.into()),
                None => DispatchResult::changed(),
            }
        }

        Action::DeleteDidError(error) => {
            state.delete.fail(error);
            DispatchResult::changed()
        }

        // ===== Global =====
        Action::Tick => {
            if state.is_busy() {
                state.tick = state.tick.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn run_search(state: &mut AppState, term: &str) -> DispatchResult<Effect> {
    state.search.active = false;
    state.selected_index = 0;
    state.message = None;
    let request = state.list.search(term);
    DispatchResult::changed_with(request.into())
}

fn page_fetch(state: &mut AppState, request: Option<PageRequest>) -> DispatchResult<Effect> {
    match request {
        Some(request) => {
            state.selected_index = 0;
            DispatchResult::changed_with(request.into())
        }
        None => DispatchResult::unchanged(),
    }
}

fn change_limit(state: &mut AppState, limit: u32) -> DispatchResult<Effect> {
    let before = state.list.pagination.limit();
    let request = state.list.set_limit(limit);
    if request.is_none() && state.list.pagination.limit() != before {
        return DispatchResult::changed();
    }
    page_fetch(state, request)
}

fn finish_list(
    state: &mut AppState,
    generation: u64,
    result: Result<ListResult, String>,
) -> DispatchResult<Effect> {
    let Some(follow_up) = state.list.finish(generation, result) else {
        return DispatchResult::unchanged();
    };
    let selected = state.selected_index;
    state.set_selected_index(selected);
    match follow_up {
        Some(request) => {
            state.selected_index = 0;
            DispatchResult::changed_with(request.into())
        }
        None => DispatchResult::changed(),
    }
}

fn open_detail(state: &mut AppState, id: String) -> DispatchResult<Effect> {
    state.detail_id = Some(id.clone());
    state.detail = DataResource::Loading;
    state.confirm_delete = false;
    state.delete.reset();
    state.search.active = false;
    state.message = None;
    state.screen = Screen::Detail;
    DispatchResult::changed_with(Effect::LoadPokemon { id })
}

fn close_detail(state: &mut AppState) {
    state.detail_id = None;
    state.detail = DataResource::Empty;
    state.confirm_delete = false;
    state.screen = Screen::List;
}

fn submit_form(state: &mut AppState) -> DispatchResult<Effect> {
    if state.screen != Screen::Form || state.form_status().loading {
        return DispatchResult::unchanged();
    }
    let data = match state.form.submission() {
        Ok(data) => data,
        Err(error) => {
            state.form_status_mut().fail(error.to_string());
            return DispatchResult::changed();
        }
    };
    state.form_status_mut().begin();
    let effect = match &state.form.mode {
        FormMode::Create => Effect::CreatePokemon { data },
        FormMode::Edit(id) => Effect::UpdatePokemon {
            id: id.clone(),
            data,
        },
    };
    DispatchResult::changed_with(effect)
}
