//! Pokedex TUI - browse and edit a REST Pokemon collection

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokedex::action::Action;
use pokedex::api::{HttpPokemonApi, PokemonApi};
use pokedex::components::{
    Component, ConfirmDialog, ConfirmDialogProps, DetailScreen, DetailScreenProps, FormScreen,
    FormScreenProps, ListScreen, ListScreenProps,
};
use pokedex::config::Config;
use pokedex::effect::{self, Effect};
use pokedex::model::format_name;
use pokedex::reducer::reducer;
use pokedex::state::{AppState, Screen, TICK_MS};

/// Pokedex TUI - search, page through and edit a Pokemon collection
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Terminal client for a REST Pokemon collection")]
struct Args {
    /// Base URL of the API (overrides POKEDEX_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Items per page (clamped to the configured bounds)
    #[arg(long)]
    page_limit: Option<u32>,

    /// Run this search on start-up
    #[arg(long)]
    search: Option<String>,

    /// Open the Pokemon with this id on start-up (takes precedence over --search)
    #[arg(long)]
    open: Option<String>,

    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PokedexComponentId {
    List,
    Detail,
    Form,
    Confirm,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PokedexContext {
    List,
    Detail,
    Form,
    Confirm,
}

impl EventRoutingState<PokedexComponentId, PokedexContext> for AppState {
    fn focused(&self) -> Option<PokedexComponentId> {
        if self.confirm_delete {
            return Some(PokedexComponentId::Confirm);
        }
        match self.screen {
            Screen::List => Some(PokedexComponentId::List),
            Screen::Detail => Some(PokedexComponentId::Detail),
            Screen::Form => Some(PokedexComponentId::Form),
        }
    }

    fn modal(&self) -> Option<PokedexComponentId> {
        if self.confirm_delete {
            Some(PokedexComponentId::Confirm)
        } else {
            None
        }
    }

    fn binding_context(&self, id: PokedexComponentId) -> PokedexContext {
        match id {
            PokedexComponentId::List => PokedexContext::List,
            PokedexComponentId::Detail => PokedexContext::Detail,
            PokedexComponentId::Form => PokedexContext::Form,
            PokedexComponentId::Confirm => PokedexContext::Confirm,
        }
    }

    fn default_context(&self) -> PokedexContext {
        PokedexContext::List
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        api_url,
        page_limit,
        search,
        open,
        log_file,
        debug: debug_args,
    } = Args::parse();

    if let Some(path) = &log_file {
        init_logging(path)?;
    }

    let mut config = Config::from_env();
    if let Some(url) = &api_url {
        config = config.with_api_base_url(url);
    }
    if let Some(limit) = page_limit {
        config = config.with_default_limit(limit);
    }
    tracing::info!(api = %config.api_base_url, limit = config.pagination.default_limit, "starting pokedex");

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let pagination = config.pagination;
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(pagination))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let api: Arc<dyn PokemonApi> = Arc::new(HttpPokemonApi::new(config.api_base_url.clone()));
    let init_action = match (open, search) {
        (Some(id), _) => Some(Action::DetailOpen(id)),
        (None, Some(term)) => Some(Action::SearchRun(term)),
        (None, None) => None,
    };

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(
        &mut terminal,
        &debug,
        store,
        api,
        init_action,
        replay_actions,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pokedex=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

struct PokedexUi {
    list: ListScreen,
    detail: DetailScreen,
    form: FormScreen,
    confirm: ConfirmDialog,
}

impl PokedexUi {
    fn new() -> Self {
        Self {
            list: ListScreen::new(),
            detail: DetailScreen::new(),
            form: FormScreen::new(),
            confirm: ConfirmDialog::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<PokedexComponentId>,
    ) {
        let focused = render_ctx.is_focused() && !state.confirm_delete;
        for id in [
            PokedexComponentId::List,
            PokedexComponentId::Detail,
            PokedexComponentId::Form,
        ] {
            event_ctx.component_areas.remove(&id);
        }

        match state.screen {
            Screen::List => {
                event_ctx.set_component_area(PokedexComponentId::List, area);
                let props = ListScreenProps {
                    state,
                    is_focused: focused,
                };
                self.list.render(frame, area, props);
            }
            Screen::Detail => {
                event_ctx.set_component_area(PokedexComponentId::Detail, area);
                let props = DetailScreenProps {
                    state,
                    is_focused: focused,
                };
                self.detail.render(frame, area, props);
            }
            Screen::Form => {
                event_ctx.set_component_area(PokedexComponentId::Form, area);
                let props = FormScreenProps {
                    state,
                    is_focused: focused,
                };
                self.form.render(frame, area, props);
            }
        }

        if state.confirm_delete {
            event_ctx.set_component_area(PokedexComponentId::Confirm, area);
            let message = delete_prompt(state);
            let props = ConfirmDialogProps {
                message: &message,
                is_focused: render_ctx.is_focused(),
                on_confirm: Action::DeleteConfirm,
                on_cancel: || Action::DeleteCancel,
            };
            self.confirm.render(frame, area, props);
        } else {
            event_ctx
                .component_areas
                .remove(&PokedexComponentId::Confirm);
        }
    }

    fn handle_list_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = ListScreenProps {
            state,
            is_focused: true,
        };
        handler_response(self.list.handle_event(event, props).into_iter().collect())
    }

    fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = DetailScreenProps {
            state,
            is_focused: true,
        };
        handler_response(self.detail.handle_event(event, props).into_iter().collect())
    }

    fn handle_form_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = FormScreenProps {
            state,
            is_focused: true,
        };
        handler_response(self.form.handle_event(event, props).into_iter().collect())
    }

    fn handle_confirm_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let message = delete_prompt(state);
        let props = ConfirmDialogProps {
            message: &message,
            is_focused: true,
            on_confirm: Action::DeleteConfirm,
            on_cancel: || Action::DeleteCancel,
        };
        let actions: Vec<_> = self.confirm.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn delete_prompt(state: &AppState) -> String {
    match state.detail.data() {
        Some(pokemon) => format!("Delete {}?", format_name(&pokemon.name)),
        None => "Delete this Pokémon?".to_string(),
    }
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    api: Arc<dyn PokemonApi>,
    init_action: Option<Action>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(PokedexUi::new()));
    let mut bus: EventBus<AppState, Action, PokedexComponentId, PokedexContext> =
        EventBus::new();
    let keybindings: Keybindings<PokedexContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(PokedexComponentId::List, move |event, state| {
        ui_list.borrow_mut().handle_list_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(PokedexComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    let ui_form = Rc::clone(&ui);
    bus.register(PokedexComponentId::Form, move |event, state| {
        ui_form.borrow_mut().handle_form_event(&event.kind, state)
    });

    let ui_confirm = Rc::clone(&ui);
    bus.register(PokedexComponentId::Confirm, move |event, state| {
        ui_confirm
            .borrow_mut()
            .handle_confirm_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            init_action,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(&api, effect, ctx),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(api: &Arc<dyn PokemonApi>, effect: Effect, ctx: &mut EffectContext<Action>) {
    let key = effect.task_key();
    tracing::debug!(%key, ?effect, "spawning task");
    let api = Arc::clone(api);
    ctx.tasks()
        .spawn(TaskKey::new(key), effect::perform(api, effect));
}
