use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    SelectList, SelectListBehavior, SelectListProps, StatusBar, StatusBarHint,
};

use super::Component;
use super::theme::{self, ACCENT_GOLD, ACCENT_TEAL};
use crate::action::Action;
use crate::list::ListPhase;
use crate::model::{Pokemon, format_name};
use crate::state::AppState;

pub struct ListScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Search bar, current page and pagination controls
pub struct ListScreen {
    list: SelectList,
    status_bar: StatusBar,
}

impl Default for ListScreen {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
            status_bar: StatusBar::new(),
        }
    }
}

impl ListScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(state: &AppState) -> Vec<Line<'static>> {
        state
            .list
            .pokemons
            .iter()
            .map(|pokemon| Line::from(item_label(pokemon)))
            .collect()
    }

    fn search_keys(key: &crossterm::event::KeyEvent) -> Vec<Action> {
        match key.code {
            KeyCode::Esc => vec![Action::SearchCancel],
            KeyCode::Enter => vec![Action::SearchSubmit],
            KeyCode::Backspace => vec![Action::SearchBackspace],
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                vec![Action::SearchInput(ch)]
            }
            _ => Vec::new(),
        }
    }
}

/// `#025 Pikachu  electric/flying`
pub fn item_label(pokemon: &Pokemon) -> String {
    format!(
        "#{:03} {}  {}",
        pokemon.number,
        format_name(&pokemon.name),
        pokemon.types.join("/")
    )
}

/// "Showing a-b of N Pokémon" / "Page p of P" / "Items per page: L"
pub fn pagination_summary(state: &AppState) -> Vec<String> {
    let pagination = &state.list.pagination;
    let mut parts = Vec::new();
    if let Some((start, end)) = pagination.item_range() {
        parts.push(format!(
            "Showing {start}-{end} of {} Pokémon",
            pagination.total()
        ));
        parts.push(format!(
            "Page {} of {}",
            pagination.page(),
            pagination.total_pages()
        ));
    }
    parts.push(format!("Items per page: {}", pagination.limit()));
    parts
}

impl Component<Action> for ListScreen {
    type Props<'a> = ListScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        let state = props.state;

        if state.search.active {
            return Self::search_keys(key);
        }

        match key.code {
            KeyCode::Char('/') => vec![Action::SearchStart],
            KeyCode::Left | KeyCode::Char('h') => vec![Action::PagePrev],
            KeyCode::Right | KeyCode::Char('l') => vec![Action::PageNext],
            KeyCode::Char('[') => vec![Action::LimitPrev],
            KeyCode::Char(']') => vec![Action::LimitNext],
            KeyCode::Char(digit @ '1'..='9') => {
                vec![Action::PageGoto(u32::from(digit) - u32::from('0'))]
            }
            KeyCode::Char('n') => vec![Action::FormOpenCreate],
            KeyCode::Char('q') => vec![Action::Quit],
            KeyCode::Enter => {
                if state.list.has_results() {
                    vec![Action::ListOpenSelected]
                } else {
                    vec![Action::SearchSubmit]
                }
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Home | KeyCode::End => {
                let items = Self::items(state);
                let list_props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: state.selected_index.min(items.len().saturating_sub(1)),
                    is_focused: true,
                    style: theme::list_style(),
                    behavior: SelectListBehavior {
                        show_scrollbar: true,
                        wrap_navigation: false,
                    },
                    on_select: Action::ListSelect,
                    render_item: &|item| item.clone(),
                };
                self.list.handle_event(event, list_props).into_iter().collect()
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Length(3), // Search bar
            Constraint::Min(3),    // Results
            Constraint::Length(1), // Pagination
            Constraint::Length(3), // Footer
        ])
        .split(area);

        render_search_bar(frame, chunks[0], state);

        let block = theme::panel("Pokédex", props.is_focused && !state.search.active);
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        match state.list.phase() {
            ListPhase::Populated => {
                let items = Self::items(state);
                let list_props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: state.selected_index.min(items.len().saturating_sub(1)),
                    is_focused: props.is_focused && !state.search.active,
                    style: theme::list_style(),
                    behavior: SelectListBehavior {
                        show_scrollbar: true,
                        wrap_navigation: false,
                    },
                    on_select: Action::ListSelect,
                    render_item: &|item| item.clone(),
                };
                self.list.render(frame, inner, list_props);
            }
            phase => {
                let lines = placeholder_lines(state, phase);
                frame.render_widget(
                    Paragraph::new(lines)
                        .alignment(Alignment::Center)
                        .wrap(Wrap { trim: true }),
                    inner,
                );
            }
        }

        let summary = pagination_summary(state).join("   ");
        frame.render_widget(
            Paragraph::new(summary)
                .style(theme::dim_style())
                .alignment(Alignment::Center),
            chunks[2],
        );

        let hints = if state.search.active {
            vec![
                StatusBarHint::new("Enter", "Search"),
                StatusBarHint::new("Esc", "Cancel"),
            ]
        } else {
            vec![
                StatusBarHint::new("/", "Search"),
                StatusBarHint::new("←/→", "Page"),
                StatusBarHint::new("1-9", "Jump"),
                StatusBarHint::new("[ ]", "Per page"),
                StatusBarHint::new("Enter", "Open"),
                StatusBarHint::new("n", "New"),
                StatusBarHint::new("q", "Quit"),
            ]
        };
        let status = state.message.clone().unwrap_or_default();
        theme::render_footer(
            frame,
            chunks[3],
            &mut self.status_bar,
            &hints,
            Span::styled(status, Style::default().fg(ACCENT_GOLD)),
        );
    }
}

fn render_search_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = theme::panel("Search", state.search.active);
    let line = if state.search.active {
        Line::from(vec![
            Span::raw(state.search.query.clone()),
            Span::styled("▏", Style::default().fg(ACCENT_TEAL)),
        ])
    } else if state.search.query.is_empty() {
        Line::from(Span::styled(
            "Press / to search by name",
            theme::dim_style(),
        ))
    } else {
        Line::from(Span::raw(state.search.query.clone()))
    };
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn placeholder_lines(state: &AppState, phase: ListPhase) -> Vec<Line<'static>> {
    match phase {
        ListPhase::Initial => vec![
            Line::from(Span::styled(
                "Welcome to the Pokédex!",
                Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Search for a Pokémon, or press Enter to list them all.",
                theme::dim_style(),
            )),
        ],
        ListPhase::Loading => vec![Line::from(format!(
            "{} Loading Pokémon...",
            state.spinner()
        ))],
        ListPhase::Errored => vec![Line::from(Span::styled(
            state.list.error.clone().unwrap_or_default(),
            theme::error_style(),
        ))],
        ListPhase::Empty => {
            let mut lines = vec![Line::from(Span::styled(
                "No Pokémon found",
                Style::default().add_modifier(Modifier::BOLD),
            ))];
            if !state.list.active_search.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("No results for \"{}\"", state.list.active_search),
                    theme::dim_style(),
                )));
            }
            lines
        }
        ListPhase::Populated => Vec::new(),
    }
}
