use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{StatusBar, StatusBarHint};

use super::Component;
use super::theme::{self, ACCENT_GOLD, ACCENT_TEAL};
use crate::action::Action;
use crate::model::{Pokemon, format_name};
use crate::state::AppState;

pub struct DetailScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

pub struct DetailScreen {
    status_bar: StatusBar,
}

impl Default for DetailScreen {
    fn default() -> Self {
        Self {
            status_bar: StatusBar::new(),
        }
    }
}

impl DetailScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for DetailScreen {
    type Props<'a> = DetailScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };
        let state = props.state;

        match key.code {
            KeyCode::Esc | KeyCode::Backspace => Some(Action::DetailBack),
            KeyCode::Char('e') if state.detail.is_loaded() => Some(Action::FormOpenEdit),
            KeyCode::Char('d') if state.detail.is_loaded() => Some(Action::DeleteRequest),
            KeyCode::Char('r') => state.detail_id.clone().map(Action::DetailOpen),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).split(area);

        let title = match state.detail.data() {
            Some(pokemon) => format_name(&pokemon.name),
            None => "Pokémon".to_string(),
        };
        let block = theme::panel(&title, props.is_focused);
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        let lines = match &state.detail {
            DataResource::Loaded(pokemon) => detail_lines(pokemon),
            DataResource::Failed(error) => vec![
                Line::from(Span::styled("Pokémon not found", theme::error_style())),
                Line::from(format!(
                    "Couldn't find Pokémon by ID: {}",
                    state.detail_id.as_deref().unwrap_or_default()
                )),
                Line::from(Span::styled(error.clone(), theme::dim_style())),
            ],
            _ => vec![Line::from(format!("{} Loading Pokémon...", state.spinner()))],
        };
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);

        let status = if state.delete.loading {
            Span::styled(format!("{} Deleting...", state.spinner()), Style::default().fg(ACCENT_GOLD))
        } else if let Some(error) = state.delete.error() {
            Span::styled(error.to_string(), theme::error_style())
        } else {
            Span::styled(state.message.clone().unwrap_or_default(), Style::default().fg(ACCENT_GOLD))
        };
        let hints = [
            StatusBarHint::new("e", "Edit"),
            StatusBarHint::new("d", "Delete"),
            StatusBarHint::new("r", "Reload"),
            StatusBarHint::new("Esc", "Back"),
        ];
        theme::render_footer(frame, chunks[1], &mut self.status_bar, &hints, status);
    }
}

fn detail_lines(pokemon: &Pokemon) -> Vec<Line<'static>> {
    let label = |text: &'static str| Span::styled(text, Style::default().fg(ACCENT_TEAL));
    let types = if pokemon.types.is_empty() {
        "-".to_string()
    } else {
        pokemon.types.join(", ")
    };
    vec![
        Line::from(Span::styled(
            format!("#{:03} {}", pokemon.number, format_name(&pokemon.name)),
            Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![label("ID:      "), Span::raw(pokemon.id.clone())]),
        Line::from(vec![label("Number:  "), Span::raw(pokemon.number.to_string())]),
        Line::from(vec![label("Types:   "), Span::raw(types)]),
        Line::from(vec![label("Ability: "), Span::raw(format_name(&pokemon.ability))]),
        Line::from(vec![label("Image:   "), Span::raw(pokemon.image_url.clone())]),
    ]
}
