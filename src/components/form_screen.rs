use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{StatusBar, StatusBarHint};

use super::Component;
use super::theme::{self, ACCENT_GOLD, ACCENT_TEAL, BG_PANEL_ALT, TEXT_DIM};
use crate::action::Action;
use crate::form::{FormField, MAX_TYPES, PokemonForm};
use crate::model::format_name;
use crate::state::AppState;

pub struct FormScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Create/edit form
pub struct FormScreen {
    status_bar: StatusBar,
}

impl Default for FormScreen {
    fn default() -> Self {
        Self {
            status_bar: StatusBar::new(),
        }
    }
}

impl FormScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for FormScreen {
    type Props<'a> = FormScreenProps<'a>;

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
        let form = &props.state.form;

        match key.code {
            KeyCode::Esc => Some(Action::FormCancel),
            KeyCode::Tab => Some(Action::FormFocusNext),
            KeyCode::BackTab => Some(Action::FormFocusPrev),
            KeyCode::Enter if form.focus == FormField::Types => Some(Action::FormAddType),
            KeyCode::Enter => Some(Action::FormSubmit),
            KeyCode::Backspace => Some(Action::FormBackspace),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::FormInput(ch))
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let form = &state.form;
        let status = state.form_status();

        let title = if form.is_create() {
            "New Pokémon".to_string()
        } else {
            format!("Edit {}", format_name(&form.name))
        };
        let outer = Layout::vertical([Constraint::Min(14), Constraint::Length(3)]).split(area);
        let block = theme::panel(&title, props.is_focused);
        let inner = block.inner(outer[0]);
        frame.render_widget(block, outer[0]);

        let rows = Layout::vertical([
            Constraint::Length(1), // Error / progress
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

        let banner = if status.loading {
            Line::from(Span::styled(
                format!("{} Saving...", state.spinner()),
                Style::default().fg(ACCENT_GOLD),
            ))
        } else if let Some(error) = status.error() {
            Line::from(Span::styled(error.to_string(), theme::error_style()))
        } else {
            Line::from("")
        };
        frame.render_widget(Paragraph::new(banner), rows[0]);

        for (index, field) in FormField::ALL.into_iter().enumerate() {
            render_field(frame, rows[index + 1], form, field);
        }

        let hints = [
            StatusBarHint::new("Tab", "Next field"),
            StatusBarHint::new("Enter", if form.focus == FormField::Types { "Add type" } else { "Save" }),
            StatusBarHint::new("Esc", "Cancel"),
        ];
        theme::render_footer(frame, outer[1], &mut self.status_bar, &hints, Span::raw(""));
    }
}

fn field_title(form: &PokemonForm, field: FormField) -> String {
    if field == FormField::Types && form.is_create() {
        format!("{} ({}/{MAX_TYPES})", field.label(), form.types.len())
    } else {
        field.label().to_string()
    }
}

fn render_field(frame: &mut Frame, area: Rect, form: &PokemonForm, field: FormField) {
    let focused = form.focus == field;
    let border = if focused { ACCENT_TEAL } else { TEXT_DIM };
    let title = field_title(form, field);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(BG_PANEL_ALT))
        .border_style(Style::default().fg(border));

    let mut spans = Vec::new();
    let text = match field {
        FormField::Name => form.name.clone(),
        FormField::Number => form.number.clone(),
        FormField::Ability => form.ability.clone(),
        FormField::Types => {
            for name in &form.types {
                spans.push(Span::styled(
                    format!("[{name}]"),
                    Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::raw(" "));
            }
            form.type_input.clone()
        }
    };
    spans.push(Span::raw(text));
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(ACCENT_TEAL)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use tui_dispatch::testing::*;

    fn press(state: &AppState, code: KeyCode) -> Vec<Action> {
        let mut component = FormScreen::new();
        let event = EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE));
        component
            .handle_event(
                &event,
                FormScreenProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    #[test]
    fn test_enter_adds_type_on_types_field() {
        let mut state = AppState::default();
        press(&state, KeyCode::Enter).assert_first(Action::FormSubmit);
        state.form.focus = FormField::Types;
        press(&state, KeyCode::Enter).assert_first(Action::FormAddType);
    }

    #[test]
    fn test_field_navigation_and_typing() {
        let state = AppState::default();
        press(&state, KeyCode::Tab).assert_first(Action::FormFocusNext);
        press(&state, KeyCode::BackTab).assert_first(Action::FormFocusPrev);
        press(&state, KeyCode::Char('q')).assert_first(Action::FormInput('q'));
        press(&state, KeyCode::Esc).assert_first(Action::FormCancel);
    }

    #[test]
    fn test_render_shows_error_and_types() {
        let mut state = AppState::default();
        state.form.types = vec!["fire".into(), "flying".into()];
        state.create.fail("This Pokémon already exists");

        let mut render = RenderHarness::new(60, 22);
        let mut component = FormScreen::new();
        let output = render.render_to_string_plain(|frame| {
            let props = FormScreenProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });
        assert!(output.contains("New Pokémon"));
        assert!(output.contains("This Pokémon already exists"));
        assert!(output.contains("[fire]"));
        assert!(output.contains("Types (2/3)"));
    }
}
