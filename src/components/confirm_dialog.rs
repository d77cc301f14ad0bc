use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Paragraph, Wrap},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, centered_rect,
};

use super::Component;
use super::theme::{ACCENT_RED, TEXT_DIM};
use crate::action::Action;

pub struct ConfirmDialogProps<'a> {
    pub message: &'a str,
    pub is_focused: bool,
    pub on_confirm: Action,
    pub on_cancel: fn() -> Action,
}

/// Yes/no modal
pub struct ConfirmDialog {
    modal: Modal,
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl ConfirmDialog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for ConfirmDialog {
    type Props<'a> = ConfirmDialogProps<'a>;

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
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(props.on_confirm),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some((props.on_cancel)()),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width < 20 || area.height < 6 {
            return;
        }
        let modal_area = centered_rect(46, 7, area);
        let message = props.message;
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let lines = vec![
                Line::styled(
                    message.to_string(),
                    Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
                ),
                Line::from(""),
                Line::styled("y: confirm   n/Esc: cancel", Style::default().fg(TEXT_DIM)),
            ];
            frame.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                content_area,
            );
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(Color::Rgb(35, 35, 45)),
                        padding: Padding::all(1),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: props.on_cancel,
                render_content: &mut render_content,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    fn props(is_focused: bool) -> ConfirmDialogProps<'static> {
        ConfirmDialogProps {
            message: "Delete Pikachu?",
            is_focused,
            on_confirm: Action::DeleteConfirm,
            on_cancel: || Action::DeleteCancel,
        }
    }

    #[test]
    fn test_yes_and_no() {
        let mut dialog = ConfirmDialog::new();
        let actions: Vec<_> = dialog
            .handle_event(&EventKind::Key(key("y")), props(true))
            .into_iter()
            .collect();
        actions.assert_first(Action::DeleteConfirm);

        let actions: Vec<_> = dialog
            .handle_event(&EventKind::Key(key("n")), props(true))
            .into_iter()
            .collect();
        actions.assert_first(Action::DeleteCancel);
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut dialog = ConfirmDialog::new();
        let actions: Vec<_> = dialog
            .handle_event(&EventKind::Key(key("q")), props(true))
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_message() {
        let mut render = RenderHarness::new(60, 20);
        let mut dialog = ConfirmDialog::new();
        let output = render.render_to_string_plain(|frame| {
            dialog.render(frame, frame.area(), props(true));
        });
        assert!(output.contains("Delete Pikachu?"));
    }
}
