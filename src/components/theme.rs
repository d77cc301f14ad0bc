use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
};
use tui_dispatch::Component;
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, SelectListStyle, SelectionStyle, StatusBar, StatusBarHint, StatusBarItem,
    StatusBarProps, StatusBarSection, StatusBarStyle,
};

use crate::action::Action;

pub const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub const BG_PANEL_ALT: Color = Color::Rgb(26, 40, 58);
pub const BG_HIGHLIGHT: Color = Color::Rgb(150, 40, 44);
pub const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub const ACCENT_RED: Color = Color::Rgb(232, 84, 84);
pub const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
pub const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);

pub fn panel(title: &str, focused: bool) -> Block<'_> {
    let border = if focused { ACCENT_TEAL } else { TEXT_DIM };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(border))
}

pub fn error_style() -> Style {
    Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD)
}

pub fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

/// Bordered footer: key hints on the left, a status message on the right.
pub fn render_footer(
    frame: &mut Frame,
    area: Rect,
    status_bar: &mut StatusBar,
    hints: &[StatusBarHint<'static>],
    status: Span<'_>,
) {
    let status_items = [StatusBarItem::span(status)];
    let style = StatusBarStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_TEAL)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        text: Style::default().fg(TEXT_DIM),
        hint_key: Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
    };

    let props = StatusBarProps {
        left: StatusBarSection::hints(hints).with_separator("  "),
        center: StatusBarSection::empty(),
        right: StatusBarSection::items(&status_items).with_separator("  "),
        style,
        is_focused: false,
    };
    Component::<Action>::render(status_bar, frame, area, props);
}
