use ratatui::style::{Color, Modifier, Style};

pub const HEADER_BG: Color = Color::Blue;
pub const HEADER_TEXT: Color = Color::White;
pub const ITEM_TEXT: Color = Color::Gray;
pub const ACTIVE_BORDER: Color = Color::Cyan;
pub const FOOTER_TEXT: Color = Color::DarkGray;

pub fn header() -> Style {
    Style::default().bg(HEADER_BG).fg(HEADER_TEXT)
}

pub fn header_text() -> Style {
    Style::default()
        .fg(HEADER_TEXT)
        .add_modifier(Modifier::BOLD)
}

pub fn list_item() -> Style {
    Style::default().fg(ITEM_TEXT)
}

pub fn active_border() -> Style {
    Style::default().fg(ACTIVE_BORDER)
}

pub fn footer() -> Style {
    Style::default().fg(FOOTER_TEXT)
}
