use crate::app::App;
use crate::theme::*;
use crate::views::ListView;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(frame.area());

    render_pages(app, frame, chunks[0]);
    render_header(app, frame, chunks[0]);
    render_footer(frame, chunks[1]);
}

/// Horizontal span of a page inside `area`, and the columns clipped off its left edge.
fn page_span(area: Rect, page: usize, page_width: f32, strip_offset: f32) -> Option<(Rect, u16)> {
    let left = area.x as f32 + page as f32 * page_width - strip_offset;
    let right = left + page_width;
    let visible_left = left.max(area.x as f32);
    let visible_right = right.min(area.right() as f32);
    if visible_right - visible_left < 1.0 {
        return None;
    }
    let x = visible_left.round() as u16;
    let width = (visible_right.round() as u16).saturating_sub(x);
    let skip = (visible_left - left).round() as u16;
    Some((Rect::new(x, area.y, width, area.height), skip))
}

fn render_pages(app: &App, frame: &mut Frame, area: Rect) {
    let page_width = app.controller.page_width();
    let strip_offset = app.strip.offset();
    let selected = app.controller.selected_index();

    for list in &app.lists {
        if let Some((rect, skip)) = page_span(area, list.index(), page_width, strip_offset) {
            render_list(app, list, list.index() == selected, frame, rect, skip);
        }
    }
}

fn render_list(app: &App, list: &ListView, active: bool, frame: &mut Frame, area: Rect, skip: u16) {
    let header_rows = app.controller.header_height().round() as usize;
    let first_row = list.offset().round() as usize;

    let lines: Vec<Line> = (first_row..first_row + area.height as usize)
        .map(|row| match list.row_text(row, header_rows) {
            Some(text) => Line::from(Span::styled(text, list_item())),
            None => Line::from(""),
        })
        .collect();

    let mut block = Block::default().borders(Borders::LEFT);
    if active {
        block = block.border_style(active_border());
    }
    let content = Paragraph::new(lines).block(block).scroll((0, skip));
    frame.render_widget(content, area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let transform = app.controller.header_transform();
    let visible = (transform.height + transform.translate_y).round().max(0.0) as u16;
    let height = visible.min(area.height);
    if height == 0 {
        return;
    }
    let header_area = Rect::new(area.x, area.y, area.width, height);
    let hidden_rows = (-transform.translate_y).round() as u16;

    let lines = vec![
        Line::from(Span::styled(
            format!("Selected: {}", app.selected),
            header_text(),
        )),
        Line::from(Span::styled(
            format!("Animated: {}", app.animated_index()),
            header_text(),
        )),
    ];
    let rows = transform.height.round() as u16;
    let top_pad = rows.saturating_sub(lines.len() as u16);
    let mut padded: Vec<Line> = (0..top_pad).map(|_| Line::from("")).collect();
    padded.extend(lines);

    frame.render_widget(Clear, header_area);
    let header = Paragraph::new(padded)
        .style(header())
        .scroll((hidden_rows, 0));
    frame.render_widget(header, header_area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer_line = Line::from(vec![Span::styled(
        "j/k: scroll  d/u: page  h/l: swipe  1-9: select  q: quit",
        footer(),
    )]);
    let help = Paragraph::new(footer_line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}
