use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::Buffer;
use ratatui::widgets::Widget;

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// A `width` x `height` box just below and right of a cell, pushed back
/// inside `bounds` when it would overflow.
pub fn anchored_rect(column: u16, row: u16, width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);

    let mut x = column.saturating_add(2);
    if x + width > bounds.right() {
        x = column.saturating_sub(width + 1);
    }
    let mut y = row.saturating_add(1);
    if y + height > bounds.bottom() {
        y = row.saturating_sub(height);
    }

    Rect {
        x: x.clamp(bounds.x, bounds.right().saturating_sub(width)),
        y: y.clamp(bounds.y, bounds.bottom().saturating_sub(height)),
        width,
        height,
    }
}

pub struct ClearWidget;

impl Widget for ClearWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        ratatui::widgets::Clear.render(area, buf);
    }
}
