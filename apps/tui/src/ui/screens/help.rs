use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::ui::widgets::popup::{centered_rect, ClearWidget};

pub fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(70, 70, area);
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });
    f.render_widget(help_paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.bottom().saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };
    let hint = Paragraph::new(TextLine::from(Span::styled(
        "Press F1 or Esc to close",
        Style::default().fg(Color::Gray),
    )))
    .alignment(Alignment::Center);
    f.render_widget(hint, hint_area);
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let heading = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let entry = |keys: &'static str, action: &'static str| {
        TextLine::from(vec![
            Span::styled(format!("  {keys:<12}"), key),
            Span::raw(action),
        ])
    };

    vec![
        TextLine::from(Span::styled("Presentation", heading)),
        entry("Enter/Space", "Press the scene's continue button"),
        entry("\u{2192}", "Next scene (once the scene has finished)"),
        entry("\u{2190}", "Previous scene"),
        entry("r", "Replay the current scene"),
        entry("Click", "The continue button or Back / Replay / Next"),
        TextLine::default(),
        TextLine::from(Span::styled("Exploring the data", heading)),
        entry("1 / 2 / 3", "Show only Electric / Gasoline / Diesel"),
        entry("", "Press the same number again to show every vehicle"),
        entry("Mouse", "Hover a point for details, click the legend to filter"),
        TextLine::default(),
        TextLine::from(Span::styled("General", heading)),
        entry("F1", "Toggle this help"),
        entry("Esc", "Close this help"),
        entry("q, Ctrl-C", "Quit"),
    ]
}
