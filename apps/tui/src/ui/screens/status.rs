use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, BRAILLE_SIX};

use crate::app::App;
use crate::ui::widgets::popup::centered_rect;

pub fn render_loading(app: &App, f: &mut Frame<'_>) {
    let area = centered_rect(60, 30, f.area());
    let block = Block::default()
        .title("== Fuel Story ==")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let throbber = Throbber::default()
        .label("Loading vehicle data...")
        .style(Style::default().fg(Color::White))
        .throbber_style(Style::default().fg(Color::Cyan))
        .throbber_set(BRAILLE_SIX);
    let mut state = app.throbber.clone();
    f.render_stateful_widget(throbber, rows[0], &mut state);

    f.render_widget(
        Paragraph::new(format!("{}", app.source))
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true }),
        rows[1],
    );
}

pub fn render_error(app: &App, message: &str, f: &mut Frame<'_>) {
    let area = centered_rect(70, 40, f.area());
    let block = Block::default()
        .title("== Dataset unavailable ==")
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let text = Text::from(vec![
        TextLine::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::White),
        )),
        TextLine::default(),
        TextLine::from(Span::styled(
            format!("Source: {}", app.source),
            Style::default().fg(Color::Gray),
        )),
        TextLine::default(),
        TextLine::from(Span::styled(
            "The presentation needs the dataset to start. Press q to quit.",
            Style::default().fg(Color::Gray),
        )),
    ]);

    f.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}
