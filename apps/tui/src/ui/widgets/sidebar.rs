use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tokio::time::Instant;

use fuel_story::stage::palette;
use fuel_story::stage::{Container, Control, NavBar, NextLabel, Stage};

use crate::ui::layout::StoryAreas;

const TEXT_RGB: (u8, u8, u8) = (225, 225, 235);
const HEADER_RGB: (u8, u8, u8) = (240, 200, 90);
const CONTROL_RGB: (u8, u8, u8) = (0x45, 0xa0, 0x49);

pub fn render_sidebar(f: &mut Frame<'_>, areas: &StoryAreas, stage: &Stage, now: Instant) {
    let block = Block::default()
        .title("Story")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(block, areas.sidebar);

    f.render_widget(
        Paragraph::new(story_text(stage, now)).wrap(Wrap { trim: false }),
        areas.narrative,
    );

    if let Some(control) = &stage.control {
        render_control(f, areas.control, control, now);
    }
    render_nav(f, areas.nav, stage.nav);
}

fn story_text(stage: &Stage, now: Instant) -> Text<'static> {
    let body = Style::default().fg(palette::with_opacity(TEXT_RGB, 1.0));
    let mut lines = paragraph_lines(&stage.panel(Container::Narrative).text(), body);

    for finding in &stage.findings {
        let color = palette::with_opacity(TEXT_RGB, finding.opacity.value_at(now));
        lines.push(TextLine::from(vec![
            Span::styled("\u{2022} ", Style::default().fg(color)),
            Span::styled(finding.text, Style::default().fg(color)),
        ]));
    }
    if !stage.findings.is_empty() {
        lines.push(TextLine::default());
    }

    let header = Style::default()
        .fg(palette::with_opacity(HEADER_RGB, 1.0))
        .add_modifier(Modifier::BOLD);
    lines.extend(paragraph_lines(
        &stage.panel(Container::ConclusionHeader).text(),
        header,
    ));
    lines.extend(paragraph_lines(&stage.panel(Container::Conclusion).text(), body));

    Text::from(lines)
}

fn paragraph_lines(text: &str, style: Style) -> Vec<TextLine<'static>> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .map(|line| TextLine::styled(line.to_string(), style))
        .collect()
}

fn render_control(f: &mut Frame<'_>, area: Rect, control: &Control, now: Instant) {
    let opacity = control.opacity.value_at(now);
    let color = palette::with_opacity(CONTROL_RGB, opacity);
    let button = Paragraph::new(TextLine::from(vec![
        Span::styled("Enter ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            control.label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    f.render_widget(button, area);
}

fn render_nav(f: &mut Frame<'_>, areas: [Rect; 3], nav: NavBar) {
    if !nav.visible {
        return;
    }
    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let buttons = [
        ("\u{2190}", "Back"),
        ("r", "Replay"),
        ("\u{2192}", nav_label(nav)),
    ];
    for (area, (shortcut, label)) in areas.into_iter().zip(buttons) {
        let line = TextLine::from(vec![
            Span::styled(shortcut, key),
            Span::raw(format!(" {label}")),
        ]);
        f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }
}

fn nav_label(nav: NavBar) -> &'static str {
    match nav.next_label {
        NextLabel::Arrow => "Next",
        NextLabel::Restart => NextLabel::Restart.text(),
    }
}
