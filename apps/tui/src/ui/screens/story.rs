use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tokio::time::Instant;

use fuel_story::domain::Scene;
use fuel_story::story::{PresentationState, SlideController};

use crate::ui::layout::StoryAreas;
use crate::ui::widgets::scatter::render_scatter;
use crate::ui::widgets::sidebar::render_sidebar;

pub fn render_story(controller: &SlideController, f: &mut Frame<'_>) {
    let areas = StoryAreas::new(f.area());
    let now = Instant::now();

    controller.view(|state, stage| {
        render_header(f, areas.header, state, &stage.title);
        render_scatter(f, &areas, stage, now);
        render_sidebar(f, &areas, stage, now);
    });
    render_shortcuts(f, areas.footer);
}

fn render_header(f: &mut Frame<'_>, area: Rect, state: &PresentationState, title: &str) {
    let current = state.current_scene.index();
    let mut progress = Vec::with_capacity(Scene::COUNT * 2 + 1);
    for index in 0..Scene::COUNT {
        let style = if index == current {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let dot = if index == current { "\u{25cf}" } else { "\u{25cb}" };
        progress.push(Span::styled(dot, style));
        progress.push(Span::raw(" "));
    }
    progress.push(Span::styled(
        format!(
            " Scene {} of {} \u{b7} {}",
            current + 1,
            Scene::COUNT,
            state.current_scene.label()
        ),
        Style::default().fg(Color::Gray),
    ));

    let text = Text::from(vec![
        TextLine::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(progress),
    ]);

    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM)),
        area,
    );
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let shortcuts = TextLine::from(vec![
        Span::styled("Enter", key),
        Span::raw(": Continue   "),
        Span::styled("\u{2190}/\u{2192}/r", key),
        Span::raw(": Back/Next/Replay   "),
        Span::styled("1-3", key),
        Span::raw(": Legend   "),
        Span::styled("Click", key),
        Span::raw(": Buttons/Legend   "),
        Span::styled("F1", key),
        Span::raw(": Help   "),
        Span::styled("q", key),
        Span::raw(": Quit"),
    ]);
    f.render_widget(Paragraph::new(shortcuts).alignment(Alignment::Center), area);
}
