use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tokio::time::Instant;

use fuel_story::domain::Fuel;
use fuel_story::scale::{self, PlotPoint, AXIS_TICKS};
use fuel_story::stage::annotation::wrap_label;
use fuel_story::stage::palette::{self, ANNOTATION};
use fuel_story::stage::{ActiveAnnotation, ChartRenderer, Stage, Tooltip};

use crate::ui::layout::StoryAreas;
use crate::ui::widgets::popup::{anchored_rect, ClearWidget};

const AXIS_COLOR: Color = Color::Rgb(110, 110, 130);
const NOTE_WIDTH: usize = 24;
/// Marks this faint are skipped rather than drawn in background color.
const INVISIBLE: f64 = 0.01;

pub fn render_scatter(f: &mut Frame<'_>, areas: &StoryAreas, stage: &Stage, now: Instant) {
    let block = Block::default()
        .title("Average Highway MPG \u{2191}")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(palette::background()));
    f.render_widget(block, areas.chart);

    if areas.plot.width < 4 || areas.plot.height < 4 {
        return;
    }

    let line_height = 1.0 / f64::from(areas.plot.height);
    let cell_width = 1.0 / f64::from(areas.plot.width);

    f.render_widget(
        Canvas::default()
            .marker(Marker::Braille)
            .background_color(palette::background())
            .x_bounds([0.0, 1.0])
            .y_bounds([0.0, 1.0])
            .paint(|ctx| {
                draw_axes(ctx);
                ctx.layer();
                draw_marks(ctx, stage, now);
                ctx.layer();
                for annotation in stage.annotations() {
                    draw_annotation(ctx, annotation, now, cell_width, line_height);
                }
            }),
        areas.plot,
    );

    render_tick_labels(f, areas);
    render_legend(f, areas, stage);

    if let Some(tooltip) = stage.explore.as_ref().and_then(|explore| explore.tooltip) {
        render_tooltip(f, areas, stage, &tooltip);
    }
}

fn draw_axes(ctx: &mut Context<'_>) {
    ctx.draw(&CanvasLine {
        x1: 0.0,
        y1: 0.0,
        x2: 1.0,
        y2: 0.0,
        color: AXIS_COLOR,
    });
    ctx.draw(&CanvasLine {
        x1: 0.0,
        y1: 0.0,
        x2: 0.0,
        y2: 1.0,
        color: AXIS_COLOR,
    });
    for tick in AXIS_TICKS {
        let at = scale::normalize(tick);
        ctx.draw(&CanvasLine {
            x1: at,
            y1: 0.0,
            x2: at,
            y2: 0.015,
            color: AXIS_COLOR,
        });
        ctx.draw(&CanvasLine {
            x1: 0.0,
            y1: at,
            x2: 0.01,
            y2: at,
            color: AXIS_COLOR,
        });
    }
}

fn draw_marks(ctx: &mut Context<'_>, stage: &Stage, now: Instant) {
    let mut visible: Vec<(usize, f64)> = (0..stage.records().len())
        .filter_map(|index| stage.mark_opacity(index, now).map(|opacity| (index, opacity)))
        .filter(|(_, opacity)| *opacity > INVISIBLE)
        .collect();
    // Brightest marks last so they sit on top.
    visible.sort_by(|a, b| a.1.total_cmp(&b.1));

    for (index, opacity) in visible {
        let Some(record) = stage.records().get(index) else {
            continue;
        };
        let point = scale::project_record(record);
        ctx.draw(&Circle {
            x: point.x,
            y: point.y,
            radius: scale::mark_radius(record.cylinders),
            color: palette::with_opacity(palette::fuel_rgb(record.fuel), opacity),
        });
    }
}

fn draw_annotation(
    ctx: &mut Context<'_>,
    annotation: &ActiveAnnotation,
    now: Instant,
    cell_width: f64,
    line_height: f64,
) {
    let opacity = annotation.opacity.value_at(now);
    if opacity <= INVISIBLE {
        return;
    }
    let color = palette::with_opacity(ANNOTATION, opacity);
    let descriptor = annotation.descriptor;
    let anchor = descriptor.anchor_point();
    let note = descriptor.note_point();
    let start = descriptor.connector_start();

    ctx.draw(&Circle {
        x: anchor.x,
        y: anchor.y,
        radius: descriptor.radius,
        color,
    });
    ctx.draw(&CanvasLine {
        x1: start.x,
        y1: start.y,
        x2: note.x,
        y2: note.y,
        color,
    });

    let mut lines = vec![descriptor.title.to_string()];
    lines.extend(wrap_label(descriptor.label, NOTE_WIDTH));
    let widest = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    #[allow(clippy::cast_precision_loss)]
    let text_width = widest as f64 * cell_width;
    let x = note_text_x(note, descriptor.callout_offset.0, text_width);

    // Notes above the anchor grow upward, notes below grow downward.
    let upward = descriptor.callout_offset.1 >= 0.0;
    let count = lines.len();
    for (row, text) in lines.into_iter().enumerate() {
        let from_note = if upward { count - 1 - row } else { row };
        #[allow(clippy::cast_precision_loss)]
        let delta = from_note as f64 * line_height;
        let y = if upward { note.y + delta } else { note.y - delta };
        let style = if row == 0 {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };
        ctx.print(x, y.clamp(0.0, 1.0), TextLine::styled(text, style));
    }
}

fn note_text_x(note: PlotPoint, dx: f64, text_width: f64) -> f64 {
    let x = if dx < 0.0 { note.x - text_width } else { note.x };
    x.clamp(0.0, (1.0 - text_width).max(0.0))
}

fn render_tick_labels(f: &mut Frame<'_>, areas: &StoryAreas) {
    for tick in AXIS_TICKS {
        let at = scale::normalize(tick);
        let label = format!("{tick}");
        let (column, _) = areas.cell_of(PlotPoint::new(at, 0.0));
        let (_, row) = areas.cell_of(PlotPoint::new(0.0, at));

        if areas.x_ticks.height > 0 {
            let width = u16::try_from(label.len()).unwrap_or(3);
            let x = column.min(areas.x_ticks.right().saturating_sub(width));
            f.render_widget(
                Paragraph::new(label.clone()).style(Style::default().fg(AXIS_COLOR)),
                Rect::new(x, areas.x_ticks.y, width, 1),
            );
        }
        if areas.y_ticks.width > 1 {
            f.render_widget(
                Paragraph::new(label)
                    .alignment(Alignment::Right)
                    .style(Style::default().fg(AXIS_COLOR)),
                Rect::new(areas.y_ticks.x, row, areas.y_ticks.width - 1, 1),
            );
        }
    }

    if areas.x_title.height > 0 {
        f.render_widget(
            Paragraph::new("Average City MPG \u{2192}")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray)),
            areas.x_title,
        );
    }
}

fn render_legend(f: &mut Frame<'_>, areas: &StoryAreas, stage: &Stage) {
    let filterable = stage.explore.is_some();
    let active = stage.explore.as_ref().and_then(|explore| explore.legend_filter);
    let lines: Vec<TextLine<'_>> = Fuel::ALL
        .iter()
        .enumerate()
        .map(|(index, &fuel)| {
            let opacity = match active {
                Some(selected) if selected != fuel => 0.35,
                _ => 1.0,
            };
            let color = palette::with_opacity(palette::fuel_rgb(fuel), opacity);
            let mut spans = vec![
                Span::styled("\u{25cf} ", Style::default().fg(color)),
                Span::styled(fuel.label(), Style::default().fg(color)),
            ];
            if filterable {
                spans.push(Span::styled(
                    format!(" [{}]", index + 1),
                    Style::default().fg(AXIS_COLOR),
                ));
            }
            TextLine::from(spans)
        })
        .collect();

    f.render_widget(
        Paragraph::new(lines).style(Style::default().bg(palette::background())),
        areas.legend,
    );
}

fn render_tooltip(f: &mut Frame<'_>, areas: &StoryAreas, stage: &Stage, tooltip: &Tooltip) {
    let record = tooltip.record;
    let area = anchored_rect(
        tooltip.pointer.column,
        tooltip.pointer.row,
        22,
        5,
        areas.chart,
    );
    let lines = vec![
        TextLine::from(format!("City MPG: {}", record.city_mpg)),
        TextLine::from(format!("Highway MPG: {}", record.highway_mpg)),
        TextLine::from(format!("Cylinders: {}", record.cylinders)),
    ];

    f.render_widget(ClearWidget, area);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(record.fuel.label())
                .border_style(Style::default().fg(stage.color_of(record.fuel))),
        ),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuel_story::domain::VehicleRecord;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::Arc;

    #[test]
    fn left_notes_end_at_their_anchor_side() {
        let note = PlotPoint::new(0.6, 0.5);
        assert!((note_text_x(note, -0.1, 0.2) - 0.4).abs() < 1e-9);
        assert!((note_text_x(note, 0.1, 0.2) - 0.6).abs() < 1e-9);
        assert!((note_text_x(PlotPoint::new(0.95, 0.5), 0.1, 0.2) - 0.8).abs() < 1e-9);
    }

    fn stage() -> Stage {
        Stage::new(Arc::from(vec![VehicleRecord {
            city_mpg: 20.0,
            highway_mpg: 28.0,
            cylinders: 6,
            fuel: Fuel::Gasoline,
        }]))
    }

    fn drawn_text(stage: &Stage) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40))
            .unwrap_or_else(|e| panic!("terminal: {e}"));

        terminal
            .draw(|f| {
                let areas = StoryAreas::new(f.area());
                render_scatter(f, &areas, stage, Instant::now());
            })
            .unwrap_or_else(|e| panic!("draw: {e}"));

        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn chart_draws_axes_and_legend() {
        let text = drawn_text(&stage());
        assert!(text.contains("Average City MPG"));
        assert!(text.contains("Gasoline"));
        assert!(text.contains("100"));
    }

    #[test]
    fn legend_keys_appear_only_in_explore_mode() {
        let mut stage = stage();
        assert!(!drawn_text(&stage).contains("[1]"));

        stage.enable_explore();
        let text = drawn_text(&stage);
        assert!(text.contains("Electric [1]"));
        assert!(text.contains("Diesel [3]"));
    }
}
