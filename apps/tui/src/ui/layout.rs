use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

use fuel_story::domain::Fuel;
use fuel_story::scale::PlotPoint;

const Y_GUTTER: u16 = 6;
const X_GUTTER: u16 = 2;
const LEGEND_WIDTH: u16 = 14;
const BACK_WIDTH: u16 = 8;
const REPLAY_WIDTH: u16 = 10;

/// Buttons of the navigation bar, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavButton {
    Back,
    Replay,
    Next,
}

/// Screen regions of the story view. Computed from the frame size alone so
/// the renderer and mouse hit-testing always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryAreas {
    pub header: Rect,
    pub chart: Rect,
    pub plot: Rect,
    pub x_ticks: Rect,
    pub x_title: Rect,
    pub y_ticks: Rect,
    pub legend: Rect,
    pub sidebar: Rect,
    pub narrative: Rect,
    pub control: Rect,
    pub nav: [Rect; 3],
    pub footer: Rect,
}

impl StoryAreas {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title and scene progress
                Constraint::Min(8),    // Chart and sidebar
                Constraint::Length(1), // Shortcuts
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
            .split(rows[1]);

        let chart = body[0];
        let inner = chart.inner(Margin::new(1, 1));
        let plot = Rect {
            x: inner.x + Y_GUTTER.min(inner.width),
            y: inner.y,
            width: inner.width.saturating_sub(Y_GUTTER),
            height: inner.height.saturating_sub(X_GUTTER),
        };
        let x_ticks = Rect {
            x: plot.x,
            y: plot.bottom().min(inner.bottom()),
            width: plot.width,
            height: u16::from(inner.height > plot.height),
        };
        let x_title = Rect {
            x: plot.x,
            y: x_ticks.bottom().min(inner.bottom()),
            width: plot.width,
            height: u16::from(inner.height > plot.height + 1),
        };
        let y_ticks = Rect {
            x: inner.x,
            y: plot.y,
            width: Y_GUTTER.min(inner.width),
            height: plot.height,
        };
        let legend_height = u16::try_from(Fuel::ALL.len()).unwrap_or(3);
        let legend = Rect {
            x: plot.right().saturating_sub(LEGEND_WIDTH + 1).max(plot.x),
            y: plot.bottom().saturating_sub(legend_height + 1).max(plot.y),
            width: LEGEND_WIDTH.min(plot.width),
            height: legend_height.min(plot.height),
        };

        let sidebar = body[1];
        let panels = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Narration
                Constraint::Length(3), // Continue control
                Constraint::Length(1), // Navigation
            ])
            .split(sidebar.inner(Margin::new(1, 1)));
        let nav = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(BACK_WIDTH),
                Constraint::Length(REPLAY_WIDTH),
                Constraint::Min(0),
            ])
            .split(panels[2]);

        Self {
            header: rows[0],
            chart,
            plot,
            x_ticks,
            x_title,
            y_ticks,
            legend,
            sidebar,
            narrative: panels[0],
            control: panels[1],
            nav: [nav[0], nav[1], nav[2]],
            footer: rows[2],
        }
    }

    /// Plot-space point under a terminal cell, if the cell is on the plot.
    pub fn plot_point(&self, column: u16, row: u16) -> Option<PlotPoint> {
        if !contains(self.plot, column, row) {
            return None;
        }
        let x = (f64::from(column - self.plot.x) + 0.5) / f64::from(self.plot.width);
        let y = 1.0 - (f64::from(row - self.plot.y) + 0.5) / f64::from(self.plot.height);
        Some(PlotPoint::new(x, y))
    }

    /// Terminal column and row that draw a plot-space point.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn cell_of(&self, point: PlotPoint) -> (u16, u16) {
        let span = |extent: u16, fraction: f64| {
            let last = f64::from(extent.saturating_sub(1));
            (fraction.clamp(0.0, 1.0) * last).round() as u16
        };
        (
            self.plot.x + span(self.plot.width, point.x),
            self.plot.y + span(self.plot.height, 1.0 - point.y),
        )
    }

    /// Size of one cell in plot units, used as the hover tolerance.
    pub fn cell_extent(&self) -> f64 {
        let width = f64::from(self.plot.width.max(1));
        let height = f64::from(self.plot.height.max(1));
        (1.0 / width).max(1.0 / height)
    }

    /// Legend rows follow [`Fuel::ALL`].
    pub fn legend_entry_at(&self, column: u16, row: u16) -> Option<Fuel> {
        if !contains(self.legend, column, row) {
            return None;
        }
        Fuel::from_index(usize::from(row - self.legend.y))
    }

    pub const fn on_control(&self, column: u16, row: u16) -> bool {
        contains(self.control, column, row)
    }

    pub fn nav_button_at(&self, column: u16, row: u16) -> Option<NavButton> {
        let buttons = [NavButton::Back, NavButton::Replay, NavButton::Next];
        self.nav
            .iter()
            .zip(buttons)
            .find_map(|(&area, button)| contains(area, column, row).then_some(button))
    }
}

const fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x + area.width
        && row >= area.y
        && row < area.y + area.height
}
