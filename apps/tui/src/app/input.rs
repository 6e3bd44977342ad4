use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::debug;

use fuel_story::domain::Fuel;
use fuel_story::stage::{HoverEvent, Pointer};

use crate::app::state::App;
use crate::ui::layout::{NavButton, StoryAreas};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }

    if handle_help_toggle(app, key.code) {
        return;
    }

    if key.code == KeyCode::Char('q') {
        app.running = false;
        return;
    }

    let Some(controller) = app.controller_mut() else {
        return;
    };
    let nav_visible = controller.view(|_, stage| stage.nav.visible);

    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => {
            controller.activate_control();
        }
        KeyCode::Right if nav_visible => controller.advance(),
        KeyCode::Left if nav_visible => controller.retreat(),
        KeyCode::Char('r') if nav_visible => controller.replay(),
        KeyCode::Char(digit @ '1'..='3') => {
            let index = digit as usize - '1' as usize;
            if let Some(fuel) = Fuel::from_index(index) {
                controller.legend_click(fuel);
            }
        }
        _ => {}
    }
}

fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if key == KeyCode::F(1) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}

/// Routes pointer movement to hover tooltips and left clicks to the legend,
/// the continue control and the navigation bar. `area` is the full frame.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent, area: Rect) {
    if app.show_help {
        return;
    }
    let areas = StoryAreas::new(area);

    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            hover_at(app, &areas, mouse.column, mouse.row);
        }
        MouseEventKind::Down(MouseButton::Left) => click_at(app, &areas, mouse.column, mouse.row),
        _ => {}
    }
}

fn click_at(app: &mut App, areas: &StoryAreas, column: u16, row: u16) {
    let Some(controller) = app.controller_mut() else {
        return;
    };

    if let Some(fuel) = areas.legend_entry_at(column, row) {
        debug!(fuel = fuel.label(), "legend clicked");
        controller.legend_click(fuel);
        return;
    }

    if areas.on_control(column, row) {
        debug!("control clicked");
        controller.activate_control();
        return;
    }

    let Some(button) = areas.nav_button_at(column, row) else {
        return;
    };
    if !controller.view(|_, stage| stage.nav.visible) {
        return;
    }
    debug!(?button, "navigation clicked");
    match button {
        NavButton::Back => controller.retreat(),
        NavButton::Replay => controller.replay(),
        NavButton::Next => controller.advance(),
    }
}

fn hover_at(app: &mut App, areas: &StoryAreas, column: u16, row: u16) {
    let Some(controller) = app.controller() else {
        return;
    };
    let mark = areas
        .plot_point(column, row)
        .and_then(|point| controller.mark_near(point, areas.cell_extent()));
    let pointer = Pointer { column, row };

    let event = match (app.hovered, mark) {
        (None, None) => return,
        (Some(_), None) => HoverEvent::Leave,
        (Some(previous), Some(current)) if previous == current => {
            HoverEvent::Move(current, pointer)
        }
        (_, Some(current)) => HoverEvent::Enter(current, pointer),
    };
    controller.hover(event);
    app.hovered = mark;
}
