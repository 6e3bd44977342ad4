// Terminal rendering for the fuel story.

pub mod layout;
pub mod screens;
pub mod widgets;

use crate::app::{App, LoadState};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    match &app.load_state {
        LoadState::Loading => screens::status::render_loading(app, f),
        LoadState::Failed(message) => screens::status::render_error(app, message, f),
        LoadState::Ready(controller) => screens::story::render_story(controller, f),
    }

    if app.show_help {
        let area = f.area();
        screens::help::render_help_popup(f, area);
    }
}
