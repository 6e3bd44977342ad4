mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use fuel_story::config::AppConfig;
use fuel_story::telemetry::{self, LogTarget};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = AppConfig::from_env();

    let headless = args.headless_requested() || !is_terminal();
    telemetry::init_tracing(
        &LogTarget::select(config.log_file.clone(), headless),
        config.debug,
    )?;

    if headless {
        return event::run_headless(&config.data, args.json).await;
    }

    let mut app = App::new(config.data);
    let mut terminal = terminal::setup_terminal()?;

    let result = event::run(&mut terminal, &mut app).await;

    terminal::cleanup_terminal_state(true, true);
    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
