use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;
use tracing::info;

use fuel_story::data::{self, DataSource, DatasetSummary};

use crate::app::{handle_key, handle_mouse, App};
use crate::ui;

/// Load the dataset, print a summary and exit
pub async fn run_headless(source: &DataSource, json: bool) -> Result<()> {
    let report = data::load(source).await?;
    let summary = DatasetSummary::new(source.to_string(), &report.records, &report.skipped);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", format_summary(&summary));
    }
    Ok(())
}

fn format_summary(summary: &DatasetSummary) -> String {
    let mpg = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"));

    let mut out = String::new();
    out.push_str("\nFuel Story Dataset\n");
    out.push_str("==================\n");
    out.push_str(&format!("Source: {}\n", summary.source));
    out.push_str(&format!("Vehicles: {}\n", summary.total));
    out.push_str(&format!("Skipped rows: {}\n", summary.skipped));
    if !summary.unrecognized_fuels.is_empty() {
        out.push_str(&format!(
            "Unrecognized fuels: {}\n",
            summary.unrecognized_fuels.join(", ")
        ));
    }

    out.push_str("\nBy Fuel (count, mean city MPG, mean highway MPG):\n");
    for fuel in &summary.by_fuel {
        out.push_str(&format!(
            "- {}: {} | {} | {}\n",
            fuel.fuel.label(),
            fuel.count,
            mpg(fuel.mean_city_mpg),
            mpg(fuel.mean_highway_mpg)
        ));
    }

    out.push_str("\nBy Engine Cylinders:\n");
    for entry in &summary.by_cylinders {
        out.push_str(&format!("- {}: {}\n", entry.cylinders, entry.count));
    }
    out
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    app.start_loading();

    while app.running {
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if !matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            // Let scene routines run between frames.
            tokio::task::yield_now().await;
            continue;
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => handle_key(app, key),
            Ok(Event::Mouse(mouse)) => {
                let size = terminal.size()?;
                handle_mouse(app, mouse, Rect::new(0, 0, size.width, size.height));
            }
            Ok(Event::Resize(_, _)) => {
                // Redrawn at the top of the loop
            }
            Ok(_) | Err(_) => {}
        }
    }

    info!("quitting");
    Ok(())
}
