use std::path::PathBuf;

use clap::Parser;

use fuel_story::config::{DATA_ENV, DEBUG_ENV, LOG_ENV};

#[derive(Debug, Parser)]
#[command(name = "fuel_story", version, about = "Fuel efficiency data story for the terminal")]
pub struct CliArgs {
    /// Load the dataset, print a summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Dataset URL or CSV path
    #[arg(long, value_name = "URL|PATH")]
    pub data: Option<String>,

    /// Write logs to this file
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(data) = &self.data {
            std::env::set_var(DATA_ENV, data);
        }
        if let Some(path) = &self.log_file {
            std::env::set_var(LOG_ENV, path);
        }
        if self.debug {
            std::env::set_var(DEBUG_ENV, "1");
        }
    }

    pub const fn headless_requested(&self) -> bool {
        self.headless || self.json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_flag() {
        let args = CliArgs::parse_from([
            "fuel_story",
            "--json",
            "--debug",
            "--data",
            "cars.csv",
            "--log-file",
            "story.log",
        ]);
        assert!(args.headless_requested());
        assert!(args.debug);
        assert_eq!(args.data.as_deref(), Some("cars.csv"));
        assert_eq!(args.log_file, Some(PathBuf::from("story.log")));
    }

    #[test]
    fn no_flags_means_interactive() {
        let args = CliArgs::parse_from(["fuel_story"]);
        assert!(!args.headless_requested());
        assert!(args.data.is_none());
    }
}
