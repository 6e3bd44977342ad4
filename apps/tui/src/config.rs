use std::env;
use std::path::PathBuf;

use dotenv::dotenv;

use crate::data::DataSource;

pub const DATA_ENV: &str = "FUEL_STORY_DATA";
pub const LOG_ENV: &str = "FUEL_STORY_LOG";
pub const DEBUG_ENV: &str = "FUEL_STORY_DEBUG";

/// Runtime settings. Visual parameters are compile-time constants and are
/// not configurable here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data: DataSource,
    pub log_file: Option<PathBuf>,
    pub debug: bool,
}

impl AppConfig {
    /// Reads the environment, after loading a `.env` file if one exists.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            data: non_empty(DATA_ENV)
                .map_or_else(DataSource::default, |value| DataSource::parse(&value)),
            log_file: non_empty(LOG_ENV).map(PathBuf::from),
            debug: non_empty(DEBUG_ENV).is_some_and(|value| value != "0"),
        }
    }
}
