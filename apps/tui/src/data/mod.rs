pub mod error;
pub mod parse;
pub mod summary;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

pub use error::DataError;
pub use parse::{parse_csv, LoadReport, SkippedRow};
pub use summary::DatasetSummary;

pub const DEFAULT_DATA_URL: &str = "https://flunky.github.io/cars2017.csv";
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Where the vehicle CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` locations are URLs, anything else a path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        Self::Url(DEFAULT_DATA_URL.to_string())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Loads and parses the dataset once. There are no retries: any failure is
/// returned to the caller, which must not start the presentation.
pub async fn load(source: &DataSource) -> Result<LoadReport, DataError> {
    info!(%source, "loading dataset");
    let body = match source {
        DataSource::Url(url) => fetch(url).await?,
        DataSource::File(path) => tokio::fs::read_to_string(path).await?,
    };

    let report = parse_csv(body.as_bytes())?;
    if !report.skipped.is_empty() {
        warn!(skipped = report.skipped.len(), "some dataset rows were unusable");
    }
    info!(records = report.records.len(), "dataset loaded");
    Ok(report)
}

async fn fetch(url: &str) -> Result<String, DataError> {
    let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(body)
}
