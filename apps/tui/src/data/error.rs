use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to fetch dataset: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing the `{0}` column")]
    MissingColumn(&'static str),

    #[error("unknown fuel type `{0}`")]
    UnknownFuel(String),

    #[error("invalid {field} value `{value}`")]
    InvalidNumber { field: &'static str, value: String },

    #[error("negative cylinder count {0}")]
    NegativeCylinders(i64),

    #[error("dataset contains no usable vehicles")]
    Empty,
}
