use crate::datasets::SourceColumn;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience result type used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type returned by model lookups, parsers, and the ingestion driver.
///
/// Structural failures abort ingestion of one source; lookup failures are local and
/// never modify the model.
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying I/O error while reading a stream.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An input file could not be opened.
    #[error("failed to open file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// CSV reader error (unreadable stream, invalid UTF-8, ...).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON document could not be decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input does not have the expected structure.
    #[error("parse error at row {row}: {message}")]
    Parse { row: usize, message: String },

    /// A column role required by the source format is absent from the mapping.
    #[error("column mapping has no entry for {0}")]
    MissingColumn(SourceColumn),

    /// Language tags must be three alphabetic characters.
    #[error("invalid language code '{0}': expected three alphabetic letters")]
    InvalidLanguage(String),

    #[error("no region found matching {0}")]
    RegionNotFound(String),

    #[error("no measure found matching {0}")]
    MeasureNotFound(String),

    #[error("no name stored for language {0}")]
    NameNotFound(String),

    #[error("no value found for year {0}")]
    YearNotFound(i32),

    /// Unknown source-format tag.
    #[error("unsupported source format: {0}")]
    UnsupportedFormat(String),

    /// Dataset code not present in the catalogue.
    #[error("no dataset matches key: {0}")]
    UnknownDataset(String),

    /// Year filter text is neither `YYYY` nor `YYYY-ZZZZ`.
    #[error("invalid input for years argument: {0}")]
    InvalidYears(String),
}

impl Error {
    pub(crate) fn parse(row: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            row,
            message: message.into(),
        }
    }
}
