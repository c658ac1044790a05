//! Centralized error handling for dtprobe.
//!
//! Every fallible operation in the library returns [`Result<T>`], whose error
//! side is the [`ProbeError`] enum. The variants follow the stages of a run,
//! so `main` can print a single human-readable diagnostic and exit non-zero:
//!
//! ```
//! use dtprobe::error::ProbeError;
//!
//! fn describe(err: &ProbeError) -> &'static str {
//!     match err {
//!         ProbeError::DataAcquisition(_) => "could not get the dataset",
//!         ProbeError::Render(_) => "graphviz is missing or failed",
//!         ProbeError::UnknownColumn(_) | ProbeError::UnmappedValue { .. } => "bad input data",
//!         _ => "other failure",
//!     }
//! }
//! ```
//!
//! ## Context Extension Trait
//!
//! The `ResultExt` trait adds `.context()` to any `Result` whose error
//! converts into `ProbeError`. Acquisition and render errors keep their
//! variant; other errors become `ProbeError::Other`:
//!
//! ```no_run
//! use dtprobe::error::ResultExt as _;
//!
//! fn load() -> dtprobe::error::Result<String> {
//!     std::fs::read_to_string("Cars.csv").context("Failed to load dataset")
//! }
//! ```

use std::fmt;

/// Main error type for dtprobe operations.
#[derive(Debug)]
pub enum ProbeError {
    /// I/O errors (file operations, subprocess pipes, etc.)
    Io(std::io::Error),

    /// The dataset is not available locally and could not be downloaded
    DataAcquisition(String),

    /// Data processing errors (Polars, parsing, etc.)
    DataProcessing(String),

    /// A column name that is not one of the known category columns
    UnknownColumn(String),

    /// A cell value that is not part of its column's category ordering
    UnmappedValue { column: String, value: String },

    /// Decision tree fitting or evaluation failed
    Training(String),

    /// The external graph renderer could not be run or reported failure
    Render(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataAcquisition(msg) => write!(f, "{msg}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::UnknownColumn(name) => write!(f, "Unknown category column: '{name}'"),
            Self::UnmappedValue { column, value } => write!(
                f,
                "Value '{value}' in column '{column}' is not part of its category ordering"
            ),
            Self::Training(msg) => write!(f, "Training failed: {msg}"),
            Self::Render(msg) => write!(f, "{msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ProbeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for ProbeError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for ProbeError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for dtprobe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ProbeError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_prefix(msg.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_prefix(f()))
    }
}

impl ProbeError {
    /// Prepends `prefix` to the message. Acquisition and render failures keep
    /// their variant; everything else becomes [`ProbeError::Other`].
    fn with_prefix(self, prefix: String) -> Self {
        match self {
            Self::DataAcquisition(msg) => Self::DataAcquisition(format!("{prefix}: {msg}")),
            Self::Render(msg) => Self::Render(format!("{prefix}: {msg}")),
            other => Self::Other(format!("{prefix}: {other}")),
        }
    }
}
