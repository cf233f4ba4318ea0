//! Error types for the intent benchmark.
//!
//! Variants are tagged by kind so callers can branch on the failure without
//! parsing messages. Two severity tiers exist: fatal errors abort a run before
//! any report is produced, row-scoped errors are recorded against a single
//! sample and the batch continues (see [`Error::is_row_scoped`]).

use thiserror::Error;

/// Result type alias using our error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the benchmark.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (missing credential, invalid settings file, bad flag values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Sample file rejected; the whole file is considered untrustworthy
    #[error("Load error: {path}: line {line}: {message}")]
    Load {
        path: String,
        line: usize,
        message: String,
    },

    /// Connection, timeout or body-read failure talking to an oracle
    #[error("Transport error: {0}")]
    Transport(String),

    /// Oracle answered with a non-2xx status
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected JSON shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Chat-completion response carried zero choices
    #[error("Completion response contained no choices")]
    EmptyChoices,

    /// Classification service answered `success=false`
    #[error("Service reported failure: {0}")]
    ServiceFailure(String),

    /// Oracle text contained no digit run
    #[error("No service id in response: {raw:?}")]
    NoDigits { raw: String },

    /// Digit run could not be converted to an integer
    #[error("Invalid service id {digits:?} in response {raw:?}: {message}")]
    InvalidInteger {
        digits: String,
        raw: String,
        message: String,
    },

    /// Parsed id is not a catalog member
    #[error("Service id {value} is outside the catalog (raw={raw:?})")]
    OutOfRange { value: u64, raw: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] Box<std::io::Error>),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] Box<serde_json::Error>),

    /// CSV errors
    #[error("CSV error: {0}")]
    Csv(#[from] Box<csv::Error>),
}

impl Error {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a load error for a specific line of a sample file.
    pub fn load(path: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Create a service-failure error.
    pub fn service_failure(message: impl Into<String>) -> Self {
        Self::ServiceFailure(message.into())
    }

    /// Whether this failure is attributable to one sample (recorded, never aborts).
    pub const fn is_row_scoped(&self) -> bool {
        matches!(
            self,
            Self::Transport(_)
                | Self::Status { .. }
                | Self::Decode(_)
                | Self::EmptyChoices
                | Self::ServiceFailure(_)
                | Self::NoDigits { .. }
                | Self::InvalidInteger { .. }
                | Self::OutOfRange { .. }
        )
    }

    /// Text written to the `error` column of the probe output.
    ///
    /// A service-reported failure is written verbatim (trimmed) so the column
    /// carries what the service said; every other kind uses its display form.
    pub fn row_message(&self) -> String {
        match self {
            Self::ServiceFailure(message) => message.trim().to_string(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(Box::new(value))
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(Box::new(value))
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Self::Csv(Box::new(value))
    }
}
