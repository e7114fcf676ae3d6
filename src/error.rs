use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reading or writing the reminder table.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read spreadsheet {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    #[error("could not write spreadsheet {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("{path} row {row}: {reason}")]
    Malformed {
        path: PathBuf,
        row: usize,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum ReminderError {
    /// Input the user can correct: empty fields, a time in the past.
    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    Parse {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ReminderError {
    /// Whether the error belongs in the error dialog rather than ending the
    /// program.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Parse { .. })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T, E = ReminderError> = std::result::Result<T, E>;
