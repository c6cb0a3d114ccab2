use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    /// Bad user input. Carries the complete list of offending items, never
    /// just the first one.
    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<String>,
    },

    #[error("Failed to copy \"{}\" to \"{}\": {source}", .src.display(), .dest.display())]
    Copy {
        src: PathBuf,
        dest: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write \"{}\": {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Schema export failed: {0}")]
    Export(String),

    /// A bundled template resource could not be located. This is a packaging
    /// defect, not something the user can correct.
    #[error("Bundled resource missing: {0} (broken installation?)")]
    MissingResource(String),

    #[error("Configuration store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Build a validation error with its full list of offending items.
    pub fn validation(message: impl Into<String>, details: Vec<String>) -> Self {
        BridgeError::Validation {
            message: message.into(),
            details,
        }
    }

    /// Detail lines printed under the main message, one per offending item.
    pub fn details(&self) -> &[String] {
        match self {
            BridgeError::Validation { details, .. } => details,
            _ => &[],
        }
    }

    /// Process exit code for the top-level dispatcher.
    pub fn exit_code(&self) -> i32 {
        match self {
            BridgeError::Validation { .. } => 2,
            BridgeError::MissingResource(_) => 70,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
