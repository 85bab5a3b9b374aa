//! Error types for the noughts crate

use thiserror::Error;

use crate::worker::LifecycleState;

/// Main error type for the noughts crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("storage error during {operation}: {message}")]
    Storage { operation: String, message: String },

    #[error("network request for '{url}' failed: {message}")]
    Network { url: String, message: String },

    #[error("install failed while caching '{asset}': {message}")]
    InstallFailed { asset: String, message: String },

    #[error("cannot {action} while worker is {state}")]
    InvalidLifecycleTransition {
        action: &'static str,
        state: LifecycleState,
    },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
