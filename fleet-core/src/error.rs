//! Error types for fleetctl

use thiserror::Error;

/// Core error type for fleet operations
#[derive(Error, Debug)]
pub enum FleetError {
    /// Neither an application nor a device was selected
    #[error("You must specify an application or device")]
    MissingScope,

    /// The selected scope has no variables of the requested kind
    #[error("No environment variables found")]
    NoEnvironmentVariables,

    /// No credentials, or the remote API rejected them
    #[error("Login required: run `fleetctl config set token <TOKEN>` to authenticate")]
    NotLoggedIn,

    /// The remote API answered with a non-success status
    #[error("Request to {endpoint} failed with HTTP {status}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for fleet operations
pub type Result<T> = std::result::Result<T, FleetError>;

impl From<serde_json::Error> for FleetError {
    fn from(err: serde_json::Error) -> Self {
        FleetError::Serialization(err.to_string())
    }
}
