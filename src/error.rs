use thiserror::Error;

/// Result type for tolbok operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the expansion engine
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }
}
