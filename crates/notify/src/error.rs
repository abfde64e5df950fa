//! Shared error type for dispatch and configuration.

/// Errors that can occur during notification dispatch.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Message store error: {0}")]
    Store(String),
}
