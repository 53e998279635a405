//! Error types for the countdown widget
//!
//! This module defines all error types used throughout the widget core,
//! providing clear error messages and proper error propagation.
//!
//! None of these errors is fatal at runtime. Callers recover locally by
//! falling back to defaults, a local quote, or a no-op host command.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for the widget core
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Persistent storage could not be read or written
    /// Preserves the underlying error source for full error chain transparency
    #[error("Storage error: {0}")]
    StorageError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Runtime configuration error (data directory, logging setup)
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The remote quote provider failed (network, HTTP status, malformed body)
    #[error("Quote provider error: {0}")]
    QuoteProviderError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The remote quote provider answered but produced no usable quote
    #[error("No quote available: {0}")]
    QuoteUnavailable(String),

    /// An exam date could not be parsed as `YYYY-MM-DD`
    #[error("Invalid exam date: {0}")]
    InvalidExamDate(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for widget operations
pub type Result<T> = std::result::Result<T, WidgetError>;

/// Convert an error to a user-friendly message
///
/// The messages are meant for the settings panel or a tray notification;
/// none of them asks the user to take action for the widget to keep running.
pub fn get_user_friendly_error(error: &WidgetError) -> String {
    match error {
        WidgetError::StorageError(_) | WidgetError::IoError(_) => {
            "Unable to save widget state.\n\n\
             Your changes are kept for this session but may not persist.\n\
             Check that the data directory is writable."
                .to_string()
        }
        WidgetError::ConfigError(_) => "Failed to set up the widget environment.\n\n\
             The widget will run with built-in defaults."
            .to_string(),
        WidgetError::QuoteProviderError(_) | WidgetError::QuoteUnavailable(_) => {
            "Could not generate a new quote.\n\n\
             A built-in quote is shown instead."
                .to_string()
        }
        WidgetError::InvalidExamDate(date) => {
            format!(
                "Invalid exam date: {date}\n\n\
                 Please enter the date as YYYY-MM-DD."
            )
        }
        WidgetError::JsonError(e) => {
            format!(
                "Saved widget data is corrupted:\n\n{e}\n\n\
                 The widget will use default settings."
            )
        }
    }
}
