//! Error handling for the scanview widgets
//!
//! This module defines custom error types and a Result alias for use
//! throughout the crate. Per the widget failure model, nothing in here is
//! ever fatal to the page: callers log these errors and degrade to an
//! empty/default visual state.

use thiserror::Error;

/// Main error type for scanview operations
#[derive(Error, Debug)]
pub enum WidgetError {
    /// Errors related to payload parsing (bad JSON attribute data)
    #[error("Payload parse error: {0}")]
    Parse(String),

    /// Errors related to widget configuration (e.g. target/item mismatch)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors reported by the numeric counter at start time
    #[error("Counter error: {0}")]
    Counter(String),

    /// Errors reported by the animation engine
    #[error("Animation engine error: {0}")]
    Engine(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<WidgetError>,
    },
}

impl WidgetError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        WidgetError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for WidgetError {
    fn from(err: serde_json::Error) -> Self {
        WidgetError::Parse(err.to_string())
    }
}

/// Result type alias for scanview operations
pub type Result<T> = std::result::Result<T, WidgetError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, serde_json::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| WidgetError::from(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| WidgetError::from(e).with_context(f()))
    }
}
