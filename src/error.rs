//! Unified error types for page objects

use thiserror::Error;

/// Unified Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for page objects
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid page model or binding declaration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Locator keyword not present in the registry
    #[error("Unknown locator: {0}")]
    UnknownLocator(String),

    /// Driver found no element for a locator
    #[error("No such element: {0}")]
    NoSuchElement(String),

    /// Bounded wait expired
    #[error("Operation timeout: {0}")]
    Timeout(String),

    /// Write resolved to nothing
    #[error("Target not found: {0}")]
    TargetNotFound(String),

    /// Operation not supported by this binding
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Element reference no longer attached to the document
    #[error("Stale element: {0}")]
    StaleElement(String),

    /// Driver session errors
    #[error("Driver error: {0}")]
    Driver(String),
}

impl Error {
    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a new unknown locator error
    pub fn unknown_locator<S: Into<String>>(kind: S) -> Self {
        Error::UnknownLocator(kind.into())
    }

    /// Create a new no such element error
    pub fn no_such_element<S: Into<String>>(msg: S) -> Self {
        Error::NoSuchElement(msg.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        Error::Timeout(msg.into())
    }

    /// Create a new target not found error
    pub fn target_not_found<S: Into<String>>(msg: S) -> Self {
        Error::TargetNotFound(msg.into())
    }

    /// Create a new unsupported operation error
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        Error::Unsupported(msg.into())
    }

    /// Create a new stale element error
    pub fn stale_element<S: Into<String>>(msg: S) -> Self {
        Error::StaleElement(msg.into())
    }

    /// Create a new driver error
    pub fn driver<S: Into<String>>(msg: S) -> Self {
        Error::Driver(msg.into())
    }

    /// Whether this error comes from a bad declaration rather than the browser
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_) | Error::UnknownLocator(_))
    }

    /// Whether the driver reported a missing element
    pub fn is_no_such_element(&self) -> bool {
        matches!(self, Error::NoSuchElement(_))
    }
}
