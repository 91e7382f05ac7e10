//! Result and error types for Probar Forms.
//!
//! Only configuration and automation problems surface as [`FormsError`].
//! Behavioral mismatches on the field under test are recorded as soft
//! assertion outcomes and never become an `Err`.

use thiserror::Error;

/// Result type for Probar Forms operations
pub type FormsResult<T> = Result<T, FormsError>;

/// Errors that abort a check routine
#[derive(Debug, Error)]
pub enum FormsError {
    /// A time bound was not in `HH:mm` form
    #[error("Invalid time format '{value}'. Use HH:mm (e.g., '08:00').")]
    InvalidTimeFormat {
        /// The rejected value
        value: String,
    },

    /// A date bound was not in `YYYY-MM-DD` form
    #[error("Invalid date format '{value}'. Use {expected} (e.g., '{example}').")]
    InvalidDateFormat {
        /// The rejected value
        value: String,
        /// Expected layout
        expected: &'static str,
        /// Example of a valid value
        example: &'static str,
    },

    /// A constraint value could not be interpreted
    #[error("Invalid constraint '{name}': {message}")]
    InvalidConstraint {
        /// Constraint name (e.g. `step`)
        name: String,
        /// Error message
        message: String,
    },

    /// Fixture files missing or unreadable
    #[error("Fixture error: {message}")]
    FixtureError {
        /// Error message
        message: String,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// No element matched the locator
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Selector that matched nothing
        selector: String,
    },

    /// The element type does not support filling
    #[error("Element {selector} of type '{input_type}' cannot be filled")]
    NotFillable {
        /// Selector of the element
        selector: String,
        /// The element's input type
        input_type: String,
    },

    /// The automation engine reported a failure
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// A soft assertion failed while running in fail-fast mode
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl FormsError {
    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Create an invalid constraint error
    #[must_use]
    pub fn constraint(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConstraint {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from the caller's setup rather than the automation engine
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTimeFormat { .. }
                | Self::InvalidDateFormat { .. }
                | Self::InvalidConstraint { .. }
                | Self::FixtureError { .. }
                | Self::Config { .. }
        )
    }
}
