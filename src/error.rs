//! Error handling module for linefmt.
//!
//! Template errors are structural problems found while parsing a template
//! string. They are kept in their own enum so the pure formatting layer does
//! not depend on I/O or configuration concerns; [`LinefmtError`] wraps them
//! together with everything else the application can fail on.

use std::io;
use thiserror::Error;

/// Structural error in a template string.
///
/// Positions are code-point offsets into the template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// `{` with no closing `}` before the end of the template
    #[error("'}}' expected but end of template reached (substitution opened at {position})")]
    UnterminatedSubstitution { position: usize },

    /// Bare `}` in literal text
    #[error("'{{' expected but '}}' found at {position}")]
    UnmatchedClosingBrace { position: usize },

    /// Width prefix that is not `-?*%`, `-?N%` or `-?N`
    #[error("invalid width '{token}' in substitution at {position}")]
    InvalidWidth { token: String, position: usize },

    /// Some substitutions use percent widths and some do not
    #[error("all substitutions should have a percent width or none of them")]
    MixedWidths,

    /// Explicit percent widths add up to more than 100
    #[error("sum of percent widths can not be more than 100% (got {total}%)")]
    PercentOverflow { total: usize },
}

/// Unified error type for linefmt.
#[derive(Error, Debug)]
pub enum LinefmtError {
    /// I/O operation errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Template given directly (CLI argument, library call)
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Template stored under a configuration key
    #[error("Invalid template for '{key}': {source}")]
    ConfigTemplate {
        key: String,
        #[source]
        source: TemplateError,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command line input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for linefmt operations
pub type Result<T> = std::result::Result<T, LinefmtError>;

impl LinefmtError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        LinefmtError::Config(msg.into())
    }

    /// Attach the configuration key a template was loaded from
    pub fn config_template(key: impl Into<String>, source: TemplateError) -> Self {
        LinefmtError::ConfigTemplate {
            key: key.into(),
            source,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        LinefmtError::InvalidArgument(msg.into())
    }
}
