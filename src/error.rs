//! Error types for cuteninja.
//!
//! Directive extraction and HTML rendering never fail; the only error a
//! caller can see comes from the markup parser.

use thiserror::Error;

/// Errors that can occur while turning a template into HTML.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The structured markup could not be parsed.
    #[error("markup parse error: {message}")]
    Parse {
        /// Parser-provided description of the failure
        message: String,
    },
}

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

impl TemplateError {
    /// Create a parse error with a message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a parse error from any parser error type.
    pub fn from_parser(err: impl std::error::Error) -> Self {
        Self::parse(err.to_string())
    }

    /// Check whether this error came from the parser stage.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

#[cfg(feature = "kdl")]
impl From<kdl::KdlError> for TemplateError {
    fn from(err: kdl::KdlError) -> Self {
        Self::from_parser(err)
    }
}
