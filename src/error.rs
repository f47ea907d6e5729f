//! Error types for wsdl2
//!
//! Hard failures only. Data-quality problems found in a WSDL document are not
//! errors in this sense: they are reported as [`Diagnostic`]s through the
//! reader's error handler and parsing continues (see [`crate::diagnostics`]).

use std::fmt;
use thiserror::Error;

use crate::diagnostics::SourcePosition;

/// Result type alias using the wsdl2 Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wsdl2 operations
#[derive(Error, Debug)]
pub enum Error {
    /// Structural parse failure (e.g. the top-level root is not a description)
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Resource loading error (fetch failure, timeout, remote access denied)
    #[error("resource error: {0}")]
    Resource(String),

    /// Namespace error (unknown prefix)
    #[error("namespace error: {0}")]
    Namespace(String),

    /// Name error (invalid NCName or QName syntax)
    #[error("name error: {0}")]
    Name(String),

    /// Value error (attribute value does not match its declared type)
    #[error("value error: {0}")]
    Value(String),

    /// Extension deserialization error
    #[error("extension error: {0}")]
    Extension(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML well-formedness error
    #[error("XML error: {0}")]
    Xml(String),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The error handler asked the reader to stop
    #[error("reading aborted: {0}")]
    Aborted(String),
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

/// WSDL parsing error with context
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Document URI the error was found in
    pub document: Option<String>,
    /// Position in the document
    pub position: Option<SourcePosition>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            document: None,
            position: None,
        }
    }

    /// Set the document URI
    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }

    /// Set the position
    pub fn with_position(mut self, position: SourcePosition) -> Self {
        self.position = Some(position);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        match (&self.document, &self.position) {
            (Some(doc), Some(pos)) => write!(f, "\n\nLocation: {}:{}", doc, pos)?,
            (Some(doc), None) => write!(f, "\n\nLocation: {}", doc)?,
            (None, Some(pos)) => write!(f, "\n\nLocation: {}", pos)?,
            (None, None) => {}
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new("Expected a description element")
            .with_document("file:///tmp/service.wsdl")
            .with_position(SourcePosition::new(3, 7));

        let msg = format!("{}", err);
        assert!(msg.contains("Expected a description element"));
        assert!(msg.contains("Location: file:///tmp/service.wsdl:3:7"));
    }

    #[test]
    fn test_error_conversion() {
        let parse_err = ParseError::new("test");
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Parse(_)));

        let xml_err = roxmltree::Document::parse("<a>").unwrap_err();
        let err: Error = xml_err.into();
        assert!(matches!(err, Error::Xml(_)));
    }
}
