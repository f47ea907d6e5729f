//! Diagnostics reported while reading WSDL documents
//!
//! The reader never fails on a data-quality problem in its input. Instead it
//! builds a [`Diagnostic`] and hands it to an [`ErrorHandler`], then carries on
//! with the offending value left unset. The handler decides what happens next:
//! the default one logs, [`CollectingErrorHandler`] keeps a list and
//! [`FailFastErrorHandler`] aborts the read on the first error.

use std::fmt;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::error::{Error, Result};

/// Stable message keys, one per kind of reported problem
pub mod keys {
    /// Root element is not `wsdl:description`
    pub const UNEXPECTED_ROOT: &str = "WSDL501";
    /// Imported or included document has no `wsdl:description` root
    pub const REFERENCED_ROOT_MISSING: &str = "WSDL502";
    /// Malformed URI in an attribute or value
    pub const MALFORMED_URI: &str = "WSDL503";
    /// QName uses a prefix with no namespace binding
    pub const UNRESOLVED_PREFIX: &str = "WSDL504";
    /// Value is not a valid NCName
    pub const INVALID_NCNAME: &str = "WSDL505";
    /// Value does not match the type of its attribute
    pub const INVALID_ATTRIBUTE_VALUE: &str = "WSDL506";
    /// No deserializer registered for an extension element
    pub const NO_DESERIALIZER: &str = "WSDL507";
    /// Extension content found but no registry configured
    pub const NO_REGISTRY: &str = "WSDL508";
    /// Extension deserializer failed
    pub const EXTENSION_FAILED: &str = "WSDL509";
    /// Referenced WSDL document could not be retrieved or parsed
    pub const DOCUMENT_UNAVAILABLE: &str = "WSDL510";
    /// Referenced schema could not be retrieved or parsed
    pub const SCHEMA_UNAVAILABLE: &str = "WSDL511";
    /// Element in the WSDL namespace that is not allowed here
    pub const UNEXPECTED_ELEMENT: &str = "WSDL512";
    /// A configured limit was exceeded
    pub const LIMIT_EXCEEDED: &str = "WSDL513";
    /// Import namespace does not match the imported document
    pub const IMPORT_NAMESPACE_MISMATCH: &str = "WSDL520";
    /// Include target namespace differs from the including document
    pub const INCLUDE_NAMESPACE_MISMATCH: &str = "WSDL521";
    /// Two components of the same kind share a name
    pub const DUPLICATE_NAME: &str = "WSDL522";
    /// A qualified-name reference does not resolve
    pub const UNRESOLVED_REFERENCE: &str = "WSDL523";
    /// Operation pattern is not a known message exchange pattern
    pub const UNKNOWN_MEP: &str = "WSDL524";
    /// Import of the importing document's own namespace
    pub const SELF_IMPORT: &str = "WSDL525";
}

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    /// Processing continues, something referenced was unavailable
    Warning,
    /// The document is in error, processing continues
    Error,
    /// The document cannot be processed at all
    FatalError,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
            Self::FatalError => write!(f, "fatal error"),
        }
    }
}

/// 1-based line and column in a source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SourcePosition {
    /// Line number
    pub line: u32,
    /// Column number
    pub column: u32,
}

impl SourcePosition {
    /// Create a new position
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A reported problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity
    pub severity: Severity,
    /// Message key from [`keys`]
    pub key: &'static str,
    /// Human readable message
    pub message: String,
    /// URI of the document the problem was found in
    pub document: Option<String>,
    /// Position in that document
    pub position: Option<SourcePosition>,
}

impl Diagnostic {
    /// Create a diagnostic without location
    pub fn new(severity: Severity, key: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity,
            key,
            message: message.into(),
            document: None,
            position: None,
        }
    }

    /// Shorthand for a warning
    pub fn warning(key: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, key, message)
    }

    /// Shorthand for an error
    pub fn error(key: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, key, message)
    }

    /// Shorthand for a fatal error
    pub fn fatal(key: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::FatalError, key, message)
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

    /// Set the position if there is one
    pub fn at(mut self, position: Option<SourcePosition>) -> Self {
        self.position = position;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.severity, self.key)?;
        match (&self.document, &self.position) {
            (Some(doc), Some(pos)) => write!(f, " [{}:{}]", doc, pos)?,
            (Some(doc), None) => write!(f, " [{}]", doc)?,
            (None, Some(pos)) => write!(f, " [{}]", pos)?,
            (None, None) => {}
        }
        write!(f, ": {}", self.message)
    }
}

/// Receiver of diagnostics
///
/// Returning `Err` from any callback aborts the read in progress; the error is
/// propagated out of the `Reader::read_*` call.
pub trait ErrorHandler: Send {
    /// A referenced resource was unavailable
    fn warning(&mut self, diagnostic: &Diagnostic) -> Result<()>;

    /// The document is in error
    fn error(&mut self, diagnostic: &Diagnostic) -> Result<()>;

    /// The document cannot be processed
    fn fatal_error(&mut self, diagnostic: &Diagnostic) -> Result<()>;
}

/// Default handler: writes every diagnostic to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingErrorHandler;

impl ErrorHandler for LoggingErrorHandler {
    fn warning(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        log::warn!("{}", diagnostic);
        Ok(())
    }

    fn error(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        log::error!("{}", diagnostic);
        Ok(())
    }

    fn fatal_error(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        log::error!("{}", diagnostic);
        Ok(())
    }
}

/// Handler that collects diagnostics into a list shared with the caller
#[derive(Debug, Default, Clone)]
pub struct CollectingErrorHandler {
    collected: Arc<Mutex<Vec<Diagnostic>>>,
}

impl CollectingErrorHandler {
    /// Create a new handler with an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the collected diagnostics
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.collected
            .lock()
            .map(|list| list.clone())
            .unwrap_or_default()
    }

    fn push(&self, diagnostic: &Diagnostic) {
        if let Ok(mut list) = self.collected.lock() {
            list.push(diagnostic.clone());
        }
    }
}

impl ErrorHandler for CollectingErrorHandler {
    fn warning(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        self.push(diagnostic);
        Ok(())
    }

    fn error(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        self.push(diagnostic);
        Ok(())
    }

    fn fatal_error(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        self.push(diagnostic);
        Ok(())
    }
}

/// Handler that stops the read on the first error
#[derive(Debug, Default, Clone, Copy)]
pub struct FailFastErrorHandler;

impl ErrorHandler for FailFastErrorHandler {
    fn warning(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        log::warn!("{}", diagnostic);
        Ok(())
    }

    fn error(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        Err(Error::Aborted(diagnostic.to_string()))
    }

    fn fatal_error(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        Err(Error::Aborted(diagnostic.to_string()))
    }
}

/// Dispatches diagnostics to a handler and keeps a history of all of them
pub struct ErrorReporter {
    handler: Box<dyn ErrorHandler>,
    history: Vec<Diagnostic>,
}

impl ErrorReporter {
    /// Create a reporter around a handler
    pub fn new(handler: Box<dyn ErrorHandler>) -> Self {
        Self {
            handler,
            history: Vec::new(),
        }
    }

    /// Replace the handler, keeping the history
    pub fn set_handler(&mut self, handler: Box<dyn ErrorHandler>) {
        self.handler = handler;
    }

    /// Report a diagnostic
    pub fn report(&mut self, diagnostic: Diagnostic) -> Result<()> {
        let outcome = match diagnostic.severity {
            Severity::Warning => self.handler.warning(&diagnostic),
            Severity::Error => self.handler.error(&diagnostic),
            Severity::FatalError => self.handler.fatal_error(&diagnostic),
        };
        self.history.push(diagnostic);
        outcome
    }

    /// All diagnostics reported so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.history
    }

    /// Whether anything at ERROR or above was reported
    pub fn has_errors(&self) -> bool {
        self.history.iter().any(|d| d.severity >= Severity::Error)
    }

    /// Forget the history
    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new(Box::new(LoggingErrorHandler))
    }
}

impl fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorReporter")
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::error(keys::MALFORMED_URI, "bad URI 'a b'")
            .with_document("file:///x.wsdl")
            .with_position(SourcePosition::new(4, 2));
        assert_eq!(
            diag.to_string(),
            "error WSDL503 [file:///x.wsdl:4:2]: bad URI 'a b'"
        );
    }

    #[test]
    fn test_collecting_handler_shares_list() {
        let handler = CollectingErrorHandler::new();
        let mut reporter = ErrorReporter::new(Box::new(handler.clone()));

        reporter
            .report(Diagnostic::warning(keys::DOCUMENT_UNAVAILABLE, "gone"))
            .unwrap();
        reporter
            .report(Diagnostic::error(keys::INVALID_NCNAME, "1abc"))
            .unwrap();

        assert_eq!(handler.diagnostics().len(), 2);
        assert_eq!(reporter.diagnostics().len(), 2);
        assert!(reporter.has_errors());
    }

    #[test]
    fn test_fail_fast_handler() {
        let mut reporter = ErrorReporter::new(Box::new(FailFastErrorHandler));
        assert!(reporter
            .report(Diagnostic::warning(keys::SCHEMA_UNAVAILABLE, "missing"))
            .is_ok());
        let err = reporter
            .report(Diagnostic::error(keys::UNRESOLVED_PREFIX, "tns"))
            .unwrap_err();
        assert!(matches!(err, Error::Aborted(_)));
        // Recorded even though the handler aborted
        assert_eq!(reporter.diagnostics().len(), 2);
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::FatalError);
    }
}
