//! Limits and constraints for WSDL processing
//!
//! These bound the resources one read session may consume: nesting depth of
//! the XML tree, size of every retrieved document and how deep a chain of
//! imports/includes may go before it is cut off.

use crate::error::{Error, Result};

/// Limits configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum element nesting depth of one XML document
    pub max_xml_depth: usize,

    /// Maximum size of one retrieved document in bytes
    pub max_document_size: usize,

    /// Maximum number of attributes per element
    pub max_attributes: usize,

    /// Maximum nesting of wsdl:import / wsdl:include chains
    pub max_import_depth: usize,

    /// Maximum number of documents in one read session
    pub max_documents: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_xml_depth: 1000,
            max_document_size: 100 * 1024 * 1024, // 100 MB
            max_attributes: 1000,
            max_import_depth: 100,
            max_documents: 10000,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_xml_depth: 100,
            max_document_size: 10 * 1024 * 1024, // 10 MB
            max_attributes: 100,
            max_import_depth: 20,
            max_documents: 500,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_xml_depth: 10000,
            max_document_size: 1024 * 1024 * 1024, // 1 GB
            max_attributes: 10000,
            max_import_depth: 1000,
            max_documents: 1_000_000,
        }
    }

    /// Check if XML depth is within limits
    pub fn check_xml_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_xml_depth {
            Err(Error::LimitExceeded(format!(
                "XML depth {} exceeds maximum {}",
                depth, self.max_xml_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if a document size is within limits
    pub fn check_document_size(&self, size: usize) -> Result<()> {
        if size > self.max_document_size {
            Err(Error::LimitExceeded(format!(
                "document size {} bytes exceeds maximum {} bytes",
                size, self.max_document_size
            )))
        } else {
            Ok(())
        }
    }

    /// Check if number of attributes is within limits
    pub fn check_attributes(&self, count: usize) -> Result<()> {
        if count > self.max_attributes {
            Err(Error::LimitExceeded(format!(
                "Attribute count {} exceeds maximum {}",
                count, self.max_attributes
            )))
        } else {
            Ok(())
        }
    }

    /// Check if an import/include nesting depth is within limits
    pub fn check_import_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_import_depth {
            Err(Error::LimitExceeded(format!(
                "import/include depth {} exceeds maximum {}",
                depth, self.max_import_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if the number of documents in a session is within limits
    pub fn check_documents(&self, count: usize) -> Result<()> {
        if count > self.max_documents {
            Err(Error::LimitExceeded(format!(
                "document count {} exceeds maximum {}",
                count, self.max_documents
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_xml_depth, 1000);
        assert!(limits.check_xml_depth(500).is_ok());
        assert!(limits.check_xml_depth(1500).is_err());
    }

    #[test]
    fn test_strict_limits() {
        let limits = Limits::strict();
        assert!(limits.max_import_depth < Limits::default().max_import_depth);
        assert!(limits.check_import_depth(21).is_err());
    }

    #[test]
    fn test_permissive_limits() {
        let limits = Limits::permissive();
        assert!(limits.max_xml_depth > Limits::default().max_xml_depth);
        assert!(limits.check_xml_depth(5000).is_ok());
    }

    #[test]
    fn test_check_document_size() {
        let limits = Limits::default();
        assert!(limits.check_document_size(1024).is_ok());
        assert!(limits.check_document_size(200 * 1024 * 1024).is_err());
    }
}
