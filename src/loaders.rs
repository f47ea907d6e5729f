//! Resource loading utilities
//!
//! The reader retrieves every referenced document (imported/included WSDL,
//! imported schemas) through the [`Fetcher`] trait. [`Loader`] is the stock
//! implementation: local files, documents registered in memory, and an
//! optional per-fetch timeout.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::locations::Location;

/// Retrieves the text of a document given its absolute URI
pub trait Fetcher: Send {
    /// Fetch a document
    fn fetch(&self, uri: &str) -> Result<String>;
}

/// Resource loader for WSDL documents and schemas
#[derive(Debug, Clone)]
pub struct Loader {
    /// Resource limits
    limits: Limits,
    /// Whether to allow remote resources
    allow_remote: bool,
    /// Give up on a single fetch after this long
    timeout: Option<Duration>,
    /// Documents served from memory, keyed by absolute URI
    documents: HashMap<String, String>,
}

impl Loader {
    /// Create a new loader with default settings
    pub fn new() -> Self {
        Self {
            limits: Limits::default(),
            allow_remote: false,
            timeout: None,
            documents: HashMap::new(),
        }
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Set whether to allow remote resources
    pub fn with_allow_remote(mut self, allow: bool) -> Self {
        self.allow_remote = allow;
        self
    }

    /// Set a timeout for each fetch
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Serve a document from memory under the given URI
    pub fn with_document(mut self, uri: impl Into<String>, text: impl Into<String>) -> Self {
        self.add_document(uri, text);
        self
    }

    /// Serve a document from memory under the given URI
    pub fn add_document(&mut self, uri: impl Into<String>, text: impl Into<String>) {
        let uri = uri.into();
        // Store under the normalized form the reader will ask for
        let key = Location::parse(&uri)
            .and_then(|loc| loc.to_uri())
            .unwrap_or(uri);
        self.documents.insert(key, text.into());
    }

    /// Load a resource as a string
    pub fn load(&self, location: &Location) -> Result<String> {
        if let Some(text) = self.documents.get(&location.to_uri()?) {
            return Ok(text.clone());
        }

        let content = match location {
            Location::Path(path) => self.read_file(path.clone())?,
            Location::Url(url) if url.scheme() == "file" => {
                let path = url.to_file_path().map_err(|_| {
                    Error::Resource(format!("'{}' does not name a local file", url))
                })?;
                self.read_file(path)?
            }
            Location::Url(url) => {
                if !self.allow_remote {
                    return Err(Error::Resource(format!(
                        "Remote resources are not allowed: {}",
                        url
                    )));
                }
                // TODO: HTTP retrieval needs a client crate; callers can plug one in through Fetcher
                return Err(Error::Resource(format!(
                    "No retrieval available for scheme '{}': {}",
                    url.scheme(),
                    url
                )));
            }
        };

        self.limits.check_document_size(content.len())?;
        Ok(content)
    }

    fn read_file(&self, path: PathBuf) -> Result<String> {
        let read = move || {
            fs::read_to_string(&path).map_err(|e| {
                Error::Resource(format!("Failed to read file '{}': {}", path.display(), e))
            })
        };

        let Some(timeout) = self.timeout else {
            return read();
        };

        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("wsdl-fetch".to_string())
            .spawn(move || {
                // Receiver may be gone after a timeout
                let _ = tx.send(read());
            })
            .map_err(|e| Error::Resource(format!("Failed to spawn fetch thread: {}", e)))?;

        rx.recv_timeout(timeout).map_err(|_| {
            Error::Resource(format!("Fetch timed out after {:?}", timeout))
        })?
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for Loader {
    fn fetch(&self, uri: &str) -> Result<String> {
        log::debug!("fetching {}", uri);
        self.load(&Location::parse(uri)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "<description/>").unwrap();

        let location = Location::Path(file.path().to_path_buf());
        let loader = Loader::new();
        let content = loader.load(&location).unwrap();

        assert!(content.contains("<description/>"));
    }

    #[test]
    fn test_fetch_file_url() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "<x/>").unwrap();
        let uri = Location::Path(file.path().to_path_buf()).to_uri().unwrap();

        let loader = Loader::new().with_timeout(Duration::from_secs(5));
        assert_eq!(loader.fetch(&uri).unwrap(), "<x/>");
    }

    #[test]
    fn test_in_memory_document() {
        let loader = Loader::new().with_document("http://example.org/a.wsdl", "<a/>");
        assert_eq!(loader.fetch("http://example.org/a.wsdl").unwrap(), "<a/>");
    }

    #[test]
    fn test_remote_disallowed() {
        let loader = Loader::new();
        let err = loader.fetch("http://example.org/missing.wsdl").unwrap_err();
        assert!(matches!(err, Error::Resource(_)));
    }

    #[test]
    fn test_missing_file() {
        let loader = Loader::new();
        assert!(loader.fetch("file:///definitely/not/here.wsdl").is_err());
    }

    #[test]
    fn test_size_limit() {
        let mut file = NamedTempFile::new().unwrap();
        let large_content = "x".repeat(11 * 1024 * 1024); // 11 MB
        write!(file, "{}", large_content).unwrap();

        let location = Location::Path(file.path().to_path_buf());
        let loader = Loader::new().with_limits(Limits::strict());
        let result = loader.load(&location);

        // Strict limits (10 MB max) should reject 11MB file
        assert!(result.is_err());
    }
}
