//! Resource location resolution
//!
//! Turns the inputs a caller hands the reader (file paths, URLs) into absolute
//! URI strings, resolves `location`/`schemaLocation` attributes against a
//! document's base URI and checks URI-typed attribute values.

use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{Error, Result};

/// Base used to check relative references for syntax only
const PLACEHOLDER_BASE: &str = "http://placeholder.invalid/";

/// Characters that may never appear literally in a URI reference
const FORBIDDEN_URI_CHARS: &[char] = &['<', '>', '"', '\\', '^', '`', '{', '|', '}'];

/// Resource location - can be a URL or a file path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// File system path
    Path(PathBuf),
    /// URL (file, http, https, urn, ...)
    Url(Url),
}

impl Location {
    /// Create a location from a string (auto-detect type)
    pub fn parse(s: &str) -> Result<Self> {
        // Windows drive letters parse as a one-letter URL scheme
        if let Ok(url) = Url::parse(s) {
            if url.scheme().len() > 1 {
                return Ok(Location::Url(url));
            }
        }
        Ok(Location::Path(PathBuf::from(s)))
    }

    /// Absolute URI string for this location
    pub fn to_uri(&self) -> Result<String> {
        match self {
            Location::Url(url) => Ok(url.to_string()),
            Location::Path(path) => Ok(path_to_url(path)?.to_string()),
        }
    }

    /// Check if this is a remote location (not a local file)
    pub fn is_remote(&self) -> bool {
        match self {
            Location::Url(url) => url.scheme() != "file",
            Location::Path(_) => false,
        }
    }

    /// Check if this is a local file
    pub fn is_file(&self) -> bool {
        match self {
            Location::Url(url) => url.scheme() == "file",
            Location::Path(_) => true,
        }
    }
}

/// Convert a (possibly relative) file path into a `file:` URL
pub fn path_to_url(path: &Path) -> Result<Url> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Url::from_file_path(&absolute).map_err(|_| {
        Error::Resource(format!(
            "Cannot convert path '{}' to a file URL",
            absolute.display()
        ))
    })
}

/// Resolve a reference against a base URI
///
/// Absolute references are returned as they are (normalized). Relative ones
/// need a hierarchical base.
pub fn resolve_location(base: Option<&str>, location: &str) -> Result<String> {
    let location = location.trim();
    check_uri_chars(location)?;

    match Url::parse(location) {
        Ok(url) => return Ok(url.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {}
        Err(e) => return Err(Error::Url(e)),
    }

    let base = base.ok_or_else(|| {
        Error::Resource(format!(
            "Cannot resolve relative location '{}' without a base URI",
            location
        ))
    })?;
    let base_url = Url::parse(base).or_else(|_| path_to_url(Path::new(base)))?;
    if base_url.cannot_be_a_base() {
        return Err(Error::Resource(format!(
            "Base URI '{}' cannot resolve relative location '{}'",
            base, location
        )));
    }
    Ok(base_url.join(location)?.to_string())
}

/// Check that a value is a syntactically valid URI reference
pub fn validate_uri_reference(value: &str) -> Result<()> {
    check_uri_chars(value)?;
    match Url::parse(value) {
        Ok(_) => Ok(()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            // Placeholder base is a valid constant
            let base = Url::parse(PLACEHOLDER_BASE)?;
            base.join(value)?;
            Ok(())
        }
        Err(e) => Err(Error::Url(e)),
    }
}

fn check_uri_chars(value: &str) -> Result<()> {
    if let Some(c) = value
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || FORBIDDEN_URI_CHARS.contains(c))
    {
        return Err(Error::Value(format!(
            "'{}' is not a valid URI reference (contains {:?})",
            value, c
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_url() {
        let loc = Location::parse("http://example.com/service.wsdl").unwrap();
        assert!(matches!(loc, Location::Url(_)));
        assert!(loc.is_remote());
    }

    #[test]
    fn test_location_from_path() {
        let loc = Location::parse("/tmp/service.wsdl").unwrap();
        assert!(matches!(loc, Location::Path(_)));
        assert!(loc.is_file());
        assert!(loc.to_uri().unwrap().starts_with("file:///"));
    }

    #[test]
    fn test_resolve_relative_location() {
        let resolved =
            resolve_location(Some("http://example.org/wsdl/main.wsdl"), "types/common.wsdl")
                .unwrap();
        assert_eq!(resolved, "http://example.org/wsdl/types/common.wsdl");

        let resolved =
            resolve_location(Some("http://example.org/wsdl/main.wsdl"), "../other.wsdl").unwrap();
        assert_eq!(resolved, "http://example.org/other.wsdl");
    }

    #[test]
    fn test_resolve_absolute_location_ignores_base() {
        let resolved = resolve_location(
            Some("http://example.org/main.wsdl"),
            "http://other.org/x.wsdl",
        )
        .unwrap();
        assert_eq!(resolved, "http://other.org/x.wsdl");
    }

    #[test]
    fn test_resolve_without_base_fails() {
        assert!(resolve_location(None, "relative.wsdl").is_err());
        assert!(resolve_location(Some("urn:example:doc"), "relative.wsdl").is_err());
    }

    #[test]
    fn test_validate_uri_reference() {
        assert!(validate_uri_reference("http://example.org/ns").is_ok());
        assert!(validate_uri_reference("urn:example:ns").is_ok());
        assert!(validate_uri_reference("relative/path").is_ok());
        assert!(validate_uri_reference("#fragment").is_ok());

        assert!(validate_uri_reference("http://exa mple.org").is_err());
        assert!(validate_uri_reference("http://example.org/<x>").is_err());
        assert!(validate_uri_reference("http://[::1").is_err());
    }
}
