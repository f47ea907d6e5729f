//! XML Catalog support for document location remapping
//!
//! The reader consults an OASIS XML Catalog before resolving the `location`
//! of a `wsdl:import`/`wsdl:include` or the `schemaLocation` of an imported
//! schema, so well-known URIs can be served from local copies.
//!
//! XML Catalogs are defined by OASIS:
//! https://www.oasis-open.org/committees/entity/spec-2001-08-06.html
//!
//! # Supported Elements
//!
//! - `<catalog>` - Root element
//! - `<group>` - Grouping element (inherits base from parent)
//! - `<system>` - Maps system identifiers to URIs
//! - `<uri>` - Maps URI names to URIs
//! - `<nextCatalog>` - Includes another catalog file
//!
//! # Example
//!
//! ```xml
//! <catalog xmlns="urn:oasis:names:tc:entity:xmlns:xml:catalog">
//!   <uri name="http://example.org/shared/common.wsdl" uri="local/common.wsdl"/>
//!   <nextCatalog catalog="vendor/catalog.xml"/>
//! </catalog>
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

use crate::documents::{Document, Element};
use crate::error::{Error, ParseError, Result};
use crate::locations::path_to_url;

/// The XML Catalog namespace
pub const CATALOG_NAMESPACE: &str = "urn:oasis:names:tc:entity:xmlns:xml:catalog";

/// XML Catalog mapping document locations to replacement URIs
#[derive(Debug, Clone, Default)]
pub struct XmlCatalog {
    /// systemId -> absolute URI
    system_mappings: HashMap<String, String>,
    /// name -> absolute URI
    uri_mappings: HashMap<String, String>,
}

impl XmlCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a file, following `<nextCatalog>` references
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Resource(format!("Failed to read catalog '{}': {}", path.display(), e))
        })?;

        let mut catalog = Self::new();
        catalog.parse_catalog(&content, path.parent())?;
        Ok(catalog)
    }

    /// Parse a catalog from text; relative targets resolve against `base_dir`
    pub fn from_str_with_base(xml: &str, base_dir: Option<&Path>) -> Result<Self> {
        let mut catalog = Self::new();
        catalog.parse_catalog(xml, base_dir)?;
        Ok(catalog)
    }

    /// Map a system identifier to a URI
    pub fn add_system(&mut self, system_id: impl Into<String>, uri: impl Into<String>) {
        self.system_mappings.insert(system_id.into(), uri.into());
    }

    /// Map a URI name to a URI
    pub fn add_uri(&mut self, name: impl Into<String>, uri: impl Into<String>) {
        self.uri_mappings.insert(name.into(), uri.into());
    }

    fn parse_catalog(&mut self, xml: &str, base_dir: Option<&Path>) -> Result<()> {
        let doc = Document::from_string(xml)?;
        let root = doc.root();

        if !root.is(CATALOG_NAMESPACE, "catalog") {
            return Err(Error::Parse(ParseError::new(format!(
                "Expected catalog root element, got {}",
                root.qname
            ))));
        }

        self.process_catalog_children(&root.children, base_dir)
    }

    fn process_catalog_children(
        &mut self,
        children: &[Element],
        base_dir: Option<&Path>,
    ) -> Result<()> {
        for child in children.iter().filter(|c| c.namespace() == Some(CATALOG_NAMESPACE)) {
            match child.local_name() {
                "system" => {
                    if let (Some(system_id), Some(uri)) =
                        (child.get_attribute("systemId"), child.get_attribute("uri"))
                    {
                        let target = resolve_target(base_dir, uri)?;
                        self.system_mappings.insert(system_id.to_string(), target);
                    }
                }
                "uri" => {
                    if let (Some(name), Some(uri)) =
                        (child.get_attribute("name"), child.get_attribute("uri"))
                    {
                        let target = resolve_target(base_dir, uri)?;
                        self.uri_mappings.insert(name.to_string(), target);
                    }
                }
                "nextCatalog" => {
                    if let Some(catalog_path) = child.get_attribute("catalog") {
                        let resolved_path = match base_dir {
                            Some(base) => base.join(catalog_path),
                            None => PathBuf::from(catalog_path),
                        };
                        // A missing or broken delegate catalog is skipped
                        match fs::read_to_string(&resolved_path) {
                            Ok(content) => {
                                if let Err(e) = self.parse_catalog(&content, resolved_path.parent())
                                {
                                    log::warn!(
                                        "ignoring catalog {}: {}",
                                        resolved_path.display(),
                                        e
                                    );
                                }
                            }
                            Err(e) => {
                                log::warn!(
                                    "ignoring catalog {}: {}",
                                    resolved_path.display(),
                                    e
                                );
                            }
                        }
                    }
                }
                "group" => {
                    // TODO: honour xml:base on <group>
                    self.process_catalog_children(&child.children, base_dir)?;
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Look up a replacement for a location
    ///
    /// System identifier mappings are consulted before URI name mappings.
    pub fn resolve(&self, location: &str) -> Option<&str> {
        self.system_mappings
            .get(location)
            .or_else(|| self.uri_mappings.get(location))
            .map(String::as_str)
    }

    /// Check if this catalog has no mappings
    pub fn is_empty(&self) -> bool {
        self.system_mappings.is_empty() && self.uri_mappings.is_empty()
    }

    /// Number of mappings
    pub fn len(&self) -> usize {
        self.system_mappings.len() + self.uri_mappings.len()
    }

    /// Merge another catalog into this one; existing mappings win
    pub fn merge(&mut self, other: &XmlCatalog) {
        for (k, v) in &other.system_mappings {
            self.system_mappings.entry(k.clone()).or_insert_with(|| v.clone());
        }
        for (k, v) in &other.uri_mappings {
            self.uri_mappings.entry(k.clone()).or_insert_with(|| v.clone());
        }
    }
}

/// Turn a catalog target into an absolute URI
fn resolve_target(base_dir: Option<&Path>, uri: &str) -> Result<String> {
    if let Ok(url) = Url::parse(uri) {
        if url.scheme().len() > 1 {
            return Ok(url.to_string());
        }
    }
    let path = match base_dir {
        Some(base) => base.join(uri),
        None => PathBuf::from(uri),
    };
    Ok(path_to_url(&path)?.to_string())
}
