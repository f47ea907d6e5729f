//! WSDL 2.0 reader
//!
//! [`Reader`] turns a WSDL 2.0 document into a [`DescriptionSet`], following
//! `wsdl:import` and `wsdl:include` to every reachable document. Problems in
//! the input are reported to the configured [`ErrorHandler`] and the affected
//! value is left out; only a document whose root is not `wsdl:description`
//! (or a handler that asks to stop) makes a read fail.
//!
//! ```no_run
//! use wsdl2::Reader;
//!
//! let mut reader = Reader::new().with_validation(true);
//! let set = reader.read_uri("service.wsdl")?;
//! for interface in set.to_component().interfaces() {
//!     println!("{:?}", interface.name());
//! }
//! # Ok::<(), wsdl2::Error>(())
//! ```

mod parsing;

use std::fmt;
use std::sync::Arc;

use crate::catalog::XmlCatalog;
use crate::diagnostics::{Diagnostic, ErrorHandler, ErrorReporter};
use crate::documents::{Document, Element};
use crate::error::Result;
use crate::extensions::ExtensionRegistry;
use crate::limits::Limits;
use crate::loaders::{Fetcher, Loader};
use crate::locations::Location;
use crate::model::DescriptionSet;
use crate::schema::SchemaCache;
use crate::validation::{BasicValidator, ComponentValidator, DocumentValidator};

use parsing::DescriptionParser;

/// Reads WSDL 2.0 documents
pub struct Reader {
    validate: bool,
    registry: Option<Arc<ExtensionRegistry>>,
    reporter: ErrorReporter,
    fetcher: Box<dyn Fetcher>,
    limits: Limits,
    catalog: Option<XmlCatalog>,
    schema_cache: SchemaCache,
    document_validators: Vec<Box<dyn DocumentValidator>>,
    component_validators: Vec<Box<dyn ComponentValidator>>,
}

impl Reader {
    /// Create a reader with the populated extension registry, local file
    /// retrieval, default limits and validation turned off
    pub fn new() -> Self {
        Self {
            validate: false,
            registry: Some(Arc::new(ExtensionRegistry::populated())),
            reporter: ErrorReporter::default(),
            fetcher: Box::new(Loader::new()),
            limits: Limits::default(),
            catalog: None,
            schema_cache: SchemaCache::new(),
            document_validators: vec![Box::new(BasicValidator)],
            component_validators: vec![Box::new(BasicValidator)],
        }
    }

    /// Run the validators after each read
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Use a different extension registry
    pub fn with_extension_registry(mut self, registry: Arc<ExtensionRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Read without any extension registry; all extension content is reported
    pub fn without_extension_registry(mut self) -> Self {
        self.registry = None;
        self
    }

    /// Send diagnostics to `handler`
    pub fn with_error_handler(mut self, handler: Box<dyn ErrorHandler>) -> Self {
        self.reporter.set_handler(handler);
        self
    }

    /// Retrieve referenced documents through `fetcher`
    pub fn with_fetcher(mut self, fetcher: Box<dyn Fetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Set resource limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Remap document locations through an XML catalog
    pub fn with_catalog(mut self, catalog: XmlCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Add a validator run over the element model
    pub fn add_document_validator(mut self, validator: Box<dyn DocumentValidator>) -> Self {
        self.document_validators.push(validator);
        self
    }

    /// Add a validator run over the component model
    pub fn add_component_validator(mut self, validator: Box<dyn ComponentValidator>) -> Self {
        self.component_validators.push(validator);
        self
    }

    /// The extension registry reads use
    pub fn extension_registry(&self) -> Option<&Arc<ExtensionRegistry>> {
        self.registry.as_ref()
    }

    /// Diagnostics of the most recent read
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.reporter.diagnostics()
    }

    /// Forget schemas retrieved by earlier reads
    pub fn clear_schema_cache(&mut self) {
        self.schema_cache.clear();
    }

    /// Number of schemas retrieved by earlier reads
    pub fn cached_schemas(&self) -> usize {
        self.schema_cache.len()
    }

    /// Read the document at a file path or URI
    pub fn read_uri(&mut self, uri: &str) -> Result<DescriptionSet> {
        let location = Location::parse(uri)?.to_uri()?;
        log::debug!("reading {}", location);
        let text = self.fetcher.fetch(&location)?;
        self.read_str(&text, &location)
    }

    /// Read a document from text; relative references resolve against `base_uri`
    pub fn read_str(&mut self, text: &str, base_uri: &str) -> Result<DescriptionSet> {
        let document = Document::parse_with_limits(text, &self.limits)?;
        self.read_document(&document, base_uri)
    }

    /// Read an already parsed document
    pub fn read_document(&mut self, document: &Document, base_uri: &str) -> Result<DescriptionSet> {
        self.read_element(document.root(), base_uri)
    }

    /// Read a `wsdl:description` element
    pub fn read_element(&mut self, element: &Element, base_uri: &str) -> Result<DescriptionSet> {
        self.reporter.clear();

        let parser = DescriptionParser {
            reporter: &mut self.reporter,
            fetcher: self.fetcher.as_ref(),
            registry: self.registry.clone(),
            limits: &self.limits,
            catalog: self.catalog.as_ref(),
            schema_cache: &mut self.schema_cache,
            session: Default::default(),
            ancestors: Vec::new(),
        };
        let set = parser.parse(element, base_uri)?;

        if self.validate {
            for validator in &self.document_validators {
                validator.validate(&set, &mut self.reporter)?;
            }
            let description = set.to_component();
            for validator in &self.component_validators {
                validator.validate(&description, &mut self.reporter)?;
            }
        }

        log::debug!(
            "read {} document(s) with {} diagnostic(s)",
            set.len(),
            self.reporter.diagnostics().len()
        );
        Ok(set)
    }
}

impl Default for Reader {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("validate", &self.validate)
            .field("registry", &self.registry)
            .field("limits", &self.limits)
            .field("catalog", &self.catalog)
            .field("schema_cache", &self.schema_cache)
            .field("reporter", &self.reporter)
            .finish()
    }
}
