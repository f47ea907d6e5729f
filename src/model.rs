//! The result of a read
//!
//! A [`DescriptionSet`] owns one [`DescriptionElement`] per physical document
//! reached from the document that was read, keyed by resolved location.
//! Import and include elements point at their targets with [`DocId`]s into
//! the set, so import/include cycles are plain index cycles.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use once_cell::sync::OnceCell;

use crate::components::{Description, FlatComponents, NodeKey};
use crate::elements::DescriptionElement;
use crate::extensions::{ComponentExtensions, ExtensionRegistry};

/// Index of a document within a [`DescriptionSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocId(pub(crate) usize);

impl DocId {
    /// Position of the document in the set
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub(crate) type ExtensionCache = Mutex<HashMap<(NodeKey, String), Arc<dyn ComponentExtensions>>>;

/// All documents of one read plus the component caches derived from them
pub struct DescriptionSet {
    documents: Vec<DescriptionElement>,
    locations: IndexMap<String, DocId>,
    root: DocId,
    registry: Option<Arc<ExtensionRegistry>>,
    pub(crate) component_caches: Vec<OnceCell<FlatComponents>>,
    pub(crate) extension_cache: ExtensionCache,
}

impl DescriptionSet {
    pub(crate) fn new(
        documents: Vec<DescriptionElement>,
        locations: IndexMap<String, DocId>,
        root: DocId,
        registry: Option<Arc<ExtensionRegistry>>,
    ) -> Self {
        let component_caches = documents.iter().map(|_| OnceCell::new()).collect();
        Self {
            documents,
            locations,
            root,
            registry,
            component_caches,
            extension_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Build a set from a single, already populated description
    pub fn from_element(
        element: DescriptionElement,
        registry: Option<Arc<ExtensionRegistry>>,
    ) -> Self {
        let mut locations = IndexMap::new();
        locations.insert(element.document_base_uri().to_string(), DocId(0));
        Self::new(vec![element], locations, DocId(0), registry)
    }

    /// Id of the document that was read
    pub fn root(&self) -> DocId {
        self.root
    }

    /// Element model of the document that was read
    pub fn root_element(&self) -> &DescriptionElement {
        &self.documents[self.root.0]
    }

    /// Component model of the document that was read
    pub fn to_component(&self) -> Description<'_> {
        Description::new(self, self.root)
    }

    /// Component model of any document in the set
    pub fn description(&self, doc: DocId) -> Option<Description<'_>> {
        (doc.0 < self.documents.len()).then(|| Description::new(self, doc))
    }

    /// Element model of a document
    pub fn description_element(&self, doc: DocId) -> Option<&DescriptionElement> {
        self.documents.get(doc.0)
    }

    /// Mutable element model of a document
    ///
    /// Component results that were already computed are not recomputed, so
    /// changes made here after the first component query are not reflected
    /// in the component model.
    pub fn description_element_mut(&mut self, doc: DocId) -> Option<&mut DescriptionElement> {
        self.documents.get_mut(doc.0)
    }

    /// Look up a document by resolved location
    pub fn document(&self, location: &str) -> Option<DocId> {
        self.locations.get(location).copied()
    }

    /// Every document in the order it was first reached
    pub fn documents(&self) -> impl Iterator<Item = (DocId, &DescriptionElement)> {
        self.documents
            .iter()
            .enumerate()
            .map(|(i, d)| (DocId(i), d))
    }

    /// Resolved locations of every document
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.locations.keys().map(String::as_str)
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the set holds no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The extension registry used for the read
    pub fn registry(&self) -> Option<&Arc<ExtensionRegistry>> {
        self.registry.as_ref()
    }

    pub(crate) fn element(&self, doc: DocId) -> &DescriptionElement {
        &self.documents[doc.0]
    }
}

impl fmt::Debug for DescriptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptionSet")
            .field("root", &self.root)
            .field("locations", &self.locations)
            .field("registry", &self.registry.is_some())
            .finish()
    }
}
