//! Component model
//!
//! Read-only views over a [`DescriptionSet`](crate::model::DescriptionSet).
//! A [`Description`] sees the components of its own document, of every
//! document it includes (transitively), and of every document it or its
//! includes import directly. Those flattened lists are computed on first
//! access and cached in the set.
//!
//! Views are small `Copy` handles. Each one remembers the [`Description`]
//! that produced it, which is the scope used to resolve the QName references
//! it holds (`extends`, `interface`, `binding`, `ref`).

mod binding;
mod description;
mod interface;
pub mod mep;
mod properties;
mod service;

use std::collections::BTreeSet;
use std::sync::Arc;

pub use binding::{
    Binding, BindingFault, BindingFaultReference, BindingMessageReference, BindingOperation,
};
pub use description::Description;
pub(crate) use description::FlatComponents;
pub use interface::{
    Interface, InterfaceFault, InterfaceFaultReference, InterfaceMessageReference,
    InterfaceOperation,
};
pub use mep::{FaultPropagation, MessageExchangePattern, Placeholder};
pub use properties::{Feature, Property};
pub use service::{Endpoint, Service};

use crate::elements::{ConfigurableElement, FeatureElement, PropertyElement, WsdlElement};
use crate::extensions::{ComponentExtensions, Extensions, OwnerKind};
use crate::model::{DescriptionSet, DocId};
use crate::names::NCName;
use crate::namespaces::QName;

/// Identifies a top-level component (interface, binding or service)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentKey {
    pub(crate) doc: DocId,
    pub(crate) index: usize,
}

impl ComponentKey {
    /// Document declaring the component
    pub fn doc(&self) -> DocId {
        self.doc
    }

    /// Position among its siblings of the same kind
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Identifies any element below a description, used to key caches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    doc: DocId,
    kind: OwnerKind,
    path: [usize; 3],
}

impl NodeKey {
    pub(crate) fn new(doc: DocId, kind: OwnerKind, path: [usize; 3]) -> Self {
        Self { doc, kind, path }
    }
}

/// Behaviour shared by every component view below a description
pub trait Component<'a>: Copy {
    /// Element type the component was built from
    type Element: ConfigurableElement + 'a;

    /// The element this component was built from
    fn to_element(&self) -> &'a Self::Element;

    /// The description the component was obtained from
    fn description(&self) -> Description<'a>;

    /// Cache key of the underlying element
    fn node_key(&self) -> NodeKey;

    /// Kind of the underlying element
    fn owner_kind(&self) -> OwnerKind;

    /// `{features}`
    fn features(&self) -> Vec<Feature<'a>> {
        self.to_element().features().iter().map(Feature::new).collect()
    }

    /// `{properties}`
    fn properties(&self) -> Vec<Property<'a>> {
        self.to_element()
            .properties()
            .iter()
            .map(Property::new)
            .collect()
    }

    /// Namespace-specific view of the component's extension content
    ///
    /// Built by the factory registered for (component kind, namespace) and
    /// cached in the set; `None` when nothing is registered.
    fn component_extensions(&self, namespace: &str) -> Option<Arc<dyn ComponentExtensions>> {
        lookup_extensions(
            self.description().set(),
            self.node_key(),
            self.owner_kind(),
            self.to_element().extensions(),
            namespace,
        )
    }
}

/// Qualify a component name with the target namespace of its document
pub(crate) fn qualified_name(set: &DescriptionSet, doc: DocId, name: Option<&NCName>) -> Option<QName> {
    name.map(|n| set.element(doc).qualify(n))
}

/// Local names as a set, for order-insensitive comparison
pub(crate) fn name_set<'x>(names: impl Iterator<Item = Option<&'x NCName>>) -> BTreeSet<&'x str> {
    names.flatten().map(NCName::as_str).collect()
}

/// `ref` URIs of features and properties as a set
pub(crate) fn reference_set<'x>(
    features: &'x [FeatureElement],
    properties: &'x [PropertyElement],
) -> (BTreeSet<Option<&'x str>>, BTreeSet<Option<&'x str>>) {
    (
        features.iter().map(|f| f.uri.as_deref()).collect(),
        properties.iter().map(|p| p.uri.as_deref()).collect(),
    )
}

pub(crate) fn lookup_extensions(
    set: &DescriptionSet,
    key: NodeKey,
    owner: OwnerKind,
    extensions: &Extensions,
    namespace: &str,
) -> Option<Arc<dyn ComponentExtensions>> {
    let factory = set.registry()?.query_component_extension(owner, namespace)?;
    let mut cache = set
        .extension_cache
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let view = cache
        .entry((key, namespace.to_string()))
        .or_insert_with(|| {
            log::trace!("building {} extensions for {:?}", namespace, key);
            factory(extensions)
        });
    Some(Arc::clone(view))
}
