//! Extension registry
//!
//! WSDL 2.0 lets other namespaces add attributes and elements to almost every
//! WSDL element. The reader hands such content to the [`ExtensionRegistry`],
//! which is keyed by the kind of the owning element ([`OwnerKind`]) and the
//! qualified name of the attribute or element:
//!
//! - attribute types tell the reader how to parse an extension attribute value,
//! - deserializers turn an extension element into an [`ExtensionElement`],
//! - component extension factories build namespace-specific views
//!   ([`ComponentExtensions`]) over a component's extension content.
//!
//! [`ExtensionRegistry::populated`] comes with the SOAP, HTTP, RPC and
//! `wsdlx` extensions registered.

pub mod core;
pub mod http;
pub mod rpc;
pub mod soap;

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::attributes::{parse_boolean, AttributeType, AttributeValue, ExtensionAttribute};
use crate::documents::Element;
use crate::error::Result;
use crate::namespaces::QName;

/// Kinds of WSDL elements that can own extension content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OwnerKind {
    /// `wsdl:description`
    Description,
    /// `wsdl:import`
    Import,
    /// `wsdl:include`
    Include,
    /// `wsdl:types`
    Types,
    /// `wsdl:interface`
    Interface,
    /// `wsdl:interface/wsdl:fault`
    InterfaceFault,
    /// `wsdl:interface/wsdl:operation`
    InterfaceOperation,
    /// `wsdl:input` / `wsdl:output` of an interface operation
    InterfaceMessageReference,
    /// `wsdl:infault` / `wsdl:outfault` of an interface operation
    InterfaceFaultReference,
    /// `wsdl:binding`
    Binding,
    /// `wsdl:binding/wsdl:fault`
    BindingFault,
    /// `wsdl:binding/wsdl:operation`
    BindingOperation,
    /// `wsdl:input` / `wsdl:output` of a binding operation
    BindingMessageReference,
    /// `wsdl:infault` / `wsdl:outfault` of a binding operation
    BindingFaultReference,
    /// `wsdl:service`
    Service,
    /// `wsdl:endpoint`
    Endpoint,
    /// `wsdl:feature`
    Feature,
    /// `wsdl:property`
    Property,
    /// `wsdl:documentation`
    Documentation,
}

impl OwnerKind {
    /// Local name of the WSDL element this kind stands for
    pub fn element_name(&self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Import => "import",
            Self::Include => "include",
            Self::Types => "types",
            Self::Interface => "interface",
            Self::InterfaceFault | Self::BindingFault => "fault",
            Self::InterfaceOperation | Self::BindingOperation => "operation",
            Self::InterfaceMessageReference | Self::BindingMessageReference => "input/output",
            Self::InterfaceFaultReference | Self::BindingFaultReference => "infault/outfault",
            Self::Binding => "binding",
            Self::Service => "service",
            Self::Endpoint => "endpoint",
            Self::Feature => "feature",
            Self::Property => "property",
            Self::Documentation => "documentation",
        }
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A deserialized extension element
pub trait ExtensionElement: fmt::Debug + Send + Sync + Any {
    /// Qualified name of the element
    fn element_type(&self) -> &QName;

    /// Value of `wsdl:required`, if present
    fn is_required(&self) -> Option<bool> {
        None
    }

    /// Upcast for downcasting to the concrete type
    fn as_any(&self) -> &dyn Any;
}

/// What an extension deserializer knows about where it is being called
#[derive(Debug, Clone, Copy)]
pub struct ExtensionContext<'a> {
    /// Kind of the element owning the extension element
    pub owner: OwnerKind,
    /// Kinds of all enclosing WSDL elements, outermost first, owner last
    pub ancestors: &'a [OwnerKind],
    /// Target namespace of the enclosing description
    pub target_namespace: Option<&'a str>,
    /// Base URI of the document being read
    pub base_uri: &'a str,
}

/// Turns an extension element into an [`ExtensionElement`]
pub trait ExtensionDeserializer: Send + Sync {
    /// Deserialize `element`, which appeared under an element of kind `ctx.owner`
    fn unmarshall(
        &self,
        ctx: &ExtensionContext<'_>,
        element: &Element,
    ) -> Result<Arc<dyn ExtensionElement>>;
}

/// Extension element no specific deserializer exists for
#[derive(Debug, Clone)]
pub struct UnknownExtensionElement {
    /// Qualified name of the element
    pub element_type: QName,
    /// Value of `wsdl:required`
    pub required: Option<bool>,
    /// The element as read
    pub element: Element,
}

impl ExtensionElement for UnknownExtensionElement {
    fn element_type(&self) -> &QName {
        &self.element_type
    }

    fn is_required(&self) -> Option<bool> {
        self.required
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Keeps any extension element as an [`UnknownExtensionElement`]
///
/// Install it with [`ExtensionRegistry::set_default_deserializer`] to retain
/// elements from unregistered namespaces instead of reporting them.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnknownDeserializer;

impl ExtensionDeserializer for UnknownDeserializer {
    fn unmarshall(
        &self,
        _ctx: &ExtensionContext<'_>,
        element: &Element,
    ) -> Result<Arc<dyn ExtensionElement>> {
        let required = element
            .get_attribute_qname(&QName::wsdl("required"))
            .map(parse_boolean)
            .transpose()?;
        Ok(Arc::new(UnknownExtensionElement {
            element_type: element.qname.clone(),
            required,
            element: element.clone(),
        }))
    }
}

/// A namespace-specific view over a component's extension content
pub trait ComponentExtensions: fmt::Debug + Send + Sync + Any {
    /// Namespace the view belongs to
    fn namespace(&self) -> &str;

    /// Upcast for downcasting to the concrete type
    fn as_any(&self) -> &dyn Any;
}

/// Builds a [`ComponentExtensions`] view from extension content
pub type ComponentExtensionFactory = fn(&Extensions) -> Arc<dyn ComponentExtensions>;

/// Downcast a component extension view to its concrete type
pub fn downcast_extensions<T: ComponentExtensions>(
    extensions: &Arc<dyn ComponentExtensions>,
) -> Option<&T> {
    extensions.as_any().downcast_ref::<T>()
}

/// Extension attributes and elements attached to one WSDL element
#[derive(Debug, Clone, Default)]
pub struct Extensions {
    attributes: IndexMap<QName, ExtensionAttribute>,
    elements: Vec<Arc<dyn ExtensionElement>>,
}

impl Extensions {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an extension attribute
    pub fn add_attribute(&mut self, attribute: ExtensionAttribute) {
        self.attributes.insert(attribute.name.clone(), attribute);
    }

    /// Look up an extension attribute
    pub fn attribute(&self, name: &QName) -> Option<&ExtensionAttribute> {
        self.attributes.get(name)
    }

    /// Parsed value of an extension attribute
    pub fn attribute_value(&self, name: &QName) -> Option<&AttributeValue> {
        self.attributes.get(name).and_then(|a| a.value.as_ref())
    }

    /// Parsed value of an extension attribute given by namespace and local name
    pub fn value(&self, namespace: &str, local_name: &str) -> Option<&AttributeValue> {
        self.attribute_value(&QName::namespaced(namespace, local_name))
    }

    /// All extension attributes in document order
    pub fn attributes(&self) -> impl Iterator<Item = &ExtensionAttribute> {
        self.attributes.values()
    }

    /// Add an extension element
    pub fn add_element(&mut self, element: Arc<dyn ExtensionElement>) {
        self.elements.push(element);
    }

    /// All extension elements in document order
    pub fn elements(&self) -> &[Arc<dyn ExtensionElement>] {
        &self.elements
    }

    /// Extension elements with the given name
    pub fn elements_of_type<'a>(
        &'a self,
        name: &'a QName,
    ) -> impl Iterator<Item = &'a Arc<dyn ExtensionElement>> + 'a {
        self.elements.iter().filter(move |e| e.element_type() == name)
    }

    /// Extension elements of a concrete type
    pub fn elements_as<T: ExtensionElement>(&self) -> impl Iterator<Item = &T> {
        self.elements.iter().filter_map(|e| e.as_any().downcast_ref::<T>())
    }

    /// Whether any attribute or element comes from `namespace`
    pub fn has_extensions_for_namespace(&self, namespace: &str) -> bool {
        self.attributes.keys().any(|q| q.in_namespace(namespace))
            || self.elements.iter().any(|e| e.element_type().in_namespace(namespace))
    }

    /// Whether there is no extension content at all
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.elements.is_empty()
    }
}

/// Registry of extension attribute types, deserializers and component views
#[derive(Clone, Default)]
pub struct ExtensionRegistry {
    attribute_types: HashMap<(OwnerKind, QName), AttributeType>,
    deserializers: HashMap<(OwnerKind, QName), Arc<dyn ExtensionDeserializer>>,
    default_deserializer: Option<Arc<dyn ExtensionDeserializer>>,
    component_extensions: HashMap<(OwnerKind, String), ComponentExtensionFactory>,
}

impl ExtensionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the SOAP, HTTP, RPC and wsdlx extensions registered
    pub fn populated() -> Self {
        let mut registry = Self::new();
        core::register(&mut registry);
        rpc::register(&mut registry);
        soap::register(&mut registry);
        http::register(&mut registry);
        registry
    }

    /// Register the type of an extension attribute
    pub fn register_attribute_type(&mut self, owner: OwnerKind, name: QName, ty: AttributeType) {
        self.attribute_types.insert((owner, name), ty);
    }

    /// Look up the type of an extension attribute
    pub fn query_attribute_type(&self, owner: OwnerKind, name: &QName) -> Option<AttributeType> {
        // Tuple keys cannot be borrowed piecewise
        self.attribute_types.get(&(owner, name.clone())).copied()
    }

    /// Register a deserializer for an extension element
    pub fn register_deserializer(
        &mut self,
        owner: OwnerKind,
        name: QName,
        deserializer: Arc<dyn ExtensionDeserializer>,
    ) {
        self.deserializers.insert((owner, name), deserializer);
    }

    /// Look up the deserializer for an extension element
    pub fn query_deserializer(
        &self,
        owner: OwnerKind,
        name: &QName,
    ) -> Option<Arc<dyn ExtensionDeserializer>> {
        self.deserializers.get(&(owner, name.clone())).cloned()
    }

    /// Deserializer used when no specific one is registered
    pub fn set_default_deserializer(&mut self, deserializer: Arc<dyn ExtensionDeserializer>) {
        self.default_deserializer = Some(deserializer);
    }

    /// The fallback deserializer, if one was set
    pub fn default_deserializer(&self) -> Option<Arc<dyn ExtensionDeserializer>> {
        self.default_deserializer.clone()
    }

    /// Register a component extension view for a namespace
    pub fn register_component_extension(
        &mut self,
        owner: OwnerKind,
        namespace: impl Into<String>,
        factory: ComponentExtensionFactory,
    ) {
        self.component_extensions
            .insert((owner, namespace.into()), factory);
    }

    /// Look up a component extension factory
    pub fn query_component_extension(
        &self,
        owner: OwnerKind,
        namespace: &str,
    ) -> Option<ComponentExtensionFactory> {
        self.component_extensions
            .get(&(owner, namespace.to_string()))
            .copied()
    }

    /// Namespaces with a component extension registered for `owner`
    pub fn component_extension_namespaces(&self, owner: OwnerKind) -> Vec<&str> {
        let mut namespaces: Vec<&str> = self
            .component_extensions
            .keys()
            .filter(|(kind, _)| *kind == owner)
            .map(|(_, ns)| ns.as_str())
            .collect();
        namespaces.sort_unstable();
        namespaces
    }

    /// Every namespace anything is registered for
    pub fn registered_namespaces(&self) -> Vec<&str> {
        let mut namespaces: Vec<&str> = self
            .attribute_types
            .keys()
            .chain(self.deserializers.keys())
            .filter_map(|(_, q)| q.namespace())
            .chain(self.component_extensions.keys().map(|(_, ns)| ns.as_str()))
            .collect();
        namespaces.sort_unstable();
        namespaces.dedup();
        namespaces
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("attribute_types", &self.attribute_types.len())
            .field("deserializers", &self.deserializers.len())
            .field("default_deserializer", &self.default_deserializer.is_some())
            .field("component_extensions", &self.component_extensions.len())
            .finish()
    }
}

/// Unqualified `required` declared by the SOAP and HTTP module and header elements
pub(crate) fn required_attribute(element: &Element) -> Result<Option<bool>> {
    element
        .get_attribute("required")
        .map(parse_boolean)
        .transpose()
}
