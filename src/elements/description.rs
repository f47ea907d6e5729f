//! `wsdl:description`, `wsdl:import` and `wsdl:include`

use crate::diagnostics::SourcePosition;
use crate::extensions::Extensions;
use crate::model::DocId;
use crate::names::NCName;
use crate::namespaces::{NamespaceContext, QName};

use super::{
    BindingElement, DocumentationElement, InterfaceElement, ServiceElement, TypesElement,
};

/// Root element of one physical WSDL document
#[derive(Debug, Clone)]
pub struct DescriptionElement {
    document_base_uri: String,
    target_namespace: Option<String>,
    namespaces: NamespaceContext,
    pub(crate) position: Option<SourcePosition>,
    pub(crate) documentation: Vec<DocumentationElement>,
    pub(crate) imports: Vec<ImportElement>,
    pub(crate) includes: Vec<IncludeElement>,
    pub(crate) types: Option<TypesElement>,
    pub(crate) interfaces: Vec<InterfaceElement>,
    pub(crate) bindings: Vec<BindingElement>,
    pub(crate) services: Vec<ServiceElement>,
    pub(crate) extensions: Extensions,
}

impl_wsdl_element!(DescriptionElement);

impl DescriptionElement {
    /// Create an empty description for the document at `base_uri`
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            document_base_uri: base_uri.into(),
            target_namespace: None,
            namespaces: NamespaceContext::new(),
            position: None,
            documentation: Vec::new(),
            imports: Vec::new(),
            includes: Vec::new(),
            types: None,
            interfaces: Vec::new(),
            bindings: Vec::new(),
            services: Vec::new(),
            extensions: Extensions::new(),
        }
    }

    /// Base URI of the document; identifies it within a read
    pub fn document_base_uri(&self) -> &str {
        &self.document_base_uri
    }

    /// `targetNamespace`
    ///
    /// Fixed once the document has been read:
    ///
    /// ```compile_fail
    /// let mut element = wsdl2::elements::DescriptionElement::new("urn:doc");
    /// element.set_target_namespace(Some("urn:other".to_string()));
    /// ```
    pub fn target_namespace(&self) -> Option<&str> {
        self.target_namespace.as_deref()
    }

    pub(crate) fn set_target_namespace(&mut self, namespace: Option<String>) {
        self.target_namespace = namespace;
    }

    /// Namespace declarations of the root element
    pub fn namespaces(&self) -> &NamespaceContext {
        &self.namespaces
    }

    /// Replace the namespace declarations
    pub fn set_namespaces(&mut self, namespaces: NamespaceContext) {
        self.namespaces = namespaces;
    }

    /// Qualify a local name with the target namespace
    pub fn qualify(&self, name: &NCName) -> QName {
        QName::new(self.target_namespace.as_deref(), name.as_str())
    }

    /// `wsdl:import` children
    pub fn imports(&self) -> &[ImportElement] {
        &self.imports
    }

    /// Add an import
    pub fn add_import(&mut self, import: ImportElement) {
        self.imports.push(import);
    }

    /// `wsdl:include` children
    pub fn includes(&self) -> &[IncludeElement] {
        &self.includes
    }

    /// Add an include
    pub fn add_include(&mut self, include: IncludeElement) {
        self.includes.push(include);
    }

    /// The `wsdl:types` child, if any exists yet
    pub fn types_element(&self) -> Option<&TypesElement> {
        self.types.as_ref()
    }

    /// The `wsdl:types` child, created when missing
    pub fn types_element_mut(&mut self) -> &mut TypesElement {
        self.types.get_or_insert_with(TypesElement::new)
    }

    /// `wsdl:interface` children
    pub fn interfaces(&self) -> &[InterfaceElement] {
        &self.interfaces
    }

    /// Add an interface
    pub fn add_interface(&mut self, interface: InterfaceElement) {
        self.interfaces.push(interface);
    }

    /// `wsdl:binding` children
    pub fn bindings(&self) -> &[BindingElement] {
        &self.bindings
    }

    /// Add a binding
    pub fn add_binding(&mut self, binding: BindingElement) {
        self.bindings.push(binding);
    }

    /// `wsdl:service` children
    pub fn services(&self) -> &[ServiceElement] {
        &self.services
    }

    /// Add a service
    pub fn add_service(&mut self, service: ServiceElement) {
        self.services.push(service);
    }
}

/// `wsdl:import`
#[derive(Debug, Clone, Default)]
pub struct ImportElement {
    /// `namespace`
    pub namespace: Option<String>,
    /// `location`
    pub location: Option<String>,
    /// The imported document, when it could be read
    pub description: Option<DocId>,
    /// Documentation children
    pub documentation: Vec<DocumentationElement>,
    /// Extension content
    pub extensions: Extensions,
    /// Source position
    pub position: Option<SourcePosition>,
}

/// `wsdl:include`
#[derive(Debug, Clone, Default)]
pub struct IncludeElement {
    /// `location`
    pub location: Option<String>,
    /// The included document, when it could be read
    pub description: Option<DocId>,
    /// Documentation children
    pub documentation: Vec<DocumentationElement>,
    /// Extension content
    pub extensions: Extensions,
    /// Source position
    pub position: Option<SourcePosition>,
}

impl_wsdl_element!(ImportElement, IncludeElement);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::XSD_NAMESPACE;

    #[test]
    fn test_types_auto_vivified() {
        let mut desc = DescriptionElement::new("urn:test");
        assert!(desc.types_element().is_none());
        assert_eq!(desc.types_element_mut().type_system, XSD_NAMESPACE);
        assert!(desc.types_element().is_some());
    }

    #[test]
    fn test_qualify() {
        let mut desc = DescriptionElement::new("urn:test");
        let name = NCName::new("Svc").unwrap();
        assert_eq!(desc.qualify(&name), QName::local("Svc"));
        desc.set_target_namespace(Some("http://example.org".to_string()));
        assert_eq!(desc.qualify(&name), QName::namespaced("http://example.org", "Svc"));
    }
}
