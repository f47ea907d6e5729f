//! `wsdl:interface` and its children

use crate::diagnostics::SourcePosition;
use crate::extensions::Extensions;
use crate::names::NCName;
use crate::namespaces::QName;

use super::{
    Direction, DocumentationElement, ElementContent, FeatureElement, MessageLabel,
    PropertyElement,
};

/// `wsdl:interface`
#[derive(Debug, Clone, Default)]
pub struct InterfaceElement {
    /// `name`
    pub name: Option<NCName>,
    /// `extends`
    pub extends: Vec<QName>,
    /// `styleDefault`
    pub style_default: Vec<String>,
    /// `wsdl:fault` children
    pub faults: Vec<InterfaceFaultElement>,
    /// `wsdl:operation` children
    pub operations: Vec<InterfaceOperationElement>,
    /// Documentation children
    pub documentation: Vec<DocumentationElement>,
    /// Feature children
    pub features: Vec<FeatureElement>,
    /// Property children
    pub properties: Vec<PropertyElement>,
    /// Extension content
    pub extensions: Extensions,
    /// Source position
    pub position: Option<SourcePosition>,
}

impl InterfaceElement {
    /// Find a directly declared fault by local name
    pub fn fault(&self, name: &str) -> Option<&InterfaceFaultElement> {
        self.faults
            .iter()
            .find(|f| f.name.as_ref().map(NCName::as_str) == Some(name))
    }

    /// Find a directly declared operation by local name
    pub fn operation(&self, name: &str) -> Option<&InterfaceOperationElement> {
        self.operations
            .iter()
            .find(|o| o.name.as_ref().map(NCName::as_str) == Some(name))
    }
}

/// `wsdl:interface/wsdl:fault`
#[derive(Debug, Clone, Default)]
pub struct InterfaceFaultElement {
    /// `name`
    pub name: Option<NCName>,
    /// `element`
    pub element: ElementContent,
    /// Documentation children
    pub documentation: Vec<DocumentationElement>,
    /// Feature children
    pub features: Vec<FeatureElement>,
    /// Property children
    pub properties: Vec<PropertyElement>,
    /// Extension content
    pub extensions: Extensions,
    /// Source position
    pub position: Option<SourcePosition>,
}

/// `wsdl:interface/wsdl:operation`
#[derive(Debug, Clone, Default)]
pub struct InterfaceOperationElement {
    /// `name`
    pub name: Option<NCName>,
    /// `pattern`
    pub pattern: Option<String>,
    /// `style`
    pub style: Vec<String>,
    /// `wsdl:input` and `wsdl:output` children in document order
    pub message_references: Vec<InterfaceMessageReferenceElement>,
    /// `wsdl:infault` and `wsdl:outfault` children in document order
    pub fault_references: Vec<InterfaceFaultReferenceElement>,
    /// Documentation children
    pub documentation: Vec<DocumentationElement>,
    /// Feature children
    pub features: Vec<FeatureElement>,
    /// Property children
    pub properties: Vec<PropertyElement>,
    /// Extension content
    pub extensions: Extensions,
    /// Source position
    pub position: Option<SourcePosition>,
}

/// `wsdl:input` / `wsdl:output` of an interface operation
#[derive(Debug, Clone)]
pub struct InterfaceMessageReferenceElement {
    /// Whether this is an input or an output
    pub direction: Direction,
    /// `messageLabel` as declared
    pub message_label: Option<MessageLabel>,
    /// `element`
    pub element: ElementContent,
    /// Documentation children
    pub documentation: Vec<DocumentationElement>,
    /// Feature children
    pub features: Vec<FeatureElement>,
    /// Property children
    pub properties: Vec<PropertyElement>,
    /// Extension content
    pub extensions: Extensions,
    /// Source position
    pub position: Option<SourcePosition>,
}

impl InterfaceMessageReferenceElement {
    /// Create an empty message reference
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            message_label: None,
            element: ElementContent::Other,
            documentation: Vec::new(),
            features: Vec::new(),
            properties: Vec::new(),
            extensions: Extensions::new(),
            position: None,
        }
    }
}

/// `wsdl:infault` / `wsdl:outfault` of an interface operation
#[derive(Debug, Clone)]
pub struct InterfaceFaultReferenceElement {
    /// Whether this is an infault or an outfault
    pub direction: Direction,
    /// `messageLabel` as declared
    pub message_label: Option<MessageLabel>,
    /// `ref`
    pub reference: Option<QName>,
    /// Documentation children
    pub documentation: Vec<DocumentationElement>,
    /// Feature children
    pub features: Vec<FeatureElement>,
    /// Property children
    pub properties: Vec<PropertyElement>,
    /// Extension content
    pub extensions: Extensions,
    /// Source position
    pub position: Option<SourcePosition>,
}

impl InterfaceFaultReferenceElement {
    /// Create an empty fault reference
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            message_label: None,
            reference: None,
            documentation: Vec::new(),
            features: Vec::new(),
            properties: Vec::new(),
            extensions: Extensions::new(),
            position: None,
        }
    }
}

impl_configurable_element!(
    InterfaceElement,
    InterfaceFaultElement,
    InterfaceOperationElement,
    InterfaceMessageReferenceElement,
    InterfaceFaultReferenceElement,
);
