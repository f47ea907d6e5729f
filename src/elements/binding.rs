//! `wsdl:binding` and its children

use crate::diagnostics::SourcePosition;
use crate::extensions::Extensions;
use crate::names::NCName;
use crate::namespaces::QName;

use super::{Direction, DocumentationElement, FeatureElement, MessageLabel, PropertyElement};

/// `wsdl:binding`
#[derive(Debug, Clone, Default)]
pub struct BindingElement {
    /// `name`
    pub name: Option<NCName>,
    /// `interface`
    pub interface: Option<QName>,
    /// `type`
    pub binding_type: Option<String>,
    /// `wsdl:fault` children
    pub faults: Vec<BindingFaultElement>,
    /// `wsdl:operation` children
    pub operations: Vec<BindingOperationElement>,
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

/// `wsdl:binding/wsdl:fault`
#[derive(Debug, Clone, Default)]
pub struct BindingFaultElement {
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

/// `wsdl:binding/wsdl:operation`
#[derive(Debug, Clone, Default)]
pub struct BindingOperationElement {
    /// `ref`
    pub reference: Option<QName>,
    /// `wsdl:input` and `wsdl:output` children
    pub message_references: Vec<BindingMessageReferenceElement>,
    /// `wsdl:infault` and `wsdl:outfault` children
    pub fault_references: Vec<BindingFaultReferenceElement>,
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

/// `wsdl:input` / `wsdl:output` of a binding operation
#[derive(Debug, Clone)]
pub struct BindingMessageReferenceElement {
    /// Whether this is an input or an output
    pub direction: Direction,
    /// `messageLabel` as declared
    pub message_label: Option<MessageLabel>,
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

impl BindingMessageReferenceElement {
    /// Create an empty message reference
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            message_label: None,
            documentation: Vec::new(),
            features: Vec::new(),
            properties: Vec::new(),
            extensions: Extensions::new(),
            position: None,
        }
    }
}

/// `wsdl:infault` / `wsdl:outfault` of a binding operation
#[derive(Debug, Clone)]
pub struct BindingFaultReferenceElement {
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

impl BindingFaultReferenceElement {
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
    BindingElement,
    BindingFaultElement,
    BindingOperationElement,
    BindingMessageReferenceElement,
    BindingFaultReferenceElement,
);
