//! `wsdl:service` and `wsdl:endpoint`

use crate::diagnostics::SourcePosition;
use crate::extensions::Extensions;
use crate::names::NCName;
use crate::namespaces::QName;

use super::{DocumentationElement, FeatureElement, PropertyElement};

/// `wsdl:service`
#[derive(Debug, Clone, Default)]
pub struct ServiceElement {
    /// `name`
    pub name: Option<NCName>,
    /// `interface`
    pub interface: Option<QName>,
    /// `wsdl:endpoint` children
    pub endpoints: Vec<EndpointElement>,
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

/// `wsdl:endpoint`
#[derive(Debug, Clone, Default)]
pub struct EndpointElement {
    /// `name`
    pub name: Option<NCName>,
    /// `binding`
    pub binding: Option<QName>,
    /// `address`
    pub address: Option<String>,
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

impl_configurable_element!(ServiceElement, EndpointElement);
