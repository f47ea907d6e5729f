//! Element model
//!
//! One struct per WSDL 2.0 element, mirroring the XML as written: attribute
//! values, child order and extension content. Parents own their children;
//! cross-document links (`import`, `include`) are [`DocId`](crate::model::DocId)
//! indices into the owning [`DescriptionSet`](crate::model::DescriptionSet).

use serde::Serialize;

use crate::diagnostics::SourcePosition;
use crate::documents::Element;
use crate::extensions::Extensions;
use crate::namespaces::QName;

/// Common accessors of every WSDL element
pub trait WsdlElement {
    /// `wsdl:documentation` children
    fn documentation(&self) -> &[DocumentationElement];
    /// `wsdl:documentation` children, mutable
    fn documentation_mut(&mut self) -> &mut Vec<DocumentationElement>;
    /// Extension attributes and elements
    fn extensions(&self) -> &Extensions;
    /// Extension attributes and elements, mutable
    fn extensions_mut(&mut self) -> &mut Extensions;
    /// Position of the start tag in the source document
    fn position(&self) -> Option<SourcePosition>;
}

/// Elements that can carry `wsdl:feature` and `wsdl:property`
pub trait ConfigurableElement: WsdlElement {
    /// `wsdl:feature` children
    fn features(&self) -> &[FeatureElement];
    /// `wsdl:feature` children, mutable
    fn features_mut(&mut self) -> &mut Vec<FeatureElement>;
    /// `wsdl:property` children
    fn properties(&self) -> &[PropertyElement];
    /// `wsdl:property` children, mutable
    fn properties_mut(&mut self) -> &mut Vec<PropertyElement>;
}

macro_rules! impl_wsdl_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::elements::WsdlElement for $ty {
                fn documentation(&self) -> &[$crate::elements::DocumentationElement] {
                    &self.documentation
                }
                fn documentation_mut(&mut self) -> &mut Vec<$crate::elements::DocumentationElement> {
                    &mut self.documentation
                }
                fn extensions(&self) -> &$crate::extensions::Extensions {
                    &self.extensions
                }
                fn extensions_mut(&mut self) -> &mut $crate::extensions::Extensions {
                    &mut self.extensions
                }
                fn position(&self) -> Option<$crate::diagnostics::SourcePosition> {
                    self.position
                }
            }
        )*
    };
}

macro_rules! impl_configurable_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl_wsdl_element!($ty);

            impl $crate::elements::ConfigurableElement for $ty {
                fn features(&self) -> &[$crate::elements::FeatureElement] {
                    &self.features
                }
                fn features_mut(&mut self) -> &mut Vec<$crate::elements::FeatureElement> {
                    &mut self.features
                }
                fn properties(&self) -> &[$crate::elements::PropertyElement] {
                    &self.properties
                }
                fn properties_mut(&mut self) -> &mut Vec<$crate::elements::PropertyElement> {
                    &mut self.properties
                }
            }
        )*
    };
}

pub mod binding;
pub mod description;
pub mod interface;
pub mod service;
pub mod types;

pub use binding::{
    BindingElement, BindingFaultElement, BindingFaultReferenceElement,
    BindingMessageReferenceElement, BindingOperationElement,
};
pub use description::{DescriptionElement, ImportElement, IncludeElement};
pub use interface::{
    InterfaceElement, InterfaceFaultElement, InterfaceFaultReferenceElement,
    InterfaceMessageReferenceElement, InterfaceOperationElement,
};
pub use service::{EndpointElement, ServiceElement};
pub use types::{SchemaEntry, TypesElement};

/// Direction of a message or fault reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// `input` / `infault`
    In,
    /// `output` / `outfault`
    Out,
}

impl Direction {
    /// The other direction
    pub fn opposite(self) -> Self {
        match self {
            Self::In => Self::Out,
            Self::Out => Self::In,
        }
    }

    /// `"in"` or `"out"`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

/// Value of a `messageLabel` attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MessageLabel {
    /// `In`
    In,
    /// `Out`
    Out,
    /// any other token, kept as written
    Invalid(String),
}

impl MessageLabel {
    /// Map a raw label
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "In" => Self::In,
            "Out" => Self::Out,
            other => Self::Invalid(other.to_string()),
        }
    }

    /// The label as written
    pub fn as_str(&self) -> &str {
        match self {
            Self::In => "In",
            Self::Out => "Out",
            Self::Invalid(s) => s,
        }
    }

    /// Whether this is one of the labels the predefined patterns use
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid(_))
    }
}

/// `{message content model}` of a message reference or fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MessageContentModel {
    /// `#any`: any single element
    Any,
    /// `#none`: empty message
    None,
    /// `#other`: content described by a non-XML-Schema type system
    Other,
    /// `#element`: a named global element declaration
    Element,
}

impl MessageContentModel {
    /// The token form (`#any`, `#none`, `#other`, `#element`)
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Any => "#any",
            Self::None => "#none",
            Self::Other => "#other",
            Self::Element => "#element",
        }
    }
}

/// Value of an `element` attribute on a fault or message reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ElementContent {
    /// `#any`
    Any,
    /// `#none`
    None,
    /// `#other`, also the meaning of an absent attribute
    Other,
    /// a global element declaration
    Element(QName),
}

impl ElementContent {
    /// The content model token this value stands for
    pub fn content_model(&self) -> MessageContentModel {
        match self {
            Self::Any => MessageContentModel::Any,
            Self::None => MessageContentModel::None,
            Self::Other => MessageContentModel::Other,
            Self::Element(_) => MessageContentModel::Element,
        }
    }

    /// Element declaration name, if one is referenced
    pub fn element_name(&self) -> Option<&QName> {
        match self {
            Self::Element(q) => Some(q),
            _ => None,
        }
    }
}

impl Default for ElementContent {
    fn default() -> Self {
        Self::Other
    }
}

/// `wsdl:documentation`
#[derive(Debug, Clone)]
pub struct DocumentationElement {
    /// The element as written, mixed content included
    pub content: Element,
    /// Extension attributes
    pub extensions: Extensions,
}

impl DocumentationElement {
    /// Text content of the documentation
    pub fn text(&self) -> Option<&str> {
        self.content.trimmed_text()
    }
}

/// `wsdl:feature`
#[derive(Debug, Clone, Default)]
pub struct FeatureElement {
    /// `ref`
    pub uri: Option<String>,
    /// `required`
    pub required: Option<bool>,
    /// Documentation children
    pub documentation: Vec<DocumentationElement>,
    /// Extension content
    pub extensions: Extensions,
    /// Source position
    pub position: Option<SourcePosition>,
}

/// Content of a `wsdl:value` child of a property
#[derive(Debug, Clone, Default)]
pub struct PropertyValue {
    /// Text content
    pub text: Option<String>,
    /// Child elements as written
    pub content: Vec<Element>,
}

/// `wsdl:property`
#[derive(Debug, Clone, Default)]
pub struct PropertyElement {
    /// `ref`
    pub uri: Option<String>,
    /// `wsdl:value` child
    pub value: Option<PropertyValue>,
    /// `wsdl:constraint` child naming a type
    pub constraint: Option<QName>,
    /// Whether the constraint was the `#value` token
    pub has_value_token: bool,
    /// Documentation children
    pub documentation: Vec<DocumentationElement>,
    /// Extension content
    pub extensions: Extensions,
    /// Source position
    pub position: Option<SourcePosition>,
}

impl_wsdl_element!(FeatureElement, PropertyElement);
