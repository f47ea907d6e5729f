//! HTTP binding extension (`whttp`)

use std::any::Any;
use std::sync::Arc;

use crate::attributes::{AttributeType, AttributeValue, IntOrToken};
use crate::documents::Element;
use crate::error::{Error, Result};
use crate::names::validate_ncname;
use crate::namespaces::{QName, HTTP_NAMESPACE};

use super::{
    required_attribute, ComponentExtensions, ExtensionContext, ExtensionDeserializer,
    ExtensionElement, Extensions, ExtensionRegistry, OwnerKind,
};

/// Query parameter separator assumed when none is declared
pub const DEFAULT_QUERY_PARAMETER_SEPARATOR: &str = "&";

fn http(local: &str) -> QName {
    QName::namespaced(HTTP_NAMESPACE, local)
}

/// Register the HTTP attributes, elements and component views
pub fn register(registry: &mut ExtensionRegistry) {
    for local in [
        "methodDefault",
        "queryParameterSeparatorDefault",
        "contentEncodingDefault",
    ] {
        registry.register_attribute_type(OwnerKind::Binding, http(local), AttributeType::String);
    }
    registry.register_attribute_type(OwnerKind::Binding, http("cookies"), AttributeType::Boolean);

    for local in [
        "location",
        "method",
        "inputSerialization",
        "outputSerialization",
        "faultSerialization",
        "queryParameterSeparator",
        "contentEncodingDefault",
    ] {
        registry.register_attribute_type(
            OwnerKind::BindingOperation,
            http(local),
            AttributeType::String,
        );
    }
    registry.register_attribute_type(
        OwnerKind::BindingOperation,
        http("ignoreUncited"),
        AttributeType::Boolean,
    );

    registry.register_attribute_type(
        OwnerKind::BindingMessageReference,
        http("contentEncoding"),
        AttributeType::String,
    );
    registry.register_attribute_type(OwnerKind::BindingFault, http("code"), AttributeType::IntOrToken);
    registry.register_attribute_type(
        OwnerKind::BindingFault,
        http("contentEncoding"),
        AttributeType::String,
    );
    registry.register_attribute_type(
        OwnerKind::Endpoint,
        http("authenticationScheme"),
        AttributeType::String,
    );
    registry.register_attribute_type(
        OwnerKind::Endpoint,
        http("authenticationRealm"),
        AttributeType::String,
    );

    let header: Arc<dyn ExtensionDeserializer> = Arc::new(HttpHeaderDeserializer);
    for owner in [OwnerKind::BindingFault, OwnerKind::BindingMessageReference] {
        registry.register_deserializer(owner, http("header"), Arc::clone(&header));
    }

    registry.register_component_extension(OwnerKind::Binding, HTTP_NAMESPACE, |e| {
        Arc::new(HttpBindingExtensions::from_extensions(e))
    });
    registry.register_component_extension(OwnerKind::BindingOperation, HTTP_NAMESPACE, |e| {
        Arc::new(HttpBindingOperationExtensions::from_extensions(e))
    });
    registry.register_component_extension(
        OwnerKind::BindingMessageReference,
        HTTP_NAMESPACE,
        |e| Arc::new(HttpBindingMessageReferenceExtensions::from_extensions(e)),
    );
    registry.register_component_extension(OwnerKind::BindingFault, HTTP_NAMESPACE, |e| {
        Arc::new(HttpBindingFaultExtensions::from_extensions(e))
    });
    registry.register_component_extension(OwnerKind::Endpoint, HTTP_NAMESPACE, |e| {
        Arc::new(HttpEndpointExtensions::from_extensions(e))
    });
}

/// `<whttp:header>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpHeader {
    element_type: QName,
    /// `name`: HTTP header field name
    pub name: String,
    /// `type`: simple type of the header value
    pub type_name: Option<QName>,
    /// `required`
    pub required: Option<bool>,
}

impl ExtensionElement for HttpHeader {
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

struct HttpHeaderDeserializer;

impl ExtensionDeserializer for HttpHeaderDeserializer {
    fn unmarshall(
        &self,
        _ctx: &ExtensionContext<'_>,
        element: &Element,
    ) -> Result<Arc<dyn ExtensionElement>> {
        let name = element
            .get_attribute("name")
            .ok_or_else(|| Error::Extension("whttp:header requires a 'name' attribute".into()))?
            .trim();
        validate_ncname(name)?;
        let type_name = element
            .get_attribute("type")
            .map(|v| element.namespaces.resolve(v))
            .transpose()?;
        Ok(Arc::new(HttpHeader {
            element_type: element.qname.clone(),
            name: name.to_string(),
            type_name,
            required: required_attribute(element)?,
        }))
    }
}

fn string_value(extensions: &Extensions, local: &str) -> Option<String> {
    extensions
        .value(HTTP_NAMESPACE, local)
        .and_then(AttributeValue::as_str)
        .map(str::to_string)
}

fn bool_value(extensions: &Extensions, local: &str) -> Option<bool> {
    extensions
        .value(HTTP_NAMESPACE, local)
        .and_then(AttributeValue::as_bool)
}

fn headers(extensions: &Extensions) -> Vec<HttpHeader> {
    extensions.elements_as::<HttpHeader>().cloned().collect()
}

macro_rules! http_component {
    ($ty:ty) => {
        impl ComponentExtensions for $ty {
            fn namespace(&self) -> &str {
                HTTP_NAMESPACE
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        }
    };
}

/// HTTP properties of a binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBindingExtensions {
    /// `{http method default}`
    pub method_default: Option<String>,
    query_parameter_separator_default: Option<String>,
    /// `{http content encoding default}`
    pub content_encoding_default: Option<String>,
    cookies: Option<bool>,
}

impl HttpBindingExtensions {
    /// Read the view from a binding's extension content
    pub fn from_extensions(extensions: &Extensions) -> Self {
        Self {
            method_default: string_value(extensions, "methodDefault"),
            query_parameter_separator_default: string_value(
                extensions,
                "queryParameterSeparatorDefault",
            ),
            content_encoding_default: string_value(extensions, "contentEncodingDefault"),
            cookies: bool_value(extensions, "cookies"),
        }
    }

    /// `{http query parameter separator default}`, `&` when not declared
    pub fn query_parameter_separator_default(&self) -> &str {
        self.query_parameter_separator_default
            .as_deref()
            .unwrap_or(DEFAULT_QUERY_PARAMETER_SEPARATOR)
    }

    /// `{http cookies}`, false when not declared
    pub fn uses_cookies(&self) -> bool {
        self.cookies.unwrap_or(false)
    }
}

http_component!(HttpBindingExtensions);

/// HTTP properties of a binding operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBindingOperationExtensions {
    /// `{http location}`
    pub location: Option<String>,
    /// `{http method}`
    pub method: Option<String>,
    /// `{http input serialization}`
    pub input_serialization: Option<String>,
    /// `{http output serialization}`
    pub output_serialization: Option<String>,
    /// `{http fault serialization}`
    pub fault_serialization: Option<String>,
    /// `{http query parameter separator}`
    pub query_parameter_separator: Option<String>,
    /// `{http content encoding default}`
    pub content_encoding_default: Option<String>,
    ignore_uncited: Option<bool>,
}

impl HttpBindingOperationExtensions {
    /// Read the view from a binding operation's extension content
    pub fn from_extensions(extensions: &Extensions) -> Self {
        Self {
            location: string_value(extensions, "location"),
            method: string_value(extensions, "method"),
            input_serialization: string_value(extensions, "inputSerialization"),
            output_serialization: string_value(extensions, "outputSerialization"),
            fault_serialization: string_value(extensions, "faultSerialization"),
            query_parameter_separator: string_value(extensions, "queryParameterSeparator"),
            content_encoding_default: string_value(extensions, "contentEncodingDefault"),
            ignore_uncited: bool_value(extensions, "ignoreUncited"),
        }
    }

    /// `{http location ignore uncited}`, false when not declared
    pub fn ignore_uncited(&self) -> bool {
        self.ignore_uncited.unwrap_or(false)
    }
}

http_component!(HttpBindingOperationExtensions);

/// HTTP properties of a binding message reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBindingMessageReferenceExtensions {
    /// `{http content encoding}`
    pub content_encoding: Option<String>,
    /// `{http headers}`
    pub headers: Vec<HttpHeader>,
}

impl HttpBindingMessageReferenceExtensions {
    /// Read the view from a binding message reference's extension content
    pub fn from_extensions(extensions: &Extensions) -> Self {
        Self {
            content_encoding: string_value(extensions, "contentEncoding"),
            headers: headers(extensions),
        }
    }
}

http_component!(HttpBindingMessageReferenceExtensions);

/// HTTP properties of a binding fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBindingFaultExtensions {
    /// `{http error status code}`
    pub code: Option<IntOrToken>,
    /// `{http content encoding}`
    pub content_encoding: Option<String>,
    /// `{http headers}`
    pub headers: Vec<HttpHeader>,
}

impl HttpBindingFaultExtensions {
    /// Read the view from a binding fault's extension content
    pub fn from_extensions(extensions: &Extensions) -> Self {
        let code = match extensions.value(HTTP_NAMESPACE, "code") {
            Some(AttributeValue::IntOrToken(code)) => Some(*code),
            _ => None,
        };
        Self {
            code,
            content_encoding: string_value(extensions, "contentEncoding"),
            headers: headers(extensions),
        }
    }
}

http_component!(HttpBindingFaultExtensions);

/// HTTP properties of an endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpEndpointExtensions {
    /// `{http authentication scheme}`
    pub authentication_scheme: Option<String>,
    /// `{http authentication realm}`
    pub authentication_realm: Option<String>,
}

impl HttpEndpointExtensions {
    /// Read the view from an endpoint's extension content
    pub fn from_extensions(extensions: &Extensions) -> Self {
        Self {
            authentication_scheme: string_value(extensions, "authenticationScheme"),
            authentication_realm: string_value(extensions, "authenticationRealm"),
        }
    }
}

http_component!(HttpEndpointExtensions);
