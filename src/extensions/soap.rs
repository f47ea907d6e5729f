//! SOAP binding extension (`wsoap`)

use std::any::Any;
use std::sync::Arc;

use crate::attributes::{parse_boolean, AttributeType, AttributeValue, QNameListOrToken, QNameOrToken};
use crate::documents::Element;
use crate::error::{Error, Result};
use crate::locations::validate_uri_reference;
use crate::namespaces::{QName, SOAP_NAMESPACE};

use super::{
    required_attribute, ComponentExtensions, ExtensionContext, ExtensionDeserializer,
    ExtensionElement, Extensions, ExtensionRegistry, OwnerKind,
};

/// SOAP version assumed when `wsoap:version` is absent
pub const DEFAULT_SOAP_VERSION: &str = "1.2";

fn soap(local: &str) -> QName {
    QName::namespaced(SOAP_NAMESPACE, local)
}

/// Register the SOAP attributes, elements and component views
pub fn register(registry: &mut ExtensionRegistry) {
    registry.register_attribute_type(OwnerKind::Binding, soap("version"), AttributeType::String);
    registry.register_attribute_type(OwnerKind::Binding, soap("protocol"), AttributeType::Uri);
    registry.register_attribute_type(OwnerKind::Binding, soap("mepDefault"), AttributeType::Uri);
    registry.register_attribute_type(OwnerKind::BindingFault, soap("code"), AttributeType::QNameOrToken);
    registry.register_attribute_type(
        OwnerKind::BindingFault,
        soap("subcodes"),
        AttributeType::QNameListOrToken,
    );
    registry.register_attribute_type(OwnerKind::BindingOperation, soap("mep"), AttributeType::Uri);
    registry.register_attribute_type(OwnerKind::BindingOperation, soap("action"), AttributeType::Uri);

    let module: Arc<dyn ExtensionDeserializer> = Arc::new(SoapModuleDeserializer);
    for owner in [
        OwnerKind::Binding,
        OwnerKind::BindingFault,
        OwnerKind::BindingOperation,
        OwnerKind::BindingMessageReference,
        OwnerKind::BindingFaultReference,
    ] {
        registry.register_deserializer(owner, soap("module"), Arc::clone(&module));
    }

    let header: Arc<dyn ExtensionDeserializer> = Arc::new(SoapHeaderBlockDeserializer);
    for owner in [OwnerKind::BindingFault, OwnerKind::BindingMessageReference] {
        registry.register_deserializer(owner, soap("header"), Arc::clone(&header));
    }

    registry.register_component_extension(OwnerKind::Binding, SOAP_NAMESPACE, |e| {
        Arc::new(SoapBindingExtensions::from_extensions(e))
    });
    registry.register_component_extension(OwnerKind::BindingFault, SOAP_NAMESPACE, |e| {
        Arc::new(SoapBindingFaultExtensions::from_extensions(e))
    });
    registry.register_component_extension(OwnerKind::BindingOperation, SOAP_NAMESPACE, |e| {
        Arc::new(SoapBindingOperationExtensions::from_extensions(e))
    });
    registry.register_component_extension(
        OwnerKind::BindingMessageReference,
        SOAP_NAMESPACE,
        |e| Arc::new(SoapBindingMessageReferenceExtensions::from_extensions(e)),
    );
    registry.register_component_extension(
        OwnerKind::BindingFaultReference,
        SOAP_NAMESPACE,
        |e| Arc::new(SoapBindingFaultReferenceExtensions::from_extensions(e)),
    );
}

/// `<wsoap:module>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapModule {
    element_type: QName,
    /// `ref`: URI identifying the SOAP module
    pub uri: String,
    /// `required`
    pub required: Option<bool>,
}

impl ExtensionElement for SoapModule {
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

/// `<wsoap:header>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapHeaderBlock {
    element_type: QName,
    /// `element`: global element declaration of the header block
    pub element: Option<QName>,
    /// `mustUnderstand`, false when absent
    pub must_understand: bool,
    /// `required`
    pub required: Option<bool>,
}

impl ExtensionElement for SoapHeaderBlock {
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

struct SoapModuleDeserializer;

impl ExtensionDeserializer for SoapModuleDeserializer {
    fn unmarshall(
        &self,
        _ctx: &ExtensionContext<'_>,
        element: &Element,
    ) -> Result<Arc<dyn ExtensionElement>> {
        let uri = element
            .get_attribute("ref")
            .ok_or_else(|| Error::Extension("wsoap:module requires a 'ref' attribute".into()))?
            .trim();
        validate_uri_reference(uri)?;
        Ok(Arc::new(SoapModule {
            element_type: element.qname.clone(),
            uri: uri.to_string(),
            required: required_attribute(element)?,
        }))
    }
}

struct SoapHeaderBlockDeserializer;

impl ExtensionDeserializer for SoapHeaderBlockDeserializer {
    fn unmarshall(
        &self,
        _ctx: &ExtensionContext<'_>,
        element: &Element,
    ) -> Result<Arc<dyn ExtensionElement>> {
        let header_element = element
            .get_attribute("element")
            .map(|v| element.namespaces.resolve(v))
            .transpose()?;
        let must_understand = element
            .get_attribute("mustUnderstand")
            .map(parse_boolean)
            .transpose()?
            .unwrap_or(false);
        Ok(Arc::new(SoapHeaderBlock {
            element_type: element.qname.clone(),
            element: header_element,
            must_understand,
            required: required_attribute(element)?,
        }))
    }
}

fn string_value(extensions: &Extensions, local: &str) -> Option<String> {
    extensions
        .value(SOAP_NAMESPACE, local)
        .and_then(AttributeValue::as_str)
        .map(str::to_string)
}

fn modules(extensions: &Extensions) -> Vec<SoapModule> {
    extensions.elements_as::<SoapModule>().cloned().collect()
}

fn headers(extensions: &Extensions) -> Vec<SoapHeaderBlock> {
    extensions.elements_as::<SoapHeaderBlock>().cloned().collect()
}

macro_rules! soap_component {
    ($ty:ty) => {
        impl ComponentExtensions for $ty {
            fn namespace(&self) -> &str {
                SOAP_NAMESPACE
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        }
    };
}

/// SOAP properties of a binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapBindingExtensions {
    version: Option<String>,
    /// `{soap underlying protocol}`
    pub underlying_protocol: Option<String>,
    /// `{soap mep default}`
    pub mep_default: Option<String>,
    /// `{soap modules}`
    pub modules: Vec<SoapModule>,
}

impl SoapBindingExtensions {
    /// Read the view from a binding's extension content
    pub fn from_extensions(extensions: &Extensions) -> Self {
        Self {
            version: string_value(extensions, "version"),
            underlying_protocol: string_value(extensions, "protocol"),
            mep_default: string_value(extensions, "mepDefault"),
            modules: modules(extensions),
        }
    }

    /// `{soap version}`, `1.2` when not declared
    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_SOAP_VERSION)
    }
}

soap_component!(SoapBindingExtensions);

/// SOAP properties of a binding fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapBindingFaultExtensions {
    /// `{soap fault code}`
    pub code: Option<QNameOrToken>,
    /// `{soap fault subcodes}`
    pub subcodes: Option<QNameListOrToken>,
    /// `{soap modules}`
    pub modules: Vec<SoapModule>,
    /// `{soap header blocks}`
    pub headers: Vec<SoapHeaderBlock>,
}

impl SoapBindingFaultExtensions {
    /// Read the view from a binding fault's extension content
    pub fn from_extensions(extensions: &Extensions) -> Self {
        let code = match extensions.value(SOAP_NAMESPACE, "code") {
            Some(AttributeValue::QNameOrToken(code)) => Some(code.clone()),
            _ => None,
        };
        let subcodes = match extensions.value(SOAP_NAMESPACE, "subcodes") {
            Some(AttributeValue::QNameListOrToken(subcodes)) => Some(subcodes.clone()),
            _ => None,
        };
        Self {
            code,
            subcodes,
            modules: modules(extensions),
            headers: headers(extensions),
        }
    }
}

soap_component!(SoapBindingFaultExtensions);

/// SOAP properties of a binding operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapBindingOperationExtensions {
    /// `{soap mep}`
    pub mep: Option<String>,
    /// `{soap action}`
    pub action: Option<String>,
    /// `{soap modules}`
    pub modules: Vec<SoapModule>,
}

impl SoapBindingOperationExtensions {
    /// Read the view from a binding operation's extension content
    pub fn from_extensions(extensions: &Extensions) -> Self {
        Self {
            mep: string_value(extensions, "mep"),
            action: string_value(extensions, "action"),
            modules: modules(extensions),
        }
    }
}

soap_component!(SoapBindingOperationExtensions);

/// SOAP properties of a binding message reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapBindingMessageReferenceExtensions {
    /// `{soap modules}`
    pub modules: Vec<SoapModule>,
    /// `{soap header blocks}`
    pub headers: Vec<SoapHeaderBlock>,
}

impl SoapBindingMessageReferenceExtensions {
    /// Read the view from a binding message reference's extension content
    pub fn from_extensions(extensions: &Extensions) -> Self {
        Self {
            modules: modules(extensions),
            headers: headers(extensions),
        }
    }
}

soap_component!(SoapBindingMessageReferenceExtensions);

/// SOAP properties of a binding fault reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapBindingFaultReferenceExtensions {
    /// `{soap modules}`
    pub modules: Vec<SoapModule>,
}

impl SoapBindingFaultReferenceExtensions {
    /// Read the view from a binding fault reference's extension content
    pub fn from_extensions(extensions: &Extensions) -> Self {
        Self {
            modules: modules(extensions),
        }
    }
}

soap_component!(SoapBindingFaultReferenceExtensions);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Document;

    fn ctx() -> ExtensionContext<'static> {
        ExtensionContext {
            owner: OwnerKind::BindingMessageReference,
            ancestors: &[],
            target_namespace: None,
            base_uri: "urn:test",
        }
    }

    #[test]
    fn test_header_block() {
        let doc = Document::from_string(
            r#"<wsoap:header xmlns:wsoap="http://www.w3.org/2006/01/wsdl/soap"
                   xmlns:tns="urn:t" element="tns:Trace" mustUnderstand="true"/>"#,
        )
        .unwrap();
        let ext = SoapHeaderBlockDeserializer.unmarshall(&ctx(), doc.root()).unwrap();
        let header = ext.as_any().downcast_ref::<SoapHeaderBlock>().unwrap();
        assert_eq!(header.element, Some(QName::namespaced("urn:t", "Trace")));
        assert!(header.must_understand);
        assert_eq!(header.required, None);
    }

    #[test]
    fn test_module_requires_ref() {
        let doc = Document::from_string(
            r#"<wsoap:module xmlns:wsoap="http://www.w3.org/2006/01/wsdl/soap"/>"#,
        )
        .unwrap();
        assert!(SoapModuleDeserializer.unmarshall(&ctx(), doc.root()).is_err());
    }

    #[test]
    fn test_module_required_is_unqualified() {
        let doc = Document::from_string(
            r#"<wsoap:module xmlns:wsoap="http://www.w3.org/2006/01/wsdl/soap"
                   ref="urn:module:a" required="true"/>"#,
        )
        .unwrap();
        let ext = SoapModuleDeserializer.unmarshall(&ctx(), doc.root()).unwrap();
        assert_eq!(ext.is_required(), Some(true));

        let doc = Document::from_string(
            r#"<wsoap:module xmlns:wsoap="http://www.w3.org/2006/01/wsdl/soap"
                   xmlns:w="http://www.w3.org/2006/01/wsdl"
                   ref="urn:module:a" w:required="true"/>"#,
        )
        .unwrap();
        let ext = SoapModuleDeserializer.unmarshall(&ctx(), doc.root()).unwrap();
        assert_eq!(ext.is_required(), None);
    }

    #[test]
    fn test_binding_defaults() {
        let view = SoapBindingExtensions::from_extensions(&Extensions::new());
        assert_eq!(view.version(), DEFAULT_SOAP_VERSION);
        assert!(view.underlying_protocol.is_none());
        assert!(view.modules.is_empty());
    }
}
