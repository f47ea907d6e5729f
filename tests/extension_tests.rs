//! Extension attributes, elements and component extension views

mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;

use common::{description, keys, read_one, read_with};
use wsdl2::attributes::{AttributeType, AttributeValue, IntOrToken, QNameOrToken};
use wsdl2::diagnostics::{keys as k, Severity};
use wsdl2::documents::Element;
use wsdl2::elements::WsdlElement;
use wsdl2::error::{Error, Result};
use wsdl2::extensions::core::InterfaceOperationExtensions;
use wsdl2::extensions::http::{
    HttpBindingExtensions, HttpBindingFaultExtensions, HttpBindingMessageReferenceExtensions,
    HttpBindingOperationExtensions, HttpEndpointExtensions,
};
use wsdl2::extensions::rpc::{ArgumentDirection, RpcInterfaceOperationExtensions};
use wsdl2::extensions::soap::{
    SoapBindingExtensions, SoapBindingFaultExtensions, SoapBindingMessageReferenceExtensions,
    SoapBindingOperationExtensions,
};
use wsdl2::extensions::{
    downcast_extensions, ExtensionContext, ExtensionDeserializer, ExtensionElement,
    ExtensionRegistry, OwnerKind, UnknownDeserializer, UnknownExtensionElement,
};
use wsdl2::namespaces::{HTTP_NAMESPACE, RPC_NAMESPACE, SOAP_NAMESPACE, WSDLX_NAMESPACE};
use wsdl2::{Component, QName, Reader};

const NS: &str = "urn:example:ext";

fn q(local: &str) -> QName {
    QName::namespaced(NS, local)
}

#[test]
fn test_soap_binding_views() {
    let text = description(
        NS,
        r##"<interface name="I">
             <fault name="Bad"/>
             <operation name="op"><input/><output/></operation>
           </interface>
           <binding name="B" interface="tns:I" type="http://www.w3.org/2006/01/wsdl/soap"
                    wsoap:protocol="http://www.w3.org/2003/05/soap/bindings/HTTP/">
             <wsoap:module ref="urn:module:security" required="true"/>
             <fault ref="tns:Bad" wsoap:code="tns:Sender" wsoap:subcodes="#any">
               <wsoap:header element="tns:Trace" mustUnderstand="true"/>
             </fault>
             <operation ref="tns:op" wsoap:action="urn:action:op">
               <input><wsoap:header element="tns:Auth"/></input>
             </operation>
           </binding>"##,
    );
    let (set, diagnostics) = read_one(&text);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);

    let binding = set.to_component().binding(&q("B")).unwrap();
    let view = binding.component_extensions(SOAP_NAMESPACE).unwrap();
    let soap = downcast_extensions::<SoapBindingExtensions>(&view).unwrap();
    assert_eq!(soap.version(), "1.2");
    assert_eq!(
        soap.underlying_protocol.as_deref(),
        Some("http://www.w3.org/2003/05/soap/bindings/HTTP/")
    );
    assert_eq!(soap.modules.len(), 1);
    assert_eq!(soap.modules[0].uri, "urn:module:security");
    assert_eq!(soap.modules[0].required, Some(true));

    let fault_view = binding.binding_faults()[0]
        .component_extensions(SOAP_NAMESPACE)
        .unwrap();
    let fault = downcast_extensions::<SoapBindingFaultExtensions>(&fault_view).unwrap();
    assert_eq!(fault.code, Some(QNameOrToken::QName(q("Sender"))));
    assert!(fault.headers[0].must_understand);
    assert_eq!(fault.headers[0].element, Some(q("Trace")));

    let operation = binding.binding_operations()[0];
    let op_view = operation.component_extensions(SOAP_NAMESPACE).unwrap();
    let soap_op = downcast_extensions::<SoapBindingOperationExtensions>(&op_view).unwrap();
    assert_eq!(soap_op.action.as_deref(), Some("urn:action:op"));
    assert_eq!(soap_op.mep, None);

    let input = operation.binding_message_references()[0];
    let input_view = input.component_extensions(SOAP_NAMESPACE).unwrap();
    let soap_input =
        downcast_extensions::<SoapBindingMessageReferenceExtensions>(&input_view).unwrap();
    assert_eq!(soap_input.headers.len(), 1);
    assert!(!soap_input.headers[0].must_understand);
}

#[test]
fn test_component_views_are_cached() {
    let text = description(
        NS,
        r#"<interface name="I"/>
           <binding name="B" interface="tns:I" wsoap:version="1.1"/>"#,
    );
    let (set, _) = read_one(&text);
    let binding = set.to_component().bindings()[0];
    let first = binding.component_extensions(SOAP_NAMESPACE).unwrap();
    let second = binding.component_extensions(SOAP_NAMESPACE).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(
        downcast_extensions::<SoapBindingExtensions>(&first)
            .unwrap()
            .version(),
        "1.1"
    );
    assert!(binding.component_extensions("urn:nobody").is_none());
}

#[test]
fn test_http_binding_views() {
    let text = description(
        NS,
        r#"<interface name="I">
             <fault name="Gone"/>
             <operation name="get"><input/></operation>
           </interface>
           <binding name="B" interface="tns:I" type="http://www.w3.org/2006/01/wsdl/http"
                    whttp:methodDefault="GET">
             <fault ref="tns:Gone" whttp:code="410">
               <whttp:header name="Retry-After" type="xs:int" required="false"/>
             </fault>
             <operation ref="tns:get" whttp:location="items/{id}" whttp:ignoreUncited="true">
               <input whttp:contentEncoding="gzip"/>
             </operation>
           </binding>
           <service name="S" interface="tns:I">
             <endpoint name="E" binding="tns:B" address="http://example.org/"
                       whttp:authenticationScheme="basic"/>
           </service>"#,
    );
    let (set, diagnostics) = read_one(&text);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    let description = set.to_component();
    let binding = description.binding(&q("B")).unwrap();

    let view = binding.component_extensions(HTTP_NAMESPACE).unwrap();
    let http = downcast_extensions::<HttpBindingExtensions>(&view).unwrap();
    assert_eq!(http.method_default.as_deref(), Some("GET"));
    assert_eq!(http.query_parameter_separator_default(), "&");
    assert!(!http.uses_cookies());

    let fault_view = binding.binding_faults()[0]
        .component_extensions(HTTP_NAMESPACE)
        .unwrap();
    let fault = downcast_extensions::<HttpBindingFaultExtensions>(&fault_view).unwrap();
    assert_eq!(fault.code, Some(IntOrToken::Int(410)));
    assert_eq!(fault.headers[0].name, "Retry-After");
    assert_eq!(
        fault.headers[0].type_name,
        Some(QName::namespaced("http://www.w3.org/2001/XMLSchema", "int"))
    );
    assert_eq!(fault.headers[0].required, Some(false));

    let operation = binding.binding_operations()[0];
    let op_view = operation.component_extensions(HTTP_NAMESPACE).unwrap();
    let http_op = downcast_extensions::<HttpBindingOperationExtensions>(&op_view).unwrap();
    assert_eq!(http_op.location.as_deref(), Some("items/{id}"));
    assert!(http_op.ignore_uncited());
    assert_eq!(http_op.method, None);

    let input_view = operation.binding_message_references()[0]
        .component_extensions(HTTP_NAMESPACE)
        .unwrap();
    let input = downcast_extensions::<HttpBindingMessageReferenceExtensions>(&input_view).unwrap();
    assert_eq!(input.content_encoding.as_deref(), Some("gzip"));

    let endpoint = description.services()[0].endpoints()[0];
    let endpoint_view = endpoint.component_extensions(HTTP_NAMESPACE).unwrap();
    let http_endpoint = downcast_extensions::<HttpEndpointExtensions>(&endpoint_view).unwrap();
    assert_eq!(http_endpoint.authentication_scheme.as_deref(), Some("basic"));
    assert_eq!(http_endpoint.authentication_realm, None);
}

#[test]
fn test_rpc_signature_and_safety() {
    let text = description(
        NS,
        r#"<interface name="I" styleDefault="http://www.w3.org/2006/01/wsdl/style/rpc">
             <operation name="add" wsdlx:safe="true"
                        wrpc:signature="tns:a #in tns:b #in tns:sum #return">
               <input/><output/>
             </operation>
             <operation name="reset"/>
           </interface>"#,
    );
    let (set, diagnostics) = read_one(&text);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    let interface = set.to_component().interfaces()[0];
    let add = interface.interface_operation(&q("add")).unwrap();

    let rpc_view = add.component_extensions(RPC_NAMESPACE).unwrap();
    let rpc = downcast_extensions::<RpcInterfaceOperationExtensions>(&rpc_view).unwrap();
    let signature = rpc.signature().unwrap();
    assert_eq!(signature.len(), 3);
    assert_eq!(signature[0].name, q("a"));
    assert_eq!(signature[2].direction, ArgumentDirection::Return);

    let safe_view = add.component_extensions(WSDLX_NAMESPACE).unwrap();
    assert!(downcast_extensions::<InterfaceOperationExtensions>(&safe_view)
        .unwrap()
        .is_safety());

    let reset = interface.interface_operation(&q("reset")).unwrap();
    let reset_view = reset.component_extensions(WSDLX_NAMESPACE).unwrap();
    assert!(!downcast_extensions::<InterfaceOperationExtensions>(&reset_view)
        .unwrap()
        .is_safety());
    let reset_rpc = reset.component_extensions(RPC_NAMESPACE).unwrap();
    assert!(downcast_extensions::<RpcInterfaceOperationExtensions>(&reset_rpc)
        .unwrap()
        .signature()
        .is_none());
}

#[test]
fn test_invalid_typed_attribute_is_reported() {
    let text = description(
        NS,
        r#"<interface name="I"><operation name="op" wsdlx:safe="maybe"/></interface>"#,
    );
    let (set, diagnostics) = read_one(&text);
    assert_eq!(keys(&diagnostics), vec![k::INVALID_ATTRIBUTE_VALUE]);

    // the raw value is kept without a typed value
    let operation = &set.root_element().interfaces()[0].operations[0];
    let attribute = operation
        .extensions
        .attribute(&QName::namespaced(WSDLX_NAMESPACE, "safe"))
        .unwrap();
    assert_eq!(attribute.value, None);
}

#[test]
fn test_unregistered_attribute_is_kept_as_unknown() {
    let text = r#"<description xmlns="http://www.w3.org/2006/01/wsdl"
                     xmlns:acme="urn:acme" targetNamespace="urn:a">
                    <interface name="I" acme:owner="team-x"/>
                  </description>"#;
    let (set, diagnostics) = read_one(text);
    assert!(diagnostics.is_empty());
    let interface = &set.root_element().interfaces()[0];
    assert_eq!(
        interface.extensions().value("urn:acme", "owner"),
        Some(&AttributeValue::Unknown("team-x".to_string()))
    );
}

#[test]
fn test_unknown_element_without_default_deserializer() {
    let text = r#"<description xmlns="http://www.w3.org/2006/01/wsdl"
                     xmlns:acme="urn:acme" targetNamespace="urn:a">
                    <interface name="I"><acme:policy level="high"/></interface>
                  </description>"#;
    let (set, diagnostics) = read_one(text);
    assert_eq!(keys(&diagnostics), vec![k::NO_DESERIALIZER]);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert!(set.root_element().interfaces()[0].extensions.elements().is_empty());
}

#[test]
fn test_unknown_element_with_default_deserializer() {
    let mut registry = ExtensionRegistry::populated();
    registry.set_default_deserializer(Arc::new(UnknownDeserializer));
    let text = r#"<description xmlns="http://www.w3.org/2006/01/wsdl"
                     xmlns:acme="urn:acme" targetNamespace="urn:a">
                    <interface name="I"><acme:policy level="high" required="true"/></interface>
                  </description>"#;
    let (set, diagnostics) = read_with(
        Reader::new().with_extension_registry(Arc::new(registry)),
        &[("file:///w/main.wsdl", text)],
        "file:///w/main.wsdl",
    );
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);

    let extensions = &set.root_element().interfaces()[0].extensions;
    let unknown: Vec<&UnknownExtensionElement> = extensions.elements_as().collect();
    assert_eq!(unknown.len(), 1);
    assert_eq!(unknown[0].element_type, QName::namespaced("urn:acme", "policy"));
    assert_eq!(unknown[0].element.get_attribute("level"), Some("high"));
    // unqualified `required` is not wsdl:required
    assert_eq!(unknown[0].required, None);
    assert!(extensions.has_extensions_for_namespace("urn:acme"));
}

#[test]
fn test_no_registry_reports_every_extension() {
    let text = description(
        NS,
        r#"<interface name="I"/>
           <binding name="B" interface="tns:I" wsoap:version="1.2">
             <wsoap:module ref="urn:m"/>
           </binding>"#,
    );
    let (set, diagnostics) = read_with(
        Reader::new().without_extension_registry(),
        &[("file:///w/main.wsdl", &text)],
        "file:///w/main.wsdl",
    );
    assert_eq!(keys(&diagnostics), vec![k::NO_REGISTRY, k::NO_REGISTRY]);

    let binding = set.to_component().bindings()[0];
    assert!(binding.component_extensions(SOAP_NAMESPACE).is_none());
    let attribute = binding
        .to_element()
        .extensions
        .attribute(&QName::namespaced(SOAP_NAMESPACE, "version"))
        .unwrap();
    assert_eq!(attribute.raw, "1.2");
    assert_eq!(attribute.value, None);
}

#[derive(Debug)]
struct Retry {
    element_type: QName,
    attempts: u32,
}

impl ExtensionElement for Retry {
    fn element_type(&self) -> &QName {
        &self.element_type
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

struct RetryDeserializer;

impl ExtensionDeserializer for RetryDeserializer {
    fn unmarshall(
        &self,
        ctx: &ExtensionContext<'_>,
        element: &Element,
    ) -> Result<Arc<dyn ExtensionElement>> {
        assert_eq!(ctx.owner, OwnerKind::Endpoint);
        assert_eq!(
            ctx.ancestors,
            &[OwnerKind::Description, OwnerKind::Service, OwnerKind::Endpoint]
        );
        assert_eq!(ctx.target_namespace, Some(NS));
        let attempts = element
            .get_attribute("attempts")
            .ok_or_else(|| Error::Extension("attempts is required".into()))?
            .parse()
            .map_err(|_| Error::Extension("attempts must be a number".into()))?;
        Ok(Arc::new(Retry {
            element_type: element.qname.clone(),
            attempts,
        }))
    }
}

#[test]
fn test_custom_deserializer() {
    let mut registry = ExtensionRegistry::populated();
    registry.register_deserializer(
        OwnerKind::Endpoint,
        QName::namespaced("urn:retry", "retry"),
        Arc::new(RetryDeserializer),
    );
    registry.register_attribute_type(
        OwnerKind::Endpoint,
        QName::namespaced("urn:retry", "enabled"),
        AttributeType::Boolean,
    );
    let text = description(
        NS,
        r#"<interface name="I"/>
           <service name="S" interface="tns:I" xmlns:r="urn:retry">
             <endpoint name="Good" r:enabled="true"><r:retry attempts="3"/></endpoint>
             <endpoint name="Bad"><r:retry attempts="many"/></endpoint>
           </service>"#,
    );
    let (set, diagnostics) = read_with(
        Reader::new().with_extension_registry(Arc::new(registry)),
        &[("file:///w/main.wsdl", &text)],
        "file:///w/main.wsdl",
    );
    assert_eq!(keys(&diagnostics), vec![k::EXTENSION_FAILED]);

    let endpoints = &set.root_element().services()[0].endpoints;
    let retries: Vec<&Retry> = endpoints[0].extensions.elements_as().collect();
    assert_eq!(retries[0].attempts, 3);
    assert_eq!(
        endpoints[0].extensions.value("urn:retry", "enabled"),
        Some(&AttributeValue::Boolean(true))
    );
    assert!(endpoints[1].extensions.elements().is_empty());
}
