//! Reading documents: imports, includes, types and error reporting

mod common;

use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use common::{description, keys, read, read_one, read_with};
use wsdl2::catalog::XmlCatalog;
use wsdl2::diagnostics::{keys as k, CollectingErrorHandler, FailFastErrorHandler, Severity};
use wsdl2::limits::Limits;
use wsdl2::namespaces::{QName, XSD_NAMESPACE};
use wsdl2::{Error, Reader};

fn interface_names(set: &wsdl2::DescriptionSet) -> Vec<String> {
    let mut names: Vec<String> = set
        .to_component()
        .interfaces()
        .iter()
        .filter_map(|i| i.name())
        .map(|n| n.local_name.clone())
        .collect();
    names.sort();
    names
}

#[test]
fn test_empty_description() {
    let (set, diagnostics) = read_one(&description("http://example.org", ""));
    assert!(diagnostics.is_empty());

    let component = set.to_component();
    assert!(component.interfaces().is_empty());
    assert!(component.bindings().is_empty());
    assert!(component.services().is_empty());
    assert_eq!(component.target_namespace(), Some("http://example.org"));

    let types = set.root_element().types_element().unwrap();
    assert_eq!(types.type_system, XSD_NAMESPACE);
    assert!(types.has_built_in());
    assert!(component
        .type_definition(&QName::namespaced(XSD_NAMESPACE, "string"))
        .is_some());
}

#[test]
fn test_unexpected_root_is_fatal() {
    let mut reader = Reader::new();
    let result = reader.read_str("<definitions xmlns='urn:wsdl11'/>", "file:///w/old.wsdl");
    assert!(matches!(result, Err(Error::Parse(_))));
    assert_eq!(reader.diagnostics().len(), 1);
    assert_eq!(reader.diagnostics()[0].severity, Severity::FatalError);
    assert_eq!(reader.diagnostics()[0].key, k::UNEXPECTED_ROOT);
}

#[test]
fn test_import_cycle_terminates() {
    let a = description(
        "urn:a",
        r#"<import namespace="urn:b" location="b.wsdl"/><interface name="A"/>"#,
    );
    let b = description(
        "urn:b",
        r#"<import namespace="urn:a" location="a.wsdl"/><interface name="B"/>"#,
    );
    let (set, diagnostics) = read(
        &[("file:///w/a.wsdl", &a), ("file:///w/b.wsdl", &b)],
        "file:///w/a.wsdl",
    );
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    assert_eq!(set.len(), 2);

    // b's import of a points back at the root document
    let b_id = set.document("file:///w/b.wsdl").unwrap();
    let b_element = set.description_element(b_id).unwrap();
    assert_eq!(b_element.imports()[0].description, Some(set.root()));

    assert_eq!(interface_names(&set), vec!["A", "B"]);
}

#[test]
fn test_include_cycle_terminates() {
    let a = description("urn:a", r#"<include location="b.wsdl"/><interface name="A"/>"#);
    let b = description("urn:a", r#"<include location="a.wsdl"/><interface name="B"/>"#);
    let (set, diagnostics) = read(
        &[("file:///w/a.wsdl", &a), ("file:///w/b.wsdl", &b)],
        "file:///w/a.wsdl",
    );
    assert!(diagnostics.is_empty());
    assert_eq!(set.len(), 2);
    assert_eq!(interface_names(&set), vec!["A", "B"]);
}

#[test]
fn test_self_reference_terminates() {
    let plain = description("urn:a", r#"<interface name="A"/>"#);
    let cyclic = description(
        "urn:a",
        r#"<include location="a.wsdl"/>
           <import namespace="urn:a" location="a.wsdl"/>
           <interface name="A"/>"#,
    );
    let (plain_set, _) = read(&[("file:///w/a.wsdl", &plain)], "file:///w/a.wsdl");
    let (set, diagnostics) = read(&[("file:///w/a.wsdl", &cyclic)], "file:///w/a.wsdl");
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);

    assert_eq!(set.len(), 1);
    let root = set.root_element();
    assert_eq!(root.includes()[0].description, Some(set.root()));
    assert_eq!(root.imports()[0].description, Some(set.root()));
    assert_eq!(
        set.to_component().interfaces().len(),
        plain_set.to_component().interfaces().len()
    );
}

#[test]
fn test_path_base_uri_is_the_document_identity() {
    let text = description(
        "urn:a",
        r#"<include location="a.wsdl"/><interface name="A"/>"#,
    );
    // nothing to fetch: the self-include must hit the visited map
    let mut reader = Reader::new().with_fetcher(Box::new(common::loader(&[])));
    let set = reader.read_str(&text, "/w/a.wsdl").unwrap();

    assert!(reader.diagnostics().is_empty(), "{:?}", reader.diagnostics());
    assert_eq!(set.len(), 1);
    assert_eq!(set.document("file:///w/a.wsdl"), Some(set.root()));
    assert_eq!(set.root_element().includes()[0].description, Some(set.root()));
    assert_eq!(interface_names(&set), vec!["A"]);
}

#[test]
fn test_same_name_resolves_to_first_processed() {
    let a = description(
        "urn:a",
        r#"<include location="b.wsdl"/>
           <include location="c.wsdl"/>
           <interface name="Derived" extends="tns:Shared"/>"#,
    );
    let b = description(
        "urn:a",
        r#"<interface name="Shared"><operation name="fromB"/></interface>"#,
    );
    let c = description(
        "urn:a",
        r#"<interface name="Shared"><operation name="fromC"/></interface>"#,
    );
    let (set, _) = read(
        &[
            ("file:///w/a.wsdl", &a),
            ("file:///w/b.wsdl", &b),
            ("file:///w/c.wsdl", &c),
        ],
        "file:///w/a.wsdl",
    );
    let description = set.to_component();
    let shared = QName::namespaced("urn:a", "Shared");
    let from_b = set.document("file:///w/b.wsdl").unwrap();

    let found = description.interface(&shared).unwrap();
    assert_eq!(found.key().doc(), from_b);

    let derived = description
        .interface(&QName::namespaced("urn:a", "Derived"))
        .unwrap();
    let extended = derived.extended_interfaces();
    assert_eq!(extended.len(), 1);
    assert_eq!(extended[0].key().doc(), from_b);
    let operation = QName::namespaced("urn:a", "fromB");
    assert!(derived.in_scope_interface_operation(&operation).is_some());
    assert!(derived
        .in_scope_interface_operation(&QName::namespaced("urn:a", "fromC"))
        .is_none());
}

#[test]
fn test_import_is_not_transitive() {
    let a = description("urn:a", r#"<import namespace="urn:b" location="b.wsdl"/>"#);
    let b = description(
        "urn:b",
        r#"<import namespace="urn:c" location="c.wsdl"/><interface name="B"/>"#,
    );
    let c = description("urn:c", r#"<interface name="C"/>"#);
    let (set, _) = read(
        &[
            ("file:///w/a.wsdl", &a),
            ("file:///w/b.wsdl", &b),
            ("file:///w/c.wsdl", &c),
        ],
        "file:///w/a.wsdl",
    );
    assert_eq!(set.len(), 3);
    assert_eq!(interface_names(&set), vec!["B"]);

    // From b's own point of view, c is visible
    let b_id = set.document("file:///w/b.wsdl").unwrap();
    let b_view = set.description(b_id).unwrap();
    assert_eq!(b_view.interfaces().len(), 2);
}

#[test]
fn test_include_is_transitive() {
    let a = description("urn:a", r#"<include location="b.wsdl"/>"#);
    let b = description("urn:a", r#"<include location="c.wsdl"/><interface name="B"/>"#);
    let c = description("urn:a", r#"<interface name="C"/>"#);
    let (set, _) = read(
        &[
            ("file:///w/a.wsdl", &a),
            ("file:///w/b.wsdl", &b),
            ("file:///w/c.wsdl", &c),
        ],
        "file:///w/a.wsdl",
    );
    assert_eq!(interface_names(&set), vec!["B", "C"]);
}

#[test]
fn test_import_reached_through_include() {
    let a = description("urn:a", r#"<include location="b.wsdl"/>"#);
    let b = description("urn:a", r#"<import namespace="urn:c" location="c.wsdl"/>"#);
    let c = description("urn:c", r#"<include location="d.wsdl"/><interface name="C"/>"#);
    let d = description("urn:c", r#"<interface name="D"/>"#);
    let (set, _) = read(
        &[
            ("file:///w/a.wsdl", &a),
            ("file:///w/b.wsdl", &b),
            ("file:///w/c.wsdl", &c),
            ("file:///w/d.wsdl", &d),
        ],
        "file:///w/a.wsdl",
    );
    assert_eq!(interface_names(&set), vec!["C", "D"]);
}

#[test]
fn test_shared_include_is_deduplicated() {
    let a = description(
        "urn:a",
        r#"<include location="b.wsdl"/><include location="c.wsdl"/><include location="b.wsdl"/>"#,
    );
    let b = description("urn:a", r#"<include location="d.wsdl"/>"#);
    let c = description("urn:a", r#"<include location="d.wsdl"/>"#);
    let d = description("urn:a", r#"<interface name="D"><operation name="op"/></interface>"#);
    let (set, _) = read(
        &[
            ("file:///w/a.wsdl", &a),
            ("file:///w/b.wsdl", &b),
            ("file:///w/c.wsdl", &c),
            ("file:///w/d.wsdl", &d),
        ],
        "file:///w/a.wsdl",
    );
    assert_eq!(set.len(), 4);
    let first = set.to_component().interfaces();
    let second = set.to_component().interfaces();
    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
}

#[test]
fn test_missing_import_is_a_warning() {
    let text = description(
        "urn:a",
        r#"<import namespace="urn:b" location="missing.wsdl"/><interface name="A"/>"#,
    );
    let (set, diagnostics) = read_one(&text);
    assert_eq!(keys(&diagnostics), vec![k::DOCUMENT_UNAVAILABLE]);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(set.root_element().imports()[0].description, None);
    assert_eq!(interface_names(&set), vec!["A"]);
}

#[test]
fn test_referenced_root_missing() {
    let a = description("urn:a", r#"<include location="b.xml"/>"#);
    let (set, diagnostics) = read(
        &[("file:///w/a.wsdl", &a), ("file:///w/b.xml", "<notes/>")],
        "file:///w/a.wsdl",
    );
    assert_eq!(keys(&diagnostics), vec![k::REFERENCED_ROOT_MISSING]);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(set.len(), 1);
}

#[test]
fn test_invalid_values_are_reported_and_skipped() {
    let text = description(
        "urn:a",
        r#"<interface name="1bad"/>
           <binding name="B" interface="nope:I"/>
           <service name="S"><endpoint name="E" address="http://bad host/"/></service>"#,
    );
    let (set, diagnostics) = read_one(&text);
    assert_eq!(
        keys(&diagnostics),
        vec![k::INVALID_NCNAME, k::UNRESOLVED_PREFIX, k::MALFORMED_URI]
    );
    assert!(diagnostics.iter().all(|d| d.severity == Severity::Error));

    let root = set.root_element();
    assert!(root.interfaces()[0].name.is_none());
    assert!(root.bindings()[0].interface.is_none());
    assert!(root.services()[0].endpoints[0].address.is_none());
}

#[test]
fn test_diagnostics_carry_position() {
    let text = "<description xmlns='http://www.w3.org/2006/01/wsdl' targetNamespace='urn:a'>\n  <interface name='9'/>\n</description>";
    let (_, diagnostics) = read_one(text);
    let position = diagnostics[0].position.unwrap();
    assert_eq!(position.line, 2);
    assert_eq!(diagnostics[0].document.as_deref(), Some("file:///w/main.wsdl"));
}

#[test]
fn test_unexpected_wsdl_element_is_a_warning() {
    let text = description("urn:a", r#"<message name="legacy"/><interface name="I"/>"#);
    let (set, diagnostics) = read_one(&text);
    assert_eq!(keys(&diagnostics), vec![k::UNEXPECTED_ELEMENT]);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(interface_names(&set), vec!["I"]);
}

#[test]
fn test_inline_schema_declarations() {
    let text = description(
        "urn:a",
        r#"<types>
             <xs:schema targetNamespace="urn:a">
               <xs:element name="request" type="xs:string"/>
               <xs:complexType name="Payload"/>
             </xs:schema>
           </types>
           <types>
             <xs:schema targetNamespace="urn:a">
               <xs:element name="response" type="xs:int"/>
             </xs:schema>
           </types>
           <interface name="I">
             <operation name="op">
               <input element="tns:request"/>
               <output element="tns:response"/>
             </operation>
           </interface>"#,
    );
    let (set, diagnostics) = read_one(&text);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);

    // both wsdl:types merge into one
    let types = set.root_element().types_element().unwrap();
    assert_eq!(types.schemas.len(), 3);

    let component = set.to_component();
    assert_eq!(component.element_declarations().len(), 2);
    assert!(component
        .type_definition(&QName::namespaced("urn:a", "Payload"))
        .is_some());

    let operation = component.interfaces()[0].interface_operations()[0];
    for message in operation.interface_message_references() {
        assert!(message.element_declaration().is_some());
    }
}

#[test]
fn test_imported_schema_is_cached() {
    let schema = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:s">
                      <xs:element name="data"/>
                    </xs:schema>"#;
    let text = description(
        "urn:a",
        r#"<types><xs:import namespace="urn:s" schemaLocation="s.xsd"/></types>"#,
    );
    let docs = [("file:///w/main.wsdl", text.as_str()), ("file:///w/s.xsd", schema)];

    let mut reader = Reader::new().with_fetcher(Box::new(common::loader(&docs)));
    let set = reader.read_uri("file:///w/main.wsdl").unwrap();
    assert_eq!(reader.cached_schemas(), 1);
    assert!(set
        .to_component()
        .element_declaration(&QName::namespaced("urn:s", "data"))
        .is_some());

    reader.read_uri("file:///w/main.wsdl").unwrap();
    assert_eq!(reader.cached_schemas(), 1);
    reader.clear_schema_cache();
    assert_eq!(reader.cached_schemas(), 0);
}

#[test]
fn test_missing_schema_is_a_warning() {
    let text = description(
        "urn:a",
        r#"<types><xs:import namespace="urn:s" schemaLocation="nowhere.xsd"/></types>"#,
    );
    let (_, diagnostics) = read_one(&text);
    assert_eq!(keys(&diagnostics), vec![k::SCHEMA_UNAVAILABLE]);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
}

#[test]
fn test_catalog_remaps_locations() {
    let a = description(
        "urn:a",
        r#"<import namespace="urn:b" location="http://example.org/remote/b.wsdl"/>"#,
    );
    let b = description("urn:b", r#"<interface name="B"/>"#);

    let mut catalog = XmlCatalog::new();
    catalog.add_system("http://example.org/remote/b.wsdl", "file:///mirror/b.wsdl");

    let (set, diagnostics) = read_with(
        Reader::new().with_catalog(catalog),
        &[("file:///w/a.wsdl", &a), ("file:///mirror/b.wsdl", &b)],
        "file:///w/a.wsdl",
    );
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    assert!(set.document("file:///mirror/b.wsdl").is_some());
    assert_eq!(interface_names(&set), vec!["B"]);
}

#[test]
fn test_import_depth_limit() {
    let a = description("urn:a", r#"<include location="b.wsdl"/>"#);
    let b = description("urn:a", r#"<include location="c.wsdl"/>"#);
    let c = description("urn:a", r#"<interface name="C"/>"#);
    let limits = Limits {
        max_import_depth: 1,
        ..Limits::default()
    };
    let (set, diagnostics) = read_with(
        Reader::new().with_limits(limits),
        &[
            ("file:///w/a.wsdl", &a),
            ("file:///w/b.wsdl", &b),
            ("file:///w/c.wsdl", &c),
        ],
        "file:///w/a.wsdl",
    );
    assert_eq!(keys(&diagnostics), vec![k::LIMIT_EXCEEDED]);
    assert_eq!(set.len(), 2);
}

#[test]
fn test_collecting_handler_sees_diagnostics() {
    let handler = CollectingErrorHandler::new();
    let mut reader = Reader::new().with_error_handler(Box::new(handler.clone()));
    reader
        .read_str(
            &description("urn:a", r#"<interface name="-x"/>"#),
            "file:///w/main.wsdl",
        )
        .unwrap();
    assert_eq!(handler.diagnostics().len(), 1);
    assert_eq!(handler.diagnostics()[0].key, k::INVALID_NCNAME);
}

#[test]
fn test_fail_fast_handler_aborts() {
    let mut reader = Reader::new().with_error_handler(Box::new(FailFastErrorHandler));
    let result = reader.read_str(
        &description("urn:a", r#"<interface name="-x"/>"#),
        "file:///w/main.wsdl",
    );
    assert!(matches!(result, Err(Error::Aborted(_))));
}

#[test]
fn test_read_from_disk_with_relative_include() {
    let dir = TempDir::new().unwrap();
    let mut main = std::fs::File::create(dir.path().join("main.wsdl")).unwrap();
    write!(main, "{}", description("urn:a", r#"<include location="parts/more.wsdl"/>"#)).unwrap();
    std::fs::create_dir(dir.path().join("parts")).unwrap();
    std::fs::write(
        dir.path().join("parts/more.wsdl"),
        description("urn:a", r#"<interface name="FromDisk"/>"#),
    )
    .unwrap();

    let mut reader = Reader::new();
    let set = reader
        .read_uri(dir.path().join("main.wsdl").to_str().unwrap())
        .unwrap();
    assert!(reader.diagnostics().is_empty(), "{:?}", reader.diagnostics());
    assert_eq!(set.len(), 2);
    assert_eq!(interface_names(&set), vec!["FromDisk"]);
}

#[test]
fn test_read_element_without_fetching() {
    let document = wsdl2::documents::Document::from_string(&description(
        "urn:a",
        r#"<interface name="I"/>"#,
    ))
    .unwrap();
    let mut reader = Reader::new();
    let set = reader
        .read_element(document.root(), "urn:in-memory")
        .unwrap();
    assert_eq!(set.root_element().document_base_uri(), "urn:in-memory");
    assert_eq!(interface_names(&set), vec!["I"]);
}
