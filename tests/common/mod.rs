//! Shared fixtures for the integration tests

#![allow(dead_code)]

use wsdl2::diagnostics::Diagnostic;
use wsdl2::loaders::Loader;
use wsdl2::{DescriptionSet, Reader};

pub const WSDL_NS: &str = "http://www.w3.org/2006/01/wsdl";

/// Wrap `body` in a `wsdl:description` with the usual namespace declarations
pub fn description(target_namespace: &str, body: &str) -> String {
    format!(
        r#"<description xmlns="http://www.w3.org/2006/01/wsdl"
             xmlns:wsdl="http://www.w3.org/2006/01/wsdl"
             xmlns:tns="{tns}"
             xmlns:xs="http://www.w3.org/2001/XMLSchema"
             xmlns:wsoap="http://www.w3.org/2006/01/wsdl/soap"
             xmlns:whttp="http://www.w3.org/2006/01/wsdl/http"
             xmlns:wrpc="http://www.w3.org/2006/01/wsdl/rpc"
             xmlns:wsdlx="http://www.w3.org/2006/01/wsdl-extensions"
             targetNamespace="{tns}">
{body}
</description>"#,
        tns = target_namespace,
        body = body
    )
}

/// A loader serving every `(uri, text)` pair from memory
pub fn loader(documents: &[(&str, &str)]) -> Loader {
    documents
        .iter()
        .fold(Loader::new(), |loader, (uri, text)| loader.with_document(*uri, *text))
}

/// Read `root` with a default reader over in-memory documents
pub fn read(documents: &[(&str, &str)], root: &str) -> (DescriptionSet, Vec<Diagnostic>) {
    read_with(Reader::new(), documents, root)
}

/// Read `root` with `reader` over in-memory documents
pub fn read_with(
    reader: Reader,
    documents: &[(&str, &str)],
    root: &str,
) -> (DescriptionSet, Vec<Diagnostic>) {
    let mut reader = reader.with_fetcher(Box::new(loader(documents)));
    let set = reader.read_uri(root).unwrap();
    let diagnostics = reader.diagnostics().to_vec();
    (set, diagnostics)
}

/// Read a single document given as text
pub fn read_one(text: &str) -> (DescriptionSet, Vec<Diagnostic>) {
    read(&[("file:///w/main.wsdl", text)], "file:///w/main.wsdl")
}

/// Message keys of `diagnostics`, in report order
pub fn keys(diagnostics: &[Diagnostic]) -> Vec<&'static str> {
    diagnostics.iter().map(|d| d.key).collect()
}
