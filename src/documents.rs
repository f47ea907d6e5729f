//! XML document handling
//!
//! An owned, namespace-resolved element tree built from `roxmltree`. Every
//! element keeps its in-scope namespace mappings (needed to resolve QName
//! values found in attribute and text content) and its position in the
//! source text.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::diagnostics::SourcePosition;
use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::namespaces::{NamespaceContext, QName};

/// XML Element in the document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element qualified name
    pub qname: QName,
    /// Element attributes, namespace declarations excluded
    pub attributes: IndexMap<QName, String>,
    /// Direct text content, if it is not only whitespace
    pub text: Option<String>,
    /// Child elements
    pub children: Vec<Element>,
    /// Namespace mappings in scope at this element
    pub namespaces: Arc<NamespaceContext>,
    /// Position of the start tag
    pub position: Option<SourcePosition>,
}

impl Element {
    /// Create a new element
    pub fn new(qname: QName) -> Self {
        Self {
            qname,
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
            namespaces: Arc::new(NamespaceContext::new()),
            position: None,
        }
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.qname.local_name
    }

    /// Get the namespace of the element
    pub fn namespace(&self) -> Option<&str> {
        self.qname.namespace.as_deref()
    }

    /// Check the element's qualified name
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.qname.is(namespace, local_name)
    }

    /// Get an unqualified attribute value by local name
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(qname, _)| qname.namespace.is_none() && qname.local_name == name)
            .map(|(_, value)| value.as_str())
    }

    /// Get an attribute value by qualified name
    pub fn get_attribute_qname(&self, qname: &QName) -> Option<&str> {
        self.attributes.get(qname).map(|s| s.as_str())
    }

    /// Set or replace an attribute
    pub fn set_attribute(&mut self, qname: QName, value: impl Into<String>) {
        self.attributes.insert(qname, value.into());
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Set text content
    pub fn set_text(&mut self, text: String) {
        self.text = Some(text);
    }

    /// Direct text content with surrounding whitespace removed
    pub fn trimmed_text(&self) -> Option<&str> {
        self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// Find child elements by local name
    pub fn find_children(&self, local_name: &str) -> Vec<&Element> {
        self.children
            .iter()
            .filter(|e| e.local_name() == local_name)
            .collect()
    }

    /// Find child elements by qualified name
    pub fn children_named<'a>(
        &'a self,
        namespace: &'a str,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter(move |e| e.is(namespace, local_name))
    }
}

/// XML Document representation
#[derive(Debug, Clone)]
pub struct Document {
    /// Root element of the document
    pub root: Element,
}

impl Document {
    /// Parse an XML document from a string
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse_with_limits(xml, &Limits::default())
    }

    /// Parse an XML document from bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(xml)
            .map_err(|e| Error::Xml(format!("Document is not valid UTF-8: {}", e)))?;
        Self::from_string(text)
    }

    /// Parse an XML document, enforcing size and depth limits
    pub fn parse_with_limits(xml: &str, limits: &Limits) -> Result<Self> {
        limits.check_document_size(xml.len())?;
        let doc = roxmltree::Document::parse(xml)?;
        let root = build_element(&doc, doc.root_element(), None, 1, limits)?;
        Ok(Self { root })
    }

    /// Get the root element
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Get the root element mutably
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }
}

fn build_element(
    doc: &roxmltree::Document<'_>,
    node: roxmltree::Node<'_, '_>,
    parent_namespaces: Option<&Arc<NamespaceContext>>,
    depth: usize,
    limits: &Limits,
) -> Result<Element> {
    limits.check_xml_depth(depth)?;

    let tag = node.tag_name();
    let mut element = Element::new(QName::new(tag.namespace(), tag.name()));

    let mut context = NamespaceContext::new();
    for ns in node.namespaces() {
        match ns.name() {
            Some(prefix) => context.add_prefix(prefix, ns.uri()),
            None => context.set_default_namespace(ns.uri()),
        }
    }
    element.namespaces = match parent_namespaces {
        Some(parent) if **parent == context => Arc::clone(parent),
        _ => Arc::new(context),
    };

    let attributes: Vec<_> = node.attributes().collect();
    limits.check_attributes(attributes.len())?;
    for attr in attributes {
        element
            .attributes
            .insert(QName::new(attr.namespace(), attr.name()), attr.value().to_string());
    }

    let pos = doc.text_pos_at(node.range().start);
    element.position = Some(SourcePosition::new(pos.row, pos.col));

    let mut text = String::new();
    for child in node.children() {
        if child.is_element() {
            let child_element =
                build_element(doc, child, Some(&element.namespaces), depth + 1, limits)?;
            element.children.push(child_element);
        } else if child.is_text() {
            if let Some(t) = child.text() {
                text.push_str(t);
            }
        }
    }
    if !text.trim().is_empty() {
        element.text = Some(text);
    }

    Ok(element)
}
