//! The Description component and flattening

use std::fmt;

use indexmap::IndexMap;

use crate::elements::DescriptionElement;
use crate::model::{DescriptionSet, DocId};
use crate::namespaces::QName;
use crate::schema::{ElementDeclaration, TypeDefinition};

use super::binding::same_binding;
use super::interface::same_interface;
use super::service::same_service;
use super::{Binding, ComponentKey, Interface, Service};

/// Flattened component lists of one description
#[derive(Debug, Default)]
pub(crate) struct FlatComponents {
    pub(crate) scope: Vec<DocId>,
    pub(crate) interfaces: Vec<ComponentKey>,
    pub(crate) bindings: Vec<ComponentKey>,
    pub(crate) services: Vec<ComponentKey>,
    pub(crate) element_declarations: IndexMap<QName, ElementDeclaration>,
    pub(crate) type_definitions: IndexMap<QName, TypeDefinition>,
}

/// Documents reachable from `start` through includes, `start` first
fn include_closure(set: &DescriptionSet, start: DocId) -> Vec<DocId> {
    let mut seen = vec![start];
    let mut stack = vec![start];
    while let Some(doc) = stack.pop() {
        for include in set.element(doc).includes() {
            if let Some(target) = include.description {
                if !seen.contains(&target) {
                    seen.push(target);
                    stack.push(target);
                }
            }
        }
    }
    seen
}

/// Documents whose components are visible from `doc`
///
/// The include closure of `doc`, then for every direct import of a document
/// in that closure the imported document and its own include closure.
/// Imports of imported documents are not followed.
fn scope_of(set: &DescriptionSet, doc: DocId) -> Vec<DocId> {
    let includes = include_closure(set, doc);
    let mut scope = includes.clone();
    for &included in &includes {
        for import in set.element(included).imports() {
            let Some(target) = import.description else {
                continue;
            };
            for reached in include_closure(set, target) {
                if !scope.contains(&reached) {
                    scope.push(reached);
                }
            }
        }
    }
    scope
}

fn flatten(set: &DescriptionSet, doc: DocId) -> FlatComponents {
    let scope = scope_of(set, doc);
    log::debug!(
        "flattening {} over {} document(s)",
        set.element(doc).document_base_uri(),
        scope.len()
    );

    let mut flat = FlatComponents::default();
    for &member in &scope {
        let element = set.element(member);

        for index in 0..element.interfaces().len() {
            let key = ComponentKey { doc: member, index };
            if !flat.interfaces.iter().any(|k| same_interface(set, *k, key)) {
                flat.interfaces.push(key);
            }
        }
        for index in 0..element.bindings().len() {
            let key = ComponentKey { doc: member, index };
            if !flat.bindings.iter().any(|k| same_binding(set, *k, key)) {
                flat.bindings.push(key);
            }
        }
        for index in 0..element.services().len() {
            let key = ComponentKey { doc: member, index };
            if !flat.services.iter().any(|k| same_service(set, *k, key)) {
                flat.services.push(key);
            }
        }

        let schemas = element
            .types_element()
            .into_iter()
            .flat_map(|types| types.schemas.iter())
            .filter_map(|entry| entry.schema());
        for schema in schemas {
            for decl in schema.element_declarations() {
                flat.element_declarations
                    .entry(decl.name.clone())
                    .or_insert_with(|| decl.clone());
            }
            for def in schema.type_definitions() {
                flat.type_definitions
                    .entry(def.name.clone())
                    .or_insert_with(|| def.clone());
            }
        }
    }
    flat.scope = scope;
    flat
}

/// The Description component: everything visible from one document
#[derive(Clone, Copy)]
pub struct Description<'a> {
    set: &'a DescriptionSet,
    doc: DocId,
}

impl<'a> Description<'a> {
    pub(crate) fn new(set: &'a DescriptionSet, doc: DocId) -> Self {
        Self { set, doc }
    }

    /// The set this description belongs to
    pub fn set(&self) -> &'a DescriptionSet {
        self.set
    }

    /// Id of the underlying document
    pub fn doc_id(&self) -> DocId {
        self.doc
    }

    /// The element this component was built from
    pub fn to_element(&self) -> &'a DescriptionElement {
        self.set.element(self.doc)
    }

    /// Target namespace of the underlying document
    pub fn target_namespace(&self) -> Option<&'a str> {
        self.to_element().target_namespace()
    }

    fn flat(&self) -> &'a FlatComponents {
        self.set.component_caches[self.doc.0].get_or_init(|| flatten(self.set, self.doc))
    }

    /// Documents whose components this description sees, itself first
    pub fn documents_in_scope(&self) -> &'a [DocId] {
        &self.flat().scope
    }

    /// `{interfaces}`
    pub fn interfaces(&self) -> Vec<Interface<'a>> {
        self.flat()
            .interfaces
            .iter()
            .map(|key| Interface::new(*self, *key))
            .collect()
    }

    /// Find an interface by qualified name
    pub fn interface(&self, name: &QName) -> Option<Interface<'a>> {
        self.interfaces()
            .into_iter()
            .find(|i| i.name().as_ref() == Some(name))
    }

    /// `{bindings}`
    pub fn bindings(&self) -> Vec<Binding<'a>> {
        self.flat()
            .bindings
            .iter()
            .map(|key| Binding::new(*self, *key))
            .collect()
    }

    /// Find a binding by qualified name
    pub fn binding(&self, name: &QName) -> Option<Binding<'a>> {
        self.bindings()
            .into_iter()
            .find(|b| b.name().as_ref() == Some(name))
    }

    /// `{services}`
    pub fn services(&self) -> Vec<Service<'a>> {
        self.flat()
            .services
            .iter()
            .map(|key| Service::new(*self, *key))
            .collect()
    }

    /// Find a service by qualified name
    pub fn service(&self, name: &QName) -> Option<Service<'a>> {
        self.services()
            .into_iter()
            .find(|s| s.name().as_ref() == Some(name))
    }

    /// `{element declarations}`
    pub fn element_declarations(&self) -> Vec<&'a ElementDeclaration> {
        self.flat().element_declarations.values().collect()
    }

    /// Find an element declaration by qualified name
    pub fn element_declaration(&self, name: &QName) -> Option<&'a ElementDeclaration> {
        self.flat().element_declarations.get(name)
    }

    /// `{type definitions}`, the XML Schema built-ins included
    pub fn type_definitions(&self) -> Vec<&'a TypeDefinition> {
        self.flat().type_definitions.values().collect()
    }

    /// Find a type definition by qualified name
    pub fn type_definition(&self, name: &QName) -> Option<&'a TypeDefinition> {
        self.flat().type_definitions.get(name)
    }
}

impl PartialEq for Description<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.set, other.set) && self.doc == other.doc
    }
}

impl Eq for Description<'_> {}

impl fmt::Debug for Description<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Description")
            .field("doc", &self.doc)
            .field("uri", &self.to_element().document_base_uri())
            .finish()
    }
}
