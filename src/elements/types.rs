//! `wsdl:types`

use std::sync::Arc;

use crate::diagnostics::SourcePosition;
use crate::extensions::Extensions;
use crate::namespaces::{QName, XSD_NAMESPACE};
use crate::schema::{ElementDeclaration, Schema, TypeDefinition};

use super::DocumentationElement;

/// A schema made available by `wsdl:types`
#[derive(Debug, Clone)]
pub enum SchemaEntry {
    /// `<xs:schema>` written inside `wsdl:types`
    Inlined(Arc<Schema>),
    /// `<xs:import>` inside `wsdl:types`
    Imported {
        /// `namespace`
        namespace: Option<String>,
        /// `schemaLocation`
        schema_location: Option<String>,
        /// The schema, when it could be retrieved
        schema: Option<Arc<Schema>>,
    },
    /// The XML Schema built-in types
    BuiltIn(Arc<Schema>),
}

impl SchemaEntry {
    /// The schema, if available
    pub fn schema(&self) -> Option<&Arc<Schema>> {
        match self {
            Self::Inlined(schema) | Self::BuiltIn(schema) => Some(schema),
            Self::Imported { schema, .. } => schema.as_ref(),
        }
    }

    /// Whether this is the built-in entry
    pub fn is_built_in(&self) -> bool {
        matches!(self, Self::BuiltIn(_))
    }
}

/// `wsdl:types`
#[derive(Debug, Clone)]
pub struct TypesElement {
    /// Type system URI
    pub type_system: String,
    /// Schemas in document order, the built-in entry last
    pub schemas: Vec<SchemaEntry>,
    /// Documentation children
    pub documentation: Vec<DocumentationElement>,
    /// Extension content
    pub extensions: Extensions,
    /// Source position
    pub position: Option<SourcePosition>,
}

impl_wsdl_element!(TypesElement);

impl TypesElement {
    /// Create an empty types element using XML Schema
    pub fn new() -> Self {
        Self {
            type_system: XSD_NAMESPACE.to_string(),
            schemas: Vec::new(),
            documentation: Vec::new(),
            extensions: Extensions::new(),
            position: None,
        }
    }

    /// Add a schema entry
    pub fn add_schema(&mut self, entry: SchemaEntry) {
        self.schemas.push(entry);
    }

    /// Whether the built-in entry is present
    pub fn has_built_in(&self) -> bool {
        self.schemas.iter().any(SchemaEntry::is_built_in)
    }

    /// Available schemas with the given target namespace
    pub fn schemas_for_namespace<'a>(
        &'a self,
        namespace: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Arc<Schema>> + 'a {
        self.schemas
            .iter()
            .filter_map(SchemaEntry::schema)
            .filter(move |s| s.target_namespace() == namespace)
    }

    /// Find a global element declaration in any available schema
    pub fn element_declaration(&self, name: &QName) -> Option<&ElementDeclaration> {
        self.schemas
            .iter()
            .filter_map(SchemaEntry::schema)
            .find_map(|s| s.element_declaration(name))
    }

    /// Find a type definition in any available schema
    pub fn type_definition(&self, name: &QName) -> Option<&TypeDefinition> {
        self.schemas
            .iter()
            .filter_map(SchemaEntry::schema)
            .find_map(|s| s.type_definition(name))
    }
}

impl Default for TypesElement {
    fn default() -> Self {
        Self::new()
    }
}
