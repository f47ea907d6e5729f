//! Schema provider
//!
//! `wsdl:types` content is treated as a black box that only has to answer one
//! question: which global element declarations and type definitions exist,
//! by qualified name. [`Schema::from_element`] extracts exactly that from an
//! `xs:schema` element; the XML Schema built-in types are available as
//! [`Schema::builtins`].

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use serde::Serialize;

use crate::documents::Element;
use crate::error::{Error, ParseError, Result};
use crate::namespaces::{QName, XSD_NAMESPACE};

/// Names of the XML Schema 1.0 built-in types
const BUILTIN_TYPES: &[&str] = &[
    "anyType",
    "anySimpleType",
    "string",
    "boolean",
    "decimal",
    "float",
    "double",
    "duration",
    "dateTime",
    "time",
    "date",
    "gYearMonth",
    "gYear",
    "gMonthDay",
    "gDay",
    "gMonth",
    "hexBinary",
    "base64Binary",
    "anyURI",
    "QName",
    "NOTATION",
    "normalizedString",
    "token",
    "language",
    "NMTOKEN",
    "NMTOKENS",
    "Name",
    "NCName",
    "ID",
    "IDREF",
    "IDREFS",
    "ENTITY",
    "ENTITIES",
    "integer",
    "nonPositiveInteger",
    "negativeInteger",
    "long",
    "int",
    "short",
    "byte",
    "nonNegativeInteger",
    "unsignedLong",
    "unsignedInt",
    "unsignedShort",
    "unsignedByte",
    "positiveInteger",
];

lazy_static! {
    static ref BUILTINS: Arc<Schema> = Arc::new(Schema::builtin_schema());
}

/// Kind of a type definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TypeKind {
    /// `xs:simpleType`
    Simple,
    /// `xs:complexType`
    Complex,
    /// an XML Schema built-in type
    BuiltIn,
}

/// A global element declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementDeclaration {
    /// Qualified name
    pub name: QName,
    /// `type` attribute, if the declaration names one
    pub type_name: Option<QName>,
    /// Type system the declaration belongs to
    pub system: String,
}

/// A global type definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDefinition {
    /// Qualified name
    pub name: QName,
    /// Simple, complex or built-in
    pub kind: TypeKind,
    /// Type system the definition belongs to
    pub system: String,
}

/// The global declarations of one XML Schema document
#[derive(Debug, Clone, Default)]
pub struct Schema {
    target_namespace: Option<String>,
    location: Option<String>,
    element_declarations: IndexMap<QName, ElementDeclaration>,
    type_definitions: IndexMap<QName, TypeDefinition>,
}

impl Schema {
    /// Extract the global declarations of an `xs:schema` element
    pub fn from_element(element: &Element, location: Option<&str>) -> Result<Self> {
        if !element.is(XSD_NAMESPACE, "schema") {
            return Err(Error::Parse(ParseError::new(format!(
                "Expected xs:schema, found {}",
                element.qname
            ))));
        }

        let target_namespace = element
            .get_attribute("targetNamespace")
            .map(|ns| ns.trim().to_string())
            .filter(|ns| !ns.is_empty());
        let mut schema = Self {
            target_namespace: target_namespace.clone(),
            location: location.map(str::to_string),
            ..Self::default()
        };

        for child in &element.children {
            if child.namespace() != Some(XSD_NAMESPACE) {
                continue;
            }
            let Some(name) = child.get_attribute("name").map(str::trim) else {
                continue;
            };
            let qname = QName::new(target_namespace.as_deref(), name);
            match child.local_name() {
                "element" => {
                    let type_name = child
                        .get_attribute("type")
                        .map(|t| child.namespaces.resolve(t))
                        .transpose()?;
                    schema
                        .element_declarations
                        .entry(qname.clone())
                        .or_insert(ElementDeclaration {
                            name: qname,
                            type_name,
                            system: XSD_NAMESPACE.to_string(),
                        });
                }
                "complexType" | "simpleType" => {
                    let kind = if child.local_name() == "complexType" {
                        TypeKind::Complex
                    } else {
                        TypeKind::Simple
                    };
                    schema
                        .type_definitions
                        .entry(qname.clone())
                        .or_insert(TypeDefinition {
                            name: qname,
                            kind,
                            system: XSD_NAMESPACE.to_string(),
                        });
                }
                _ => {}
            }
        }

        Ok(schema)
    }

    /// The shared built-in type table
    pub fn builtins() -> Arc<Schema> {
        Arc::clone(&BUILTINS)
    }

    fn builtin_schema() -> Self {
        let type_definitions = BUILTIN_TYPES
            .iter()
            .map(|local| {
                let name = QName::namespaced(XSD_NAMESPACE, *local);
                let def = TypeDefinition {
                    name: name.clone(),
                    kind: TypeKind::BuiltIn,
                    system: XSD_NAMESPACE.to_string(),
                };
                (name, def)
            })
            .collect();
        Self {
            target_namespace: Some(XSD_NAMESPACE.to_string()),
            location: None,
            element_declarations: IndexMap::new(),
            type_definitions,
        }
    }

    /// `targetNamespace` of the schema
    pub fn target_namespace(&self) -> Option<&str> {
        self.target_namespace.as_deref()
    }

    /// Where the schema was read from, if it was not inlined
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Look up a global element declaration
    pub fn element_declaration(&self, name: &QName) -> Option<&ElementDeclaration> {
        self.element_declarations.get(name)
    }

    /// Look up a type definition
    pub fn type_definition(&self, name: &QName) -> Option<&TypeDefinition> {
        self.type_definitions.get(name)
    }

    /// All global element declarations in document order
    pub fn element_declarations(&self) -> impl Iterator<Item = &ElementDeclaration> {
        self.element_declarations.values()
    }

    /// All type definitions in document order
    pub fn type_definitions(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.type_definitions.values()
    }
}

/// Schemas retrieved through `xs:import`, keyed by resolved URL
#[derive(Debug, Default)]
pub struct SchemaCache {
    schemas: HashMap<String, Arc<Schema>>,
}

impl SchemaCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a schema by URL
    pub fn get(&self, url: &str) -> Option<Arc<Schema>> {
        self.schemas.get(url).cloned()
    }

    /// Remember a schema
    pub fn insert(&mut self, url: impl Into<String>, schema: Arc<Schema>) {
        self.schemas.insert(url.into(), schema);
    }

    /// Number of cached schemas
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Forget every cached schema
    pub fn clear(&mut self) {
        self.schemas.clear();
    }
}
