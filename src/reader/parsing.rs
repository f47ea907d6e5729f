//! Recursive-descent parsing of WSDL 2.0 element trees
//!
//! Every handler reads the attributes of its element first, then walks the
//! children in document order. Children in the WSDL namespace go to their
//! handler, anything else is extension content for the registry.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::attributes::{parse_boolean, AttributeValue, ExtensionAttribute};
use crate::catalog::XmlCatalog;
use crate::diagnostics::{keys, Diagnostic, ErrorReporter, Severity, SourcePosition};
use crate::documents::{Document, Element};
use crate::elements::{
    BindingElement, BindingFaultElement, BindingFaultReferenceElement,
    BindingMessageReferenceElement, BindingOperationElement, ConfigurableElement,
    DescriptionElement, Direction, DocumentationElement, ElementContent, EndpointElement,
    FeatureElement, ImportElement, IncludeElement, InterfaceElement, InterfaceFaultElement,
    InterfaceFaultReferenceElement, InterfaceMessageReferenceElement, InterfaceOperationElement,
    MessageLabel, PropertyElement, PropertyValue, SchemaEntry, ServiceElement, TypesElement,
    WsdlElement,
};
use crate::error::{Error, ParseError, Result};
use crate::extensions::{ExtensionContext, ExtensionRegistry, Extensions, OwnerKind};
use crate::limits::Limits;
use crate::loaders::Fetcher;
use crate::locations::{resolve_location, validate_uri_reference, Location};
use crate::model::{DescriptionSet, DocId};
use crate::names::{validate_qname, NCName};
use crate::namespaces::{
    QName, WSDL_NAMESPACE, XMLNS_NAMESPACE, XML_NAMESPACE, XSD_NAMESPACE,
};
use crate::schema::{Schema, SchemaCache};

/// State of one read: every document reached so far
#[derive(Debug, Default)]
pub(super) struct ParseSession {
    documents: Vec<Option<DescriptionElement>>,
    visited: IndexMap<String, DocId>,
    depth: usize,
}

/// What handlers need to know about the document being parsed
struct DocContext {
    base_uri: String,
    target_namespace: Option<String>,
}

/// Which of `wsdl:import` / `wsdl:include` is being followed
#[derive(Debug, Clone, Copy)]
enum Reference {
    Import,
    Include,
}

impl Reference {
    fn as_str(self) -> &'static str {
        match self {
            Self::Import => "import",
            Self::Include => "include",
        }
    }

    fn participle(self) -> &'static str {
        match self {
            Self::Import => "imported",
            Self::Include => "included",
        }
    }
}

pub(super) struct DescriptionParser<'r> {
    pub(super) reporter: &'r mut ErrorReporter,
    pub(super) fetcher: &'r dyn Fetcher,
    pub(super) registry: Option<Arc<ExtensionRegistry>>,
    pub(super) limits: &'r Limits,
    pub(super) catalog: Option<&'r XmlCatalog>,
    pub(super) schema_cache: &'r mut SchemaCache,
    pub(super) session: ParseSession,
    pub(super) ancestors: Vec<OwnerKind>,
}

impl<'r> DescriptionParser<'r> {
    /// Parse the top-level document and everything it references
    pub(super) fn parse(mut self, element: &Element, base_uri: &str) -> Result<DescriptionSet> {
        // same key form as resolved references
        let base_uri = document_identity(base_uri);
        let base_uri = base_uri.as_str();
        if !element.is(WSDL_NAMESPACE, "description") {
            let message = format!(
                "Expected the root element {{{}}}description, found {}",
                WSDL_NAMESPACE, element.qname
            );
            self.reporter.report(
                Diagnostic::fatal(keys::UNEXPECTED_ROOT, message.clone())
                    .with_document(base_uri)
                    .at(element.position),
            )?;
            let mut error = ParseError::new(message).with_document(base_uri);
            if let Some(position) = element.position {
                error = error.with_position(position);
            }
            return Err(Error::Parse(error));
        }

        let root = self.reserve(base_uri);
        let description = self.parse_description(element, base_uri)?;
        self.session.documents[root.0] = Some(description);

        let documents = self
            .session
            .documents
            .into_iter()
            .enumerate()
            .map(|(i, d)| {
                d.ok_or_else(|| {
                    Error::Parse(ParseError::new(format!("document #{} was never completed", i)))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(DescriptionSet::new(
            documents,
            self.session.visited,
            root,
            self.registry,
        ))
    }

    /// Claim an id for a document before its content is parsed
    fn reserve(&mut self, location: &str) -> DocId {
        let id = DocId(self.session.documents.len());
        self.session.documents.push(None);
        self.session.visited.insert(location.to_string(), id);
        id
    }

    fn report(
        &mut self,
        ctx: &DocContext,
        severity: Severity,
        key: &'static str,
        message: impl Into<String>,
        position: Option<SourcePosition>,
    ) -> Result<()> {
        self.reporter.report(
            Diagnostic::new(severity, key, message)
                .with_document(ctx.base_uri.clone())
                .at(position),
        )
    }

    fn error(
        &mut self,
        ctx: &DocContext,
        key: &'static str,
        message: impl Into<String>,
        position: Option<SourcePosition>,
    ) -> Result<()> {
        self.report(ctx, Severity::Error, key, message, position)
    }

    fn warning(
        &mut self,
        ctx: &DocContext,
        key: &'static str,
        message: impl Into<String>,
        position: Option<SourcePosition>,
    ) -> Result<()> {
        self.report(ctx, Severity::Warning, key, message, position)
    }

    fn parse_description(&mut self, element: &Element, base_uri: &str) -> Result<DescriptionElement> {
        log::trace!("parsing description {}", base_uri);
        let mut description = DescriptionElement::new(base_uri);
        description.position = element.position;
        description.set_namespaces((*element.namespaces).clone());

        let mut ctx = DocContext {
            base_uri: base_uri.to_string(),
            target_namespace: None,
        };
        if let Some(namespace) = self.parse_uri_attribute(&ctx, element, "targetNamespace")? {
            ctx.target_namespace = Some(namespace.clone());
            description.set_target_namespace(Some(namespace));
        }

        self.ancestors.push(OwnerKind::Description);
        self.parse_extension_attributes(&ctx, element, OwnerKind::Description, &mut description.extensions)?;

        for child in &element.children {
            if child.namespace() != Some(WSDL_NAMESPACE) {
                self.parse_extension_element(&ctx, child, OwnerKind::Description, &mut description.extensions)?;
                continue;
            }
            match child.local_name() {
                "documentation" => {
                    let documentation = self.parse_documentation(&ctx, child)?;
                    description.documentation.push(documentation);
                }
                "import" => {
                    let import = self.parse_import(&ctx, child)?;
                    description.add_import(import);
                }
                "include" => {
                    let include = self.parse_include(&ctx, child)?;
                    description.add_include(include);
                }
                "types" => {
                    let types = self.parse_types(&ctx, child)?;
                    match description.types.as_mut() {
                        Some(existing) => {
                            existing.schemas.extend(types.schemas);
                            existing.documentation.extend(types.documentation);
                        }
                        None => description.types = Some(types),
                    }
                }
                "interface" => {
                    let interface = self.parse_interface(&ctx, child)?;
                    description.add_interface(interface);
                }
                "binding" => {
                    let binding = self.parse_binding(&ctx, child)?;
                    description.add_binding(binding);
                }
                "service" => {
                    let service = self.parse_service(&ctx, child)?;
                    description.add_service(service);
                }
                _ => self.unexpected(&ctx, child)?,
            }
        }

        let types = description.types_element_mut();
        if !types.has_built_in() {
            types.add_schema(SchemaEntry::BuiltIn(Schema::builtins()));
        }

        self.ancestors.pop();
        Ok(description)
    }

    fn unexpected(&mut self, ctx: &DocContext, element: &Element) -> Result<()> {
        let parent = self
            .ancestors
            .last()
            .map(|kind| kind.element_name())
            .unwrap_or("document");
        self.warning(
            ctx,
            keys::UNEXPECTED_ELEMENT,
            format!("Unexpected element {} in {}", element.qname, parent),
            element.position,
        )
    }

    /// Handle documentation and extension children shared by every element
    ///
    /// Returns false for WSDL-namespace children the caller has to handle.
    fn parse_documented_child<E: WsdlElement>(
        &mut self,
        ctx: &DocContext,
        child: &Element,
        owner: OwnerKind,
        target: &mut E,
    ) -> Result<bool> {
        if child.namespace() != Some(WSDL_NAMESPACE) {
            self.parse_extension_element(ctx, child, owner, target.extensions_mut())?;
            return Ok(true);
        }
        if child.local_name() == "documentation" {
            let documentation = self.parse_documentation(ctx, child)?;
            target.documentation_mut().push(documentation);
            return Ok(true);
        }
        Ok(false)
    }

    /// [`Self::parse_documented_child`] plus `wsdl:feature` and `wsdl:property`
    fn parse_configurable_child<E: ConfigurableElement>(
        &mut self,
        ctx: &DocContext,
        child: &Element,
        owner: OwnerKind,
        target: &mut E,
    ) -> Result<bool> {
        if self.parse_documented_child(ctx, child, owner, target)? {
            return Ok(true);
        }
        match child.local_name() {
            "feature" => {
                let feature = self.parse_feature(ctx, child)?;
                target.features_mut().push(feature);
                Ok(true)
            }
            "property" => {
                let property = self.parse_property(ctx, child)?;
                target.properties_mut().push(property);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn parse_remaining_children<E: ConfigurableElement>(
        &mut self,
        ctx: &DocContext,
        element: &Element,
        owner: OwnerKind,
        target: &mut E,
    ) -> Result<()> {
        for child in &element.children {
            if !self.parse_configurable_child(ctx, child, owner, target)? {
                self.unexpected(ctx, child)?;
            }
        }
        Ok(())
    }

    fn parse_documentation(&mut self, ctx: &DocContext, element: &Element) -> Result<DocumentationElement> {
        let mut extensions = Extensions::new();
        self.ancestors.push(OwnerKind::Documentation);
        self.parse_extension_attributes(ctx, element, OwnerKind::Documentation, &mut extensions)?;
        self.ancestors.pop();
        Ok(DocumentationElement {
            content: element.clone(),
            extensions,
        })
    }

    // Attribute helpers

    fn parse_name(&mut self, ctx: &DocContext, element: &Element) -> Result<Option<NCName>> {
        let Some(raw) = element.get_attribute("name") else {
            return Ok(None);
        };
        match NCName::new(raw.trim()) {
            Ok(name) => Ok(Some(name)),
            Err(e) => {
                self.error(ctx, keys::INVALID_NCNAME, e.to_string(), element.position)?;
                Ok(None)
            }
        }
    }

    fn resolve_qname(&mut self, ctx: &DocContext, element: &Element, raw: &str) -> Result<Option<QName>> {
        let raw = raw.trim();
        let resolved = validate_qname(raw).and_then(|_| element.namespaces.resolve(raw));
        match resolved {
            Ok(qname) => Ok(Some(qname)),
            Err(e) => {
                self.error(ctx, keys::UNRESOLVED_PREFIX, e.to_string(), element.position)?;
                Ok(None)
            }
        }
    }

    fn parse_qname_attribute(
        &mut self,
        ctx: &DocContext,
        element: &Element,
        attribute: &str,
    ) -> Result<Option<QName>> {
        match element.get_attribute(attribute) {
            Some(raw) => self.resolve_qname(ctx, element, raw),
            None => Ok(None),
        }
    }

    fn parse_qname_list_attribute(
        &mut self,
        ctx: &DocContext,
        element: &Element,
        attribute: &str,
    ) -> Result<Vec<QName>> {
        let mut names = Vec::new();
        if let Some(raw) = element.get_attribute(attribute) {
            for token in raw.split_whitespace() {
                if let Some(qname) = self.resolve_qname(ctx, element, token)? {
                    names.push(qname);
                }
            }
        }
        Ok(names)
    }

    fn check_uri(&mut self, ctx: &DocContext, element: &Element, value: &str) -> Result<bool> {
        match validate_uri_reference(value) {
            Ok(()) => Ok(true),
            Err(e) => {
                self.error(ctx, keys::MALFORMED_URI, e.to_string(), element.position)?;
                Ok(false)
            }
        }
    }

    fn parse_uri_attribute(
        &mut self,
        ctx: &DocContext,
        element: &Element,
        attribute: &str,
    ) -> Result<Option<String>> {
        let Some(raw) = element.get_attribute(attribute) else {
            return Ok(None);
        };
        let value = raw.trim();
        Ok(self
            .check_uri(ctx, element, value)?
            .then(|| value.to_string()))
    }

    fn parse_uri_list_attribute(
        &mut self,
        ctx: &DocContext,
        element: &Element,
        attribute: &str,
    ) -> Result<Vec<String>> {
        let mut uris = Vec::new();
        if let Some(raw) = element.get_attribute(attribute) {
            for token in raw.split_whitespace() {
                if self.check_uri(ctx, element, token)? {
                    uris.push(token.to_string());
                }
            }
        }
        Ok(uris)
    }

    fn parse_boolean_attribute(
        &mut self,
        ctx: &DocContext,
        element: &Element,
        attribute: &str,
    ) -> Result<Option<bool>> {
        let Some(raw) = element.get_attribute(attribute) else {
            return Ok(None);
        };
        match parse_boolean(raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                self.error(ctx, keys::INVALID_ATTRIBUTE_VALUE, e.to_string(), element.position)?;
                Ok(None)
            }
        }
    }

    fn parse_message_label(&self, element: &Element) -> Option<MessageLabel> {
        element.get_attribute("messageLabel").map(MessageLabel::parse)
    }

    fn parse_element_content(&mut self, ctx: &DocContext, element: &Element) -> Result<ElementContent> {
        let Some(raw) = element.get_attribute("element") else {
            return Ok(ElementContent::Other);
        };
        Ok(match raw.trim() {
            "#any" => ElementContent::Any,
            "#none" => ElementContent::None,
            "#other" => ElementContent::Other,
            _ => match self.resolve_qname(ctx, element, raw)? {
                Some(qname) => ElementContent::Element(qname),
                None => ElementContent::Other,
            },
        })
    }

    // Extensions

    fn parse_extension_attributes(
        &mut self,
        ctx: &DocContext,
        element: &Element,
        owner: OwnerKind,
        extensions: &mut Extensions,
    ) -> Result<()> {
        for (name, raw) in &element.attributes {
            match name.namespace() {
                None => continue,
                Some(ns) if ns == WSDL_NAMESPACE || ns == XML_NAMESPACE || ns == XMLNS_NAMESPACE => {
                    continue
                }
                Some(_) => {}
            }

            let Some(registry) = self.registry.clone() else {
                self.error(
                    ctx,
                    keys::NO_REGISTRY,
                    format!("No extension registry to handle attribute {}", name),
                    element.position,
                )?;
                extensions.add_attribute(ExtensionAttribute::new(name.clone(), raw.as_str(), None));
                continue;
            };

            let value = match registry.query_attribute_type(owner, name) {
                Some(ty) => match ty.parse(raw, &element.namespaces) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        self.error(
                            ctx,
                            keys::INVALID_ATTRIBUTE_VALUE,
                            format!("Invalid value for {} on {}: {}", name, owner.element_name(), e),
                            element.position,
                        )?;
                        None
                    }
                },
                None => Some(AttributeValue::Unknown(raw.clone())),
            };
            extensions.add_attribute(ExtensionAttribute::new(name.clone(), raw.as_str(), value));
        }
        Ok(())
    }

    fn parse_extension_element(
        &mut self,
        ctx: &DocContext,
        element: &Element,
        owner: OwnerKind,
        extensions: &mut Extensions,
    ) -> Result<()> {
        let Some(registry) = self.registry.clone() else {
            return self.error(
                ctx,
                keys::NO_REGISTRY,
                format!("No extension registry to handle element {}", element.qname),
                element.position,
            );
        };

        let deserializer = registry
            .query_deserializer(owner, &element.qname)
            .or_else(|| registry.default_deserializer());
        let Some(deserializer) = deserializer else {
            return self.error(
                ctx,
                keys::NO_DESERIALIZER,
                format!(
                    "No deserializer for extension element {} in {}",
                    element.qname,
                    owner.element_name()
                ),
                element.position,
            );
        };

        let outcome = {
            let extension_ctx = ExtensionContext {
                owner,
                ancestors: &self.ancestors,
                target_namespace: ctx.target_namespace.as_deref(),
                base_uri: &ctx.base_uri,
            };
            deserializer.unmarshall(&extension_ctx, element)
        };
        match outcome {
            Ok(extension) => {
                extensions.add_element(extension);
                Ok(())
            }
            Err(e) => self.error(
                ctx,
                keys::EXTENSION_FAILED,
                format!("Extension element {} could not be read: {}", element.qname, e),
                element.position,
            ),
        }
    }

    // Import and include

    fn parse_import(&mut self, ctx: &DocContext, element: &Element) -> Result<ImportElement> {
        let mut import = ImportElement {
            position: element.position,
            ..ImportElement::default()
        };
        import.namespace = self.parse_uri_attribute(ctx, element, "namespace")?;
        import.location = element.get_attribute("location").map(|l| l.trim().to_string());

        self.ancestors.push(OwnerKind::Import);
        self.parse_extension_attributes(ctx, element, OwnerKind::Import, &mut import.extensions)?;
        for child in &element.children {
            if !self.parse_documented_child(ctx, child, OwnerKind::Import, &mut import)? {
                self.unexpected(ctx, child)?;
            }
        }
        self.ancestors.pop();

        if let Some(location) = import.location.clone() {
            import.description = self.follow(ctx, element, &location, Reference::Import)?;
        }
        Ok(import)
    }

    fn parse_include(&mut self, ctx: &DocContext, element: &Element) -> Result<IncludeElement> {
        let mut include = IncludeElement {
            position: element.position,
            ..IncludeElement::default()
        };
        include.location = element.get_attribute("location").map(|l| l.trim().to_string());

        self.ancestors.push(OwnerKind::Include);
        self.parse_extension_attributes(ctx, element, OwnerKind::Include, &mut include.extensions)?;
        for child in &element.children {
            if !self.parse_documented_child(ctx, child, OwnerKind::Include, &mut include)? {
                self.unexpected(ctx, child)?;
            }
        }
        self.ancestors.pop();

        if let Some(location) = include.location.clone() {
            include.description = self.follow(ctx, element, &location, Reference::Include)?;
        }
        Ok(include)
    }

    /// Apply the catalog and resolve a location against the document base URI
    fn resolve_reference_location(
        &mut self,
        ctx: &DocContext,
        element: &Element,
        location: &str,
    ) -> Result<Option<String>> {
        let mapped = self
            .catalog
            .and_then(|catalog| catalog.resolve(location))
            .unwrap_or(location);
        match resolve_location(Some(ctx.base_uri.as_str()), mapped) {
            Ok(resolved) => Ok(Some(resolved)),
            Err(e) => {
                self.error(
                    ctx,
                    keys::MALFORMED_URI,
                    format!("Cannot resolve location '{}': {}", location, e),
                    element.position,
                )?;
                Ok(None)
            }
        }
    }

    /// Read the document an import or include points at
    fn follow(
        &mut self,
        ctx: &DocContext,
        element: &Element,
        location: &str,
        reference: Reference,
    ) -> Result<Option<DocId>> {
        let Some(resolved) = self.resolve_reference_location(ctx, element, location)? else {
            return Ok(None);
        };

        if let Some(&id) = self.session.visited.get(&resolved) {
            log::trace!("{} of {} reuses {}", reference.as_str(), resolved, id);
            return Ok(Some(id));
        }

        let within_limits = self
            .limits
            .check_import_depth(self.session.depth + 1)
            .and_then(|_| self.limits.check_documents(self.session.documents.len() + 1));
        if let Err(e) = within_limits {
            self.error(
                ctx,
                keys::LIMIT_EXCEEDED,
                format!("Not following {} of '{}': {}", reference.as_str(), resolved, e),
                element.position,
            )?;
            return Ok(None);
        }

        let text = match self.fetcher.fetch(&resolved) {
            Ok(text) => text,
            Err(e) => {
                self.warning(
                    ctx,
                    keys::DOCUMENT_UNAVAILABLE,
                    format!("Could not retrieve {} document '{}': {}", reference.participle(), resolved, e),
                    element.position,
                )?;
                return Ok(None);
            }
        };
        let document = match Document::parse_with_limits(&text, self.limits) {
            Ok(document) => document,
            Err(e) => {
                self.warning(
                    ctx,
                    keys::DOCUMENT_UNAVAILABLE,
                    format!("Could not parse {} document '{}': {}", reference.participle(), resolved, e),
                    element.position,
                )?;
                return Ok(None);
            }
        };
        if !document.root().is(WSDL_NAMESPACE, "description") {
            self.error(
                ctx,
                keys::REFERENCED_ROOT_MISSING,
                format!(
                    "The {} document '{}' has root {} instead of wsdl:description",
                    reference.participle(),
                    resolved,
                    document.root().qname
                ),
                element.position,
            )?;
            return Ok(None);
        }

        let id = self.reserve(&resolved);
        log::debug!("following {} of {} as {}", reference.as_str(), resolved, id);

        let outer_ancestors = std::mem::take(&mut self.ancestors);
        self.session.depth += 1;
        let parsed = self.parse_description(document.root(), &resolved);
        self.session.depth -= 1;
        self.ancestors = outer_ancestors;

        self.session.documents[id.0] = Some(parsed?);
        Ok(Some(id))
    }

    // Types

    fn parse_types(&mut self, ctx: &DocContext, element: &Element) -> Result<TypesElement> {
        let mut types = TypesElement::new();
        types.position = element.position;

        self.ancestors.push(OwnerKind::Types);
        self.parse_extension_attributes(ctx, element, OwnerKind::Types, &mut types.extensions)?;
        for child in &element.children {
            if child.is(XSD_NAMESPACE, "schema") {
                match Schema::from_element(child, None) {
                    Ok(schema) => types.add_schema(SchemaEntry::Inlined(Arc::new(schema))),
                    Err(e) => self.error(
                        ctx,
                        keys::SCHEMA_UNAVAILABLE,
                        format!("Inline schema could not be read: {}", e),
                        child.position,
                    )?,
                }
            } else if child.is(XSD_NAMESPACE, "import") {
                let namespace = child.get_attribute("namespace").map(|n| n.trim().to_string());
                let schema_location = child
                    .get_attribute("schemaLocation")
                    .map(|l| l.trim().to_string());
                let schema = match &schema_location {
                    Some(location) => self.fetch_schema(ctx, child, location)?,
                    None => None,
                };
                types.add_schema(SchemaEntry::Imported {
                    namespace,
                    schema_location,
                    schema,
                });
            } else if !self.parse_documented_child(ctx, child, OwnerKind::Types, &mut types)? {
                self.unexpected(ctx, child)?;
            }
        }
        self.ancestors.pop();
        Ok(types)
    }

    fn fetch_schema(
        &mut self,
        ctx: &DocContext,
        element: &Element,
        location: &str,
    ) -> Result<Option<Arc<Schema>>> {
        let Some(url) = self.resolve_reference_location(ctx, element, location)? else {
            return Ok(None);
        };
        if let Some(schema) = self.schema_cache.get(&url) {
            log::debug!("schema cache hit for {}", url);
            return Ok(Some(schema));
        }

        let schema = self
            .fetcher
            .fetch(&url)
            .and_then(|text| Document::parse_with_limits(&text, self.limits))
            .and_then(|document| Schema::from_element(document.root(), Some(url.as_str())));
        match schema {
            Ok(schema) => {
                let schema = Arc::new(schema);
                self.schema_cache.insert(url, Arc::clone(&schema));
                Ok(Some(schema))
            }
            Err(e) => {
                self.warning(
                    ctx,
                    keys::SCHEMA_UNAVAILABLE,
                    format!("Could not read schema '{}': {}", url, e),
                    element.position,
                )?;
                Ok(None)
            }
        }
    }

    // Interface

    fn parse_interface(&mut self, ctx: &DocContext, element: &Element) -> Result<InterfaceElement> {
        let mut interface = InterfaceElement {
            position: element.position,
            ..InterfaceElement::default()
        };
        interface.name = self.parse_name(ctx, element)?;
        interface.extends = self.parse_qname_list_attribute(ctx, element, "extends")?;
        interface.style_default = self.parse_uri_list_attribute(ctx, element, "styleDefault")?;

        self.ancestors.push(OwnerKind::Interface);
        self.parse_extension_attributes(ctx, element, OwnerKind::Interface, &mut interface.extensions)?;
        for child in &element.children {
            if child.is(WSDL_NAMESPACE, "fault") {
                let fault = self.parse_interface_fault(ctx, child)?;
                interface.faults.push(fault);
            } else if child.is(WSDL_NAMESPACE, "operation") {
                let operation = self.parse_interface_operation(ctx, child)?;
                interface.operations.push(operation);
            } else if !self.parse_configurable_child(ctx, child, OwnerKind::Interface, &mut interface)? {
                self.unexpected(ctx, child)?;
            }
        }
        self.ancestors.pop();
        Ok(interface)
    }

    fn parse_interface_fault(&mut self, ctx: &DocContext, element: &Element) -> Result<InterfaceFaultElement> {
        let mut fault = InterfaceFaultElement {
            position: element.position,
            ..InterfaceFaultElement::default()
        };
        fault.name = self.parse_name(ctx, element)?;
        fault.element = self.parse_element_content(ctx, element)?;

        self.ancestors.push(OwnerKind::InterfaceFault);
        self.parse_extension_attributes(ctx, element, OwnerKind::InterfaceFault, &mut fault.extensions)?;
        self.parse_remaining_children(ctx, element, OwnerKind::InterfaceFault, &mut fault)?;
        self.ancestors.pop();
        Ok(fault)
    }

    fn parse_interface_operation(
        &mut self,
        ctx: &DocContext,
        element: &Element,
    ) -> Result<InterfaceOperationElement> {
        let mut operation = InterfaceOperationElement {
            position: element.position,
            ..InterfaceOperationElement::default()
        };
        operation.name = self.parse_name(ctx, element)?;
        operation.pattern = self.parse_uri_attribute(ctx, element, "pattern")?;
        operation.style = self.parse_uri_list_attribute(ctx, element, "style")?;

        self.ancestors.push(OwnerKind::InterfaceOperation);
        self.parse_extension_attributes(
            ctx,
            element,
            OwnerKind::InterfaceOperation,
            &mut operation.extensions,
        )?;
        for child in &element.children {
            let direction = if child.namespace() == Some(WSDL_NAMESPACE) {
                message_direction(child.local_name())
            } else {
                None
            };
            match direction {
                Some((direction, false)) => {
                    let reference = self.parse_interface_message_reference(ctx, child, direction)?;
                    operation.message_references.push(reference);
                }
                Some((direction, true)) => {
                    let reference = self.parse_interface_fault_reference(ctx, child, direction)?;
                    operation.fault_references.push(reference);
                }
                None => {
                    if !self.parse_configurable_child(
                        ctx,
                        child,
                        OwnerKind::InterfaceOperation,
                        &mut operation,
                    )? {
                        self.unexpected(ctx, child)?;
                    }
                }
            }
        }
        self.ancestors.pop();
        Ok(operation)
    }

    fn parse_interface_message_reference(
        &mut self,
        ctx: &DocContext,
        element: &Element,
        direction: Direction,
    ) -> Result<InterfaceMessageReferenceElement> {
        let mut reference = InterfaceMessageReferenceElement::new(direction);
        reference.position = element.position;
        reference.message_label = self.parse_message_label(element);
        reference.element = self.parse_element_content(ctx, element)?;

        let owner = OwnerKind::InterfaceMessageReference;
        self.ancestors.push(owner);
        self.parse_extension_attributes(ctx, element, owner, &mut reference.extensions)?;
        self.parse_remaining_children(ctx, element, owner, &mut reference)?;
        self.ancestors.pop();
        Ok(reference)
    }

    fn parse_interface_fault_reference(
        &mut self,
        ctx: &DocContext,
        element: &Element,
        direction: Direction,
    ) -> Result<InterfaceFaultReferenceElement> {
        let mut reference = InterfaceFaultReferenceElement::new(direction);
        reference.position = element.position;
        reference.message_label = self.parse_message_label(element);
        reference.reference = self.parse_qname_attribute(ctx, element, "ref")?;

        let owner = OwnerKind::InterfaceFaultReference;
        self.ancestors.push(owner);
        self.parse_extension_attributes(ctx, element, owner, &mut reference.extensions)?;
        self.parse_remaining_children(ctx, element, owner, &mut reference)?;
        self.ancestors.pop();
        Ok(reference)
    }

    // Binding

    fn parse_binding(&mut self, ctx: &DocContext, element: &Element) -> Result<BindingElement> {
        let mut binding = BindingElement {
            position: element.position,
            ..BindingElement::default()
        };
        binding.name = self.parse_name(ctx, element)?;
        binding.interface = self.parse_qname_attribute(ctx, element, "interface")?;
        binding.binding_type = self.parse_uri_attribute(ctx, element, "type")?;

        self.ancestors.push(OwnerKind::Binding);
        self.parse_extension_attributes(ctx, element, OwnerKind::Binding, &mut binding.extensions)?;
        for child in &element.children {
            if child.is(WSDL_NAMESPACE, "fault") {
                let fault = self.parse_binding_fault(ctx, child)?;
                binding.faults.push(fault);
            } else if child.is(WSDL_NAMESPACE, "operation") {
                let operation = self.parse_binding_operation(ctx, child)?;
                binding.operations.push(operation);
            } else if !self.parse_configurable_child(ctx, child, OwnerKind::Binding, &mut binding)? {
                self.unexpected(ctx, child)?;
            }
        }
        self.ancestors.pop();
        Ok(binding)
    }

    fn parse_binding_fault(&mut self, ctx: &DocContext, element: &Element) -> Result<BindingFaultElement> {
        let mut fault = BindingFaultElement {
            position: element.position,
            ..BindingFaultElement::default()
        };
        fault.reference = self.parse_qname_attribute(ctx, element, "ref")?;

        self.ancestors.push(OwnerKind::BindingFault);
        self.parse_extension_attributes(ctx, element, OwnerKind::BindingFault, &mut fault.extensions)?;
        self.parse_remaining_children(ctx, element, OwnerKind::BindingFault, &mut fault)?;
        self.ancestors.pop();
        Ok(fault)
    }

    fn parse_binding_operation(
        &mut self,
        ctx: &DocContext,
        element: &Element,
    ) -> Result<BindingOperationElement> {
        let mut operation = BindingOperationElement {
            position: element.position,
            ..BindingOperationElement::default()
        };
        operation.reference = self.parse_qname_attribute(ctx, element, "ref")?;

        self.ancestors.push(OwnerKind::BindingOperation);
        self.parse_extension_attributes(
            ctx,
            element,
            OwnerKind::BindingOperation,
            &mut operation.extensions,
        )?;
        for child in &element.children {
            let direction = if child.namespace() == Some(WSDL_NAMESPACE) {
                message_direction(child.local_name())
            } else {
                None
            };
            match direction {
                Some((direction, false)) => {
                    let reference = self.parse_binding_message_reference(ctx, child, direction)?;
                    operation.message_references.push(reference);
                }
                Some((direction, true)) => {
                    let reference = self.parse_binding_fault_reference(ctx, child, direction)?;
                    operation.fault_references.push(reference);
                }
                None => {
                    if !self.parse_configurable_child(
                        ctx,
                        child,
                        OwnerKind::BindingOperation,
                        &mut operation,
                    )? {
                        self.unexpected(ctx, child)?;
                    }
                }
            }
        }
        self.ancestors.pop();
        Ok(operation)
    }

    fn parse_binding_message_reference(
        &mut self,
        ctx: &DocContext,
        element: &Element,
        direction: Direction,
    ) -> Result<BindingMessageReferenceElement> {
        let mut reference = BindingMessageReferenceElement::new(direction);
        reference.position = element.position;
        reference.message_label = self.parse_message_label(element);

        let owner = OwnerKind::BindingMessageReference;
        self.ancestors.push(owner);
        self.parse_extension_attributes(ctx, element, owner, &mut reference.extensions)?;
        self.parse_remaining_children(ctx, element, owner, &mut reference)?;
        self.ancestors.pop();
        Ok(reference)
    }

    fn parse_binding_fault_reference(
        &mut self,
        ctx: &DocContext,
        element: &Element,
        direction: Direction,
    ) -> Result<BindingFaultReferenceElement> {
        let mut reference = BindingFaultReferenceElement::new(direction);
        reference.position = element.position;
        reference.message_label = self.parse_message_label(element);
        reference.reference = self.parse_qname_attribute(ctx, element, "ref")?;

        let owner = OwnerKind::BindingFaultReference;
        self.ancestors.push(owner);
        self.parse_extension_attributes(ctx, element, owner, &mut reference.extensions)?;
        self.parse_remaining_children(ctx, element, owner, &mut reference)?;
        self.ancestors.pop();
        Ok(reference)
    }

    // Service

    fn parse_service(&mut self, ctx: &DocContext, element: &Element) -> Result<ServiceElement> {
        let mut service = ServiceElement {
            position: element.position,
            ..ServiceElement::default()
        };
        service.name = self.parse_name(ctx, element)?;
        service.interface = self.parse_qname_attribute(ctx, element, "interface")?;

        self.ancestors.push(OwnerKind::Service);
        self.parse_extension_attributes(ctx, element, OwnerKind::Service, &mut service.extensions)?;
        for child in &element.children {
            if child.is(WSDL_NAMESPACE, "endpoint") {
                let endpoint = self.parse_endpoint(ctx, child)?;
                service.endpoints.push(endpoint);
            } else if !self.parse_configurable_child(ctx, child, OwnerKind::Service, &mut service)? {
                self.unexpected(ctx, child)?;
            }
        }
        self.ancestors.pop();
        Ok(service)
    }

    fn parse_endpoint(&mut self, ctx: &DocContext, element: &Element) -> Result<EndpointElement> {
        let mut endpoint = EndpointElement {
            position: element.position,
            ..EndpointElement::default()
        };
        endpoint.name = self.parse_name(ctx, element)?;
        endpoint.binding = self.parse_qname_attribute(ctx, element, "binding")?;
        endpoint.address = self.parse_uri_attribute(ctx, element, "address")?;

        self.ancestors.push(OwnerKind::Endpoint);
        self.parse_extension_attributes(ctx, element, OwnerKind::Endpoint, &mut endpoint.extensions)?;
        self.parse_remaining_children(ctx, element, OwnerKind::Endpoint, &mut endpoint)?;
        self.ancestors.pop();
        Ok(endpoint)
    }

    // Feature and property

    fn parse_feature(&mut self, ctx: &DocContext, element: &Element) -> Result<FeatureElement> {
        let mut feature = FeatureElement {
            position: element.position,
            ..FeatureElement::default()
        };
        feature.uri = self.parse_uri_attribute(ctx, element, "ref")?;
        feature.required = self.parse_boolean_attribute(ctx, element, "required")?;

        self.ancestors.push(OwnerKind::Feature);
        self.parse_extension_attributes(ctx, element, OwnerKind::Feature, &mut feature.extensions)?;
        for child in &element.children {
            if !self.parse_documented_child(ctx, child, OwnerKind::Feature, &mut feature)? {
                self.unexpected(ctx, child)?;
            }
        }
        self.ancestors.pop();
        Ok(feature)
    }

    fn parse_property(&mut self, ctx: &DocContext, element: &Element) -> Result<PropertyElement> {
        let mut property = PropertyElement {
            position: element.position,
            ..PropertyElement::default()
        };
        property.uri = self.parse_uri_attribute(ctx, element, "ref")?;

        self.ancestors.push(OwnerKind::Property);
        self.parse_extension_attributes(ctx, element, OwnerKind::Property, &mut property.extensions)?;
        for child in &element.children {
            if child.is(WSDL_NAMESPACE, "value") {
                property.value = Some(PropertyValue {
                    text: child.text.clone(),
                    content: child.children.clone(),
                });
            } else if child.is(WSDL_NAMESPACE, "constraint") {
                match child.trimmed_text() {
                    Some("#value") => property.has_value_token = true,
                    Some(text) => property.constraint = self.resolve_qname(ctx, child, text)?,
                    None => {
                        self.error(
                            ctx,
                            keys::UNRESOLVED_PREFIX,
                            "Empty wsdl:constraint",
                            child.position,
                        )?;
                    }
                }
            } else if !self.parse_documented_child(ctx, child, OwnerKind::Property, &mut property)? {
                self.unexpected(ctx, child)?;
            }
        }
        self.ancestors.pop();
        Ok(property)
    }
}

/// Absolute URI for a caller-supplied base; values that are not locations are kept as given
fn document_identity(base_uri: &str) -> String {
    Location::parse(base_uri)
        .and_then(|location| location.to_uri())
        .unwrap_or_else(|_| base_uri.to_string())
}

/// Direction of a message/fault reference element and whether it is a fault
fn message_direction(local_name: &str) -> Option<(Direction, bool)> {
    match local_name {
        "input" => Some((Direction::In, false)),
        "output" => Some((Direction::Out, false)),
        "infault" => Some((Direction::In, true)),
        "outfault" => Some((Direction::Out, true)),
        _ => None,
    }
}
