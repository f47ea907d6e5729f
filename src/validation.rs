//! Validation of read descriptions
//!
//! Validators run after a read when [`Reader::with_validation`] is on.
//! [`DocumentValidator`]s see the element model of every document,
//! [`ComponentValidator`]s see the component model of the root description.
//! Findings go to the same [`ErrorReporter`] as parse diagnostics.
//!
//! [`Reader::with_validation`]: crate::reader::Reader::with_validation

use std::collections::HashSet;

use crate::components::{Component, Description, MessageExchangePattern};
use crate::diagnostics::{keys, Diagnostic, ErrorReporter, SourcePosition};
use crate::elements::DescriptionElement;
use crate::error::Result;
use crate::model::{DescriptionSet, DocId};
use crate::names::NCName;
use crate::namespaces::QName;

/// Checks over the element model of a [`DescriptionSet`]
pub trait DocumentValidator: Send {
    /// Report findings for `set`
    fn validate(&self, set: &DescriptionSet, reporter: &mut ErrorReporter) -> Result<()>;
}

/// Checks over the component model of a [`Description`]
pub trait ComponentValidator: Send {
    /// Report findings for `description`
    fn validate(&self, description: &Description<'_>, reporter: &mut ErrorReporter) -> Result<()>;
}

/// The stock checks: namespace agreement of imports and includes, duplicate
/// names and references that do not resolve
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicValidator;

impl BasicValidator {
    fn report(
        reporter: &mut ErrorReporter,
        element: &DescriptionElement,
        key: &'static str,
        message: String,
        position: Option<SourcePosition>,
    ) -> Result<()> {
        reporter.report(
            Diagnostic::error(key, message)
                .with_document(element.document_base_uri())
                .at(position),
        )
    }

    fn check_imports(
        set: &DescriptionSet,
        element: &DescriptionElement,
        reporter: &mut ErrorReporter,
    ) -> Result<()> {
        let own = element.target_namespace();
        for import in element.imports() {
            if import.namespace.is_some() && import.namespace.as_deref() == own {
                Self::report(
                    reporter,
                    element,
                    keys::SELF_IMPORT,
                    format!(
                        "Import of namespace '{}' from a document with the same target namespace",
                        import.namespace.as_deref().unwrap_or_default()
                    ),
                    import.position,
                )?;
            }
            let Some(imported) = import.description.and_then(|id| set.description_element(id)) else {
                continue;
            };
            if imported.target_namespace() != import.namespace.as_deref() {
                Self::report(
                    reporter,
                    element,
                    keys::IMPORT_NAMESPACE_MISMATCH,
                    format!(
                        "Imported document '{}' has target namespace {:?}, the import names {:?}",
                        imported.document_base_uri(),
                        imported.target_namespace(),
                        import.namespace
                    ),
                    import.position,
                )?;
            }
        }

        for include in element.includes() {
            let Some(included) = include.description.and_then(|id| set.description_element(id)) else {
                continue;
            };
            if included.target_namespace() != own {
                Self::report(
                    reporter,
                    element,
                    keys::INCLUDE_NAMESPACE_MISMATCH,
                    format!(
                        "Included document '{}' has target namespace {:?}, expected {:?}",
                        included.document_base_uri(),
                        included.target_namespace(),
                        own
                    ),
                    include.position,
                )?;
            }
        }
        Ok(())
    }

    fn check_unique<'e>(
        reporter: &mut ErrorReporter,
        element: &DescriptionElement,
        kind: &str,
        names: impl Iterator<Item = (Option<&'e NCName>, Option<SourcePosition>)>,
    ) -> Result<()> {
        let mut seen = HashSet::new();
        for (name, position) in names {
            let Some(name) = name else { continue };
            if !seen.insert(name.as_str()) {
                Self::report(
                    reporter,
                    element,
                    keys::DUPLICATE_NAME,
                    format!("Duplicate {} name '{}'", kind, name),
                    position,
                )?;
            }
        }
        Ok(())
    }

    fn check_names(element: &DescriptionElement, reporter: &mut ErrorReporter) -> Result<()> {
        Self::check_unique(
            reporter,
            element,
            "interface",
            element.interfaces().iter().map(|i| (i.name.as_ref(), i.position)),
        )?;
        Self::check_unique(
            reporter,
            element,
            "binding",
            element.bindings().iter().map(|b| (b.name.as_ref(), b.position)),
        )?;
        Self::check_unique(
            reporter,
            element,
            "service",
            element.services().iter().map(|s| (s.name.as_ref(), s.position)),
        )?;

        for interface in element.interfaces() {
            Self::check_unique(
                reporter,
                element,
                "interface operation",
                interface.operations.iter().map(|o| (o.name.as_ref(), o.position)),
            )?;
            Self::check_unique(
                reporter,
                element,
                "interface fault",
                interface.faults.iter().map(|f| (f.name.as_ref(), f.position)),
            )?;
        }
        for service in element.services() {
            Self::check_unique(
                reporter,
                element,
                "endpoint",
                service.endpoints.iter().map(|e| (e.name.as_ref(), e.position)),
            )?;
        }
        Ok(())
    }

    fn unresolved(
        reporter: &mut ErrorReporter,
        scope: &Description<'_>,
        what: &str,
        name: &QName,
        position: Option<SourcePosition>,
    ) -> Result<()> {
        Self::report(
            reporter,
            scope.to_element(),
            keys::UNRESOLVED_REFERENCE,
            format!("Unresolved {} '{}'", what, name),
            position,
        )
    }

    /// Check the components a document declares, resolving in its own scope
    fn check_document(scope: &Description<'_>, doc: DocId, reporter: &mut ErrorReporter) -> Result<()> {
        for interface in scope.interfaces().into_iter().filter(|i| i.key().doc() == doc) {
            let element = interface.to_element();
            for name in &element.extends {
                if scope.interface(name).is_none() {
                    Self::unresolved(reporter, scope, "extended interface", name, element.position)?;
                }
            }
            for fault in interface.interface_faults() {
                if let Some(name) = fault.element().element_name() {
                    if fault.element_declaration().is_none() {
                        Self::unresolved(reporter, scope, "element declaration", name, fault.to_element().position)?;
                    }
                }
            }
            for operation in interface.interface_operations() {
                if operation.pattern().is_none() {
                    Self::report(
                        reporter,
                        scope.to_element(),
                        keys::UNKNOWN_MEP,
                        format!("Unknown message exchange pattern '{}'", operation.message_exchange_pattern()),
                        operation.to_element().position,
                    )?;
                }
                for message in operation.interface_message_references() {
                    if let Some(name) = message.element().element_name() {
                        if message.element_declaration().is_none() {
                            Self::unresolved(reporter, scope, "element declaration", name, message.to_element().position)?;
                        }
                    }
                }
                for fault in operation.interface_fault_references() {
                    if let Some(name) = fault.reference() {
                        if fault.interface_fault().is_none() {
                            Self::unresolved(reporter, scope, "interface fault", name, fault.to_element().position)?;
                        }
                    }
                }
            }
        }

        for binding in scope.bindings().into_iter().filter(|b| b.key().doc() == doc) {
            let element = binding.to_element();
            let Some(name) = element.interface.as_ref() else {
                continue;
            };
            if binding.interface().is_none() {
                Self::unresolved(reporter, scope, "interface", name, element.position)?;
                continue;
            }
            for fault in binding.binding_faults() {
                if let Some(name) = fault.reference() {
                    if fault.interface_fault().is_none() {
                        Self::unresolved(reporter, scope, "interface fault", name, fault.to_element().position)?;
                    }
                }
            }
            for operation in binding.binding_operations() {
                let Some(name) = operation.reference() else {
                    continue;
                };
                if operation.interface_operation().is_none() {
                    Self::unresolved(reporter, scope, "interface operation", name, operation.to_element().position)?;
                    continue;
                }
                for fault in operation.binding_fault_references() {
                    if let Some(name) = fault.reference() {
                        if fault.interface_fault_reference().is_none() {
                            Self::unresolved(reporter, scope, "interface fault reference", name, fault.to_element().position)?;
                        }
                    }
                }
            }
        }

        for service in scope.services().into_iter().filter(|s| s.key().doc() == doc) {
            let element = service.to_element();
            if let Some(name) = element.interface.as_ref() {
                if service.interface().is_none() {
                    Self::unresolved(reporter, scope, "interface", name, element.position)?;
                }
            }
            for endpoint in service.endpoints() {
                if let Some(name) = endpoint.to_element().binding.as_ref() {
                    if endpoint.binding().is_none() {
                        Self::unresolved(reporter, scope, "binding", name, endpoint.to_element().position)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl DocumentValidator for BasicValidator {
    fn validate(&self, set: &DescriptionSet, reporter: &mut ErrorReporter) -> Result<()> {
        for (_, element) in set.documents() {
            Self::check_imports(set, element, reporter)?;
            Self::check_names(element, reporter)?;
        }
        Ok(())
    }
}

impl ComponentValidator for BasicValidator {
    fn validate(&self, description: &Description<'_>, reporter: &mut ErrorReporter) -> Result<()> {
        let set = description.set();
        for &doc in description.documents_in_scope() {
            if let Some(scope) = set.description(doc) {
                Self::check_document(&scope, doc, reporter)?;
            }
        }
        Ok(())
    }
}

/// Whether `uri` names one of the predefined patterns
pub fn is_known_pattern(uri: &str) -> bool {
    MessageExchangePattern::lookup(uri).is_some()
}
