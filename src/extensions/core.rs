//! WSDL extensions namespace (`wsdlx`)

use std::any::Any;
use std::sync::Arc;

use crate::attributes::AttributeType;
use crate::namespaces::{QName, WSDLX_NAMESPACE};

use super::{ComponentExtensions, Extensions, ExtensionRegistry, OwnerKind};

/// Register `wsdlx:safe` and its component view
pub fn register(registry: &mut ExtensionRegistry) {
    registry.register_attribute_type(
        OwnerKind::InterfaceOperation,
        QName::namespaced(WSDLX_NAMESPACE, "safe"),
        AttributeType::Boolean,
    );
    registry.register_component_extension(
        OwnerKind::InterfaceOperation,
        WSDLX_NAMESPACE,
        InterfaceOperationExtensions::build,
    );
}

/// `wsdlx` properties of an interface operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceOperationExtensions {
    safe: Option<bool>,
}

impl InterfaceOperationExtensions {
    /// Read the view from an operation's extension content
    pub fn from_extensions(extensions: &Extensions) -> Self {
        Self {
            safe: extensions
                .value(WSDLX_NAMESPACE, "safe")
                .and_then(|v| v.as_bool()),
        }
    }

    /// `{safety}`: whether the operation is declared safe (defaults to false)
    pub fn is_safety(&self) -> bool {
        self.safe.unwrap_or(false)
    }

    fn build(extensions: &Extensions) -> Arc<dyn ComponentExtensions> {
        Arc::new(Self::from_extensions(extensions))
    }
}

impl ComponentExtensions for InterfaceOperationExtensions {
    fn namespace(&self) -> &str {
        WSDLX_NAMESPACE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttributeValue, ExtensionAttribute};

    #[test]
    fn test_safety_defaults_to_false() {
        let view = InterfaceOperationExtensions::from_extensions(&Extensions::new());
        assert!(!view.is_safety());
    }

    #[test]
    fn test_safety_declared() {
        let mut ext = Extensions::new();
        ext.add_attribute(ExtensionAttribute::new(
            QName::namespaced(WSDLX_NAMESPACE, "safe"),
            "true",
            Some(AttributeValue::Boolean(true)),
        ));
        assert!(InterfaceOperationExtensions::from_extensions(&ext).is_safety());
    }
}
