//! RPC style extension (`wrpc:signature`)

use std::any::Any;
use std::sync::Arc;

use crate::attributes::{AttributeType, AttributeValue};
use crate::namespaces::{QName, RPC_NAMESPACE};

use super::{ComponentExtensions, Extensions, ExtensionRegistry, OwnerKind};

/// Register `wrpc:signature` and its component view
pub fn register(registry: &mut ExtensionRegistry) {
    registry.register_attribute_type(
        OwnerKind::InterfaceOperation,
        QName::namespaced(RPC_NAMESPACE, "signature"),
        AttributeType::QNameTokenList,
    );
    registry.register_component_extension(
        OwnerKind::InterfaceOperation,
        RPC_NAMESPACE,
        RpcInterfaceOperationExtensions::build,
    );
}

/// Direction token of an RPC signature argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentDirection {
    /// `#in`
    In,
    /// `#out`
    Out,
    /// `#inout`
    InOut,
    /// `#return`
    Return,
    /// any other token, kept as written
    Other(String),
}

impl ArgumentDirection {
    /// Map a signature token
    pub fn from_token(token: &str) -> Self {
        match token {
            "#in" => Self::In,
            "#out" => Self::Out,
            "#inout" => Self::InOut,
            "#return" => Self::Return,
            other => Self::Other(other.to_string()),
        }
    }
}

/// One argument of an RPC signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcArgument {
    /// Element name of the argument
    pub name: QName,
    /// How the argument flows
    pub direction: ArgumentDirection,
}

/// RPC properties of an interface operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcInterfaceOperationExtensions {
    signature: Option<Vec<RpcArgument>>,
}

impl RpcInterfaceOperationExtensions {
    /// Read the view from an operation's extension content
    pub fn from_extensions(extensions: &Extensions) -> Self {
        let signature = match extensions.value(RPC_NAMESPACE, "signature") {
            Some(AttributeValue::QNameTokenList(pairs)) => Some(
                pairs
                    .iter()
                    .map(|(name, token)| RpcArgument {
                        name: name.clone(),
                        direction: ArgumentDirection::from_token(token),
                    })
                    .collect(),
            ),
            _ => None,
        };
        Self { signature }
    }

    /// `{rpc signature}`, if declared and well formed
    pub fn signature(&self) -> Option<&[RpcArgument]> {
        self.signature.as_deref()
    }

    fn build(extensions: &Extensions) -> Arc<dyn ComponentExtensions> {
        Arc::new(Self::from_extensions(extensions))
    }
}

impl ComponentExtensions for RpcInterfaceOperationExtensions {
    fn namespace(&self) -> &str {
        RPC_NAMESPACE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::ExtensionAttribute;

    #[test]
    fn test_signature() {
        let mut ext = Extensions::new();
        ext.add_attribute(ExtensionAttribute::new(
            QName::namespaced(RPC_NAMESPACE, "signature"),
            "tns:a #in tns:r #return",
            Some(AttributeValue::QNameTokenList(vec![
                (QName::namespaced("urn:t", "a"), "#in".to_string()),
                (QName::namespaced("urn:t", "r"), "#return".to_string()),
            ])),
        ));
        let view = RpcInterfaceOperationExtensions::from_extensions(&ext);
        let signature = view.signature().unwrap();
        assert_eq!(signature.len(), 2);
        assert_eq!(signature[0].direction, ArgumentDirection::In);
        assert_eq!(signature[1].direction, ArgumentDirection::Return);
    }

    #[test]
    fn test_invalid_signature_is_absent() {
        let mut ext = Extensions::new();
        ext.add_attribute(ExtensionAttribute::new(
            QName::namespaced(RPC_NAMESPACE, "signature"),
            "tns:a",
            None,
        ));
        assert!(RpcInterfaceOperationExtensions::from_extensions(&ext)
            .signature()
            .is_none());
    }
}
