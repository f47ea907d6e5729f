//! Binding components

use std::collections::BTreeSet;
use std::fmt;

use crate::elements::{
    BindingElement, BindingFaultElement, BindingFaultReferenceElement,
    BindingMessageReferenceElement, BindingOperationElement, Direction, MessageLabel,
};
use crate::extensions::OwnerKind;
use crate::model::DescriptionSet;
use crate::namespaces::QName;

use super::{
    qualified_name, Component, ComponentKey, Description, Interface, InterfaceFault,
    InterfaceFaultReference, InterfaceMessageReference, InterfaceOperation, NodeKey,
};

/// Whether two bindings are the same component
pub(crate) fn same_binding(set: &DescriptionSet, a: ComponentKey, b: ComponentKey) -> bool {
    if a == b {
        return true;
    }
    let ea = &set.element(a.doc).bindings()[a.index];
    let eb = &set.element(b.doc).bindings()[b.index];
    let operation_refs = |e: &BindingElement| {
        e.operations
            .iter()
            .map(|o| o.reference.clone())
            .collect::<BTreeSet<_>>()
    };
    let fault_refs = |e: &BindingElement| {
        e.faults
            .iter()
            .map(|f| f.reference.clone())
            .collect::<BTreeSet<_>>()
    };
    qualified_name(set, a.doc, ea.name.as_ref()) == qualified_name(set, b.doc, eb.name.as_ref())
        && ea.interface == eb.interface
        && ea.binding_type == eb.binding_type
        && operation_refs(ea) == operation_refs(eb)
        && fault_refs(ea) == fault_refs(eb)
}

/// A `wsdl:binding`
#[derive(Clone, Copy)]
pub struct Binding<'a> {
    scope: Description<'a>,
    key: ComponentKey,
}

impl<'a> Binding<'a> {
    pub(crate) fn new(scope: Description<'a>, key: ComponentKey) -> Self {
        Self { scope, key }
    }

    /// Where the binding is declared
    pub fn key(&self) -> ComponentKey {
        self.key
    }

    /// `{name}`
    pub fn name(&self) -> Option<QName> {
        qualified_name(self.scope.set(), self.key.doc, self.to_element().name.as_ref())
    }

    /// `{interface}`, if declared and resolvable
    pub fn interface(&self) -> Option<Interface<'a>> {
        let name = self.to_element().interface.as_ref()?;
        self.scope.interface(name)
    }

    /// `{type}`
    pub fn binding_type(&self) -> Option<&'a str> {
        self.to_element().binding_type.as_deref()
    }

    /// `{binding faults}`
    pub fn binding_faults(&self) -> Vec<BindingFault<'a>> {
        (0..self.to_element().faults.len())
            .map(|index| BindingFault {
                binding: *self,
                index,
            })
            .collect()
    }

    /// `{binding operations}`
    pub fn binding_operations(&self) -> Vec<BindingOperation<'a>> {
        (0..self.to_element().operations.len())
            .map(|index| BindingOperation {
                binding: *self,
                index,
            })
            .collect()
    }

    /// The description this binding was obtained from
    pub fn parent(&self) -> Description<'a> {
        self.scope
    }
}

impl<'a> Component<'a> for Binding<'a> {
    type Element = BindingElement;

    fn to_element(&self) -> &'a BindingElement {
        &self.scope.set().element(self.key.doc).bindings()[self.key.index]
    }

    fn description(&self) -> Description<'a> {
        self.scope
    }

    fn node_key(&self) -> NodeKey {
        NodeKey::new(self.key.doc, OwnerKind::Binding, [self.key.index, 0, 0])
    }

    fn owner_kind(&self) -> OwnerKind {
        OwnerKind::Binding
    }
}

impl PartialEq for Binding<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.scope.set(), other.scope.set())
            && same_binding(self.scope.set(), self.key, other.key)
    }
}

impl fmt::Debug for Binding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("name", &self.name())
            .field("key", &self.key)
            .finish()
    }
}

/// A `wsdl:binding/wsdl:fault`
#[derive(Clone, Copy)]
pub struct BindingFault<'a> {
    binding: Binding<'a>,
    index: usize,
}

impl<'a> BindingFault<'a> {
    /// The `ref` attribute
    pub fn reference(&self) -> Option<&'a QName> {
        self.to_element().reference.as_ref()
    }

    /// `{interface fault}`, looked up in the bound interface and what it extends
    pub fn interface_fault(&self) -> Option<InterfaceFault<'a>> {
        let name = self.reference()?;
        self.binding.interface()?.in_scope_interface_fault(name)
    }

    /// The binding declaring this fault
    pub fn parent(&self) -> Binding<'a> {
        self.binding
    }
}

impl<'a> Component<'a> for BindingFault<'a> {
    type Element = BindingFaultElement;

    fn to_element(&self) -> &'a BindingFaultElement {
        &self.binding.to_element().faults[self.index]
    }

    fn description(&self) -> Description<'a> {
        self.binding.scope
    }

    fn node_key(&self) -> NodeKey {
        NodeKey::new(
            self.binding.key.doc,
            OwnerKind::BindingFault,
            [self.binding.key.index, self.index, 0],
        )
    }

    fn owner_kind(&self) -> OwnerKind {
        OwnerKind::BindingFault
    }
}

impl PartialEq for BindingFault<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.to_element(), other.to_element())
    }
}

impl fmt::Debug for BindingFault<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingFault")
            .field("ref", &self.reference())
            .finish()
    }
}

/// A `wsdl:binding/wsdl:operation`
#[derive(Clone, Copy)]
pub struct BindingOperation<'a> {
    binding: Binding<'a>,
    index: usize,
}

impl<'a> BindingOperation<'a> {
    /// The `ref` attribute
    pub fn reference(&self) -> Option<&'a QName> {
        self.to_element().reference.as_ref()
    }

    /// `{interface operation}`, looked up in the bound interface and what it extends
    pub fn interface_operation(&self) -> Option<InterfaceOperation<'a>> {
        let name = self.reference()?;
        self.binding.interface()?.in_scope_interface_operation(name)
    }

    /// `{binding message references}`
    pub fn binding_message_references(&self) -> Vec<BindingMessageReference<'a>> {
        (0..self.to_element().message_references.len())
            .map(|index| BindingMessageReference {
                operation: *self,
                index,
            })
            .collect()
    }

    /// `{binding fault references}`
    pub fn binding_fault_references(&self) -> Vec<BindingFaultReference<'a>> {
        (0..self.to_element().fault_references.len())
            .map(|index| BindingFaultReference {
                operation: *self,
                index,
            })
            .collect()
    }

    /// The binding declaring this operation
    pub fn parent(&self) -> Binding<'a> {
        self.binding
    }
}

impl<'a> Component<'a> for BindingOperation<'a> {
    type Element = BindingOperationElement;

    fn to_element(&self) -> &'a BindingOperationElement {
        &self.binding.to_element().operations[self.index]
    }

    fn description(&self) -> Description<'a> {
        self.binding.scope
    }

    fn node_key(&self) -> NodeKey {
        NodeKey::new(
            self.binding.key.doc,
            OwnerKind::BindingOperation,
            [self.binding.key.index, self.index, 0],
        )
    }

    fn owner_kind(&self) -> OwnerKind {
        OwnerKind::BindingOperation
    }
}

impl PartialEq for BindingOperation<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.to_element(), other.to_element())
    }
}

impl fmt::Debug for BindingOperation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingOperation")
            .field("ref", &self.reference())
            .finish()
    }
}

/// A `wsdl:input` or `wsdl:output` of a binding operation
#[derive(Clone, Copy)]
pub struct BindingMessageReference<'a> {
    operation: BindingOperation<'a>,
    index: usize,
}

impl<'a> BindingMessageReference<'a> {
    /// Whether this binds an input or an output
    pub fn direction(&self) -> Direction {
        self.to_element().direction
    }

    /// The `messageLabel` attribute as declared
    pub fn declared_message_label(&self) -> Option<&'a MessageLabel> {
        self.to_element().message_label.as_ref()
    }

    /// `{interface message reference}`
    ///
    /// Matched by direction and message label; an absent label is taken from
    /// the pattern of the interface operation.
    pub fn interface_message_reference(&self) -> Option<InterfaceMessageReference<'a>> {
        let operation = self.operation.interface_operation()?;
        let direction = self.direction();
        let label = match self.declared_message_label() {
            Some(label) => Some(label.clone()),
            None => operation
                .pattern()
                .and_then(|mep| mep.message_label_for(direction)),
        };
        operation
            .interface_message_references()
            .into_iter()
            .find(|m| m.direction() == direction && m.message_label() == label)
    }

    /// The binding operation declaring this reference
    pub fn parent(&self) -> BindingOperation<'a> {
        self.operation
    }
}

impl<'a> Component<'a> for BindingMessageReference<'a> {
    type Element = BindingMessageReferenceElement;

    fn to_element(&self) -> &'a BindingMessageReferenceElement {
        &self.operation.to_element().message_references[self.index]
    }

    fn description(&self) -> Description<'a> {
        self.operation.binding.scope
    }

    fn node_key(&self) -> NodeKey {
        let binding = self.operation.binding.key;
        NodeKey::new(
            binding.doc,
            OwnerKind::BindingMessageReference,
            [binding.index, self.operation.index, self.index],
        )
    }

    fn owner_kind(&self) -> OwnerKind {
        OwnerKind::BindingMessageReference
    }
}

impl PartialEq for BindingMessageReference<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.to_element(), other.to_element())
    }
}

impl fmt::Debug for BindingMessageReference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingMessageReference")
            .field("direction", &self.direction())
            .field("label", &self.declared_message_label())
            .finish()
    }
}

/// A `wsdl:infault` or `wsdl:outfault` of a binding operation
#[derive(Clone, Copy)]
pub struct BindingFaultReference<'a> {
    operation: BindingOperation<'a>,
    index: usize,
}

impl<'a> BindingFaultReference<'a> {
    /// Whether this binds an infault or an outfault
    pub fn direction(&self) -> Direction {
        self.to_element().direction
    }

    /// The `messageLabel` attribute as declared
    pub fn declared_message_label(&self) -> Option<&'a MessageLabel> {
        self.to_element().message_label.as_ref()
    }

    /// The `ref` attribute
    pub fn reference(&self) -> Option<&'a QName> {
        self.to_element().reference.as_ref()
    }

    /// `{interface fault reference}`
    ///
    /// Matched by fault name, direction and message label; an absent label is
    /// taken from the fault ruleset of the interface operation's pattern.
    pub fn interface_fault_reference(&self) -> Option<InterfaceFaultReference<'a>> {
        let operation = self.operation.interface_operation()?;
        let reference = self.reference()?;
        let direction = self.direction();
        let label = match self.declared_message_label() {
            Some(label) => Some(label.clone()),
            None => operation
                .pattern()
                .and_then(|mep| mep.fault_label_for(direction)),
        };
        operation
            .interface_fault_references()
            .into_iter()
            .find(|f| {
                f.reference() == Some(reference)
                    && f.direction() == direction
                    && f.message_label() == label
            })
    }

    /// The binding operation declaring this reference
    pub fn parent(&self) -> BindingOperation<'a> {
        self.operation
    }
}

impl<'a> Component<'a> for BindingFaultReference<'a> {
    type Element = BindingFaultReferenceElement;

    fn to_element(&self) -> &'a BindingFaultReferenceElement {
        &self.operation.to_element().fault_references[self.index]
    }

    fn description(&self) -> Description<'a> {
        self.operation.binding.scope
    }

    fn node_key(&self) -> NodeKey {
        let binding = self.operation.binding.key;
        NodeKey::new(
            binding.doc,
            OwnerKind::BindingFaultReference,
            [binding.index, self.operation.index, self.index],
        )
    }

    fn owner_kind(&self) -> OwnerKind {
        OwnerKind::BindingFaultReference
    }
}

impl PartialEq for BindingFaultReference<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.to_element(), other.to_element())
    }
}

impl fmt::Debug for BindingFaultReference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingFaultReference")
            .field("direction", &self.direction())
            .field("ref", &self.reference())
            .finish()
    }
}
