//! Interface components

use std::collections::BTreeSet;
use std::fmt;

use crate::elements::{
    Direction, ElementContent, InterfaceElement, InterfaceFaultElement,
    InterfaceFaultReferenceElement, InterfaceMessageReferenceElement, InterfaceOperationElement,
    MessageContentModel, MessageLabel,
};
use crate::extensions::OwnerKind;
use crate::model::DescriptionSet;
use crate::namespaces::QName;
use crate::schema::ElementDeclaration;

use super::mep::{MessageExchangePattern, DEFAULT_PATTERN};
use super::{
    name_set, qualified_name, reference_set, Component, ComponentKey, Description, NodeKey,
};

/// Whether two interfaces are the same component
pub(crate) fn same_interface(set: &DescriptionSet, a: ComponentKey, b: ComponentKey) -> bool {
    if a == b {
        return true;
    }
    let ea = &set.element(a.doc).interfaces()[a.index];
    let eb = &set.element(b.doc).interfaces()[b.index];
    qualified_name(set, a.doc, ea.name.as_ref()) == qualified_name(set, b.doc, eb.name.as_ref())
        && ea.extends.iter().collect::<BTreeSet<_>>() == eb.extends.iter().collect::<BTreeSet<_>>()
        && name_set(ea.faults.iter().map(|f| f.name.as_ref()))
            == name_set(eb.faults.iter().map(|f| f.name.as_ref()))
        && name_set(ea.operations.iter().map(|o| o.name.as_ref()))
            == name_set(eb.operations.iter().map(|o| o.name.as_ref()))
        && reference_set(&ea.features, &ea.properties)
            == reference_set(&eb.features, &eb.properties)
}

/// A `wsdl:interface`
#[derive(Clone, Copy)]
pub struct Interface<'a> {
    scope: Description<'a>,
    key: ComponentKey,
}

impl<'a> Interface<'a> {
    pub(crate) fn new(scope: Description<'a>, key: ComponentKey) -> Self {
        Self { scope, key }
    }

    /// Where the interface is declared
    pub fn key(&self) -> ComponentKey {
        self.key
    }

    /// `{name}`
    pub fn name(&self) -> Option<QName> {
        qualified_name(self.scope.set(), self.key.doc, self.to_element().name.as_ref())
    }

    /// The description this interface was obtained from
    pub fn parent(&self) -> Description<'a> {
        self.scope
    }

    /// `{extended interfaces}`; names that do not resolve are left out
    pub fn extended_interfaces(&self) -> Vec<Interface<'a>> {
        self.to_element()
            .extends
            .iter()
            .filter_map(|name| self.scope.interface(name))
            .collect()
    }

    /// `styleDefault`
    pub fn style_default(&self) -> &'a [String] {
        &self.to_element().style_default
    }

    /// Faults declared directly on this interface
    pub fn interface_faults(&self) -> Vec<InterfaceFault<'a>> {
        (0..self.to_element().faults.len())
            .map(|index| InterfaceFault {
                interface: *self,
                index,
            })
            .collect()
    }

    /// Find a fault declared directly on this interface
    pub fn interface_fault(&self, name: &QName) -> Option<InterfaceFault<'a>> {
        self.interface_faults()
            .into_iter()
            .find(|f| f.name().as_ref() == Some(name))
    }

    /// Operations declared directly on this interface
    pub fn interface_operations(&self) -> Vec<InterfaceOperation<'a>> {
        (0..self.to_element().operations.len())
            .map(|index| InterfaceOperation {
                interface: *self,
                index,
            })
            .collect()
    }

    /// Find an operation declared directly on this interface
    pub fn interface_operation(&self, name: &QName) -> Option<InterfaceOperation<'a>> {
        self.interface_operations()
            .into_iter()
            .find(|o| o.name().as_ref() == Some(name))
    }

    /// Find a fault on this interface or any interface it extends
    pub fn in_scope_interface_fault(&self, name: &QName) -> Option<InterfaceFault<'a>> {
        self.search(&mut Vec::new(), &|i| i.interface_fault(name))
    }

    /// Find an operation on this interface or any interface it extends
    pub fn in_scope_interface_operation(&self, name: &QName) -> Option<InterfaceOperation<'a>> {
        self.search(&mut Vec::new(), &|i| i.interface_operation(name))
    }

    /// `{interface faults}`: own faults, then inherited ones
    pub fn all_interface_faults(&self) -> Vec<InterfaceFault<'a>> {
        let mut all: Vec<InterfaceFault<'a>> = Vec::new();
        self.walk(&mut Vec::new(), &mut |i| {
            for fault in i.interface_faults() {
                if !all.contains(&fault) {
                    all.push(fault);
                }
            }
        });
        all
    }

    /// `{interface operations}`: own operations, then inherited ones
    pub fn all_interface_operations(&self) -> Vec<InterfaceOperation<'a>> {
        let mut all: Vec<InterfaceOperation<'a>> = Vec::new();
        self.walk(&mut Vec::new(), &mut |i| {
            for operation in i.interface_operations() {
                if !all.contains(&operation) {
                    all.push(operation);
                }
            }
        });
        all
    }

    /// Depth-first search over this interface and its extension chain
    fn search<T>(
        &self,
        visited: &mut Vec<ComponentKey>,
        find: &dyn Fn(&Interface<'a>) -> Option<T>,
    ) -> Option<T> {
        if visited.contains(&self.key) {
            return None;
        }
        visited.push(self.key);
        if let Some(found) = find(self) {
            return Some(found);
        }
        self.extended_interfaces()
            .into_iter()
            .find_map(|extended| extended.search(visited, find))
    }

    fn walk(&self, visited: &mut Vec<ComponentKey>, visit: &mut dyn FnMut(&Interface<'a>)) {
        if visited.contains(&self.key) {
            return;
        }
        visited.push(self.key);
        visit(self);
        for extended in self.extended_interfaces() {
            extended.walk(visited, visit);
        }
    }
}

impl<'a> Component<'a> for Interface<'a> {
    type Element = InterfaceElement;

    fn to_element(&self) -> &'a InterfaceElement {
        &self.scope.set().element(self.key.doc).interfaces()[self.key.index]
    }

    fn description(&self) -> Description<'a> {
        self.scope
    }

    fn node_key(&self) -> NodeKey {
        NodeKey::new(self.key.doc, OwnerKind::Interface, [self.key.index, 0, 0])
    }

    fn owner_kind(&self) -> OwnerKind {
        OwnerKind::Interface
    }
}

impl PartialEq for Interface<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.scope.set(), other.scope.set())
            && same_interface(self.scope.set(), self.key, other.key)
    }
}

impl fmt::Debug for Interface<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interface")
            .field("name", &self.name())
            .field("key", &self.key)
            .finish()
    }
}

/// A `wsdl:interface/wsdl:fault`
#[derive(Clone, Copy)]
pub struct InterfaceFault<'a> {
    interface: Interface<'a>,
    index: usize,
}

impl<'a> InterfaceFault<'a> {
    /// `{name}`
    pub fn name(&self) -> Option<QName> {
        qualified_name(
            self.interface.scope.set(),
            self.interface.key.doc,
            self.to_element().name.as_ref(),
        )
    }

    /// The `element` attribute as written (absent means `#other`)
    pub fn element(&self) -> &'a ElementContent {
        &self.to_element().element
    }

    /// `{message content model}`
    pub fn message_content_model(&self) -> MessageContentModel {
        self.to_element().element.content_model()
    }

    /// `{element declaration}`, if the referenced declaration is in scope
    pub fn element_declaration(&self) -> Option<&'a ElementDeclaration> {
        let name = self.to_element().element.element_name()?;
        self.interface.scope.element_declaration(name)
    }

    /// The interface declaring this fault
    pub fn parent(&self) -> Interface<'a> {
        self.interface
    }
}

impl<'a> Component<'a> for InterfaceFault<'a> {
    type Element = InterfaceFaultElement;

    fn to_element(&self) -> &'a InterfaceFaultElement {
        &self.interface.to_element().faults[self.index]
    }

    fn description(&self) -> Description<'a> {
        self.interface.scope
    }

    fn node_key(&self) -> NodeKey {
        NodeKey::new(
            self.interface.key.doc,
            OwnerKind::InterfaceFault,
            [self.interface.key.index, self.index, 0],
        )
    }

    fn owner_kind(&self) -> OwnerKind {
        OwnerKind::InterfaceFault
    }
}

impl PartialEq for InterfaceFault<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.to_element(), other.to_element())
            || (self.name() == other.name() && self.element() == other.element())
    }
}

impl fmt::Debug for InterfaceFault<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceFault")
            .field("name", &self.name())
            .field("element", self.element())
            .finish()
    }
}

/// A `wsdl:interface/wsdl:operation`
#[derive(Clone, Copy)]
pub struct InterfaceOperation<'a> {
    interface: Interface<'a>,
    index: usize,
}

impl<'a> InterfaceOperation<'a> {
    /// `{name}`
    pub fn name(&self) -> Option<QName> {
        qualified_name(
            self.interface.scope.set(),
            self.interface.key.doc,
            self.to_element().name.as_ref(),
        )
    }

    /// `{message exchange pattern}`, in-out when not declared
    pub fn message_exchange_pattern(&self) -> &'a str {
        self.to_element()
            .pattern
            .as_deref()
            .map(str::trim)
            .unwrap_or(DEFAULT_PATTERN)
    }

    /// The predefined pattern, if the operation uses one
    pub fn pattern(&self) -> Option<&'static MessageExchangePattern> {
        MessageExchangePattern::lookup(self.message_exchange_pattern())
    }

    /// `{style}`: the operation's own styles, else the interface's `styleDefault`
    pub fn style(&self) -> Vec<&'a str> {
        let own = &self.to_element().style;
        let styles = if own.is_empty() {
            self.interface.style_default()
        } else {
            own.as_slice()
        };
        styles.iter().map(String::as_str).collect()
    }

    /// `{interface message references}`
    pub fn interface_message_references(&self) -> Vec<InterfaceMessageReference<'a>> {
        (0..self.to_element().message_references.len())
            .map(|index| InterfaceMessageReference {
                operation: *self,
                index,
            })
            .collect()
    }

    /// `{interface fault references}`
    pub fn interface_fault_references(&self) -> Vec<InterfaceFaultReference<'a>> {
        (0..self.to_element().fault_references.len())
            .map(|index| InterfaceFaultReference {
                operation: *self,
                index,
            })
            .collect()
    }

    /// The interface declaring this operation
    pub fn parent(&self) -> Interface<'a> {
        self.interface
    }

    fn message_signature(&self) -> BTreeSet<(Direction, Option<MessageLabel>)> {
        self.interface_message_references()
            .iter()
            .map(|m| (m.direction(), m.message_label()))
            .collect()
    }
}

impl<'a> Component<'a> for InterfaceOperation<'a> {
    type Element = InterfaceOperationElement;

    fn to_element(&self) -> &'a InterfaceOperationElement {
        &self.interface.to_element().operations[self.index]
    }

    fn description(&self) -> Description<'a> {
        self.interface.scope
    }

    fn node_key(&self) -> NodeKey {
        NodeKey::new(
            self.interface.key.doc,
            OwnerKind::InterfaceOperation,
            [self.interface.key.index, self.index, 0],
        )
    }

    fn owner_kind(&self) -> OwnerKind {
        OwnerKind::InterfaceOperation
    }
}

impl PartialEq for InterfaceOperation<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.to_element(), other.to_element())
            || (self.name() == other.name()
                && self.message_exchange_pattern() == other.message_exchange_pattern()
                && self.message_signature() == other.message_signature())
    }
}

impl fmt::Debug for InterfaceOperation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceOperation")
            .field("name", &self.name())
            .field("pattern", &self.message_exchange_pattern())
            .finish()
    }
}

/// A `wsdl:input` or `wsdl:output` of an interface operation
#[derive(Clone, Copy)]
pub struct InterfaceMessageReference<'a> {
    operation: InterfaceOperation<'a>,
    index: usize,
}

impl<'a> InterfaceMessageReference<'a> {
    /// `{direction}`
    pub fn direction(&self) -> Direction {
        self.to_element().direction
    }

    /// `{message label}`: as declared, else taken from the operation's pattern
    pub fn message_label(&self) -> Option<MessageLabel> {
        let element = self.to_element();
        element.message_label.clone().or_else(|| {
            self.operation
                .pattern()
                .and_then(|mep| mep.message_label_for(element.direction))
        })
    }

    /// The `element` attribute as written (absent means `#other`)
    pub fn element(&self) -> &'a ElementContent {
        &self.to_element().element
    }

    /// `{message content model}`
    pub fn message_content_model(&self) -> MessageContentModel {
        self.to_element().element.content_model()
    }

    /// `{element declaration}`, if the referenced declaration is in scope
    pub fn element_declaration(&self) -> Option<&'a ElementDeclaration> {
        let name = self.to_element().element.element_name()?;
        self.operation.interface.scope.element_declaration(name)
    }

    /// The operation declaring this reference
    pub fn parent(&self) -> InterfaceOperation<'a> {
        self.operation
    }
}

impl<'a> Component<'a> for InterfaceMessageReference<'a> {
    type Element = InterfaceMessageReferenceElement;

    fn to_element(&self) -> &'a InterfaceMessageReferenceElement {
        &self.operation.to_element().message_references[self.index]
    }

    fn description(&self) -> Description<'a> {
        self.operation.interface.scope
    }

    fn node_key(&self) -> NodeKey {
        let interface = self.operation.interface.key;
        NodeKey::new(
            interface.doc,
            OwnerKind::InterfaceMessageReference,
            [interface.index, self.operation.index, self.index],
        )
    }

    fn owner_kind(&self) -> OwnerKind {
        OwnerKind::InterfaceMessageReference
    }
}

impl PartialEq for InterfaceMessageReference<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.to_element(), other.to_element())
    }
}

impl fmt::Debug for InterfaceMessageReference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceMessageReference")
            .field("direction", &self.direction())
            .field("label", &self.message_label())
            .finish()
    }
}

/// A `wsdl:infault` or `wsdl:outfault` of an interface operation
#[derive(Clone, Copy)]
pub struct InterfaceFaultReference<'a> {
    operation: InterfaceOperation<'a>,
    index: usize,
}

impl<'a> InterfaceFaultReference<'a> {
    /// `{direction}`
    pub fn direction(&self) -> Direction {
        self.to_element().direction
    }

    /// `{message label}`: as declared, else taken from the pattern's fault ruleset
    pub fn message_label(&self) -> Option<MessageLabel> {
        let element = self.to_element();
        element.message_label.clone().or_else(|| {
            self.operation
                .pattern()
                .and_then(|mep| mep.fault_label_for(element.direction))
        })
    }

    /// The `ref` attribute
    pub fn reference(&self) -> Option<&'a QName> {
        self.to_element().reference.as_ref()
    }

    /// `{interface fault}`, resolved through the interface and what it extends
    pub fn interface_fault(&self) -> Option<InterfaceFault<'a>> {
        let name = self.reference()?;
        self.operation.interface.in_scope_interface_fault(name)
    }

    /// The operation declaring this reference
    pub fn parent(&self) -> InterfaceOperation<'a> {
        self.operation
    }
}

impl<'a> Component<'a> for InterfaceFaultReference<'a> {
    type Element = InterfaceFaultReferenceElement;

    fn to_element(&self) -> &'a InterfaceFaultReferenceElement {
        &self.operation.to_element().fault_references[self.index]
    }

    fn description(&self) -> Description<'a> {
        self.operation.interface.scope
    }

    fn node_key(&self) -> NodeKey {
        let interface = self.operation.interface.key;
        NodeKey::new(
            interface.doc,
            OwnerKind::InterfaceFaultReference,
            [interface.index, self.operation.index, self.index],
        )
    }

    fn owner_kind(&self) -> OwnerKind {
        OwnerKind::InterfaceFaultReference
    }
}

impl PartialEq for InterfaceFaultReference<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.to_element(), other.to_element())
    }
}

impl fmt::Debug for InterfaceFaultReference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceFaultReference")
            .field("direction", &self.direction())
            .field("ref", &self.reference())
            .finish()
    }
}
