//! Service components

use std::fmt;

use crate::elements::{EndpointElement, ServiceElement};
use crate::extensions::OwnerKind;
use crate::model::DescriptionSet;
use crate::names::NCName;
use crate::namespaces::QName;

use super::{
    name_set, qualified_name, Binding, Component, ComponentKey, Description, Interface, NodeKey,
};

/// Whether two services are the same component
pub(crate) fn same_service(set: &DescriptionSet, a: ComponentKey, b: ComponentKey) -> bool {
    if a == b {
        return true;
    }
    let ea = &set.element(a.doc).services()[a.index];
    let eb = &set.element(b.doc).services()[b.index];
    qualified_name(set, a.doc, ea.name.as_ref()) == qualified_name(set, b.doc, eb.name.as_ref())
        && ea.interface == eb.interface
        && name_set(ea.endpoints.iter().map(|e| e.name.as_ref()))
            == name_set(eb.endpoints.iter().map(|e| e.name.as_ref()))
}

/// A `wsdl:service`
#[derive(Clone, Copy)]
pub struct Service<'a> {
    scope: Description<'a>,
    key: ComponentKey,
}

impl<'a> Service<'a> {
    pub(crate) fn new(scope: Description<'a>, key: ComponentKey) -> Self {
        Self { scope, key }
    }

    /// Where the service is declared
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

    /// `{endpoints}`
    pub fn endpoints(&self) -> Vec<Endpoint<'a>> {
        (0..self.to_element().endpoints.len())
            .map(|index| Endpoint {
                service: *self,
                index,
            })
            .collect()
    }

    /// Find an endpoint by local name
    pub fn endpoint(&self, name: &str) -> Option<Endpoint<'a>> {
        self.endpoints()
            .into_iter()
            .find(|e| e.name().map(NCName::as_str) == Some(name))
    }

    /// The description this service was obtained from
    pub fn parent(&self) -> Description<'a> {
        self.scope
    }
}

impl<'a> Component<'a> for Service<'a> {
    type Element = ServiceElement;

    fn to_element(&self) -> &'a ServiceElement {
        &self.scope.set().element(self.key.doc).services()[self.key.index]
    }

    fn description(&self) -> Description<'a> {
        self.scope
    }

    fn node_key(&self) -> NodeKey {
        NodeKey::new(self.key.doc, OwnerKind::Service, [self.key.index, 0, 0])
    }

    fn owner_kind(&self) -> OwnerKind {
        OwnerKind::Service
    }
}

impl PartialEq for Service<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.scope.set(), other.scope.set())
            && same_service(self.scope.set(), self.key, other.key)
    }
}

impl fmt::Debug for Service<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("name", &self.name())
            .field("key", &self.key)
            .finish()
    }
}

/// A `wsdl:endpoint`
#[derive(Clone, Copy)]
pub struct Endpoint<'a> {
    service: Service<'a>,
    index: usize,
}

impl<'a> Endpoint<'a> {
    /// `{name}`
    pub fn name(&self) -> Option<&'a NCName> {
        self.to_element().name.as_ref()
    }

    /// `{binding}`, if declared and resolvable
    pub fn binding(&self) -> Option<Binding<'a>> {
        let name = self.to_element().binding.as_ref()?;
        self.service.scope.binding(name)
    }

    /// `{address}`
    pub fn address(&self) -> Option<&'a str> {
        self.to_element().address.as_deref()
    }

    /// The service declaring this endpoint
    pub fn parent(&self) -> Service<'a> {
        self.service
    }
}

impl<'a> Component<'a> for Endpoint<'a> {
    type Element = EndpointElement;

    fn to_element(&self) -> &'a EndpointElement {
        &self.service.to_element().endpoints[self.index]
    }

    fn description(&self) -> Description<'a> {
        self.service.scope
    }

    fn node_key(&self) -> NodeKey {
        NodeKey::new(
            self.service.key.doc,
            OwnerKind::Endpoint,
            [self.service.key.index, self.index, 0],
        )
    }

    fn owner_kind(&self) -> OwnerKind {
        OwnerKind::Endpoint
    }
}

impl PartialEq for Endpoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.to_element(), other.to_element())
    }
}

impl fmt::Debug for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("name", &self.name())
            .field("address", &self.address())
            .finish()
    }
}
