//! Feature and Property components

use crate::elements::{FeatureElement, PropertyElement, PropertyValue};
use crate::namespaces::QName;

/// A `wsdl:feature`
#[derive(Debug, Clone, Copy)]
pub struct Feature<'a> {
    element: &'a FeatureElement,
}

impl<'a> Feature<'a> {
    pub(crate) fn new(element: &'a FeatureElement) -> Self {
        Self { element }
    }

    /// `{ref}`
    pub fn uri(&self) -> Option<&'a str> {
        self.element.uri.as_deref()
    }

    /// `{required}`, false when not declared
    pub fn is_required(&self) -> bool {
        self.element.required.unwrap_or(false)
    }

    /// The element this component was built from
    pub fn to_element(&self) -> &'a FeatureElement {
        self.element
    }
}

impl PartialEq for Feature<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.element, other.element)
            || (self.uri() == other.uri() && self.is_required() == other.is_required())
    }
}

/// A `wsdl:property`
#[derive(Debug, Clone, Copy)]
pub struct Property<'a> {
    element: &'a PropertyElement,
}

impl<'a> Property<'a> {
    pub(crate) fn new(element: &'a PropertyElement) -> Self {
        Self { element }
    }

    /// `{ref}`
    pub fn uri(&self) -> Option<&'a str> {
        self.element.uri.as_deref()
    }

    /// `{value}`
    pub fn value(&self) -> Option<&'a PropertyValue> {
        self.element.value.as_ref()
    }

    /// `{value constraint}` when it names a type
    pub fn constraint(&self) -> Option<&'a QName> {
        self.element.constraint.as_ref()
    }

    /// Whether the constraint was the `#value` token
    pub fn has_value_token(&self) -> bool {
        self.element.has_value_token
    }

    /// The element this component was built from
    pub fn to_element(&self) -> &'a PropertyElement {
        self.element
    }
}

impl PartialEq for Property<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.element, other.element)
            || (self.uri() == other.uri()
                && self.constraint() == other.constraint()
                && self.has_value_token() == other.has_value_token()
                && self.value().and_then(|v| v.text.as_deref())
                    == other.value().and_then(|v| v.text.as_deref()))
    }
}
