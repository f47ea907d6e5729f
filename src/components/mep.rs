//! Predefined message exchange patterns
//!
//! The eight patterns of WSDL 2.0 Part 2, with their placeholder messages and
//! fault propagation rulesets. They supply the message label of a message or
//! fault reference that does not declare one.

use crate::elements::{Direction, MessageLabel};

/// Base URI of the predefined patterns
pub const MEP_BASE: &str = "http://www.w3.org/2006/01/wsdl/";

/// `in-only`
pub const IN_ONLY: &str = "http://www.w3.org/2006/01/wsdl/in-only";
/// `robust-in-only`
pub const ROBUST_IN_ONLY: &str = "http://www.w3.org/2006/01/wsdl/robust-in-only";
/// `in-out`
pub const IN_OUT: &str = "http://www.w3.org/2006/01/wsdl/in-out";
/// `in-opt-out`
pub const IN_OPT_OUT: &str = "http://www.w3.org/2006/01/wsdl/in-opt-out";
/// `out-only`
pub const OUT_ONLY: &str = "http://www.w3.org/2006/01/wsdl/out-only";
/// `robust-out-only`
pub const ROBUST_OUT_ONLY: &str = "http://www.w3.org/2006/01/wsdl/robust-out-only";
/// `out-in`
pub const OUT_IN: &str = "http://www.w3.org/2006/01/wsdl/out-in";
/// `out-opt-in`
pub const OUT_OPT_IN: &str = "http://www.w3.org/2006/01/wsdl/out-opt-in";

/// Pattern of an operation without a `pattern` attribute
pub const DEFAULT_PATTERN: &str = IN_OUT;

/// How faults relate to the messages of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultPropagation {
    /// The pattern has no faults
    NoFaults,
    /// A fault may follow a message, in the opposite direction
    MessageTriggersFault,
    /// A fault may take the place of a message, in the same direction
    FaultReplacesMessage,
}

/// A placeholder message of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    /// Message label
    pub label: &'static str,
    /// Direction of the message
    pub direction: Direction,
}

const IN: Placeholder = Placeholder {
    label: "In",
    direction: Direction::In,
};
const OUT: Placeholder = Placeholder {
    label: "Out",
    direction: Direction::Out,
};

/// A message exchange pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageExchangePattern {
    /// Pattern URI
    pub uri: &'static str,
    /// Placeholder messages in exchange order
    pub placeholders: &'static [Placeholder],
    /// Fault ruleset
    pub faults: FaultPropagation,
}

static PATTERNS: &[MessageExchangePattern] = &[
    MessageExchangePattern {
        uri: IN_ONLY,
        placeholders: &[IN],
        faults: FaultPropagation::NoFaults,
    },
    MessageExchangePattern {
        uri: ROBUST_IN_ONLY,
        placeholders: &[IN],
        faults: FaultPropagation::MessageTriggersFault,
    },
    MessageExchangePattern {
        uri: IN_OUT,
        placeholders: &[IN, OUT],
        faults: FaultPropagation::FaultReplacesMessage,
    },
    MessageExchangePattern {
        uri: IN_OPT_OUT,
        placeholders: &[IN, OUT],
        faults: FaultPropagation::MessageTriggersFault,
    },
    MessageExchangePattern {
        uri: OUT_ONLY,
        placeholders: &[OUT],
        faults: FaultPropagation::NoFaults,
    },
    MessageExchangePattern {
        uri: ROBUST_OUT_ONLY,
        placeholders: &[OUT],
        faults: FaultPropagation::MessageTriggersFault,
    },
    MessageExchangePattern {
        uri: OUT_IN,
        placeholders: &[OUT, IN],
        faults: FaultPropagation::FaultReplacesMessage,
    },
    MessageExchangePattern {
        uri: OUT_OPT_IN,
        placeholders: &[OUT, IN],
        faults: FaultPropagation::MessageTriggersFault,
    },
];

impl MessageExchangePattern {
    /// Look up a predefined pattern by URI
    pub fn lookup(uri: &str) -> Option<&'static Self> {
        PATTERNS.iter().find(|p| p.uri == uri.trim())
    }

    /// All predefined patterns
    pub fn all() -> &'static [Self] {
        PATTERNS
    }

    /// Whether one of the placeholders carries `label`
    pub fn has_label(&self, label: &MessageLabel) -> bool {
        self.placeholders.iter().any(|p| p.label == label.as_str())
    }

    /// Label of the only placeholder with `direction`
    fn unique_label(&self, direction: Direction) -> Option<MessageLabel> {
        let mut candidates = self.placeholders.iter().filter(|p| p.direction == direction);
        match (candidates.next(), candidates.next()) {
            (Some(only), None) => Some(MessageLabel::parse(only.label)),
            _ => None,
        }
    }

    /// Label of a message reference with `direction` that declares none
    pub fn message_label_for(&self, direction: Direction) -> Option<MessageLabel> {
        self.unique_label(direction)
    }

    /// Label of a fault reference with `direction` that declares none
    pub fn fault_label_for(&self, direction: Direction) -> Option<MessageLabel> {
        match self.faults {
            FaultPropagation::NoFaults => None,
            FaultPropagation::FaultReplacesMessage => self.unique_label(direction),
            FaultPropagation::MessageTriggersFault => self.unique_label(direction.opposite()),
        }
    }
}
