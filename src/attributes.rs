//! Typed extension attributes
//!
//! Attributes from extension namespaces (`wsoap:version`, `whttp:cookies`,
//! `wsdlx:safe`, ...) are parsed according to the [`AttributeType`] the
//! extension registry holds for them. Attributes nobody registered are kept
//! as [`AttributeValue::Unknown`].

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::locations::validate_uri_reference;
use crate::namespaces::{NamespaceContext, QName};

/// The `#any` token accepted by several extension attributes
pub const ANY_TOKEN: &str = "#any";

/// Declared type of an extension attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    /// `xs:boolean`
    Boolean,
    /// `xs:anyURI`
    Uri,
    /// `xs:string`
    String,
    /// `xs:QName`
    QName,
    /// list of `xs:QName`
    QNameList,
    /// `xs:QName` or the `#any` token
    QNameOrToken,
    /// list of `xs:QName` or the `#any` token
    QNameListOrToken,
    /// `xs:int` or the `#any` token
    IntOrToken,
    /// alternating QName / token pairs (`wrpc:signature`)
    QNameTokenList,
}

/// A QName or the `#any` token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum QNameOrToken {
    /// `#any`
    Any,
    /// a qualified name
    QName(QName),
}

/// A QName list or the `#any` token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum QNameListOrToken {
    /// `#any`
    Any,
    /// a list of qualified names
    QNames(Vec<QName>),
}

/// An integer or the `#any` token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IntOrToken {
    /// `#any`
    Any,
    /// an integer
    Int(i32),
}

/// Parsed value of an extension attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AttributeValue {
    /// boolean value
    Boolean(bool),
    /// URI reference, kept as written
    Uri(String),
    /// string value
    String(String),
    /// qualified name
    QName(QName),
    /// list of qualified names
    QNameList(Vec<QName>),
    /// qualified name or `#any`
    QNameOrToken(QNameOrToken),
    /// list of qualified names or `#any`
    QNameListOrToken(QNameListOrToken),
    /// integer or `#any`
    IntOrToken(IntOrToken),
    /// QName / token pairs
    QNameTokenList(Vec<(QName, String)>),
    /// attribute no registered type exists for
    Unknown(String),
}

impl AttributeValue {
    /// Boolean content, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// String content of URI, string and unknown values
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Uri(s) | Self::String(s) | Self::Unknown(s) => Some(s),
            _ => None,
        }
    }

    /// QName content, if this is a QName
    pub fn as_qname(&self) -> Option<&QName> {
        match self {
            Self::QName(q) => Some(q),
            _ => None,
        }
    }
}

/// Parse an `xs:boolean` lexical value
pub fn parse_boolean(raw: &str) -> Result<bool> {
    match raw.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(Error::Value(format!("'{}' is not a boolean", other))),
    }
}

impl AttributeType {
    /// Parse a raw attribute value as this type
    pub fn parse(&self, raw: &str, namespaces: &NamespaceContext) -> Result<AttributeValue> {
        let value = raw.trim();
        match self {
            Self::Boolean => parse_boolean(value).map(AttributeValue::Boolean),
            Self::Uri => {
                validate_uri_reference(value)?;
                Ok(AttributeValue::Uri(value.to_string()))
            }
            Self::String => Ok(AttributeValue::String(raw.to_string())),
            Self::QName => parse_qname(value, namespaces).map(AttributeValue::QName),
            Self::QNameList => parse_qname_list(value, namespaces).map(AttributeValue::QNameList),
            Self::QNameOrToken => {
                if value == ANY_TOKEN {
                    Ok(AttributeValue::QNameOrToken(QNameOrToken::Any))
                } else {
                    parse_qname(value, namespaces)
                        .map(|q| AttributeValue::QNameOrToken(QNameOrToken::QName(q)))
                }
            }
            Self::QNameListOrToken => {
                if value == ANY_TOKEN {
                    Ok(AttributeValue::QNameListOrToken(QNameListOrToken::Any))
                } else {
                    parse_qname_list(value, namespaces)
                        .map(|l| AttributeValue::QNameListOrToken(QNameListOrToken::QNames(l)))
                }
            }
            Self::IntOrToken => {
                if value == ANY_TOKEN {
                    Ok(AttributeValue::IntOrToken(IntOrToken::Any))
                } else {
                    value
                        .parse::<i32>()
                        .map(|i| AttributeValue::IntOrToken(IntOrToken::Int(i)))
                        .map_err(|_| Error::Value(format!("'{}' is not an int or #any", value)))
                }
            }
            Self::QNameTokenList => {
                let tokens: Vec<&str> = value.split_whitespace().collect();
                if tokens.len() % 2 != 0 {
                    return Err(Error::Value(format!(
                        "'{}' does not consist of QName/token pairs",
                        value
                    )));
                }
                tokens
                    .chunks(2)
                    .map(|pair| {
                        let qname = parse_qname(pair[0], namespaces)?;
                        if !pair[1].starts_with('#') {
                            return Err(Error::Value(format!(
                                "'{}' is not a token, expected '#...'",
                                pair[1]
                            )));
                        }
                        Ok((qname, pair[1].to_string()))
                    })
                    .collect::<Result<Vec<_>>>()
                    .map(AttributeValue::QNameTokenList)
            }
        }
    }
}

fn parse_qname(value: &str, namespaces: &NamespaceContext) -> Result<QName> {
    crate::names::validate_qname(value)?;
    namespaces.resolve(value)
}

fn parse_qname_list(value: &str, namespaces: &NamespaceContext) -> Result<Vec<QName>> {
    value
        .split_whitespace()
        .map(|token| parse_qname(token, namespaces))
        .collect()
}

/// An attribute from an extension namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionAttribute {
    /// Attribute name
    pub name: QName,
    /// Value as written in the document
    pub raw: String,
    /// Parsed value; `None` when the raw value did not match the registered type
    pub value: Option<AttributeValue>,
}

impl ExtensionAttribute {
    /// Create an attribute
    pub fn new(name: QName, raw: impl Into<String>, value: Option<AttributeValue>) -> Self {
        Self {
            name,
            raw: raw.into(),
            value,
        }
    }

    /// Whether the raw value parsed as its registered type
    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }
}

impl fmt::Display for ExtensionAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=\"{}\"", self.name, self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> NamespaceContext {
        let mut ctx = NamespaceContext::new();
        ctx.add_prefix("tns", "http://example.org");
        ctx
    }

    #[test]
    fn test_boolean() {
        let ns = ctx();
        assert_eq!(
            AttributeType::Boolean.parse("true", &ns).unwrap(),
            AttributeValue::Boolean(true)
        );
        assert_eq!(
            AttributeType::Boolean.parse(" 0 ", &ns).unwrap(),
            AttributeValue::Boolean(false)
        );
        assert!(AttributeType::Boolean.parse("yes", &ns).is_err());
    }

    #[test]
    fn test_uri() {
        let ns = ctx();
        assert!(AttributeType::Uri
            .parse("http://www.w3.org/2003/05/soap/bindings/HTTP/", &ns)
            .is_ok());
        assert!(AttributeType::Uri.parse("not a uri", &ns).is_err());
    }

    #[test]
    fn test_qname_list_or_token() {
        let ns = ctx();
        assert_eq!(
            AttributeType::QNameListOrToken.parse("#any", &ns).unwrap(),
            AttributeValue::QNameListOrToken(QNameListOrToken::Any)
        );
        assert_eq!(
            AttributeType::QNameListOrToken
                .parse("tns:a tns:b", &ns)
                .unwrap(),
            AttributeValue::QNameListOrToken(QNameListOrToken::QNames(vec![
                QName::namespaced("http://example.org", "a"),
                QName::namespaced("http://example.org", "b"),
            ]))
        );
        assert!(AttributeType::QNameList.parse("missing:a", &ns).is_err());
    }

    #[test]
    fn test_int_or_token() {
        let ns = ctx();
        assert_eq!(
            AttributeType::IntOrToken.parse("404", &ns).unwrap(),
            AttributeValue::IntOrToken(IntOrToken::Int(404))
        );
        assert_eq!(
            AttributeType::IntOrToken.parse("#any", &ns).unwrap(),
            AttributeValue::IntOrToken(IntOrToken::Any)
        );
        assert!(AttributeType::IntOrToken.parse("four", &ns).is_err());
    }

    #[test]
    fn test_qname_token_list() {
        let ns = ctx();
        let value = AttributeType::QNameTokenList
            .parse("tns:a #in tns:b #return", &ns)
            .unwrap();
        assert_eq!(
            value,
            AttributeValue::QNameTokenList(vec![
                (QName::namespaced("http://example.org", "a"), "#in".to_string()),
                (QName::namespaced("http://example.org", "b"), "#return".to_string()),
            ])
        );
        assert!(AttributeType::QNameTokenList.parse("tns:a", &ns).is_err());
        assert!(AttributeType::QNameTokenList.parse("tns:a in", &ns).is_err());
    }
}
