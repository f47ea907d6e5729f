//! # wsdl2
//!
//! A reader for WSDL 2.0 service descriptions.
//!
//! A read produces a [`DescriptionSet`] holding two views of the same input:
//!
//! - the **element model** ([`elements`]): one struct per WSDL element, as
//!   written, including extension attributes and elements;
//! - the **component model** ([`components`]): the abstract WSDL components,
//!   with the components of included and imported documents flattened in and
//!   QName references resolved.
//!
//! ## Features
//!
//! - `wsdl:import` / `wsdl:include` following with cycle detection
//! - Inline and imported XML Schema element/type declarations
//! - Extension registry with the SOAP, HTTP, RPC and `wsdlx` extensions
//! - Report-and-continue error handling with pluggable handlers
//! - XML catalogs, in-memory documents and resource limits
//!
//! ## Example
//!
//! ```rust,no_run
//! use wsdl2::{Component, Reader};
//!
//! let mut reader = Reader::new();
//! let set = reader.read_uri("path/to/service.wsdl")?;
//!
//! let description = set.to_component();
//! for binding in description.bindings() {
//!     for operation in binding.binding_operations() {
//!         println!("{:?}", operation.interface_operation().and_then(|op| op.name()));
//!     }
//! }
//! # Ok::<(), wsdl2::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod diagnostics;
pub mod limits;

// Utilities
pub mod namespaces;
pub mod names;
pub mod locations;
pub mod attributes;

// Resource loading
pub mod loaders;
pub mod catalog;
pub mod documents;
pub mod schema;

// Models
pub mod extensions;
pub mod elements;
pub mod model;
pub mod components;

// Reading and validation
pub mod reader;
pub mod validation;

// Re-exports for convenience
pub use components::{Component, Description};
pub use diagnostics::{Diagnostic, ErrorHandler, Severity};
pub use error::{Error, Result};
pub use extensions::{ExtensionRegistry, OwnerKind};
pub use model::{DescriptionSet, DocId};
pub use namespaces::{QName, WSDL_NAMESPACE};
pub use reader::Reader;

/// Version of the wsdl2 library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
