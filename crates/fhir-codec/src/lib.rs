//! FHIR wire codec.
//!
//! Encodes and decodes FHIR composite types in the object notation (JSON)
//! and the markup notation (XML). The kernel is four rules applied field by
//! field:
//!
//! - [`PrimitiveValue`]: a scalar with an optional element id and
//!   extensions, which travel in a `_name` sidecar member in JSON.
//! - [`Choice`]: a `value[x]` field holding one of a closed set of types,
//!   named on the wire by a type suffix.
//! - Repeated primitives: index-aligned bare and sidecar arrays.
//! - [`Resource`]: a polymorphic container dispatched by discriminator
//!   through a [`ResourceRegistry`].
//!
//! Each composite declares its fields once through [`Composite`]; the
//! format-specific encoders and decoders supply the projection.
//!
//! # Example
//!
//! ```
//! use fhir_codec::model::{HumanName, Patient};
//! use fhir_codec::{Resource, json, xml};
//!
//! let patient = Patient {
//!     name: vec![HumanName::new("Chalmers", &["Peter", "James"])],
//!     ..Patient::default()
//! };
//! let resource = Resource::from(patient);
//!
//! let text = json::to_string(&resource)?;
//! assert_eq!(
//!     text,
//!     r#"{"resourceType":"Patient","name":[{"family":"Chalmers","given":["Peter","James"]}]}"#
//! );
//!
//! let markup = xml::to_string(&resource)?;
//! assert_eq!(xml::from_str(&markup)?, json::from_str(&text)?);
//! # Ok::<(), fhir_codec::CodecError>(())
//! ```

pub mod choice;
pub mod driver;
mod error;
pub mod json;
pub mod model;
pub mod options;
pub mod primitive;
pub mod registry;
pub mod xml;

pub use choice::Choice;
pub use driver::{Composite, FieldDecoder, FieldEncoder, ResourceKind};
pub use error::{CodecError, ErrorKind, NodeKind, Result, WireFormat};
pub use model::Resource;
pub use options::{JsonOptions, XmlOptions};
pub use primitive::{Primitive, PrimitiveValue, ValueError};
pub use registry::{ResourceRegistry, default_registry};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
