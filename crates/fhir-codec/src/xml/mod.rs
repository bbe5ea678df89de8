//! Markup (XML) wire format.
//!
//! Every element is in the `http://hl7.org/fhir` namespace, declared once on
//! the root. Primitive values travel in a `value` attribute, element ids in
//! an `id` attribute, and extensions as `<extension>` children:
//!
//! ```xml
//! <Patient xmlns="http://hl7.org/fhir">
//!   <birthDate id="b1" value="1974-12-25"/>
//!   <contained><Basic/></contained>
//! </Patient>
//! ```
//!
//! A resource container is a wrapper element holding one child element whose
//! tag is the resource type. Unknown attributes or elements are rejected.

mod decoder;
mod encoder;
mod node;

pub use decoder::XmlDecoder;
pub use encoder::XmlEncoder;
pub use node::{FHIR_NS, MAX_DEPTH, XmlNode, parse_document, write_document};

use crate::driver::Composite;
use crate::error::Result;
use crate::model::Resource;
use crate::options::XmlOptions;
use crate::registry::{ResourceRegistry, default_registry};

/// Encode a resource as compact XML without a declaration.
pub fn to_string(resource: &Resource) -> Result<String> {
    to_string_with(resource, &XmlOptions::default())
}

/// Encode a resource with explicit options.
pub fn to_string_with(resource: &Resource, options: &XmlOptions) -> Result<String> {
    let root = encoder::encode_resource(resource)?;
    write_document(&root, options)
}

/// Decode a resource using the default registry.
pub fn from_str(input: &str) -> Result<Resource> {
    from_str_with(input, default_registry())
}

/// Decode a resource using the given registry.
///
/// The root tag selects the resource kind.
pub fn from_str_with(input: &str, registry: &ResourceRegistry) -> Result<Resource> {
    let root = parse_document(input)?;
    decoder::decode_resource_node(root, registry, String::new())
}

/// Encode a standalone composite as an element named `name`.
pub fn encode_composite<C: Composite>(name: &str, value: &C) -> Result<XmlNode> {
    encoder::encode_element(name, value)
}

/// Decode a standalone composite from an element tree.
pub fn decode_composite<C: Composite>(node: XmlNode) -> Result<C> {
    decode_composite_with(node, default_registry())
}

/// Decode a standalone composite; nested resources resolve through `registry`.
pub fn decode_composite_with<C: Composite>(node: XmlNode, registry: &ResourceRegistry) -> Result<C> {
    let mut dec = XmlDecoder::new(node, registry, C::TYPE_NAME.to_string());
    let composite = C::decode_fields(&mut dec)?;
    dec.finish()?;
    Ok(composite)
}
