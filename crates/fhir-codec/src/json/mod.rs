//! Object-notation (JSON) wire format.
//!
//! | Rule | Projection |
//! |------|------------|
//! | primitive | bare member `name`, sidecar member `_name` with `id`/`extension` |
//! | repeated primitive | `name` array and `_name` array, index-aligned, `null` padded |
//! | choice | member named `name` + type suffix (`valueQuantity`) |
//! | resource container | nested object whose `resourceType` selects the kind |
//!
//! Absent fields and empty lists are omitted.
//!
//! # Example
//!
//! ```
//! use fhir_codec::json;
//!
//! let resource = json::from_str(r#"{"resourceType": "Patient", "active": true}"#)?;
//! assert_eq!(resource.resource_type(), "Patient");
//! assert_eq!(json::to_string(&resource)?, r#"{"resourceType":"Patient","active":true}"#);
//! # Ok::<(), fhir_codec::CodecError>(())
//! ```

mod decoder;
mod encoder;

pub use decoder::JsonDecoder;
pub use encoder::JsonEncoder;

use serde_json::Value;

use crate::driver::Composite;
use crate::error::{CodecError, Result, WireFormat};
use crate::model::Resource;
use crate::options::JsonOptions;
use crate::registry::{ResourceRegistry, default_registry};

/// Discriminator member of every resource object.
pub const RESOURCE_TYPE_KEY: &str = "resourceType";

/// Sidecar member name for a primitive field: `birthDate` -> `_birthDate`.
pub fn sidecar_key(name: &str) -> String {
    format!("_{name}")
}

/// Encode a resource into a JSON value.
pub fn to_value(resource: &Resource) -> Result<Value> {
    encoder::encode_resource(resource)
}

/// Encode a resource as compact JSON.
pub fn to_string(resource: &Resource) -> Result<String> {
    to_string_with(resource, &JsonOptions::default())
}

/// Encode a resource as indented JSON.
pub fn to_string_pretty(resource: &Resource) -> Result<String> {
    to_string_with(resource, &JsonOptions::default().with_pretty(true))
}

/// Encode a resource with explicit options.
pub fn to_string_with(resource: &Resource, options: &JsonOptions) -> Result<String> {
    let value = to_value(resource)?;
    let text = if options.pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    };
    text.map_err(|e| CodecError::unrepresentable(resource.resource_type(), e.to_string()))
}

/// Decode a resource using the default registry.
pub fn from_str(input: &str) -> Result<Resource> {
    from_str_with(input, default_registry())
}

/// Decode a resource using the given registry.
pub fn from_str_with(input: &str, registry: &ResourceRegistry) -> Result<Resource> {
    let value: Value = serde_json::from_str(input)
        .map_err(|e| CodecError::malformed(WireFormat::Json, e.to_string()))?;
    from_value(value, registry)
}

/// Decode a resource from an already parsed JSON value.
pub fn from_value(value: Value, registry: &ResourceRegistry) -> Result<Resource> {
    match value {
        Value::Object(object) => decoder::decode_resource_object(object, registry, String::new()),
        _ => Err(CodecError::malformed(
            WireFormat::Json,
            "resource must be a JSON object",
        )),
    }
}

/// Encode a standalone composite (datatype or backbone element).
pub fn encode_composite<C: Composite>(value: &C) -> Result<Value> {
    encoder::encode_object(value)
}

/// Decode a standalone composite using the default registry.
pub fn decode_composite<C: Composite>(value: Value) -> Result<C> {
    decode_composite_with(value, default_registry())
}

/// Decode a standalone composite; nested resources resolve through `registry`.
pub fn decode_composite_with<C: Composite>(value: Value, registry: &ResourceRegistry) -> Result<C> {
    let Value::Object(object) = value else {
        return Err(CodecError::malformed(
            WireFormat::Json,
            format!("{} must be a JSON object", C::TYPE_NAME),
        ));
    };
    let mut dec = JsonDecoder::new(object, registry, C::TYPE_NAME.to_string());
    let composite = C::decode_fields(&mut dec)?;
    dec.finish();
    Ok(composite)
}
