//! JSON field encoder.

use serde_json::{Map, Value};
use tracing::trace;

use crate::driver::{Composite, FieldEncoder};
use crate::error::{CodecError, Result};
use crate::model::Resource;
use crate::primitive::{Primitive, PrimitiveValue};

use super::{RESOURCE_TYPE_KEY, sidecar_key};

/// Builds one JSON object from a composite's field walk.
#[derive(Debug, Default)]
pub struct JsonEncoder {
    object: Map<String, Value>,
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> Map<String, Value> {
        self.object
    }

    fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.object.insert(key.into(), value);
    }
}

/// Encode a composite into a JSON object value.
pub(crate) fn encode_object<C: Composite>(value: &C) -> Result<Value> {
    let mut enc = JsonEncoder::new();
    value.encode_fields(&mut enc)?;
    Ok(Value::Object(enc.finish()))
}

/// Encode a resource, including its `resourceType`.
pub(crate) fn encode_resource(resource: &Resource) -> Result<Value> {
    let mut enc = JsonEncoder::new();
    resource.encode_fields(&mut enc)?;
    Ok(Value::Object(enc.finish()))
}

fn bare_value<T: Primitive>(name: &str, value: &T) -> Result<Value> {
    value
        .to_json()
        .map_err(|e| CodecError::unrepresentable(name, e.to_string()))
}

/// The `{"id": .., "extension": [..]}` object; `None` when there is nothing to carry.
fn sidecar_value<T>(primitive: &PrimitiveValue<T>) -> Result<Option<Value>> {
    if !primitive.has_sidecar() {
        return Ok(None);
    }
    let mut sidecar = Map::new();
    if let Some(id) = &primitive.id {
        sidecar.insert("id".to_string(), Value::String(id.clone()));
    }
    if !primitive.extension.is_empty() {
        let extensions = primitive
            .extension
            .iter()
            .map(encode_object)
            .collect::<Result<Vec<_>>>()?;
        sidecar.insert("extension".to_string(), Value::Array(extensions));
    }
    Ok(Some(Value::Object(sidecar)))
}

impl FieldEncoder for JsonEncoder {
    fn resource_type(&mut self, resource_type: &'static str) -> Result<()> {
        self.insert(RESOURCE_TYPE_KEY, Value::String(resource_type.to_string()));
        Ok(())
    }

    fn element_id(&mut self, id: Option<&str>) -> Result<()> {
        if let Some(id) = id {
            self.insert("id", Value::String(id.to_string()));
        }
        Ok(())
    }

    fn attribute(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        if let Some(value) = value {
            self.insert(name, Value::String(value.to_string()));
        }
        Ok(())
    }

    fn primitive<T: Primitive>(
        &mut self,
        name: &str,
        value: Option<&PrimitiveValue<T>>,
    ) -> Result<()> {
        let Some(primitive) = value else {
            return Ok(());
        };
        if let Some(bare) = &primitive.value {
            let bare = bare_value(name, bare)?;
            self.insert(name, bare);
        }
        if let Some(sidecar) = sidecar_value(primitive)? {
            self.insert(sidecar_key(name), sidecar);
        }
        Ok(())
    }

    fn primitive_list<T: Primitive>(
        &mut self,
        name: &str,
        values: &[PrimitiveValue<T>],
    ) -> Result<()> {
        // Both arrays stay index-aligned with the logical list; null pads
        // entries that have nothing on that side.
        if values.iter().any(PrimitiveValue::has_value) {
            let bare = values
                .iter()
                .map(|primitive| match &primitive.value {
                    Some(value) => bare_value(name, value),
                    None => Ok(Value::Null),
                })
                .collect::<Result<Vec<_>>>()?;
            self.insert(name, Value::Array(bare));
        }
        if values.iter().any(PrimitiveValue::has_sidecar) {
            let sidecars = values
                .iter()
                .map(|primitive| Ok(sidecar_value(primitive)?.unwrap_or(Value::Null)))
                .collect::<Result<Vec<_>>>()?;
            self.insert(sidecar_key(name), Value::Array(sidecars));
        }
        trace!(field = name, len = values.len(), "encoded repeated primitive");
        Ok(())
    }

    fn composite<C: Composite>(&mut self, name: &str, value: Option<&C>) -> Result<()> {
        if let Some(value) = value {
            let object = encode_object(value)?;
            self.insert(name, object);
        }
        Ok(())
    }

    fn composite_list<C: Composite>(&mut self, name: &str, values: &[C]) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        let items = values
            .iter()
            .map(encode_object)
            .collect::<Result<Vec<_>>>()?;
        self.insert(name, Value::Array(items));
        Ok(())
    }

    fn resource(&mut self, name: &str, value: Option<&Resource>) -> Result<()> {
        if let Some(resource) = value {
            let object = encode_resource(resource)?;
            self.insert(name, object);
        }
        Ok(())
    }

    fn resource_list(&mut self, name: &str, values: &[Resource]) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        let items = values
            .iter()
            .map(encode_resource)
            .collect::<Result<Vec<_>>>()?;
        self.insert(name, Value::Array(items));
        Ok(())
    }
}
