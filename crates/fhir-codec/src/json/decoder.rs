//! JSON field decoder.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::driver::{Composite, FieldDecoder};
use crate::error::{CodecError, Result, WireFormat};
use crate::model::{Extension, Resource};
use crate::primitive::{Primitive, PrimitiveValue};
use crate::registry::ResourceRegistry;

use super::{RESOURCE_TYPE_KEY, sidecar_key};

fn malformed(message: impl Into<String>) -> CodecError {
    CodecError::malformed(WireFormat::Json, message)
}

/// Consumes the members of one JSON object as a composite's fields are walked.
///
/// Members nobody asked for are logged and dropped by [`JsonDecoder::finish`].
pub struct JsonDecoder<'r> {
    object: Map<String, Value>,
    registry: &'r ResourceRegistry,
    path: String,
}

impl<'r> JsonDecoder<'r> {
    pub fn new(object: Map<String, Value>, registry: &'r ResourceRegistry, path: String) -> Self {
        Self {
            object,
            registry,
            path,
        }
    }

    /// Location of this object in the document, e.g. `Patient.name[0]`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Finish the object, skipping members no field claimed.
    pub fn finish(self) {
        for key in self.object.keys() {
            debug!(path = %self.path, member = %key, "skipping unknown JSON member");
        }
    }

    fn field_path(&self, name: &str) -> String {
        format!("{}.{}", self.path, name)
    }

    fn child(&self, object: Map<String, Value>, path: String) -> JsonDecoder<'r> {
        JsonDecoder::new(object, self.registry, path)
    }

    fn take(&mut self, key: &str) -> Option<Value> {
        self.object.remove(key)
    }

    /// Take a member that must be a JSON array.
    fn take_array(&mut self, key: &str) -> Result<Option<Vec<Value>>> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(_) => Err(malformed(format!(
                "{} must be an array",
                self.field_path(key)
            ))),
        }
    }

    fn take_string(&mut self, key: &str) -> Result<Option<String>> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(_) => Err(malformed(format!(
                "{} must be a string",
                self.field_path(key)
            ))),
        }
    }

    fn scalar<T: Primitive>(&self, path: &str, value: &Value) -> Result<T> {
        T::from_json(value).map_err(|e| malformed(format!("{path}: {e}")))
    }

    /// Read a `{"id": .., "extension": [..]}` sidecar object.
    fn sidecar(&self, path: String, value: Value) -> Result<(Option<String>, Vec<Extension>)> {
        let Value::Object(object) = value else {
            return Err(malformed(format!("{path} must be an object")));
        };
        let mut dec = self.child(object, path);
        let id = dec.element_id()?;
        let extension = dec.composite_list("extension")?;
        dec.finish();
        Ok((id, extension))
    }

    fn decode_composite_value<C: Composite>(&self, path: String, value: Value) -> Result<C> {
        let Value::Object(object) = value else {
            return Err(malformed(format!("{path} must be an object")));
        };
        let mut dec = self.child(object, path);
        let composite = C::decode_fields(&mut dec)?;
        dec.finish();
        Ok(composite)
    }

    fn decode_resource_value(&self, path: String, value: Value) -> Result<Resource> {
        let Value::Object(object) = value else {
            return Err(malformed(format!("{path} must be an object")));
        };
        decode_resource_object(object, self.registry, path)
    }
}

/// Dispatch a JSON object on its `resourceType` and decode it.
///
/// Only the discriminator is inspected before the registry lookup; an
/// unregistered kind fails without decoding anything else.
pub(crate) fn decode_resource_object(
    object: Map<String, Value>,
    registry: &ResourceRegistry,
    path: String,
) -> Result<Resource> {
    let resource_type = match object.get(RESOURCE_TYPE_KEY) {
        Some(Value::String(resource_type)) => resource_type.clone(),
        Some(_) => {
            return Err(malformed(format!("{path}.resourceType must be a string")));
        }
        None => return Err(malformed(format!("{path} has no resourceType"))),
    };
    let entry = registry
        .get(&resource_type)
        .ok_or_else(|| CodecError::unknown_discriminator(&resource_type))?;
    debug!(path = %path, resource_type = %resource_type, "decoding JSON resource");
    let path = if path.is_empty() {
        resource_type
    } else {
        format!("{path}({resource_type})")
    };
    let mut dec = JsonDecoder::new(object, registry, path);
    let resource = (entry.decode_json)(&mut dec)?;
    dec.finish();
    Ok(resource)
}

impl FieldDecoder for JsonDecoder<'_> {
    fn format(&self) -> WireFormat {
        WireFormat::Json
    }

    fn resource_type(&mut self, expected: &'static str) -> Result<()> {
        match self.take_string(RESOURCE_TYPE_KEY)? {
            Some(found) if found == expected => Ok(()),
            Some(found) => Err(malformed(format!(
                "{}: resourceType '{found}' does not match {expected}",
                self.path
            ))),
            None => Err(malformed(format!("{} has no resourceType", self.path))),
        }
    }

    fn element_id(&mut self) -> Result<Option<String>> {
        self.take_string("id")
    }

    fn attribute(&mut self, name: &str) -> Result<Option<String>> {
        self.take_string(name)
    }

    fn has_field(&self, name: &str) -> bool {
        self.object.contains_key(name)
    }

    fn has_sidecar(&self, name: &str) -> bool {
        self.object.contains_key(&sidecar_key(name))
    }

    fn primitive<T: Primitive>(&mut self, name: &str) -> Result<Option<PrimitiveValue<T>>> {
        let path = self.field_path(name);
        let value = match self.take(name) {
            None => None,
            Some(Value::Null) => return Err(malformed(format!("{path} must not be null"))),
            Some(value) => Some(self.scalar::<T>(&path, &value)?),
        };
        let (id, extension) = match self.take(&sidecar_key(name)) {
            None => (None, Vec::new()),
            Some(sidecar) => self.sidecar(self.field_path(&sidecar_key(name)), sidecar)?,
        };
        Ok(PrimitiveValue {
            id,
            extension,
            value,
        }
        .into_present())
    }

    fn primitive_list<T: Primitive>(&mut self, name: &str) -> Result<Vec<PrimitiveValue<T>>> {
        let bare = self.take_array(name)?.unwrap_or_default();
        let sidecars = self.take_array(&sidecar_key(name))?.unwrap_or_default();
        // Either array may be shorter; missing positions are absent on that side.
        let len = bare.len().max(sidecars.len());
        trace!(path = %self.path, field = name, len, "decoding repeated primitive");

        let mut bare = bare.into_iter();
        let mut sidecars = sidecars.into_iter();
        let mut values = Vec::with_capacity(len);
        for index in 0..len {
            let value = match bare.next() {
                None | Some(Value::Null) => None,
                Some(value) => {
                    Some(self.scalar::<T>(&format!("{}[{index}]", self.field_path(name)), &value)?)
                }
            };
            let (id, extension) = match sidecars.next() {
                None | Some(Value::Null) => (None, Vec::new()),
                Some(sidecar) => self.sidecar(
                    format!("{}[{index}]", self.field_path(&sidecar_key(name))),
                    sidecar,
                )?,
            };
            values.push(PrimitiveValue {
                id,
                extension,
                value,
            });
        }
        Ok(values)
    }

    fn composite<C: Composite>(&mut self, name: &str) -> Result<Option<C>> {
        match self.take(name) {
            None => Ok(None),
            Some(value) => self
                .decode_composite_value(self.field_path(name), value)
                .map(Some),
        }
    }

    fn composite_list<C: Composite>(&mut self, name: &str) -> Result<Vec<C>> {
        let Some(items) = self.take_array(name)? else {
            return Ok(Vec::new());
        };
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                self.decode_composite_value(format!("{}[{index}]", self.field_path(name)), item)
            })
            .collect()
    }

    fn resource(&mut self, name: &str) -> Result<Option<Resource>> {
        match self.take(name) {
            None => Ok(None),
            Some(value) => self
                .decode_resource_value(self.field_path(name), value)
                .map(Some),
        }
    }

    fn resource_list(&mut self, name: &str) -> Result<Vec<Resource>> {
        let Some(items) = self.take_array(name)? else {
            return Ok(Vec::new());
        };
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                self.decode_resource_value(format!("{}[{index}]", self.field_path(name)), item)
            })
            .collect()
    }
}
