//! The per-composite field walk shared by both wire formats.
//!
//! Every composite type implements [`Composite`] by visiting its declared
//! fields in order and naming, for each one, which of the codec rules applies:
//! single or repeated primitive, single or repeated composite, choice, or
//! resource container. The JSON and XML encoders/decoders implement
//! [`FieldEncoder`] and [`FieldDecoder`] with the format-specific projection
//! of each rule, so a composite's codec is written once.

use crate::choice::{Choice, select_variant};
use crate::error::{Result, WireFormat};
use crate::model::Resource;
use crate::primitive::{Primitive, PrimitiveValue};

/// A generated composite type (datatype, backbone element or resource).
pub trait Composite: Sized {
    /// Schema type name, e.g. `Quantity` or `Patient`.
    const TYPE_NAME: &'static str;

    fn encode_fields<E: FieldEncoder>(&self, enc: &mut E) -> Result<()>;

    fn decode_fields<D: FieldDecoder>(dec: &mut D) -> Result<Self>;
}

/// A top-level composite that can sit in a [`Resource`] container.
///
/// Its `TYPE_NAME` is the discriminator. The composite writes the
/// discriminator itself by calling [`FieldEncoder::resource_type`] first.
pub trait ResourceKind: Composite {
    fn into_resource(self) -> Resource;
}

/// Format-specific projection of each field rule, encode side.
pub trait FieldEncoder {
    /// The resource's own discriminator.
    fn resource_type(&mut self, resource_type: &'static str) -> Result<()>;

    /// Element id of a datatype or backbone element (an attribute in XML).
    fn element_id(&mut self, id: Option<&str>) -> Result<()>;

    /// A bare string member that XML renders as an attribute (`Extension.url`).
    fn attribute(&mut self, name: &str, value: Option<&str>) -> Result<()>;

    fn primitive<T: Primitive>(&mut self, name: &str, value: Option<&PrimitiveValue<T>>)
    -> Result<()>;

    fn primitive_list<T: Primitive>(&mut self, name: &str, values: &[PrimitiveValue<T>])
    -> Result<()>;

    fn composite<C: Composite>(&mut self, name: &str, value: Option<&C>) -> Result<()>;

    fn composite_list<C: Composite>(&mut self, name: &str, values: &[C]) -> Result<()>;

    fn resource(&mut self, name: &str, value: Option<&Resource>) -> Result<()>;

    fn resource_list(&mut self, name: &str, values: &[Resource]) -> Result<()>;

    fn choice<C: Choice>(&mut self, name: &str, value: Option<&C>) -> Result<()>
    where
        Self: Sized,
    {
        match value {
            Some(value) => value.encode_variant(name, self),
            None => Ok(()),
        }
    }
}

/// Format-specific projection of each field rule, decode side.
///
/// Decoders consume what they read; anything left over once the composite's
/// fields are walked is reported (XML) or logged and skipped (JSON).
pub trait FieldDecoder {
    fn format(&self) -> WireFormat;

    /// Check the resource's own discriminator against `expected`.
    fn resource_type(&mut self, expected: &'static str) -> Result<()>;

    fn element_id(&mut self) -> Result<Option<String>>;

    fn attribute(&mut self, name: &str) -> Result<Option<String>>;

    /// Whether `name` itself is present.
    fn has_field(&self, name: &str) -> bool;

    /// Whether a primitive sidecar for `name` is present. Only JSON has one.
    fn has_sidecar(&self, _name: &str) -> bool {
        false
    }

    fn primitive<T: Primitive>(&mut self, name: &str) -> Result<Option<PrimitiveValue<T>>>;

    fn primitive_list<T: Primitive>(&mut self, name: &str) -> Result<Vec<PrimitiveValue<T>>>;

    fn composite<C: Composite>(&mut self, name: &str) -> Result<Option<C>>;

    fn composite_list<C: Composite>(&mut self, name: &str) -> Result<Vec<C>>;

    fn resource(&mut self, name: &str) -> Result<Option<Resource>>;

    fn resource_list(&mut self, name: &str) -> Result<Vec<Resource>>;

    fn choice<C: Choice>(&mut self, name: &str) -> Result<Option<C>>
    where
        Self: Sized,
    {
        match select_variant::<C, _>(&*self, name)? {
            Some(suffix) => C::decode_variant(suffix, name, self),
            None => Ok(None),
        }
    }
}
