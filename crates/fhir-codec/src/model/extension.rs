//! `Extension` and the open `value[x]` type set it carries.

use crate::choice_type;
use crate::driver::{Composite, FieldDecoder, FieldEncoder};
use crate::error::{CodecError, Result};
use crate::primitive::PrimitiveValue;

use super::datatypes::{
    CodeableConcept, Coding, HumanName, Identifier, Meta, Period, Quantity, Reference,
};

choice_type! {
    /// Candidate types of `Extension.value[x]` and `Parameters.parameter.value[x]`.
    pub enum DataValue {
        Base64Binary(primitive String),
        Boolean(primitive bool),
        Canonical(primitive String),
        Code(primitive String),
        Date(primitive String),
        DateTime(primitive String),
        Decimal(primitive f64),
        Id(primitive String),
        Instant(primitive String),
        Integer(primitive i32),
        Markdown(primitive String),
        Oid(primitive String),
        PositiveInt(primitive u32),
        String(primitive String),
        Time(primitive String),
        UnsignedInt(primitive u32),
        Uri(primitive String),
        Url(primitive String),
        Uuid(primitive String),
        CodeableConcept(composite CodeableConcept),
        Coding(composite Coding),
        HumanName(composite HumanName),
        Identifier(composite Identifier),
        Meta(composite Meta),
        Period(composite Period),
        Quantity(composite Quantity),
        Reference(composite Reference),
    }
}

/// Additional content defined by an implementation, identified by `url`.
///
/// Extensions nest: an extension may carry further extensions instead of, or
/// alongside, a value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extension {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub url: String,
    pub value: Option<DataValue>,
}

impl Extension {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: DataValue) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extension.push(extension);
        self
    }

    /// Shorthand for a string-valued extension.
    pub fn string(url: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(url).with_value(DataValue::String(PrimitiveValue::new(value.into())))
    }
}

impl Composite for Extension {
    const TYPE_NAME: &'static str = "Extension";

    fn encode_fields<E: FieldEncoder>(&self, enc: &mut E) -> Result<()> {
        enc.element_id(self.id.as_deref())?;
        enc.composite_list("extension", &self.extension)?;
        enc.attribute("url", Some(self.url.as_str()))?;
        enc.choice("value", self.value.as_ref())?;
        Ok(())
    }

    fn decode_fields<D: FieldDecoder>(dec: &mut D) -> Result<Self> {
        let id = dec.element_id()?;
        let extension = dec.composite_list("extension")?;
        let url = dec
            .attribute("url")?
            .ok_or_else(|| CodecError::malformed(dec.format(), "extension has no url"))?;
        let value = dec.choice("value")?;
        Ok(Self {
            id,
            extension,
            url,
            value,
        })
    }
}
