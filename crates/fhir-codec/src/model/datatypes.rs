//! General-purpose complex datatypes.
//!
//! Each datatype is an element: it carries an element `id` (an attribute in
//! XML) and its own `extension` list ahead of the declared fields.

use crate::driver::{Composite, FieldDecoder, FieldEncoder};
use crate::error::Result;
use crate::primitive::PrimitiveValue;

use super::Extension;

/// A code defined by a terminology system.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coding {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub system: Option<PrimitiveValue<String>>,
    pub version: Option<PrimitiveValue<String>>,
    pub code: Option<PrimitiveValue<String>>,
    pub display: Option<PrimitiveValue<String>>,
    pub user_selected: Option<PrimitiveValue<bool>>,
}

impl Coding {
    pub fn new(system: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            system: Some(PrimitiveValue::new(system.into())),
            code: Some(PrimitiveValue::new(code.into())),
            ..Self::default()
        }
    }
}

impl Composite for Coding {
    const TYPE_NAME: &'static str = "Coding";

    fn encode_fields<E: FieldEncoder>(&self, enc: &mut E) -> Result<()> {
        enc.element_id(self.id.as_deref())?;
        enc.composite_list("extension", &self.extension)?;
        enc.primitive("system", self.system.as_ref())?;
        enc.primitive("version", self.version.as_ref())?;
        enc.primitive("code", self.code.as_ref())?;
        enc.primitive("display", self.display.as_ref())?;
        enc.primitive("userSelected", self.user_selected.as_ref())?;
        Ok(())
    }

    fn decode_fields<D: FieldDecoder>(dec: &mut D) -> Result<Self> {
        Ok(Self {
            id: dec.element_id()?,
            extension: dec.composite_list("extension")?,
            system: dec.primitive("system")?,
            version: dec.primitive("version")?,
            code: dec.primitive("code")?,
            display: dec.primitive("display")?,
            user_selected: dec.primitive("userSelected")?,
        })
    }
}

/// A concept given by codings and/or text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeableConcept {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub coding: Vec<Coding>,
    pub text: Option<PrimitiveValue<String>>,
}

impl CodeableConcept {
    pub fn from_coding(coding: Coding) -> Self {
        Self {
            coding: vec![coding],
            ..Self::default()
        }
    }
}

impl Composite for CodeableConcept {
    const TYPE_NAME: &'static str = "CodeableConcept";

    fn encode_fields<E: FieldEncoder>(&self, enc: &mut E) -> Result<()> {
        enc.element_id(self.id.as_deref())?;
        enc.composite_list("extension", &self.extension)?;
        enc.composite_list("coding", &self.coding)?;
        enc.primitive("text", self.text.as_ref())?;
        Ok(())
    }

    fn decode_fields<D: FieldDecoder>(dec: &mut D) -> Result<Self> {
        Ok(Self {
            id: dec.element_id()?,
            extension: dec.composite_list("extension")?,
            coding: dec.composite_list("coding")?,
            text: dec.primitive("text")?,
        })
    }
}

/// A measured amount.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Quantity {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub value: Option<PrimitiveValue<f64>>,
    pub comparator: Option<PrimitiveValue<String>>,
    pub unit: Option<PrimitiveValue<String>>,
    pub system: Option<PrimitiveValue<String>>,
    pub code: Option<PrimitiveValue<String>>,
}

impl Composite for Quantity {
    const TYPE_NAME: &'static str = "Quantity";

    fn encode_fields<E: FieldEncoder>(&self, enc: &mut E) -> Result<()> {
        enc.element_id(self.id.as_deref())?;
        enc.composite_list("extension", &self.extension)?;
        enc.primitive("value", self.value.as_ref())?;
        enc.primitive("comparator", self.comparator.as_ref())?;
        enc.primitive("unit", self.unit.as_ref())?;
        enc.primitive("system", self.system.as_ref())?;
        enc.primitive("code", self.code.as_ref())?;
        Ok(())
    }

    fn decode_fields<D: FieldDecoder>(dec: &mut D) -> Result<Self> {
        Ok(Self {
            id: dec.element_id()?,
            extension: dec.composite_list("extension")?,
            value: dec.primitive("value")?,
            comparator: dec.primitive("comparator")?,
            unit: dec.primitive("unit")?,
            system: dec.primitive("system")?,
            code: dec.primitive("code")?,
        })
    }
}

/// A time range; either end may be open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Period {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub start: Option<PrimitiveValue<String>>,
    pub end: Option<PrimitiveValue<String>>,
}

impl Composite for Period {
    const TYPE_NAME: &'static str = "Period";

    fn encode_fields<E: FieldEncoder>(&self, enc: &mut E) -> Result<()> {
        enc.element_id(self.id.as_deref())?;
        enc.composite_list("extension", &self.extension)?;
        enc.primitive("start", self.start.as_ref())?;
        enc.primitive("end", self.end.as_ref())?;
        Ok(())
    }

    fn decode_fields<D: FieldDecoder>(dec: &mut D) -> Result<Self> {
        Ok(Self {
            id: dec.element_id()?,
            extension: dec.composite_list("extension")?,
            start: dec.primitive("start")?,
            end: dec.primitive("end")?,
        })
    }
}

/// A reference from one resource to another.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reference {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub reference: Option<PrimitiveValue<String>>,
    pub type_: Option<PrimitiveValue<String>>,
    pub identifier: Option<Identifier>,
    pub display: Option<PrimitiveValue<String>>,
}

impl Reference {
    /// A literal reference such as `Patient/123`.
    pub fn to(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(PrimitiveValue::new(reference.into())),
            ..Self::default()
        }
    }
}

impl Composite for Reference {
    const TYPE_NAME: &'static str = "Reference";

    fn encode_fields<E: FieldEncoder>(&self, enc: &mut E) -> Result<()> {
        enc.element_id(self.id.as_deref())?;
        enc.composite_list("extension", &self.extension)?;
        enc.primitive("reference", self.reference.as_ref())?;
        enc.primitive("type", self.type_.as_ref())?;
        enc.composite("identifier", self.identifier.as_ref())?;
        enc.primitive("display", self.display.as_ref())?;
        Ok(())
    }

    fn decode_fields<D: FieldDecoder>(dec: &mut D) -> Result<Self> {
        Ok(Self {
            id: dec.element_id()?,
            extension: dec.composite_list("extension")?,
            reference: dec.primitive("reference")?,
            type_: dec.primitive("type")?,
            identifier: dec.composite("identifier")?,
            display: dec.primitive("display")?,
        })
    }
}

/// A business identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Identifier {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub use_: Option<PrimitiveValue<String>>,
    pub type_: Option<CodeableConcept>,
    pub system: Option<PrimitiveValue<String>>,
    pub value: Option<PrimitiveValue<String>>,
    pub period: Option<Period>,
    pub assigner: Option<Box<Reference>>,
}

impl Identifier {
    pub fn new(system: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            system: Some(PrimitiveValue::new(system.into())),
            value: Some(PrimitiveValue::new(value.into())),
            ..Self::default()
        }
    }
}

impl Composite for Identifier {
    const TYPE_NAME: &'static str = "Identifier";

    fn encode_fields<E: FieldEncoder>(&self, enc: &mut E) -> Result<()> {
        enc.element_id(self.id.as_deref())?;
        enc.composite_list("extension", &self.extension)?;
        enc.primitive("use", self.use_.as_ref())?;
        enc.composite("type", self.type_.as_ref())?;
        enc.primitive("system", self.system.as_ref())?;
        enc.primitive("value", self.value.as_ref())?;
        enc.composite("period", self.period.as_ref())?;
        enc.composite("assigner", self.assigner.as_deref())?;
        Ok(())
    }

    fn decode_fields<D: FieldDecoder>(dec: &mut D) -> Result<Self> {
        Ok(Self {
            id: dec.element_id()?,
            extension: dec.composite_list("extension")?,
            use_: dec.primitive("use")?,
            type_: dec.composite("type")?,
            system: dec.primitive("system")?,
            value: dec.primitive("value")?,
            period: dec.composite("period")?,
            assigner: dec.composite::<Reference>("assigner")?.map(Box::new),
        })
    }
}

/// A person's name. `given`, `prefix` and `suffix` are repeated primitives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HumanName {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub use_: Option<PrimitiveValue<String>>,
    pub text: Option<PrimitiveValue<String>>,
    pub family: Option<PrimitiveValue<String>>,
    pub given: Vec<PrimitiveValue<String>>,
    pub prefix: Vec<PrimitiveValue<String>>,
    pub suffix: Vec<PrimitiveValue<String>>,
    pub period: Option<Period>,
}

impl HumanName {
    pub fn new(family: impl Into<String>, given: &[&str]) -> Self {
        Self {
            family: Some(PrimitiveValue::new(family.into())),
            given: given
                .iter()
                .map(|name| PrimitiveValue::new((*name).to_string()))
                .collect(),
            ..Self::default()
        }
    }
}

impl Composite for HumanName {
    const TYPE_NAME: &'static str = "HumanName";

    fn encode_fields<E: FieldEncoder>(&self, enc: &mut E) -> Result<()> {
        enc.element_id(self.id.as_deref())?;
        enc.composite_list("extension", &self.extension)?;
        enc.primitive("use", self.use_.as_ref())?;
        enc.primitive("text", self.text.as_ref())?;
        enc.primitive("family", self.family.as_ref())?;
        enc.primitive_list("given", &self.given)?;
        enc.primitive_list("prefix", &self.prefix)?;
        enc.primitive_list("suffix", &self.suffix)?;
        enc.composite("period", self.period.as_ref())?;
        Ok(())
    }

    fn decode_fields<D: FieldDecoder>(dec: &mut D) -> Result<Self> {
        Ok(Self {
            id: dec.element_id()?,
            extension: dec.composite_list("extension")?,
            use_: dec.primitive("use")?,
            text: dec.primitive("text")?,
            family: dec.primitive("family")?,
            given: dec.primitive_list("given")?,
            prefix: dec.primitive_list("prefix")?,
            suffix: dec.primitive_list("suffix")?,
            period: dec.composite("period")?,
        })
    }
}

/// Resource metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Meta {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub version_id: Option<PrimitiveValue<String>>,
    pub last_updated: Option<PrimitiveValue<String>>,
    pub source: Option<PrimitiveValue<String>>,
    pub profile: Vec<PrimitiveValue<String>>,
    pub security: Vec<Coding>,
    pub tag: Vec<Coding>,
}

impl Composite for Meta {
    const TYPE_NAME: &'static str = "Meta";

    fn encode_fields<E: FieldEncoder>(&self, enc: &mut E) -> Result<()> {
        enc.element_id(self.id.as_deref())?;
        enc.composite_list("extension", &self.extension)?;
        enc.primitive("versionId", self.version_id.as_ref())?;
        enc.primitive("lastUpdated", self.last_updated.as_ref())?;
        enc.primitive("source", self.source.as_ref())?;
        enc.primitive_list("profile", &self.profile)?;
        enc.composite_list("security", &self.security)?;
        enc.composite_list("tag", &self.tag)?;
        Ok(())
    }

    fn decode_fields<D: FieldDecoder>(dec: &mut D) -> Result<Self> {
        Ok(Self {
            id: dec.element_id()?,
            extension: dec.composite_list("extension")?,
            version_id: dec.primitive("versionId")?,
            last_updated: dec.primitive("lastUpdated")?,
            source: dec.primitive("source")?,
            profile: dec.primitive_list("profile")?,
            security: dec.composite_list("security")?,
            tag: dec.composite_list("tag")?,
        })
    }
}
