use crate::choice_type;
use crate::driver::{Composite, FieldDecoder, FieldEncoder};
use crate::error::Result;
use crate::primitive::PrimitiveValue;

use super::{CodeableConcept, Extension, Identifier, Meta, Period, Quantity, Reference, Resource};

choice_type! {
    /// `Observation.effective[x]`
    pub enum EffectiveValue {
        DateTime(primitive String),
        Period(composite Period),
        Instant(primitive String),
    }
}

choice_type! {
    /// `Observation.value[x]` and `Observation.component.value[x]`
    pub enum ObservationValue {
        Quantity(composite Quantity),
        CodeableConcept(composite CodeableConcept),
        String(primitive String),
        Boolean(primitive bool),
        Integer(primitive i32),
        Time(primitive String),
        DateTime(primitive String),
        Period(composite Period),
    }
}

/// Measurements and simple assertions made about a subject.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observation {
    pub id: Option<PrimitiveValue<String>>,
    pub meta: Option<Meta>,
    pub implicit_rules: Option<PrimitiveValue<String>>,
    pub language: Option<PrimitiveValue<String>>,
    pub contained: Vec<Resource>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub identifier: Vec<Identifier>,
    pub status: Option<PrimitiveValue<String>>,
    pub category: Vec<CodeableConcept>,
    pub code: Option<CodeableConcept>,
    pub subject: Option<Reference>,
    pub effective: Option<EffectiveValue>,
    pub issued: Option<PrimitiveValue<String>>,
    pub value: Option<ObservationValue>,
    pub component: Vec<ObservationComponent>,
}

impl Composite for Observation {
    const TYPE_NAME: &'static str = "Observation";

    fn encode_fields<E: FieldEncoder>(&self, enc: &mut E) -> Result<()> {
        enc.resource_type(Self::TYPE_NAME)?;
        enc.primitive("id", self.id.as_ref())?;
        enc.composite("meta", self.meta.as_ref())?;
        enc.primitive("implicitRules", self.implicit_rules.as_ref())?;
        enc.primitive("language", self.language.as_ref())?;
        enc.resource_list("contained", &self.contained)?;
        enc.composite_list("extension", &self.extension)?;
        enc.composite_list("modifierExtension", &self.modifier_extension)?;
        enc.composite_list("identifier", &self.identifier)?;
        enc.primitive("status", self.status.as_ref())?;
        enc.composite_list("category", &self.category)?;
        enc.composite("code", self.code.as_ref())?;
        enc.composite("subject", self.subject.as_ref())?;
        enc.choice("effective", self.effective.as_ref())?;
        enc.primitive("issued", self.issued.as_ref())?;
        enc.choice("value", self.value.as_ref())?;
        enc.composite_list("component", &self.component)?;
        Ok(())
    }

    fn decode_fields<D: FieldDecoder>(dec: &mut D) -> Result<Self> {
        dec.resource_type(Self::TYPE_NAME)?;
        Ok(Self {
            id: dec.primitive("id")?,
            meta: dec.composite("meta")?,
            implicit_rules: dec.primitive("implicitRules")?,
            language: dec.primitive("language")?,
            contained: dec.resource_list("contained")?,
            extension: dec.composite_list("extension")?,
            modifier_extension: dec.composite_list("modifierExtension")?,
            identifier: dec.composite_list("identifier")?,
            status: dec.primitive("status")?,
            category: dec.composite_list("category")?,
            code: dec.composite("code")?,
            subject: dec.composite("subject")?,
            effective: dec.choice("effective")?,
            issued: dec.primitive("issued")?,
            value: dec.choice("value")?,
            component: dec.composite_list("component")?,
        })
    }
}

/// `Observation.component` backbone element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationComponent {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub code: Option<CodeableConcept>,
    pub value: Option<ObservationValue>,
}

impl Composite for ObservationComponent {
    const TYPE_NAME: &'static str = "Observation.component";

    fn encode_fields<E: FieldEncoder>(&self, enc: &mut E) -> Result<()> {
        enc.element_id(self.id.as_deref())?;
        enc.composite_list("extension", &self.extension)?;
        enc.composite_list("modifierExtension", &self.modifier_extension)?;
        enc.composite("code", self.code.as_ref())?;
        enc.choice("value", self.value.as_ref())?;
        Ok(())
    }

    fn decode_fields<D: FieldDecoder>(dec: &mut D) -> Result<Self> {
        Ok(Self {
            id: dec.element_id()?,
            extension: dec.composite_list("extension")?,
            modifier_extension: dec.composite_list("modifierExtension")?,
            code: dec.composite("code")?,
            value: dec.choice("value")?,
        })
    }
}
