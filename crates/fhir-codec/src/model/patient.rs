use crate::choice_type;
use crate::driver::{Composite, FieldDecoder, FieldEncoder};
use crate::error::Result;
use crate::primitive::PrimitiveValue;

use super::{Extension, HumanName, Identifier, Meta, Reference, Resource};

choice_type! {
    /// `Patient.deceased[x]`
    pub enum DeceasedValue {
        Boolean(primitive bool),
        DateTime(primitive String),
    }
}

choice_type! {
    /// `Patient.multipleBirth[x]`
    pub enum MultipleBirthValue {
        Boolean(primitive bool),
        Integer(primitive i32),
    }
}

/// Demographics of a person receiving care.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patient {
    pub id: Option<PrimitiveValue<String>>,
    pub meta: Option<Meta>,
    pub implicit_rules: Option<PrimitiveValue<String>>,
    pub language: Option<PrimitiveValue<String>>,
    pub contained: Vec<Resource>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub identifier: Vec<Identifier>,
    pub active: Option<PrimitiveValue<bool>>,
    pub name: Vec<HumanName>,
    pub gender: Option<PrimitiveValue<String>>,
    pub birth_date: Option<PrimitiveValue<String>>,
    pub deceased: Option<DeceasedValue>,
    pub multiple_birth: Option<MultipleBirthValue>,
    pub general_practitioner: Vec<Reference>,
    pub managing_organization: Option<Reference>,
}

impl Composite for Patient {
    const TYPE_NAME: &'static str = "Patient";

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
        enc.primitive("active", self.active.as_ref())?;
        enc.composite_list("name", &self.name)?;
        enc.primitive("gender", self.gender.as_ref())?;
        enc.primitive("birthDate", self.birth_date.as_ref())?;
        enc.choice("deceased", self.deceased.as_ref())?;
        enc.choice("multipleBirth", self.multiple_birth.as_ref())?;
        enc.composite_list("generalPractitioner", &self.general_practitioner)?;
        enc.composite("managingOrganization", self.managing_organization.as_ref())?;
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
            active: dec.primitive("active")?,
            name: dec.composite_list("name")?,
            gender: dec.primitive("gender")?,
            birth_date: dec.primitive("birthDate")?,
            deceased: dec.choice("deceased")?,
            multiple_birth: dec.choice("multipleBirth")?,
            general_practitioner: dec.composite_list("generalPractitioner")?,
            managing_organization: dec.composite("managingOrganization")?,
        })
    }
}
