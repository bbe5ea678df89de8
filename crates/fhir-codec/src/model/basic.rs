use crate::driver::{Composite, FieldDecoder, FieldEncoder};
use crate::error::Result;
use crate::primitive::PrimitiveValue;

use super::{CodeableConcept, Extension, Identifier, Meta, Reference, Resource};

/// A resource for concepts with no dedicated kind; content lives in extensions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Basic {
    pub id: Option<PrimitiveValue<String>>,
    pub meta: Option<Meta>,
    pub implicit_rules: Option<PrimitiveValue<String>>,
    pub language: Option<PrimitiveValue<String>>,
    pub contained: Vec<Resource>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub identifier: Vec<Identifier>,
    pub code: Option<CodeableConcept>,
    pub subject: Option<Reference>,
    pub created: Option<PrimitiveValue<String>>,
    pub author: Option<Reference>,
}

impl Composite for Basic {
    const TYPE_NAME: &'static str = "Basic";

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
        enc.composite("code", self.code.as_ref())?;
        enc.composite("subject", self.subject.as_ref())?;
        enc.primitive("created", self.created.as_ref())?;
        enc.composite("author", self.author.as_ref())?;
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
            code: dec.composite("code")?,
            subject: dec.composite("subject")?,
            created: dec.primitive("created")?,
            author: dec.composite("author")?,
        })
    }
}
