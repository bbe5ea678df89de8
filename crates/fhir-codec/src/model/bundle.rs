use crate::driver::{Composite, FieldDecoder, FieldEncoder};
use crate::error::Result;
use crate::primitive::PrimitiveValue;

use super::{Extension, Identifier, Meta, Resource};

/// A container for a collection of resources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bundle {
    pub id: Option<PrimitiveValue<String>>,
    pub meta: Option<Meta>,
    pub implicit_rules: Option<PrimitiveValue<String>>,
    pub language: Option<PrimitiveValue<String>>,
    pub identifier: Option<Identifier>,
    pub type_: Option<PrimitiveValue<String>>,
    pub timestamp: Option<PrimitiveValue<String>>,
    pub total: Option<PrimitiveValue<u32>>,
    pub entry: Vec<BundleEntry>,
}

impl Bundle {
    /// A bundle of the given type (`collection`, `searchset`, ...).
    pub fn of_type(type_: impl Into<String>) -> Self {
        Self {
            type_: Some(PrimitiveValue::new(type_.into())),
            ..Self::default()
        }
    }

    /// Resources of every entry that carries one, in entry order.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.entry.iter().filter_map(|entry| entry.resource.as_ref())
    }
}

impl Composite for Bundle {
    const TYPE_NAME: &'static str = "Bundle";

    fn encode_fields<E: FieldEncoder>(&self, enc: &mut E) -> Result<()> {
        enc.resource_type(Self::TYPE_NAME)?;
        enc.primitive("id", self.id.as_ref())?;
        enc.composite("meta", self.meta.as_ref())?;
        enc.primitive("implicitRules", self.implicit_rules.as_ref())?;
        enc.primitive("language", self.language.as_ref())?;
        enc.composite("identifier", self.identifier.as_ref())?;
        enc.primitive("type", self.type_.as_ref())?;
        enc.primitive("timestamp", self.timestamp.as_ref())?;
        enc.primitive("total", self.total.as_ref())?;
        enc.composite_list("entry", &self.entry)?;
        Ok(())
    }

    fn decode_fields<D: FieldDecoder>(dec: &mut D) -> Result<Self> {
        dec.resource_type(Self::TYPE_NAME)?;
        Ok(Self {
            id: dec.primitive("id")?,
            meta: dec.composite("meta")?,
            implicit_rules: dec.primitive("implicitRules")?,
            language: dec.primitive("language")?,
            identifier: dec.composite("identifier")?,
            type_: dec.primitive("type")?,
            timestamp: dec.primitive("timestamp")?,
            total: dec.primitive("total")?,
            entry: dec.composite_list("entry")?,
        })
    }
}

/// `Bundle.entry` backbone element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BundleEntry {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub full_url: Option<PrimitiveValue<String>>,
    pub resource: Option<Resource>,
}

impl BundleEntry {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource: Some(resource),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_full_url(mut self, full_url: impl Into<String>) -> Self {
        self.full_url = Some(PrimitiveValue::new(full_url.into()));
        self
    }
}

impl Composite for BundleEntry {
    const TYPE_NAME: &'static str = "Bundle.entry";

    fn encode_fields<E: FieldEncoder>(&self, enc: &mut E) -> Result<()> {
        enc.element_id(self.id.as_deref())?;
        enc.composite_list("extension", &self.extension)?;
        enc.composite_list("modifierExtension", &self.modifier_extension)?;
        enc.primitive("fullUrl", self.full_url.as_ref())?;
        enc.resource("resource", self.resource.as_ref())?;
        Ok(())
    }

    fn decode_fields<D: FieldDecoder>(dec: &mut D) -> Result<Self> {
        Ok(Self {
            id: dec.element_id()?,
            extension: dec.composite_list("extension")?,
            modifier_extension: dec.composite_list("modifierExtension")?,
            full_url: dec.primitive("fullUrl")?,
            resource: dec.resource("resource")?,
        })
    }
}
