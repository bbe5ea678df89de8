use crate::driver::{Composite, FieldDecoder, FieldEncoder};
use crate::error::Result;
use crate::primitive::PrimitiveValue;

use super::{DataValue, Extension, Meta, Resource};

/// Operation request or response parameters.
///
/// Not a domain resource: no `contained`, `extension` or narrative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    pub id: Option<PrimitiveValue<String>>,
    pub meta: Option<Meta>,
    pub implicit_rules: Option<PrimitiveValue<String>>,
    pub language: Option<PrimitiveValue<String>>,
    pub parameter: Vec<ParametersParameter>,
}

impl Parameters {
    /// The first parameter named `name`.
    pub fn get(&self, name: &str) -> Option<&ParametersParameter> {
        self.parameter
            .iter()
            .find(|parameter| parameter.name_str() == Some(name))
    }
}

impl Composite for Parameters {
    const TYPE_NAME: &'static str = "Parameters";

    fn encode_fields<E: FieldEncoder>(&self, enc: &mut E) -> Result<()> {
        enc.resource_type(Self::TYPE_NAME)?;
        enc.primitive("id", self.id.as_ref())?;
        enc.composite("meta", self.meta.as_ref())?;
        enc.primitive("implicitRules", self.implicit_rules.as_ref())?;
        enc.primitive("language", self.language.as_ref())?;
        enc.composite_list("parameter", &self.parameter)?;
        Ok(())
    }

    fn decode_fields<D: FieldDecoder>(dec: &mut D) -> Result<Self> {
        dec.resource_type(Self::TYPE_NAME)?;
        Ok(Self {
            id: dec.primitive("id")?,
            meta: dec.composite("meta")?,
            implicit_rules: dec.primitive("implicitRules")?,
            language: dec.primitive("language")?,
            parameter: dec.composite_list("parameter")?,
        })
    }
}

/// One named parameter: a value, a resource, or nested parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParametersParameter {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub modifier_extension: Vec<Extension>,
    pub name: Option<PrimitiveValue<String>>,
    pub value: Option<DataValue>,
    pub resource: Option<Resource>,
    pub part: Vec<ParametersParameter>,
}

impl ParametersParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(PrimitiveValue::new(name.into())),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: DataValue) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resource = Some(resource);
        self
    }

    #[must_use]
    pub fn with_part(mut self, part: ParametersParameter) -> Self {
        self.part.push(part);
        self
    }

    pub fn name_str(&self) -> Option<&str> {
        self.name.as_ref().and_then(|name| name.value.as_deref())
    }
}

impl Composite for ParametersParameter {
    const TYPE_NAME: &'static str = "Parameters.parameter";

    fn encode_fields<E: FieldEncoder>(&self, enc: &mut E) -> Result<()> {
        enc.element_id(self.id.as_deref())?;
        enc.composite_list("extension", &self.extension)?;
        enc.composite_list("modifierExtension", &self.modifier_extension)?;
        enc.primitive("name", self.name.as_ref())?;
        enc.choice("value", self.value.as_ref())?;
        enc.resource("resource", self.resource.as_ref())?;
        enc.composite_list("part", &self.part)?;
        Ok(())
    }

    fn decode_fields<D: FieldDecoder>(dec: &mut D) -> Result<Self> {
        Ok(Self {
            id: dec.element_id()?,
            extension: dec.composite_list("extension")?,
            modifier_extension: dec.composite_list("modifierExtension")?,
            name: dec.primitive("name")?,
            value: dec.choice("value")?,
            resource: dec.resource("resource")?,
            part: dec.composite_list("part")?,
        })
    }
}
