//! XML field encoder.

use tracing::trace;

use crate::driver::{Composite, FieldEncoder};
use crate::error::{CodecError, Result};
use crate::model::Resource;
use crate::primitive::{Primitive, PrimitiveValue};

use super::node::XmlNode;

/// Builds one element from a composite's field walk.
#[derive(Debug)]
pub struct XmlEncoder {
    node: XmlNode,
}

impl XmlEncoder {
    /// Start an element named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            node: XmlNode::new(name),
        }
    }

    pub fn finish(self) -> XmlNode {
        self.node
    }
}

/// Encode a composite as an element named `name`.
pub(crate) fn encode_element<C: Composite>(name: &str, value: &C) -> Result<XmlNode> {
    let mut enc = XmlEncoder::new(name);
    value.encode_fields(&mut enc)?;
    Ok(enc.finish())
}

/// Encode a resource as an element named by its resource type.
pub(crate) fn encode_resource(resource: &Resource) -> Result<XmlNode> {
    let mut enc = XmlEncoder::new(resource.resource_type());
    resource.encode_fields(&mut enc)?;
    Ok(enc.finish())
}

/// `<name id=".." value="..">` with extensions as children.
///
/// An entirely empty primitive becomes `<name/>`, which keeps list positions.
fn primitive_element<T: Primitive>(name: &str, primitive: &PrimitiveValue<T>) -> Result<XmlNode> {
    let mut node = XmlNode::new(name);
    if let Some(id) = &primitive.id {
        node.push_attribute("id", id.as_str());
    }
    if let Some(value) = &primitive.value {
        let lexical = value
            .to_lexical()
            .map_err(|e| CodecError::unrepresentable(name, e.to_string()))?;
        node.push_attribute("value", lexical);
    }
    for extension in &primitive.extension {
        node.children.push(encode_element("extension", extension)?);
    }
    Ok(node)
}

fn resource_wrapper(name: &str, resource: &Resource) -> Result<XmlNode> {
    Ok(XmlNode::new(name).with_child(encode_resource(resource)?))
}

impl FieldEncoder for XmlEncoder {
    fn resource_type(&mut self, _resource_type: &'static str) -> Result<()> {
        // The element name already is the discriminator.
        Ok(())
    }

    fn element_id(&mut self, id: Option<&str>) -> Result<()> {
        self.attribute("id", id)
    }

    fn attribute(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        if let Some(value) = value {
            self.node.push_attribute(name, value);
        }
        Ok(())
    }

    fn primitive<T: Primitive>(
        &mut self,
        name: &str,
        value: Option<&PrimitiveValue<T>>,
    ) -> Result<()> {
        match value {
            Some(primitive) if !primitive.is_empty() => {
                let child = primitive_element(name, primitive)?;
                self.node.children.push(child);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn primitive_list<T: Primitive>(
        &mut self,
        name: &str,
        values: &[PrimitiveValue<T>],
    ) -> Result<()> {
        if values.iter().all(PrimitiveValue::is_empty) {
            return Ok(());
        }
        for primitive in values {
            let child = primitive_element(name, primitive)?;
            self.node.children.push(child);
        }
        trace!(field = name, len = values.len(), "encoded repeated primitive");
        Ok(())
    }

    fn composite<C: Composite>(&mut self, name: &str, value: Option<&C>) -> Result<()> {
        if let Some(value) = value {
            let child = encode_element(name, value)?;
            self.node.children.push(child);
        }
        Ok(())
    }

    fn composite_list<C: Composite>(&mut self, name: &str, values: &[C]) -> Result<()> {
        for value in values {
            let child = encode_element(name, value)?;
            self.node.children.push(child);
        }
        Ok(())
    }

    fn resource(&mut self, name: &str, value: Option<&Resource>) -> Result<()> {
        if let Some(resource) = value {
            let child = resource_wrapper(name, resource)?;
            self.node.children.push(child);
        }
        Ok(())
    }

    fn resource_list(&mut self, name: &str, values: &[Resource]) -> Result<()> {
        for resource in values {
            let child = resource_wrapper(name, resource)?;
            self.node.children.push(child);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Extension;

    #[test]
    fn test_primitive_carries_id_value_and_extensions() {
        let mut enc = XmlEncoder::new("Patient");
        let primitive = PrimitiveValue::new("1974-12-25".to_string())
            .with_id("b1")
            .with_extension(Extension::new("http://example.org/x"));
        enc.primitive("birthDate", Some(&primitive)).unwrap();
        let node = enc.finish();
        let birth_date = &node.children[0];
        assert_eq!(
            birth_date.attributes,
            vec![
                ("id".to_string(), "b1".to_string()),
                ("value".to_string(), "1974-12-25".to_string())
            ]
        );
        assert_eq!(birth_date.children[0].name, "extension");
        assert_eq!(
            birth_date.children[0].attribute("url"),
            Some("http://example.org/x")
        );
    }

    #[test]
    fn test_empty_primitive_is_omitted() {
        let mut enc = XmlEncoder::new("Patient");
        enc.primitive::<bool>("active", Some(&PrimitiveValue::empty()))
            .unwrap();
        enc.primitive_list::<String>("given", &[PrimitiveValue::empty(), PrimitiveValue::empty()])
            .unwrap();
        assert!(enc.finish().children.is_empty());
    }

    #[test]
    fn test_list_keeps_placeholder_positions() {
        let mut enc = XmlEncoder::new("name");
        let given = vec![
            PrimitiveValue::new("Alice".to_string()),
            PrimitiveValue::empty(),
            PrimitiveValue::empty().with_id("g3"),
        ];
        enc.primitive_list("given", &given).unwrap();
        let node = enc.finish();
        assert_eq!(node.children.len(), 3);
        assert!(node.children[1].attributes.is_empty());
        assert_eq!(node.children[2].attribute("id"), Some("g3"));
        assert_eq!(node.children[2].attribute("value"), None);
    }

    #[test]
    fn test_non_finite_decimal_is_unrepresentable() {
        let mut enc = XmlEncoder::new("Quantity");
        let err = enc
            .primitive("value", Some(&PrimitiveValue::new(f64::INFINITY)))
            .unwrap_err();
        assert!(matches!(err, CodecError::Unrepresentable { .. }));
    }
}
