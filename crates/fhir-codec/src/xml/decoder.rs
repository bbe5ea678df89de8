//! XML field decoder.

use tracing::{debug, trace};

use crate::driver::{Composite, FieldDecoder};
use crate::error::{CodecError, Result, WireFormat};
use crate::model::Resource;
use crate::primitive::{Primitive, PrimitiveValue};
use crate::registry::ResourceRegistry;

use super::node::XmlNode;

fn malformed(message: impl Into<String>) -> CodecError {
    CodecError::malformed(WireFormat::Xml, message)
}

/// Consumes the attributes and children of one element as a composite's
/// fields are walked.
///
/// Unlike JSON, leftovers are an error: [`XmlDecoder::finish`] reports the
/// first attribute or element no field claimed.
pub struct XmlDecoder<'r> {
    node: XmlNode,
    registry: &'r ResourceRegistry,
    path: String,
}

impl<'r> XmlDecoder<'r> {
    pub fn new(node: XmlNode, registry: &'r ResourceRegistry, path: String) -> Self {
        Self {
            node,
            registry,
            path,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Finish the element, failing on anything left unread.
    pub fn finish(self) -> Result<()> {
        if let Some((name, _)) = self.node.attributes.first() {
            return Err(CodecError::unexpected_attribute(name.as_str(), self.node.name.as_str()));
        }
        if let Some(child) = self.node.children.first() {
            return Err(CodecError::unexpected_element(
                child.name.as_str(),
                self.node.name.as_str(),
            ));
        }
        Ok(())
    }

    fn field_path(&self, name: &str) -> String {
        format!("{}.{}", self.path, name)
    }

    fn child(&self, node: XmlNode, path: String) -> XmlDecoder<'r> {
        XmlDecoder::new(node, self.registry, path)
    }

    /// Take the only child named `name`; repeats are malformed for a
    /// singular field.
    fn take_single(&mut self, name: &str) -> Result<Option<XmlNode>> {
        let mut children = self.node.take_children(name);
        if children.len() > 1 {
            return Err(malformed(format!(
                "{} appears {} times but is not repeating",
                self.field_path(name),
                children.len()
            )));
        }
        Ok(children.pop())
    }

    fn decode_primitive_node<T: Primitive>(
        &self,
        node: XmlNode,
        path: String,
    ) -> Result<PrimitiveValue<T>> {
        let mut dec = self.child(node, path);
        let id = dec.element_id()?;
        let value = match dec.attribute("value")? {
            None => None,
            Some(text) => Some(
                T::from_lexical(&text).map_err(|e| malformed(format!("{}: {e}", dec.path)))?,
            ),
        };
        let extension = dec.composite_list("extension")?;
        dec.finish()?;
        Ok(PrimitiveValue {
            id,
            extension,
            value,
        })
    }

    fn decode_composite_node<C: Composite>(&self, node: XmlNode, path: String) -> Result<C> {
        let mut dec = self.child(node, path);
        let composite = C::decode_fields(&mut dec)?;
        dec.finish()?;
        Ok(composite)
    }

    /// Unwrap `<contained><Patient>..</Patient></contained>`.
    fn decode_resource_wrapper(&self, mut wrapper: XmlNode, path: String) -> Result<Resource> {
        if let Some((name, _)) = wrapper.attributes.first() {
            return Err(CodecError::unexpected_attribute(name.as_str(), wrapper.name.as_str()));
        }
        let inner = match wrapper.children.len() {
            1 => wrapper.children.remove(0),
            0 => return Err(malformed(format!("{path} holds no resource"))),
            n => return Err(malformed(format!("{path} holds {n} resources, expected one"))),
        };
        decode_resource_node(inner, self.registry, path)
    }
}

/// Dispatch an element on its tag name and decode it as a resource.
///
/// The tag is looked up before any field is read; an unregistered kind
/// fails without decoding anything else.
pub(crate) fn decode_resource_node(
    node: XmlNode,
    registry: &ResourceRegistry,
    path: String,
) -> Result<Resource> {
    let entry = registry
        .get(&node.name)
        .ok_or_else(|| CodecError::unknown_discriminator(node.name.as_str()))?;
    debug!(path = %path, resource_type = %node.name, "decoding XML resource");
    let path = if path.is_empty() {
        node.name.clone()
    } else {
        format!("{path}({})", node.name)
    };
    let mut dec = XmlDecoder::new(node, registry, path);
    let resource = (entry.decode_xml)(&mut dec)?;
    dec.finish()?;
    Ok(resource)
}

impl FieldDecoder for XmlDecoder<'_> {
    fn format(&self) -> WireFormat {
        WireFormat::Xml
    }

    fn resource_type(&mut self, expected: &'static str) -> Result<()> {
        if self.node.name == expected {
            Ok(())
        } else {
            Err(malformed(format!(
                "{}: element <{}> does not match {expected}",
                self.path, self.node.name
            )))
        }
    }

    fn element_id(&mut self) -> Result<Option<String>> {
        Ok(self.node.take_attribute("id"))
    }

    fn attribute(&mut self, name: &str) -> Result<Option<String>> {
        Ok(self.node.take_attribute(name))
    }

    fn has_field(&self, name: &str) -> bool {
        self.node.has_child(name)
    }

    fn primitive<T: Primitive>(&mut self, name: &str) -> Result<Option<PrimitiveValue<T>>> {
        match self.take_single(name)? {
            None => Ok(None),
            Some(node) => {
                let primitive = self.decode_primitive_node(node, self.field_path(name))?;
                Ok(primitive.into_present())
            }
        }
    }

    fn primitive_list<T: Primitive>(&mut self, name: &str) -> Result<Vec<PrimitiveValue<T>>> {
        let children = self.node.take_children(name);
        trace!(path = %self.path, field = name, len = children.len(), "decoding repeated primitive");
        children
            .into_iter()
            .enumerate()
            .map(|(index, node)| {
                self.decode_primitive_node(node, format!("{}[{index}]", self.field_path(name)))
            })
            .collect()
    }

    fn composite<C: Composite>(&mut self, name: &str) -> Result<Option<C>> {
        match self.take_single(name)? {
            None => Ok(None),
            Some(node) => self
                .decode_composite_node(node, self.field_path(name))
                .map(Some),
        }
    }

    fn composite_list<C: Composite>(&mut self, name: &str) -> Result<Vec<C>> {
        self.node
            .take_children(name)
            .into_iter()
            .enumerate()
            .map(|(index, node)| {
                self.decode_composite_node(node, format!("{}[{index}]", self.field_path(name)))
            })
            .collect()
    }

    fn resource(&mut self, name: &str) -> Result<Option<Resource>> {
        match self.take_single(name)? {
            None => Ok(None),
            Some(node) => self
                .decode_resource_wrapper(node, self.field_path(name))
                .map(Some),
        }
    }

    fn resource_list(&mut self, name: &str) -> Result<Vec<Resource>> {
        self.node
            .take_children(name)
            .into_iter()
            .enumerate()
            .map(|(index, node)| {
                self.decode_resource_wrapper(node, format!("{}[{index}]", self.field_path(name)))
            })
            .collect()
    }
}
