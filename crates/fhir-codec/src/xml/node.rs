//! Minimal element tree read and written with quick-xml.
//!
//! FHIR XML carries every value in attributes, so the tree keeps element
//! names, attributes and child elements only. Text content outside
//! whitespace, including entity references, is rejected on read, as is
//! nesting deeper than [`MAX_DEPTH`].

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Writer};

use crate::error::{CodecError, Result, WireFormat};
use crate::options::XmlOptions;

/// The namespace every FHIR element must be in.
pub const FHIR_NS: &str = "http://hl7.org/fhir";

/// Deepest element nesting accepted by [`parse_document`], root included.
pub const MAX_DEPTH: usize = 128;

fn malformed(message: impl Into<String>) -> CodecError {
    CodecError::malformed(WireFormat::Xml, message)
}

/// One element: local name, attributes in document order, child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_attribute(name, value);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn push_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push((name.into(), value.into()));
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Remove and return an attribute value.
    pub fn take_attribute(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(key, _)| key == name)?;
        Some(self.attributes.remove(index).1)
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.children.iter().any(|child| child.name == name)
    }

    /// Remove and return every child named `name`, in document order.
    pub fn take_children(&mut self, name: &str) -> Vec<XmlNode> {
        let (taken, kept) = std::mem::take(&mut self.children)
            .into_iter()
            .partition(|child| child.name == name);
        self.children = kept;
        taken
    }
}

fn owned_namespace(resolved: ResolveResult<'_>) -> Option<Vec<u8>> {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) => Some(uri.to_vec()),
        _ => None,
    }
}

fn utf8(bytes: &[u8], what: &str) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| malformed(format!("{what} is not UTF-8: {e}")))
}

/// Characters allowed by the XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

fn check_depth(stack: &[XmlNode]) -> Result<()> {
    if stack.len() >= MAX_DEPTH {
        let parent = stack.last().map_or("document", |node| node.name.as_str());
        return Err(malformed(format!(
            "elements nested more than {MAX_DEPTH} deep under <{parent}>"
        )));
    }
    Ok(())
}

fn is_namespace_declaration(key: &[u8]) -> bool {
    key == b"xmlns" || key.starts_with(b"xmlns:")
}

/// Build a node from a start tag, checking its resolved namespace.
fn start_node(
    start: &BytesStart<'_>,
    namespace: Option<Vec<u8>>,
    reader: &NsReader<&[u8]>,
) -> Result<XmlNode> {
    let name = utf8(start.local_name().as_ref(), "element name")?;
    if namespace.as_deref() != Some(FHIR_NS.as_bytes()) {
        return Err(CodecError::NamespaceMismatch {
            element: name,
            expected: FHIR_NS,
            found: namespace.map(|uri| String::from_utf8_lossy(&uri).into_owned()),
        });
    }
    let mut node = XmlNode::new(name);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| malformed(e.to_string()))?;
        let key = attribute.key.as_ref();
        if is_namespace_declaration(key) {
            continue;
        }
        let key = utf8(key, "attribute name")?;
        let value = attribute
            .decode_and_unescape_value(reader.decoder())
            .map_err(|e| malformed(format!("attribute {key} on <{}>: {e}", node.name)))?;
        node.push_attribute(key, value.into_owned());
    }
    Ok(node)
}

/// Attach a finished node to its parent, or make it the root.
fn close_node(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(malformed("document has more than one root element"));
    }
    *root = Some(node);
    Ok(())
}

/// Parse a document into its root element.
///
/// Every element must resolve to [`FHIR_NS`].
pub fn parse_document(input: &str) -> Result<XmlNode> {
    let mut reader = NsReader::from_str(input);
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        let (resolved, event) = reader
            .read_resolved_event()
            .map_err(|e| malformed(e.to_string()))?;
        let namespace = owned_namespace(resolved);
        match event {
            Event::Start(start) => {
                check_depth(&stack)?;
                let node = start_node(&start, namespace, &reader)?;
                stack.push(node);
            }
            Event::Empty(start) => {
                check_depth(&stack)?;
                let node = start_node(&start, namespace, &reader)?;
                close_node(&mut stack, &mut root, node)?;
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| malformed("unexpected closing tag"))?;
                close_node(&mut stack, &mut root, node)?;
            }
            Event::Text(text) => {
                if !text.iter().all(u8::is_ascii_whitespace) {
                    let parent = stack.last().map_or("document", |node| node.name.as_str());
                    return Err(malformed(format!("unexpected text content in <{parent}>")));
                }
            }
            Event::GeneralRef(_) => {
                let parent = stack.last().map_or("document", |node| node.name.as_str());
                return Err(malformed(format!("unexpected text content in <{parent}>")));
            }
            Event::CData(_) => return Err(malformed("CDATA sections are not allowed")),
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(format!("element <{}> is not closed", open.name)));
    }
    root.ok_or_else(|| malformed("document has no root element"))
}

fn write_node<W: std::io::Write>(writer: &mut Writer<W>, node: &XmlNode, root: bool) -> Result<()> {
    let mut start = BytesStart::new(node.name.as_str());
    if root {
        start.push_attribute(("xmlns", FHIR_NS));
    }
    for (key, value) in &node.attributes {
        if let Some(c) = value.chars().find(|c| !is_xml_char(*c)) {
            return Err(CodecError::unrepresentable(
                format!("{}@{key}", node.name),
                format!("character U+{:04X} cannot appear in XML", u32::from(c)),
            ));
        }
        start.push_attribute((key.as_str(), value.as_str()));
    }
    if node.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }
    writer.write_event(Event::Start(start))?;
    for child in &node.children {
        write_node(writer, child, false)?;
    }
    writer.write_event(Event::End(BytesEnd::new(node.name.as_str())))?;
    Ok(())
}

/// Write a document with `root` as the single top-level element.
///
/// The FHIR namespace is declared once, on the root.
pub fn write_document(root: &XmlNode, options: &XmlOptions) -> Result<String> {
    let mut writer = if options.pretty {
        Writer::new_with_indent(Vec::new(), b' ', options.indent)
    } else {
        Writer::new(Vec::new())
    };
    if options.declaration {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    }
    write_node(&mut writer, root, true)?;
    String::from_utf8(writer.into_inner())
        .map_err(|e| CodecError::unrepresentable(root.name.as_str(), e.to_string()))
}
