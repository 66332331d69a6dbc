//! Generic semi-structured XML tree
//!
//! This module provides the [`XmlNode`] tree that descriptor documents are
//! loaded into, the parse/serialize boundary on top of `quick-xml`, and the
//! structural merge used to fold an inherited mojo into a child mojo.
//! Attribute order and child order are preserved end to end; downstream
//! consumers of a written descriptor rely on declaration order.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::types::{DescriptorError, DescriptorResult};

/// Attribute carried by list containers to direct a later merge
pub const CHILDREN_COMBINATION_MODE_ATTRIBUTE: &str = "combine.children";

/// Combination mode: remaining inherited items are appended, not replaced
pub const CHILDREN_COMBINATION_APPEND: &str = "append";

/// One node of a semi-structured XML tree.
///
/// A node has a name, an optional scalar value (leaf nodes only), an ordered
/// attribute list, and an ordered child list. `Clone` is a deep copy; merge
/// code relies on that to keep shared super-mojo instances unmutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    pub name: String,
    pub value: Option<String>,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// First direct child with the given name, in declaration order
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut XmlNode> {
        self.children.iter_mut().find(|child| child.name == name)
    }

    /// All direct children with the given name, in declaration order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Scalar text of this node, if it is a value node
    pub fn text(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing one in place to keep order stable
    pub fn set_attribute(&mut self, key: &str, value: &str) {
        match self.attributes.iter_mut().find(|(name, _)| name == key) {
            Some(existing) => existing.1 = value.to_string(),
            None => self.attributes.push((key.to_string(), value.to_string())),
        }
    }

    pub fn add_child(&mut self, child: XmlNode) {
        self.children.push(child);
    }
}

fn xml_err(err: impl std::fmt::Display) -> DescriptorError {
    DescriptorError::Xml(err.to_string())
}

/// Parse an XML document into a node tree.
///
/// Whitespace-only text is dropped, so indentation never shows up as node
/// values. Comments and processing instructions are not part of the model
/// and do not survive a round trip; structure, order, and attributes do.
pub fn parse(input: &str) -> DescriptorResult<XmlNode> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(start) => {
                stack.push(node_from_start(&start)?);
            }
            Event::Empty(start) => {
                let node = node_from_start(&start)?;
                close_node(&mut stack, &mut root, node);
            }
            Event::End(_) => {
                // quick-xml rejects mismatched or stray end tags before we get here
                if let Some(node) = stack.pop() {
                    close_node(&mut stack, &mut root, node);
                }
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(xml_err)?;
                append_text(&mut stack, &text);
            }
            Event::CData(data) => {
                let data = data.into_inner();
                append_text(&mut stack, &String::from_utf8_lossy(&data));
            }
            Event::Eof => break,
            // declarations, comments, doctypes, processing instructions
            _ => {}
        }
    }

    root.ok_or_else(|| DescriptorError::Xml("document has no root element".to_string()))
}

fn node_from_start(start: &BytesStart<'_>) -> DescriptorResult<XmlNode> {
    let mut node = XmlNode::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());

    for attribute in start.attributes() {
        let attribute = attribute.map_err(xml_err)?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(xml_err)?.into_owned();
        node.attributes.push((key, value));
    }

    Ok(node)
}

fn close_node(stack: &mut Vec<XmlNode>, root: &mut Option<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => {
            if root.is_none() {
                *root = Some(node);
            }
        }
    }
}

fn append_text(stack: &mut [XmlNode], text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(current) = stack.last_mut() {
        match &mut current.value {
            Some(value) => value.push_str(text),
            None => current.value = Some(text.to_string()),
        }
    }
}

/// Serialize a node tree back to an indented XML document
pub fn serialize(root: &XmlNode) -> DescriptorResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_err)?;
    write_node(&mut writer, root)?;

    String::from_utf8(writer.into_inner()).map_err(xml_err)
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> DescriptorResult<()> {
    let mut start = BytesStart::new(node.name.as_str());
    for (key, value) in &node.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if node.children.is_empty() && node.value.is_none() {
        writer.write_event(Event::Empty(start)).map_err(xml_err)?;
        return Ok(());
    }

    writer.write_event(Event::Start(start)).map_err(xml_err)?;
    if let Some(value) = &node.value {
        writer
            .write_event(Event::Text(BytesText::new(value)))
            .map_err(xml_err)?;
    }
    for child in &node.children {
        write_node(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(node.name.as_str())))
        .map_err(xml_err)?;

    Ok(())
}

/// Fold `recessive` into `dominant`: dominant wins on conflict, recessive-only
/// content is added, dominant order is preserved.
///
/// Overlapping children are keyed by node name and merged recursively, except
/// under a container marked `combine.children="append"`, where every recessive
/// child is appended after the dominant ones instead.
pub fn merge_into(dominant: &mut XmlNode, recessive: &XmlNode) {
    if dominant.value.is_none() {
        dominant.value = recessive.value.clone();
    }

    for (key, value) in &recessive.attributes {
        if dominant.attribute(key).is_none() {
            dominant.attributes.push((key.clone(), value.clone()));
        }
    }

    let append = dominant.attribute(CHILDREN_COMBINATION_MODE_ATTRIBUTE)
        == Some(CHILDREN_COMBINATION_APPEND);

    for incoming in &recessive.children {
        if append {
            dominant.children.push(incoming.clone());
        } else if let Some(existing) = dominant.child_mut(&incoming.name) {
            merge_into(existing, incoming);
        } else {
            dominant.children.push(incoming.clone());
        }
    }
}
