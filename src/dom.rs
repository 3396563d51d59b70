use std::collections::HashMap;

use crate::value::FileHandle;
use crate::{Error, Result};

mod attributes;
mod control_state;
mod html;
mod tree;

/// Handle to a node of the [`Dom`] that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element,
    Text,
    Comment,
}

#[derive(Debug, Clone)]
enum NodeData {
    Document,
    Element(Element),
    Text(String),
    Comment(String),
}

impl NodeData {
    fn kind(&self) -> NodeKind {
        match self {
            Self::Document => NodeKind::Document,
            Self::Element(_) => NodeKind::Element,
            Self::Text(_) => NodeKind::Text,
            Self::Comment(_) => NodeKind::Comment,
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// Tag, attributes and the live state a browser keeps apart from attributes.
#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attrs: HashMap<String, String>,
    value: String,
    checked: bool,
    files: Vec<FileHandle>,
}

impl Element {
    fn new(tag: &str, attrs: HashMap<String, String>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            value: attrs.get("value").cloned().unwrap_or_default(),
            checked: attrs.contains_key("checked"),
            attrs,
            files: Vec::new(),
        }
    }

    fn input_type(&self) -> Option<String> {
        (self.tag == "input").then(|| {
            self.attrs
                .get("type")
                .map_or_else(|| "text".to_string(), |kind| kind.to_ascii_lowercase())
        })
    }

    fn has_input_type(&self, wanted: &[&str]) -> bool {
        self.input_type()
            .is_some_and(|kind| wanted.contains(&kind.as_str()))
    }
}

/// An arena-backed document tree.
///
/// Nodes are never freed; detaching a node only unlinks it from its parent, so
/// a `NodeId` stays valid for the lifetime of the `Dom` that issued it. Ids
/// from another `Dom` that fall outside the arena read as absent nodes.
#[derive(Debug, Clone)]
pub struct Dom {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Document,
            }],
            root: NodeId(0),
        }
    }

    pub fn parse_html(html: &str) -> Result<Self> {
        html::parse_html(html)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// `None` for an id this `Dom` never issued.
    pub fn kind(&self, node_id: NodeId) -> Option<NodeKind> {
        self.nodes.get(node_id.0).map(|node| node.data.kind())
    }

    fn node(&self, node_id: NodeId) -> Result<&Node> {
        self.nodes
            .get(node_id.0)
            .ok_or_else(|| Error::InvalidNode(format!("unknown node #{}", node_id.0)))
    }

    fn node_mut(&mut self, node_id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(node_id.0)
            .ok_or_else(|| Error::InvalidNode(format!("unknown node #{}", node_id.0)))
    }

    fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes.get(node_id.0)?.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node_id.0)?.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    fn require_element(&self, node_id: NodeId, operation: &str) -> Result<&Element> {
        self.element(node_id)
            .ok_or_else(|| Error::InvalidNode(format!("{operation}: node is not an element")))
    }

    fn require_element_mut(&mut self, node_id: NodeId, operation: &str) -> Result<&mut Element> {
        self.element_mut(node_id)
            .ok_or_else(|| Error::InvalidNode(format!("{operation}: node is not an element")))
    }

    /// Lower-cased tag name, `None` for non-element nodes.
    pub fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|element| element.tag.as_str())
    }

    /// Lower-cased `type` of an `<input>`, defaulting to `"text"`.
    pub fn input_type(&self, node_id: NodeId) -> Option<String> {
        self.element(node_id).and_then(Element::input_type)
    }
}
