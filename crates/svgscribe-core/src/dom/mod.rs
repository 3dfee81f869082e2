//! Arena-backed SVG document tree.

mod attribute;
mod element;
mod reader;
mod writer;

pub use attribute::AttributeValue;
pub use element::{ElementKind, ElementRegistry};
pub use reader::load;
pub use writer::{WriteOptions, write};

use crate::error::TreeStructureError;
use crate::types::Style;
use indexmap::IndexMap;

/// Handle to a node inside one [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn from_index(index: usize) -> Self {
        NodeId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out `e1`, `e2`, ... for one document.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn next_id(&mut self) -> String {
        self.last += 1;
        format!("e{}", self.last)
    }

    /// Moves past an explicitly assigned id of the generated shape so it is never handed out.
    pub fn observe(&mut self, id: &str) {
        if let Some(n) = id.strip_prefix('e').and_then(|n| n.parse::<u64>().ok()) {
            self.last = self.last.max(n);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: ElementKind,
    id: String,
    attributes: IndexMap<String, AttributeValue>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    fn new(kind: ElementKind, id: String) -> Self {
        Self {
            kind,
            id,
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn attr(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<AttributeValue> {
        self.attributes.shift_remove(name)
    }

    pub fn style(&self) -> Option<&Style> {
        self.attr("style").and_then(AttributeValue::as_style)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_character_data(&self) -> bool {
        self.kind == ElementKind::CharacterData
    }
}

/// Owns every node of one SVG document.
///
/// Nodes are created detached and linked with [`Document::append_child`]. A node has at most one
/// parent and the tree never contains a cycle; both rules are checked on every link.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    ids: IdGenerator,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detached element with a generated id.
    pub fn create_element(&mut self, kind: ElementKind) -> NodeId {
        let id = self.ids.next_id();
        self.push(Node::new(kind, id))
    }

    pub fn create_element_with_id(&mut self, kind: ElementKind, id: impl Into<String>) -> NodeId {
        let id = id.into();
        self.ids.observe(&id);
        self.push(Node::new(kind, id))
    }

    /// Creates a detached character-data node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        let mut node = Node::new(ElementKind::CharacterData, String::new());
        node.text = Some(text.into());
        self.push(node)
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, root: NodeId) -> Result<(), TreeStructureError> {
        self.check(root)?;
        self.root = Some(root);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    fn check(&self, id: NodeId) -> Result<&Node, TreeStructureError> {
        self.node(id)
            .ok_or(TreeStructureError::UnknownNode { node: id })
    }

    fn check_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeStructureError> {
        self.nodes
            .get_mut(id.0)
            .ok_or(TreeStructureError::UnknownNode { node: id })
    }

    pub fn kind(&self, id: NodeId) -> Option<&ElementKind> {
        self.node(id).map(Node::kind)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or_default()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    /// Links `child` as the last child of `parent`.
    ///
    /// Fails without touching either tree when `child` is `parent` itself or one of its
    /// ancestors (checked first), or when `child` already has a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeStructureError> {
        self.check(parent)?;
        self.check(child)?;
        let mut cursor = Some(parent);
        while let Some(n) = cursor {
            if n == child {
                return Err(TreeStructureError::Cycle { child, parent });
            }
            cursor = self.parent(n);
        }
        if let Some(existing) = self.nodes[child.0].parent {
            return Err(TreeStructureError::AlreadyParented {
                child,
                parent: existing,
            });
        }

        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Unlinks `node` from its parent, if any. The subtree stays intact.
    pub fn detach(&mut self, node: NodeId) -> Result<(), TreeStructureError> {
        let Some(parent) = self.check(node)?.parent else {
            return Ok(());
        };
        self.nodes[parent.0].children.retain(|c| *c != node);
        self.nodes[node.0].parent = None;
        Ok(())
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&AttributeValue> {
        self.node(id).and_then(|n| n.attr(name))
    }

    pub fn set_attr(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Result<(), TreeStructureError> {
        self.check_mut(id)?.set_attr(name, value);
        Ok(())
    }

    pub fn remove_attr(
        &mut self,
        id: NodeId,
        name: &str,
    ) -> Result<Option<AttributeValue>, TreeStructureError> {
        Ok(self.check_mut(id)?.remove_attr(name))
    }

    pub fn style(&self, id: NodeId) -> Option<&Style> {
        self.node(id).and_then(Node::style)
    }

    pub fn set_style(&mut self, id: NodeId, style: Style) -> Result<(), TreeStructureError> {
        self.set_attr(id, "style", style)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(Node::text)
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), TreeStructureError> {
        self.check_mut(id)?.set_text(text);
        Ok(())
    }

    pub fn set_id(&mut self, id: NodeId, value: impl Into<String>) -> Result<(), TreeStructureError> {
        let value = value.into();
        self.ids.observe(&value);
        self.check_mut(id)?.id = value;
        Ok(())
    }

    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.nodes.iter().position(|n| n.id == id).map(NodeId)
    }

    /// `node` and everything below it, in document order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.node(node).is_none() {
            return out;
        }
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    /// Generates a fresh id without creating a node.
    pub fn next_id(&mut self) -> String {
        self.ids.next_id()
    }
}
