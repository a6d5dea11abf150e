//! Arena-based DOM tree.
//!
//! Nodes live in a flat, fixed-capacity `Vec` arena and are linked by
//! index, never by reference. Each parse owns a fresh arena, so a tree can
//! never dangle into storage reused by a later document. Nodes are never
//! removed individually.

use crate::tag::TagKind;

/// Index into the [`Document`]'s node arena.
pub type NodeId = usize;

/// Arena capacity. Node creation stops silently once all slots are used.
pub const MAX_NODES: usize = 512;

/// Per-node child cap. Appends beyond it are dropped.
pub const MAX_CHILDREN: usize = 64;

/// The kind of a DOM node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// The implicit document element at the root.
    Document,
    Element(ElementData),
    Text(String),
}

/// Data carried by an Element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    pub tag: TagKind,
    /// `href` attribute value, when present (links).
    pub href: Option<String>,
    /// `src` attribute value, when present (images).
    pub src: Option<String>,
}

impl ElementData {
    pub fn new(tag: TagKind) -> Self {
        Self {
            tag,
            href: None,
            src: None,
        }
    }
}

/// A single node in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    /// Weak back-reference: an index, valid only within this arena.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
}

/// One document's node arena.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    truncated: bool,
}

impl Document {
    /// Create an empty document holding only the implicit root.
    pub fn new() -> Self {
        let root_node = Node {
            kind: NodeKind::Document,
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root_node],
            root: 0,
            truncated: false,
        }
    }

    /// The implicit document element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// True once node creation has been halted by arena exhaustion.
    ///
    /// Parsing itself never fails; this flag is the only signal that the
    /// returned tree is partial.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Allocate a node. Returns `None` and marks the document truncated
    /// when the arena is full.
    pub fn add_node(&mut self, kind: NodeKind) -> Option<NodeId> {
        if self.nodes.len() >= MAX_NODES {
            self.truncated = true;
            return None;
        }
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        Some(id)
    }

    /// Append `child_id` as the last child of `parent_id`.
    ///
    /// Checked: a parent already holding [`MAX_CHILDREN`] children drops
    /// the append silently (the child node stays in the arena, detached).
    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        if self.nodes[parent_id].children.len() >= MAX_CHILDREN {
            return;
        }
        self.nodes[parent_id].children.push(child_id);
        self.nodes[child_id].parent = Some(parent_id);
    }

    /// Node by ID.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// The [`ElementData`] of a node, if it is an Element.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.nodes[id].kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Concatenated text of a node and all its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id].kind {
            NodeKind::Text(s) => out.push_str(s),
            _ => {
                for &child in &self.nodes[id].children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Depth-first search for the first element with the given tag.
    pub fn find_first(&self, tag: TagKind) -> Option<NodeId> {
        self.find_first_from(self.root, tag)
    }

    fn find_first_from(&self, id: NodeId, tag: TagKind) -> Option<NodeId> {
        if let NodeKind::Element(ref data) = self.nodes[id].kind {
            if data.tag == tag {
                return Some(id);
            }
        }
        for &child in &self.nodes[id].children {
            if let Some(found) = self.find_first_from(child, tag) {
                return Some(found);
            }
        }
        None
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
