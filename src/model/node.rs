//! Node module: a single tree node and its decoded payload.

use crate::model::tree::NodeIndex;

// =#========================================================================#=
// PAYLOAD
// =#========================================================================#=
/// Decoded content of a node, filled in by a
/// [PayloadDecoder](crate::parser::PayloadDecoder).
///
/// All fields start at their defaults and are overwritten by each decode of
/// the node's bare text. `radius` is not set by any decoder; renderers use
/// it for the node bulb and may write it freely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    /// Node label (taxon name or group name); empty if absent.
    pub label: String,

    /// Length of the branch leading to this node; 0 if absent.
    pub branch_length: f64,

    /// The `{id}` annotation of jplace reference trees.
    pub node_id: Option<u64>,

    /// The optional `[edge]` annotation of jplace reference trees.
    pub edge_num: Option<u64>,

    /// Bulb radius for rendering.
    pub radius: f64,
}

impl Payload {
    /// Returns `true` if no field has been changed from its default.
    pub fn is_default(&self) -> bool {
        *self == Payload::default()
    }
}

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// A node of a [Tree](crate::model::Tree).
///
/// Nodes live in the tree's arena and refer to each other only through
/// [NodeIndex] values, so a node is meaningless without its tree. Structure
/// fields are maintained by [Tree::add_child](crate::model::Tree::add_child);
/// positions stay unset (`None` through the accessors) until the layout
/// passes have run.
#[derive(Debug, Clone)]
pub struct Node {
    /// Index of this node in the tree's arena
    pub(crate) index: NodeIndex,

    /// Index of the parent; `None` for the root
    pub(crate) parent: Option<NodeIndex>,

    /// Indices of the children, in left-to-right notation order
    pub(crate) children: Vec<NodeIndex>,

    /// Number of nodes in the subtree of this node, itself included
    pub(crate) n_subtree_nodes: usize,

    /// Offset of the first source character belonging to this node
    pub(crate) start: usize,

    /// Offset one past the last source character belonging to this node
    pub(crate) end: usize,

    /// Decoded content
    pub(crate) payload: Payload,

    /// Horizontal layout position; NaN until placed
    pub(crate) h_pos: f64,

    /// Vertical layout position; NaN until placed
    pub(crate) v_pos: f64,
}

impl Node {
    pub(crate) fn new(index: NodeIndex, span_start: usize) -> Self {
        Node {
            index,
            parent: None,
            children: Vec::new(),
            n_subtree_nodes: 1,
            start: span_start,
            end: span_start,
            payload: Payload::default(),
            h_pos: f64::NAN,
            v_pos: f64::NAN,
        }
    }

    /// Returns the index of this node in its tree.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Returns the index of the parent, or `None` for the root.
    pub fn parent_index(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Returns the indices of the children in left-to-right order.
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// Returns the number of direct children.
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Returns whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the number of nodes in the subtree of this node, itself
    /// included; a leaf reports 1.
    pub fn n_subtree_nodes(&self) -> usize {
        self.n_subtree_nodes
    }

    /// Returns the half-open `(start, end)` character range this node covers
    /// in the source string.
    pub fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Returns the decoded payload of this node.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Returns the decoded payload of this node for modification.
    pub fn payload_mut(&mut self) -> &mut Payload {
        &mut self.payload
    }

    /// Returns the node label; empty if absent.
    pub fn label(&self) -> &str {
        &self.payload.label
    }

    /// Returns the length of the branch leading to this node; 0 if absent.
    pub fn branch_length(&self) -> f64 {
        self.payload.branch_length
    }

    /// Returns the `{id}` annotation, if the node carries one.
    pub fn node_id(&self) -> Option<u64> {
        self.payload.node_id
    }

    /// Returns the horizontal layout position, or `None` before placement.
    pub fn h_pos(&self) -> Option<f64> {
        if self.h_pos.is_nan() { None } else { Some(self.h_pos) }
    }

    /// Returns the vertical layout position, or `None` before placement.
    pub fn v_pos(&self) -> Option<f64> {
        if self.v_pos.is_nan() { None } else { Some(self.v_pos) }
    }
}
