//! Tree module for phylogenetic tree representation.
//!
//! This module provides the core data structures:
//! - `Tree`: the tree container, using the arena pattern.
//! - `NodeIndex` is used to index nodes within a tree's arena.
//!
//! Traversal is provided by stack-based iterators ([PreOrderIter],
//! [PostOrderIter]), so stack usage stays bounded regardless of how deeply
//! the source notation was nested.

use crate::model::node::Node;
use crate::parser::error::ParseError;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Index of a node in a tree (arena).
pub type NodeIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET: NodeIndex = usize::MAX;

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// A rooted phylogenetic tree represented using the arena pattern on [Node].
///
/// Nodes are stored in a contiguous vector and referenced by [NodeIndex];
/// parent links are plain indices, so no ownership cycles exist and the
/// container exclusively owns every node.
///
/// # Structure
/// - Children are kept in insertion order (left-to-right notation order)
/// - Each node caches the size of its subtree (itself plus all descendants);
///   [add_child](Self::add_child) keeps the cache consistent by recounting
///   upward to the root
/// - Nodes are never removed once added
///
/// # Construction
/// A tree is usually populated by a
/// [NewickParser](crate::parser::NewickParser); exactly one parse is
/// permitted per tree instance. Trees can also be built manually:
///
/// ```
/// use jwick::model::Tree;
///
/// let mut tree = Tree::new();
/// let root = tree.alloc_node(0);
/// tree.set_root(root).unwrap();
/// let a = tree.alloc_node(1);
/// let b = tree.alloc_node(3);
/// tree.add_child(root, a);
/// tree.add_child(root, b);
///
/// assert_eq!(tree.total_node_count(), 3);
/// assert_eq!(tree.root().children(), &[a, b]);
/// ```
#[derive(Debug, Clone)]
pub struct Tree {
    /// Nodes of this tree (arena pattern)
    nodes: Vec<Node>,

    /// Index of the root of this tree
    root_index: NodeIndex,

    /// Mapping from `{id}` annotation to node, built by
    /// [build_id_index](Self::build_id_index)
    id_index: Option<HashMap<u64, NodeIndex>>,
}

// ============================================================================
// New, Getters / Accessors (pub)
// ============================================================================
impl Tree {
    /// Creates a new, empty tree with no root set.
    pub fn new() -> Self {
        Tree {
            nodes: Vec::new(),
            root_index: NO_ROOT_SET,
            id_index: None,
        }
    }

    /// Returns whether the root of the tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET
    }

    /// Returns a reference to the root node.
    ///
    /// # Panics
    /// Panics if no root has been set yet.
    pub fn root(&self) -> &Node {
        &self.nodes[self.root_index()]
    }

    /// Returns the index of the root node.
    ///
    /// # Panics
    /// Panics if no root has been set yet.
    pub fn root_index(&self) -> NodeIndex {
        assert!(self.is_root_set(), "tree has no root");
        self.root_index
    }

    /// Returns a reference to the node at the given index.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index]
    }

    /// Returns a mutable reference to the node at the given index.
    pub fn node_mut(&mut self, index: NodeIndex) -> &mut Node {
        &mut self.nodes[index]
    }

    /// Returns the number of nodes in the arena.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of leaves (nodes without children).
    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Returns the total number of nodes reachable from the root,
    /// i.e. the root's cached subtree size.
    ///
    /// # Panics
    /// Panics if no root has been set yet.
    pub fn total_node_count(&self) -> usize {
        self.root().n_subtree_nodes()
    }
}

impl Default for Tree {
    // Derived Default would set root_index to 0, claiming a root on an
    // empty arena.
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Structure building (pub)
// ============================================================================
impl Tree {
    /// Allocates a new, detached node with the given source start offset and
    /// returns its index.
    pub fn alloc_node(&mut self, span_start: usize) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(Node::new(index, span_start));
        index
    }

    /// Sets the root of the tree.
    ///
    /// # Errors
    /// Returns [ParseError::AlreadyParsed] if a root is already set; a tree
    /// is populated at most once.
    pub fn set_root(&mut self, index: NodeIndex) -> Result<(), ParseError> {
        if self.is_root_set() {
            return Err(ParseError::AlreadyParsed);
        }
        self.root_index = index;
        Ok(())
    }

    /// Appends `child` to `parent`'s children and binds the parent link,
    /// then recounts subtree sizes upward from `parent` to the root.
    ///
    /// No cycle check is performed; callers must add each node exactly once
    /// and never beneath one of its own descendants.
    ///
    /// # Panics
    /// Panics if `child` already has a parent.
    pub fn add_child(&mut self, parent: NodeIndex, child: NodeIndex) {
        assert!(
            self.nodes[child].parent.is_none(),
            "node {child} already has a parent"
        );
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        self.recount_subtree_nodes_upward(parent);
    }

    /// Re-derives `n_subtree_nodes` from direct children for `from` and each
    /// of its ancestors.
    fn recount_subtree_nodes_upward(&mut self, from: NodeIndex) {
        let mut current = Some(from);
        while let Some(index) = current {
            let count: usize = self.nodes[index]
                .children
                .iter()
                .map(|&c| self.nodes[c].n_subtree_nodes)
                .sum();
            self.nodes[index].n_subtree_nodes = count + 1;
            current = self.nodes[index].parent;
        }
    }

    /// Promotes the only child of the current root to be the root itself,
    /// dropping the old root from the arena and re-basing all indices.
    ///
    /// Used by the parser to elide its synthetic top-level node; the old
    /// root must be the first allocated node and have exactly one child.
    pub(crate) fn promote_single_child_root(&mut self) {
        debug_assert_eq!(self.root_index, 0);
        debug_assert_eq!(self.nodes[0].children.len(), 1);

        self.nodes.remove(0);
        for node in &mut self.nodes {
            node.index -= 1;
            // The promoted child was parented to the old root at index 0.
            node.parent = match node.parent {
                Some(0) => None,
                other => other.map(|p| p - 1),
            };
            for child in &mut node.children {
                *child -= 1;
            }
        }
        self.root_index = 0;
    }
}

// ============================================================================
// Sorting & ancestry (pub)
// ============================================================================
impl Tree {
    /// Reorders the direct children of `index` by ascending subtree size
    /// (descending if `reverse`). The sort is stable and does not recurse.
    pub fn sort_children_of(&mut self, index: NodeIndex, reverse: bool) {
        let mut children = std::mem::take(&mut self.nodes[index].children);
        if reverse {
            children.sort_by_key(|&c| Reverse(self.nodes[c].n_subtree_nodes));
        } else {
            children.sort_by_key(|&c| self.nodes[c].n_subtree_nodes);
        }
        self.nodes[index].children = children;
    }

    /// Applies [sort_children_of](Self::sort_children_of) to every node
    /// reachable from the root, changing left-to-right order everywhere.
    ///
    /// Horizontal layout results change accordingly if recomputed afterwards.
    pub fn sort(&mut self, reverse: bool) {
        let order: Vec<NodeIndex> = self.pre_order().map(Node::index).collect();
        for index in order {
            self.sort_children_of(index, reverse);
        }
    }

    /// Returns `true` if `node` lies strictly below `ancestor`, i.e.
    /// `ancestor` appears on the parent chain from `node` to the root.
    /// O(depth).
    pub fn is_descendant_of(&self, node: NodeIndex, ancestor: NodeIndex) -> bool {
        // Start at the parent so a node does not count as its own ancestor.
        let mut current = self.nodes[node].parent;
        while let Some(index) = current {
            if index == ancestor {
                return true;
            }
            current = self.nodes[index].parent;
        }
        false
    }

    /// Returns `true` if `node` lies strictly above `descendant`. O(depth).
    pub fn is_ancestor_of(&self, node: NodeIndex, descendant: NodeIndex) -> bool {
        self.is_descendant_of(descendant, node)
    }
}

// ============================================================================
// Identifier index (pub)
// ============================================================================
impl Tree {
    /// Builds the id-to-node index from all nodes carrying a `{id}`
    /// annotation, via a full traversal. Nodes without an id are skipped.
    ///
    /// # Errors
    /// Returns [ParseError::DuplicateNodeId] if two nodes carry the same id;
    /// the index is left unbuilt in that case.
    pub fn build_id_index(&mut self) -> Result<(), ParseError> {
        let mut index = HashMap::new();
        for node in self.pre_order() {
            if let Some(id) = node.node_id() {
                match index.entry(id) {
                    Entry::Vacant(e) => {
                        e.insert(node.index());
                    }
                    Entry::Occupied(_) => return Err(ParseError::DuplicateNodeId(id)),
                }
            }
        }
        self.id_index = Some(index);
        Ok(())
    }

    /// Returns whether [build_id_index](Self::build_id_index) has run.
    pub fn has_id_index(&self) -> bool {
        self.id_index.is_some()
    }

    /// Looks up a node by its `{id}` annotation in O(1).
    ///
    /// # Errors
    /// - [ParseError::IndexNotBuilt] if the index has not been built
    /// - [ParseError::UnknownNodeId] if no node carries this id
    pub fn node_by_id(&self, id: u64) -> Result<&Node, ParseError> {
        let index = self.id_index.as_ref().ok_or(ParseError::IndexNotBuilt)?;
        match index.get(&id) {
            Some(&node) => Ok(&self.nodes[node]),
            None => Err(ParseError::UnknownNodeId(id)),
        }
    }
}

impl std::ops::Index<NodeIndex> for Tree {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

impl std::ops::IndexMut<NodeIndex> for Tree {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[index]
    }
}

// ============================================================================
// Traversal (pub)
// ============================================================================
impl Tree {
    /// Returns an iterator over all nodes reachable from the root in
    /// pre-order (each node before its children, children left to right).
    ///
    /// Empty if no root is set. Each call starts a fresh traversal.
    pub fn pre_order(&self) -> PreOrderIter<'_> {
        if self.is_root_set() {
            PreOrderIter::new(self, self.root_index)
        } else {
            PreOrderIter { tree: self, stack: Vec::new() }
        }
    }

    /// Returns a pre-order iterator over the subtree rooted at `index`
    /// (the node itself, then each child's full subtree in order).
    pub fn subtree(&self, index: NodeIndex) -> PreOrderIter<'_> {
        PreOrderIter::new(self, index)
    }

    /// Returns an iterator over all nodes reachable from the root in
    /// post-order (children before parents, children left to right).
    ///
    /// Empty if no root is set.
    pub fn post_order(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================#=
/// Iterator for pre-order traversal (parents before children).
///
/// Uses an explicit stack, so traversal depth never grows the call stack.
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<NodeIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a Tree, start: NodeIndex) -> Self {
        PreOrderIter { tree, stack: vec![start] }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let node = &self.tree.nodes[index];

        // Push children in reverse so the leftmost is processed first.
        for &child in node.children().iter().rev() {
            self.stack.push(child);
        }

        Some(node)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// Uses an explicit stack, so traversal depth never grows the call stack.
pub struct PostOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<(NodeIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push((tree.root_index, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let node = &self.tree.nodes[index];

            if children_visited || node.is_leaf() {
                return Some(node);
            }

            self.stack.push((index, true));
            for &child in node.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}
