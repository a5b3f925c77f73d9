//! 2-D layout for parsed trees.
//!
//! Two independent passes assign coordinates to every node:
//! - the **horizontal pass** (post-order) gives the leaves the consecutive
//!   integers `0..num_leaves` left to right and centers each internal node
//!   midway between its first and last direct child;
//! - the **vertical pass** (pre-order) pins the root at 0 and places every
//!   other node at its parent's position plus its own branch length.
//!
//! Both passes are pure functions of tree shape and branch lengths and can
//! be re-run at any time, e.g. after [Tree::sort] changed child order.
//! Aggregate extreme queries are computed on demand and return `None` until
//! the passes have run.

use crate::model::{Node, NodeIndex, Tree};

// ============================================================================
// Placement passes
// ============================================================================
impl Tree {
    /// Runs both layout passes and returns the number of leaves.
    ///
    /// # Example
    /// ```
    /// use jwick::parse_jplace_str;
    ///
    /// let mut tree = parse_jplace_str("(A:1{1},B:2{2}):0{0}").unwrap();
    /// assert_eq!(tree.place_nodes(), 2);
    /// assert_eq!(tree.root().h_pos(), Some(0.5));
    /// assert_eq!(tree.root().v_pos(), Some(0.0));
    /// ```
    pub fn place_nodes(&mut self) -> usize {
        let num_leaves = self.place_h();
        self.place_v();
        num_leaves
    }

    /// Horizontal pass. Assigns each leaf the next counter value in
    /// left-to-right order and centers each internal node over its first
    /// and last direct children; returns the final counter value, which
    /// equals the number of leaves.
    ///
    /// Note the centering uses the direct children's extremes, not the
    /// subtree's leaf extremes; the two differ once child order has been
    /// changed by sorting.
    pub fn place_h(&mut self) -> usize {
        let order: Vec<NodeIndex> = self.post_order().map(Node::index).collect();
        let mut counter = 0;
        for index in order {
            let children = self.node(index).children();
            if children.is_empty() {
                self.node_mut(index).h_pos = counter as f64;
                counter += 1;
            } else {
                let first = children[0];
                let last = children[children.len() - 1];
                self.node_mut(index).h_pos = (self[first].h_pos + self[last].h_pos) / 2.0;
            }
        }
        counter
    }

    /// Vertical pass. The root sits at 0 (its own branch length, if any, is
    /// excluded); every other node at its parent's position plus its own
    /// branch length. Idempotent.
    pub fn place_v(&mut self) {
        let order: Vec<NodeIndex> = self.pre_order().map(Node::index).collect();
        for index in order {
            let v_pos = match self.node(index).parent_index() {
                None => 0.0,
                Some(parent) => self[parent].v_pos + self[index].branch_length(),
            };
            self.node_mut(index).v_pos = v_pos;
        }
    }
}

// ============================================================================
// Aggregate queries (on demand, require placement)
// ============================================================================
impl Tree {
    /// Horizontal position of the leftmost direct child of `index`, or the
    /// node's own position if it is a leaf. `None` before placement.
    pub fn child_hmin(&self, index: NodeIndex) -> Option<f64> {
        match self.node(index).children().first() {
            Some(&child) => self[child].h_pos(),
            None => self.node(index).h_pos(),
        }
    }

    /// Horizontal position of the rightmost direct child of `index`, or the
    /// node's own position if it is a leaf. `None` before placement.
    pub fn child_hmax(&self, index: NodeIndex) -> Option<f64> {
        match self.node(index).children().last() {
            Some(&child) => self[child].h_pos(),
            None => self.node(index).h_pos(),
        }
    }

    /// Horizontal position of the leftmost leaf in the subtree of `index`,
    /// following first children down. `None` before placement.
    pub fn subtree_hmin(&self, index: NodeIndex) -> Option<f64> {
        let mut current = index;
        while let Some(&child) = self.node(current).children().first() {
            current = child;
        }
        self.node(current).h_pos()
    }

    /// Horizontal position of the rightmost leaf in the subtree of `index`,
    /// following last children down. `None` before placement.
    pub fn subtree_hmax(&self, index: NodeIndex) -> Option<f64> {
        let mut current = index;
        while let Some(&child) = self.node(current).children().last() {
            current = child;
        }
        self.node(current).h_pos()
    }

    /// Minimal vertical position among the direct children of `index`;
    /// `None` for a leaf or before placement.
    pub fn child_vmin(&self, index: NodeIndex) -> Option<f64> {
        let children = self.node(index).children();
        if children.is_empty() {
            return None;
        }
        let mut min = f64::INFINITY;
        for &child in children {
            min = min.min(self[child].v_pos()?);
        }
        Some(min)
    }

    /// Maximal vertical position among the direct children of `index`;
    /// `None` for a leaf or before placement.
    pub fn child_vmax(&self, index: NodeIndex) -> Option<f64> {
        let children = self.node(index).children();
        if children.is_empty() {
            return None;
        }
        let mut max = f64::NEG_INFINITY;
        for &child in children {
            max = max.max(self[child].v_pos()?);
        }
        Some(max)
    }

    /// Minimal vertical position over the whole subtree of `index` (the
    /// node itself included). `None` before placement.
    pub fn subtree_vmin(&self, index: NodeIndex) -> Option<f64> {
        let mut min = f64::INFINITY;
        for node in self.subtree(index) {
            min = min.min(node.v_pos()?);
        }
        Some(min)
    }

    /// Maximal vertical position over the whole subtree of `index` (the
    /// node itself included). Requires a full subtree scan, since vertical
    /// position is not monotonic by traversal order alone. `None` before
    /// placement.
    pub fn subtree_vmax(&self, index: NodeIndex) -> Option<f64> {
        let mut max = f64::NEG_INFINITY;
        for node in self.subtree(index) {
            max = max.max(node.v_pos()?);
        }
        Some(max)
    }

    /// Horizontal position of the leftmost leaf of the tree.
    pub fn hmin(&self) -> Option<f64> {
        if !self.is_root_set() {
            return None;
        }
        self.subtree_hmin(self.root_index())
    }

    /// Horizontal position of the rightmost leaf of the tree.
    pub fn hmax(&self) -> Option<f64> {
        if !self.is_root_set() {
            return None;
        }
        self.subtree_hmax(self.root_index())
    }

    /// Minimal vertical position in the tree.
    pub fn vmin(&self) -> Option<f64> {
        if !self.is_root_set() {
            return None;
        }
        self.subtree_vmin(self.root_index())
    }

    /// Maximal vertical position in the tree.
    pub fn vmax(&self) -> Option<f64> {
        if !self.is_root_set() {
            return None;
        }
        self.subtree_vmax(self.root_index())
    }
}
