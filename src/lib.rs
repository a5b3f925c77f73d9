//! Jwick is a library to parse phylogenetic trees from Newick strings and
//! from the annotated reference trees of jplace (pplacer/EPA) placement
//! files, and to compute a 2-D layout suitable for rendering.
//!
//! Core functionality provided:
//! - Newick: parse nested-parenthesis tree notation in a single pass into
//!   an arena-pattern [Tree] of [Node]s — no direct node references are
//!   stored, only node indices.
//! - Decoders: bare text is interpreted by a pluggable
//!   [PayloadDecoder](crate::parser::PayloadDecoder); provided are a plain
//!   decoder (labels verbatim) and a jplace decoder that extracts the
//!   label, branch length and node id from `name:branch{id}` texts.
//! - Identifier index: jplace trees offer O(1) lookup of nodes by their
//!   `{id}` annotation, built once after parsing.
//! - Layout: a horizontal pass orders the leaves over consecutive integers
//!   and centers internal nodes over their children, a vertical pass
//!   accumulates branch lengths from the root; extreme queries over
//!   subtrees serve renderers.
//!
//! Limitations:
//! - The full input string must be in memory; there is no streaming API.
//! - Parsing is single-threaded; parse independent trees on independent
//!   threads if needed.
//!
//! # Usage patterns
//! 1. The quick functions [parse_newick_str] and [parse_jplace_str] cover
//!    the default configurations.
//! 2. Construct a [NewickParser](crate::parser::NewickParser) with a custom
//!    [PayloadDecoder](crate::parser::PayloadDecoder) for full control.
//!
//! ## Example
//! Parse a Newick string and lay it out:
//! ```
//! use jwick::parse_newick_str;
//!
//! let mut tree = parse_newick_str("(A,(B,C))").unwrap();
//! assert_eq!(tree.total_node_count(), 5);
//!
//! let num_leaves = tree.place_nodes();
//! assert_eq!(num_leaves, 3);
//! ```
//!
//! Parse a jplace reference tree and look a node up by id:
//! ```
//! use jwick::parse_jplace_str;
//!
//! let tree = parse_jplace_str("(A:0.1{0},B:0.2{1}):0{2}").unwrap();
//! assert_eq!(tree.node_by_id(1).unwrap().label(), "B");
//! ```

mod layout;
pub mod model;
pub mod parser;

pub use crate::model::{Node, NodeIndex, Payload, Tree};
pub use crate::parser::{NewickParser, ParseError};

// ============================================================================
// Quick API
// ============================================================================
/// Parses a Newick string with the plain decoder: every bare-text run is
/// stored verbatim as a node label.
///
/// See [NewickParser](crate::parser::NewickParser) for full documentation.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParseError> {
    NewickParser::new_plain().parse_str(newick.as_ref())
}

/// Parses the reference tree string of a jplace file and builds the
/// id-to-node index, so nodes can be looked up via
/// [Tree::node_by_id](crate::model::Tree::node_by_id).
///
/// # Errors
/// Besides parse errors, fails with
/// [ParseError::DuplicateNodeId](crate::parser::ParseError::DuplicateNodeId)
/// if two nodes carry the same `{id}` annotation.
pub fn parse_jplace_str<S: AsRef<str>>(tree_str: S) -> Result<Tree, ParseError> {
    let mut tree = NewickParser::new_jplace().parse_str(tree_str.as_ref())?;
    tree.build_id_index()?;
    Ok(tree)
}
