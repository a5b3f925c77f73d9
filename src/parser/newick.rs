//! Single-pass parser for nested-parenthesis tree notation.
//!
//! This module provides [NewickParser], a character-stream state machine
//! that builds a [Tree] while delegating all text interpretation to a
//! [PayloadDecoder]. Only `(`, `)` and `,` are structural; every other
//! character belongs to a bare-text run.
//!
//! The parser keeps one implicit state per open node: a ready-for-next-node
//! flag that is true initially and after each `,`, and false once a child
//! has been added. The flag decides whether a bare-text run starts a new
//! sibling or is a trailing annotation of the most recently added child —
//! this is how a group's own label (`(A,B)label`) reaches the group node.

use crate::model::{NodeIndex, Tree};
use crate::parser::decoder::{JplaceDecoder, PayloadDecoder, PlainDecoder};
use crate::parser::error::ParseError;
use tracing::warn;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================#=
/// Parser for trees in nested-parenthesis notation, generic over the
/// [PayloadDecoder] that interprets bare text.
///
/// # Construction
/// * [`new(decoder)`](Self::new) — generic constructor
/// * [`new_plain()`](Self::new_plain) — labels stored verbatim
/// * [`new_jplace()`](Self::new_jplace) — `name:branch{id}` annotations
///
/// # Parsing
/// * [`parse_str`](Self::parse_str) — parse into a fresh [Tree]
/// * [`parse_into`](Self::parse_into) — parse into a caller-provided empty
///   [Tree]; a populated tree is rejected
///
/// Parsing always starts at a synthetic top-level node that receives the
/// top-level sequence as its children. If that node ends up with a single
/// child — the common case of an input that is one parenthesized group —
/// it is elided and the group becomes the root.
///
/// # Example
/// ```
/// use jwick::parser::NewickParser;
///
/// let tree = NewickParser::new_plain().parse_str("(A,(B,C))").unwrap();
/// assert_eq!(tree.total_node_count(), 5);
/// assert_eq!(tree.num_leaves(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NewickParser<D: PayloadDecoder> {
    decoder: D,
}

impl<D: PayloadDecoder> NewickParser<D> {
    /// Creates a parser using the given decoder.
    pub fn new(decoder: D) -> Self {
        Self { decoder }
    }
}

impl NewickParser<PlainDecoder> {
    /// Creates a parser that stores bare text verbatim as node labels.
    pub fn new_plain() -> Self {
        Self::new(PlainDecoder)
    }
}

impl NewickParser<JplaceDecoder> {
    /// Creates a parser for jplace reference trees
    /// (`name:branch{id}[edge]` node texts).
    pub fn new_jplace() -> Self {
        Self::new(JplaceDecoder)
    }
}

// ============================================================================
// Parsing (pub)
// ============================================================================
impl<D: PayloadDecoder> NewickParser<D> {
    /// Parses `input` into a fresh [Tree].
    ///
    /// # Errors
    /// See [ParseError]; any structural or decoder error aborts the parse.
    pub fn parse_str(&self, input: &str) -> Result<Tree, ParseError> {
        let mut tree = Tree::new();
        self.parse_into(&mut tree, input)?;
        Ok(tree)
    }

    /// Parses `input` into `tree`, which must not have been parsed before.
    ///
    /// The whole input is consumed in a single left-to-right pass; no
    /// recursion is involved, so nesting depth is bounded only by memory.
    ///
    /// # Errors
    /// - [ParseError::AlreadyParsed] if `tree` already has a root
    /// - [ParseError::OrphanClose] on a `)` with no group open
    /// - [ParseError::UnclosedGroup] if a `(` is never closed
    /// - [ParseError::MissingSeparator] on two siblings without a `,`
    /// - [ParseError::InvalidPayload] if the decoder rejects a text run
    pub fn parse_into(&self, tree: &mut Tree, input: &str) -> Result<(), ParseError> {
        if tree.is_root_set() {
            return Err(ParseError::AlreadyParsed);
        }

        let top = tree.alloc_node(0);
        tree.set_root(top)?;

        // Ready-for-next-node flag per node, parallel to the arena.
        let mut ready = vec![true];
        let mut current = top;
        let mut last_pos = 0;

        // Structural characters are ASCII, so byte positions are always
        // valid char boundaries for slicing bare-text runs.
        for (pos, byte) in input.bytes().enumerate() {
            match byte {
                b'(' => {
                    if pos > last_pos {
                        // Leading text before a group has no meaning; drop it.
                        warn!(
                            start = last_pos,
                            end = pos,
                            text = &input[last_pos..pos],
                            "discarding stray text before '('"
                        );
                    }
                    let node = tree.alloc_node(pos);
                    ready.push(true);
                    Self::attach(tree, &mut ready, current, node, pos)?;
                    current = node;
                    last_pos = pos + 1;
                }
                b',' => {
                    self.put_bare_text(tree, &mut ready, current, last_pos, &input[last_pos..pos])?;
                    ready[current] = true;
                    last_pos = pos + 1;
                }
                b')' => {
                    if current == top {
                        return Err(ParseError::OrphanClose(pos));
                    }
                    tree.node_mut(current).end = pos + 1;
                    self.put_bare_text(tree, &mut ready, current, last_pos, &input[last_pos..pos])?;
                    current = tree
                        .node(current)
                        .parent_index()
                        .expect("non-top node has a parent");
                    last_pos = pos + 1;
                }
                _ => {} // bare text, consumed at the next structural char
            }
        }

        if current != top {
            return Err(ParseError::UnclosedGroup(tree.node(current).span().0));
        }

        // Trailing text after the last top-level item; by the ready-flag
        // rule this usually annotates that item (e.g. "(...)label").
        self.put_bare_text(tree, &mut ready, top, last_pos, &input[last_pos..])?;
        tree.node_mut(top).end = input.len();

        // The synthetic top node never receives text of its own; when the
        // whole input was a single item, that item is the real root.
        if tree.root().num_children() == 1 {
            tree.promote_single_child_root();
        }

        Ok(())
    }
}

// ============================================================================
// Parsing internals
// ============================================================================
impl<D: PayloadDecoder> NewickParser<D> {
    /// Delivers a bare-text run (possibly empty) to `current`: a new child
    /// if the ready flag is set, otherwise a trailing re-decode on the most
    /// recently added child.
    fn put_bare_text(
        &self,
        tree: &mut Tree,
        ready: &mut Vec<bool>,
        current: NodeIndex,
        pos: usize,
        text: &str,
    ) -> Result<(), ParseError> {
        if ready[current] {
            let node = tree.alloc_node(pos);
            ready.push(true);
            tree.node_mut(node).end = pos + text.len();
            self.decode_into(tree, node, pos, text)?;
            Self::attach(tree, ready, current, node, pos)?;
        } else {
            let last = *tree
                .node(current)
                .children()
                .last()
                .expect("unready node has at least one child");
            self.decode_into(tree, last, pos, text)?;
        }
        Ok(())
    }

    fn decode_into(
        &self,
        tree: &mut Tree,
        node: NodeIndex,
        pos: usize,
        text: &str,
    ) -> Result<(), ParseError> {
        self.decoder
            .decode(text, tree.node_mut(node).payload_mut())
            .map_err(|source| ParseError::InvalidPayload {
                position: pos,
                text: text.to_owned(),
                source,
            })
    }

    /// Adds `child` under `parent` if the parent is ready for a node, and
    /// clears the flag; two nodes in a row without a separator are a format
    /// error.
    fn attach(
        tree: &mut Tree,
        ready: &mut [bool],
        parent: NodeIndex,
        child: NodeIndex,
        pos: usize,
    ) -> Result<(), ParseError> {
        if !ready[parent] {
            return Err(ParseError::MissingSeparator(pos));
        }
        tree.add_child(parent, child);
        ready[parent] = false;
        Ok(())
    }
}
