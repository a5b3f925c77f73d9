//! Error types for Newick and jplace tree parsing.

use thiserror::Error;

/// Reasons a [PayloadDecoder](crate::parser::decoder::PayloadDecoder)
/// can reject a bare-text fragment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("expected 'name:annotation' but found no ':' separator")]
    MissingColon,

    #[error("node annotation does not match 'branch{{id}}[edge]'")]
    BadAnnotation,

    #[error("invalid branch length '{0}'")]
    BadBranchLength(String),
}

/// Fatal conditions raised while parsing a tree or querying its
/// identifier index.
///
/// All variants carry enough context (character offset, offending text) to
/// diagnose the input. Non-fatal conditions (stray text discarded before a
/// `(`) are reported through `tracing::warn!` instead and never surface
/// here.
#[derive(Debug, PartialEq, Error)]
pub enum ParseError {
    /// A `)` appeared with no group open.
    #[error("orphan ')' at position {0}")]
    OrphanClose(usize),

    /// A `(` was never closed before the input ended.
    #[error("expected ')' to close '(' opened at position {0}")]
    UnclosedGroup(usize),

    /// Two sibling nodes appeared without a `,` between them.
    #[error("expected ',' between sibling nodes at position {0}")]
    MissingSeparator(usize),

    /// `parse_into` was called on a tree that already holds a parse result.
    #[error("tree is already populated; each tree parses exactly once")]
    AlreadyParsed,

    /// The decoder rejected a bare-text fragment.
    #[error("invalid node text {text:?} at position {position}: {source}")]
    InvalidPayload {
        position: usize,
        text: String,
        source: DecodeError,
    },

    /// Two nodes carry the same `{id}` annotation.
    #[error("duplicate node id {0}")]
    DuplicateNodeId(u64),

    /// No node carries the requested `{id}`.
    #[error("no node with id {0}")]
    UnknownNodeId(u64),

    /// The identifier index was queried before being built.
    #[error("node id index has not been built")]
    IndexNotBuilt,
}
