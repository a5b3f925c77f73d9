//! Parsing of nested-parenthesis tree notation.

pub mod decoder;
pub mod error;
pub mod newick;

pub use decoder::{JplaceDecoder, PayloadDecoder, PlainDecoder};
pub use error::{DecodeError, ParseError};
pub use newick::NewickParser;
