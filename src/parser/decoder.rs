//! Payload decoders: turn bare text into node payload fields.
//!
//! The [NewickParser](crate::parser::NewickParser) is generic over a
//! [PayloadDecoder], which interprets every bare-text run it delivers —
//! whether that run created a new node or refines the most recently added
//! child. Two decoders are provided: [PlainDecoder] stores the text
//! verbatim as the label, [JplaceDecoder] extracts the label, branch length
//! and node id from the annotated notation of jplace reference trees.

use crate::model::Payload;
use crate::parser::error::DecodeError;
use regex::Regex;
use std::sync::LazyLock;

/// Matches the right-hand side of a jplace node text: an optional
/// signed/exponential real number, a braced node id, and an optional
/// bracketed edge number. Deliberately not anchored at the end, so the
/// trailing `;` of a jplace tree string passes through.
static JPLACE_PROPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([-+.eE\d]*)\{(\d+)\}(?:\[(\d+)\])?").unwrap());

/// Interprets a bare-text fragment into payload fields.
///
/// Called once when a bare-text node is created, and again for each trailing
/// text run attached to an already-added node (overwriting the earlier
/// decode).
pub trait PayloadDecoder {
    /// Decodes `text` into `payload`, overwriting any fields it understands.
    fn decode(&self, text: &str, payload: &mut Payload) -> Result<(), DecodeError>;
}

/// Stores the raw text verbatim as the node label; no further structure.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainDecoder;

impl PayloadDecoder for PlainDecoder {
    fn decode(&self, text: &str, payload: &mut Payload) -> Result<(), DecodeError> {
        payload.label = text.to_owned();
        Ok(())
    }
}

/// Decodes the `name:branch{id}[edge]` node texts of jplace reference trees
/// (pplacer / EPA output).
///
/// The label is everything before the first `:`; an empty number field means
/// branch length 0; the bracketed edge number is optional and kept only as a
/// secondary annotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct JplaceDecoder;

impl PayloadDecoder for JplaceDecoder {
    fn decode(&self, text: &str, payload: &mut Payload) -> Result<(), DecodeError> {
        let (name, props) = text.split_once(':').ok_or(DecodeError::MissingColon)?;
        let caps = JPLACE_PROPS.captures(props).ok_or(DecodeError::BadAnnotation)?;

        let number = &caps[1];
        let branch_length = if number.is_empty() {
            0.0
        } else {
            number
                .parse::<f64>()
                .map_err(|_| DecodeError::BadBranchLength(number.to_owned()))?
        };
        let node_id = caps[2].parse::<u64>().map_err(|_| DecodeError::BadAnnotation)?;
        let edge_num = match caps.get(3) {
            Some(m) => Some(
                m.as_str()
                    .parse::<u64>()
                    .map_err(|_| DecodeError::BadAnnotation)?,
            ),
            None => None,
        };

        payload.label = name.to_owned();
        payload.branch_length = branch_length;
        payload.node_id = Some(node_id);
        payload.edge_num = edge_num;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_decoder_stores_text_verbatim() {
        let mut payload = Payload::default();
        PlainDecoder.decode("some label", &mut payload).unwrap();
        assert_eq!(payload.label, "some label");
        assert_eq!(payload.branch_length, 0.0);
        assert_eq!(payload.node_id, None);
    }

    #[test]
    fn jplace_decoder_rejects_missing_colon() {
        let mut payload = Payload::default();
        let err = JplaceDecoder.decode("no_separator", &mut payload).unwrap_err();
        assert_eq!(err, DecodeError::MissingColon);
    }

    #[test]
    fn jplace_decoder_tolerates_trailing_semicolon() {
        let mut payload = Payload::default();
        JplaceDecoder.decode(":0{12};", &mut payload).unwrap();
        assert_eq!(payload.label, "");
        assert_eq!(payload.branch_length, 0.0);
        assert_eq!(payload.node_id, Some(12));
    }
}
