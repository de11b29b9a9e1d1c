use crate::catalog::NodeKind;
use thiserror::Error;

/// Errors that the editor facade can surface to its caller.
///
/// The engine deliberately keeps this taxonomy small: missing ids and
/// exhausted undo/redo stacks are treated as silent no-ops so that history
/// replay stays robust, and only conditions the user needs feedback on are
/// expressed as errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Invalid connection: {message}")]
    InvalidConnection { message: String },

    #[error("The node catalog has no '{subtype}' template for node type '{kind}'")]
    UnknownTemplate { kind: NodeKind, subtype: String },
}
