//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the flowboard crate so that
//! application code can pull in the whole editing surface with one import.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowboard::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let mut editor = Editor::new();
//! let trigger = editor.add_node(NodeKind::Trigger, "webhook", Position::new(0.0, 0.0))?;
//! let action = editor.add_node(NodeKind::Action, "http_request", Position::new(240.0, 0.0))?;
//! editor.connect(&trigger, &action, None, None)?;
//! editor.undo();
//! # Ok(())
//! # }
//! ```

// The editor facade
pub use crate::editor::Editor;

// Document model
pub use crate::document::{
    Edge, EdgeId, GraphDocument, Node, NodeData, NodeId, Position, Size,
};

// Node catalog
pub use crate::catalog::{NodeCatalog, NodeKind, NodeTemplate};

// Connection validation
pub use crate::connect::{ConnectionState, ConnectionVerdict, validate_connection};

// Geometry
pub use crate::geometry::{Alignment, Distribution, snap_to_grid};

// History
pub use crate::history::{Command, History, HistoryEntry};

// View state
pub use crate::view::{ViewState, Viewport};

// Persistence shape
pub use crate::export::WorkflowExport;

// Error types
pub use crate::error::EditorError;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, EditorError>;
