//! # Flowboard - Workflow Graph Document & Editing Engine
//!
//! **Flowboard** is the in-memory document and editing engine behind a
//! node-based workflow editor: the component that lets an operator compose
//! an automation (triggers → actions → approvals → conditions → delays) as
//! a node/edge graph, and that keeps that document consistent, undoable,
//! and multi-selectable while the user drags, connects, copies, and aligns
//! nodes.
//!
//! The crate deliberately stops at the document boundary. Rendering, the
//! REST clients that persist workflows, and keyboard dispatch are external
//! collaborators: the engine consumes graph-space coordinates and semantic
//! intents, and exposes a read-only snapshot after every mutation.
//!
//! ## Core Workflow
//!
//! 1. **Construct an [`Editor`](editor::Editor)** over a node catalog (the
//!    read-only registry of constructible node templates). One editor owns
//!    one document; there is no global instance.
//! 2. **Mutate through the facade**: add/connect/move/delete, selection,
//!    clipboard, and alignment operations. Every mutation is recorded as an
//!    invertible command sized to the user's action, so one `undo()` always
//!    reverses one perceived step.
//! 3. **Render from the snapshot**: compare [`Editor::revision`](editor::Editor::revision)
//!    and re-read nodes, edges (each annotated with its validation state),
//!    selection, and view state when it moves.
//! 4. **Persist** via [`Editor::export`](editor::Editor::export), which
//!    produces the shape the workflow-storage backend expects. The engine
//!    itself performs no I/O.
//!
//! ## Quick Start
//!
//! ```rust
//! use flowboard::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut editor = Editor::new();
//!
//!     // Compose a small approval flow.
//!     let trigger = editor.add_node(NodeKind::Trigger, "webhook", Position::new(0.0, 0.0))?;
//!     let approval =
//!         editor.add_node(NodeKind::Approval, "manual_approval", Position::new(240.0, 0.0))?;
//!     let action =
//!         editor.add_node(NodeKind::Action, "http_request", Position::new(480.0, 0.0))?;
//!
//!     editor.connect(&trigger, &approval, None, None)?;
//!     editor.connect(&approval, &action, Some("approved"), None)?;
//!
//!     // Connections into a trigger are rejected with a typed reason.
//!     assert!(editor.connect(&action, &trigger, None, None).is_err());
//!
//!     // Each user-level action is one undo step.
//!     assert!(editor.can_undo());
//!     editor.undo();
//!     assert_eq!(editor.edges().len(), 1);
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod clipboard;
pub mod connect;
pub mod document;
pub mod editor;
pub mod error;
pub mod export;
pub mod geometry;
pub mod history;
pub mod prelude;
pub mod selection;
pub mod view;
