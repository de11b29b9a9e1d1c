//! Invertible commands and the bounded undo/redo history.
//!
//! Every document mutation is expressed as a [`Command`]; the facade computes
//! the matching inverse from prior state *before* the forward mutation runs,
//! so inversion never has to guess. A [`HistoryEntry`] therefore carries both
//! directions explicitly and undo/redo is just "apply the other one".
//!
//! Command application is replay-safe: unknown ids are no-ops, so replaying
//! an entry against a document that already drifted cannot corrupt it or
//! leave the stacks unusable.

use crate::document::{Edge, EdgeId, GraphDocument, Node, NodeData, NodeId, Position};

/// One invertible description of a document mutation.
///
/// Closed set with exhaustive dispatch in [`apply`], so a new command kind is
/// a compile-time-checked, localized change.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddNode {
        node: Node,
    },
    /// Removes a node, cascading its edges. The captured edges ride along so
    /// the inverse (a batch re-add) can be built without re-reading state.
    RemoveNode {
        node: Node,
        edges: Vec<Edge>,
    },
    /// Repositions any number of nodes at once; covers single moves, drag of
    /// a multi-selection, alignment, and distribution.
    SetPositions {
        moves: Vec<(NodeId, Position)>,
    },
    UpdateNodeData {
        id: NodeId,
        data: NodeData,
    },
    SetLocked {
        ids: Vec<NodeId>,
        locked: bool,
    },
    AddEdge {
        edge: Edge,
    },
    RemoveEdge {
        edge: Edge,
    },
    UpdateEdgeLabel {
        id: EdgeId,
        label: Option<String>,
    },
    /// Sub-commands applied in order; undone as one atomic step.
    Batch(Vec<Command>),
}

/// Applies a command to the document. Infallible by design: operations on
/// ids the document no longer knows are silently skipped.
pub fn apply(document: &mut GraphDocument, command: &Command) {
    match command {
        Command::AddNode { node } => {
            document.insert_node(node.clone());
        }
        Command::RemoveNode { node, .. } => {
            document.remove_node(&node.id);
        }
        Command::SetPositions { moves } => {
            for (id, position) in moves {
                if let Some(node) = document.find_node_mut(id) {
                    node.position = *position;
                }
            }
        }
        Command::UpdateNodeData { id, data } => {
            if let Some(node) = document.find_node_mut(id) {
                node.data = data.clone();
            }
        }
        Command::SetLocked { ids, locked } => {
            for id in ids {
                if let Some(node) = document.find_node_mut(id) {
                    node.locked = *locked;
                }
            }
        }
        Command::AddEdge { edge } => {
            document.insert_edge(edge.clone());
        }
        Command::RemoveEdge { edge } => {
            document.remove_edge(&edge.id);
        }
        Command::UpdateEdgeLabel { id, label } => {
            if let Some(edge) = document.find_edge_mut(id) {
                edge.label = label.clone();
            }
        }
        Command::Batch(commands) => {
            for command in commands {
                apply(document, command);
            }
        }
    }
}

/// A recorded mutation: the forward command and its precomputed inverse.
///
/// Invariant: applying `invert` after `apply` restores the document to a
/// state equal by value to before `apply`.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub apply: Command,
    pub invert: Command,
}

/// Bounded undo/redo stacks over [`HistoryEntry`] values.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    max_depth: usize,
}

/// Undo depth used when the caller does not specify one.
pub const DEFAULT_HISTORY_DEPTH: usize = 100;

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Records an already-applied entry. Clears the redo stack (standard
    /// branching-history discard) and drops the oldest entry past the bound.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.redo_stack.clear();
        self.undo_stack.push(entry);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
    }

    /// Applies the most recent entry's inverse. Returns false on an empty
    /// stack (a no-op, not an error).
    pub fn undo(&mut self, document: &mut GraphDocument) -> bool {
        match self.undo_stack.pop() {
            Some(entry) => {
                apply(document, &entry.invert);
                self.redo_stack.push(entry);
                true
            }
            None => false,
        }
    }

    /// Re-applies the most recently undone entry. Returns false on an empty
    /// stack.
    pub fn redo(&mut self, document: &mut GraphDocument) -> bool {
        match self.redo_stack.pop() {
            Some(entry) => {
                apply(document, &entry.apply);
                self.undo_stack.push(entry);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}
