//! The canonical graph document: nodes, edges, and their invariants.
//!
//! The document is the single source of truth the rendering layer re-reads
//! after every mutation. It is owned exclusively by the editor facade; every
//! external mutation goes through an invertible command so history stays
//! accurate. The methods here are the raw, replay-safe primitives those
//! commands are built from: deleting an unknown id is a no-op, never an
//! error, so undo/redo replay cannot fail against partial state.

mod id;

pub use id::{EdgeId, IdAllocator, NodeId};

use crate::catalog::NodeKind;
use crate::connect::{ConnectionState, validate_connection};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A point in graph space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Nominal graph-space extent of a node, used by alignment and marquee math.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// User-editable payload of a node: display label, catalog-specific
/// configuration, and free-form description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub label: String,
    #[serde(default)]
    pub config: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub description: String,
}

/// A typed, positioned unit of the workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Immutable after creation, globally unique within the document.
    pub id: NodeId,
    pub kind: NodeKind,
    /// Catalog key within the kind, e.g. `http_request`.
    pub subtype: String,
    pub position: Position,
    pub size: Size,
    pub data: NodeData,
    /// Locked nodes are immune to position-mutating operations.
    #[serde(default)]
    pub locked: bool,
    /// Mirrors the selection set for the renderer's benefit.
    #[serde(skip)]
    pub selected: bool,
    /// Marks the workflow's entry node in the persisted shape.
    #[serde(default)]
    pub is_start: bool,
}

/// A directed connection from one node's output handle to another's input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub source_handle: String,
    pub target_handle: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Derived by the validator, never persisted.
    #[serde(skip)]
    pub validation_state: ConnectionState,
}

/// The in-memory node/edge state of one workflow document.
///
/// Nodes and edges keep insertion order, which makes snapshots deterministic
/// and keeps copy/paste ordering stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn find_node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn find_edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn find_edge_mut(&mut self, id: &str) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|e| e.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.find_node(id).is_some()
    }

    /// Inserts a node. A node with the same id already present wins; the
    /// insert is skipped so command replay cannot duplicate.
    pub fn insert_node(&mut self, node: Node) {
        if !self.contains_node(&node.id) {
            self.nodes.push(node);
        }
    }

    /// Removes a node and cascades removal of every edge referencing it.
    ///
    /// Returns the node and the cascaded edges, or `None` for an unknown id.
    pub fn remove_node(&mut self, id: &str) -> Option<(Node, Vec<Edge>)> {
        let index = self.nodes.iter().position(|n| n.id == id)?;
        let node = self.nodes.remove(index);
        let mut removed_edges = Vec::new();
        self.edges.retain(|edge| {
            if edge.source == id || edge.target == id {
                removed_edges.push(edge.clone());
                false
            } else {
                true
            }
        });
        Some((node, removed_edges))
    }

    /// Inserts an edge verbatim. Unknown endpoints or duplicate ids make the
    /// insert a no-op; legality is the caller's concern (see the validator).
    pub fn insert_edge(&mut self, edge: Edge) {
        if self.find_edge(&edge.id).is_some() {
            return;
        }
        if !self.contains_node(&edge.source) || !self.contains_node(&edge.target) {
            return;
        }
        self.edges.push(edge);
    }

    pub fn remove_edge(&mut self, id: &str) -> Option<Edge> {
        let index = self.edges.iter().position(|e| e.id == id)?;
        Some(self.edges.remove(index))
    }

    /// Edges whose source or target is the given node, cloned for capture
    /// into a command inverse.
    pub fn edges_touching(&self, node_id: &str) -> Vec<Edge> {
        self.edges
            .iter()
            .filter(|e| e.source == node_id || e.target == node_id)
            .cloned()
            .collect()
    }

    pub fn incoming_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| e.target == node_id)
    }

    pub fn outgoing_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| e.source == node_id)
    }

    /// Recomputes every committed edge's validation state from the current
    /// node kinds. Called after each structural change so validation badges
    /// stay truthful without re-running any per-edge bookkeeping by hand.
    pub fn revalidate_edges(&mut self) {
        let kinds: AHashMap<NodeId, NodeKind> = self
            .nodes
            .iter()
            .map(|n| (n.id.clone(), n.kind))
            .collect();

        for edge in &mut self.edges {
            match (kinds.get(&edge.source), kinds.get(&edge.target)) {
                (Some(&source_kind), Some(&target_kind)) => {
                    let verdict = validate_connection(
                        Some(&edge.source_handle),
                        Some(&edge.target_handle),
                        source_kind,
                        target_kind,
                    );
                    edge.validation_state = verdict.state;
                }
                // Defensive: an edge with a dangling endpoint should have
                // been cascaded away already.
                _ => edge.validation_state = ConnectionState::None,
            }
        }
    }
}
