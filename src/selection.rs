//! The selection set: node and edge ids the user currently has selected.
//!
//! Selection is presentation state, not document content — it never enters
//! the undo history. The facade prunes it after every document mutation so
//! it can never reference a deleted id.

use crate::document::{EdgeId, GraphDocument, NodeId};
use ahash::AHashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    nodes: AHashSet<NodeId>,
    edges: AHashSet<EdgeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &AHashSet<NodeId> {
        &self.nodes
    }

    pub fn edges(&self) -> &AHashSet<EdgeId> {
        &self.edges
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    pub fn contains_edge(&self, id: &str) -> bool {
        self.edges.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Single-click: replace the whole selection with one node.
    pub fn click_node(&mut self, id: impl Into<NodeId>) {
        self.clear();
        self.nodes.insert(id.into());
    }

    /// Single-click on an edge: replace the whole selection with it.
    pub fn click_edge(&mut self, id: impl Into<EdgeId>) {
        self.clear();
        self.edges.insert(id.into());
    }

    /// Modifier-click: toggle one node's membership.
    pub fn toggle_node(&mut self, id: impl Into<NodeId>) {
        let id = id.into();
        if !self.nodes.remove(&id) {
            self.nodes.insert(id);
        }
    }

    /// Modifier-click: toggle one edge's membership.
    pub fn toggle_edge(&mut self, id: impl Into<EdgeId>) {
        let id = id.into();
        if !self.edges.remove(&id) {
            self.edges.insert(id);
        }
    }

    /// Marquee result: replace the selection with the intersecting node set.
    pub fn replace_nodes(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        self.clear();
        self.nodes.extend(ids);
    }

    pub fn select_all(&mut self, document: &GraphDocument) {
        self.nodes = document.nodes.iter().map(|n| n.id.clone()).collect();
        self.edges = document.edges.iter().map(|e| e.id.clone()).collect();
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// Drops any id the document no longer contains.
    pub fn prune(&mut self, document: &GraphDocument) {
        self.nodes.retain(|id| document.contains_node(id));
        self.edges.retain(|id| document.find_edge(id).is_some());
    }
}
