//! The clipboard staging buffer for copy/cut/paste/duplicate.
//!
//! The buffer holds deep-copied node snapshots, in document order, plus the
//! edges internal to the copied set. It is not part of the persisted
//! document and carries no uniqueness constraints against it: materializing
//! the buffer always mints fresh ids, so pasting the same buffer twice
//! yields two disjoint node sets.

use crate::document::{Edge, GraphDocument, IdAllocator, Node, NodeId};
use ahash::{AHashMap, AHashSet};

/// Positional offset applied to every materialized copy so pasted nodes
/// never land exactly atop their source.
pub const PASTE_OFFSET: (f64, f64) = (40.0, 40.0);

#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Snapshots the given nodes (deep copy, document order) and the edges
    /// whose both endpoints are inside the set. Edges with an excluded
    /// endpoint are dropped.
    pub fn capture(document: &GraphDocument, node_ids: &AHashSet<NodeId>) -> Self {
        let nodes: Vec<Node> = document
            .nodes
            .iter()
            .filter(|n| node_ids.contains(&n.id))
            .cloned()
            .collect();
        let edges: Vec<Edge> = document
            .edges
            .iter()
            .filter(|e| node_ids.contains(&e.source) && node_ids.contains(&e.target))
            .cloned()
            .collect();
        Self { nodes, edges }
    }

    /// Builds insertable copies of the buffer: fresh ids for every node,
    /// internal edges remapped to the new ids, and all positions shifted by
    /// `offset`. The buffer itself is left untouched so it can be pasted
    /// again.
    pub fn materialize(
        &self,
        ids: &mut IdAllocator,
        offset: (f64, f64),
    ) -> (Vec<Node>, Vec<Edge>) {
        let mut remap: AHashMap<NodeId, NodeId> = AHashMap::new();

        let nodes: Vec<Node> = self
            .nodes
            .iter()
            .map(|original| {
                let mut node = original.clone();
                let fresh = ids.fresh_node_id();
                remap.insert(original.id.clone(), fresh.clone());
                node.id = fresh;
                node.position = node.position.offset(offset.0, offset.1);
                node.selected = false;
                node
            })
            .collect();

        let edges: Vec<Edge> = self
            .edges
            .iter()
            .map(|original| {
                let mut edge = original.clone();
                edge.id = ids.fresh_edge_id();
                // Both endpoints are guaranteed in the remap by capture().
                edge.source = remap[&original.source].clone();
                edge.target = remap[&original.target].clone();
                edge
            })
            .collect();

        (nodes, edges)
    }
}
