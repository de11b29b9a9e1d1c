use ahash::AHashSet;

/// Unique identifier for a node. Stable for the lifetime of the node.
pub type NodeId = String;

/// Unique identifier for an edge.
pub type EdgeId = String;

/// Issues fresh node and edge ids that never collide with ids already seen.
///
/// Every id entering the document (freshly created, pasted, or loaded from a
/// persisted workflow) must be reserved here, so paste and load can never
/// mint a duplicate.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next_node: u64,
    next_edge: u64,
    used: AHashSet<String>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks an externally supplied id as taken.
    pub fn reserve(&mut self, id: &str) {
        self.used.insert(id.to_string());
    }

    /// Returns a fresh, never-before-issued node id.
    pub fn fresh_node_id(&mut self) -> NodeId {
        loop {
            let candidate = format!("node-{}", self.next_node);
            self.next_node += 1;
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// Returns a fresh, never-before-issued edge id.
    pub fn fresh_edge_id(&mut self) -> EdgeId {
        loop {
            let candidate = format!("edge-{}", self.next_edge);
            self.next_edge += 1;
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_skip_reserved() {
        let mut ids = IdAllocator::new();
        ids.reserve("node-0");
        ids.reserve("node-1");
        assert_eq!(ids.fresh_node_id(), "node-2");
        assert_eq!(ids.fresh_node_id(), "node-3");
        assert_eq!(ids.fresh_edge_id(), "edge-0");
    }
}
