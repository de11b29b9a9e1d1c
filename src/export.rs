//! Persistence-shape serialization of the document model.
//!
//! This is the shape the backend workflow-storage API expects: nodes with
//! `{id, type, subtype, label, position, config, isStartNode}` and edges
//! with `{source, target, sourceHandle, condition}`. The engine performs no
//! network or file I/O itself; it only produces and consumes this value.

use crate::catalog::{NodeCatalog, NodeKind};
use crate::connect::{DEFAULT_SOURCE_HANDLE, DEFAULT_TARGET_HANDLE, ConnectionState};
use crate::document::{Edge, GraphDocument, Node, NodeData, Position, Size};
use crate::error::EditorError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub subtype: String,
    pub label: String,
    pub position: Position,
    #[serde(default)]
    pub config: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub is_start_node: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEdge {
    pub source: String,
    pub target: String,
    pub source_handle: String,
    #[serde(default)]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowExport {
    pub nodes: Vec<ExportNode>,
    pub edges: Vec<ExportEdge>,
}

impl WorkflowExport {
    pub fn from_document(document: &GraphDocument) -> Self {
        let nodes = document
            .nodes
            .iter()
            .map(|node| ExportNode {
                id: node.id.clone(),
                kind: node.kind,
                subtype: node.subtype.clone(),
                label: node.data.label.clone(),
                position: node.position,
                config: node.data.config.clone(),
                is_start_node: node.is_start,
            })
            .collect();
        let edges = document
            .edges
            .iter()
            .map(|edge| ExportEdge {
                source: edge.source.clone(),
                target: edge.target.clone(),
                source_handle: edge.source_handle.clone(),
                condition: edge.label.clone(),
            })
            .collect();
        Self { nodes, edges }
    }

    /// Rebuilds a document from the persisted shape. Node extents and
    /// descriptions come from the catalog; an unknown `(type, subtype)` pair
    /// is rejected so the document invariant (catalog-constructible nodes
    /// only) holds for loaded workflows too.
    ///
    /// The persisted edge shape does not carry a target handle; loaded edges
    /// get the generic `input` handle.
    pub fn into_document(self, catalog: &NodeCatalog) -> Result<GraphDocument, EditorError> {
        let mut document = GraphDocument::new();
        for export in self.nodes {
            let template = catalog.template(export.kind, &export.subtype).ok_or(
                EditorError::UnknownTemplate {
                    kind: export.kind,
                    subtype: export.subtype.clone(),
                },
            )?;
            document.insert_node(Node {
                id: export.id,
                kind: export.kind,
                subtype: export.subtype,
                position: export.position,
                size: Size {
                    width: template.width,
                    height: template.height,
                },
                data: NodeData {
                    label: export.label,
                    config: export.config,
                    description: template.description.clone(),
                },
                locked: false,
                selected: false,
                is_start: export.is_start_node,
            });
        }
        for (index, export) in self.edges.into_iter().enumerate() {
            document.insert_edge(Edge {
                id: format!("edge-{index}"),
                source: export.source,
                target: export.target,
                source_handle: if export.source_handle.is_empty() {
                    DEFAULT_SOURCE_HANDLE.to_string()
                } else {
                    export.source_handle
                },
                target_handle: DEFAULT_TARGET_HANDLE.to_string(),
                label: export.condition,
                validation_state: ConnectionState::None,
            });
        }
        document.revalidate_edges();
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_field_names_match_backend_shape() {
        let mut doc = GraphDocument::new();
        doc.insert_node(Node {
            id: "node-0".to_string(),
            kind: NodeKind::Trigger,
            subtype: "webhook".to_string(),
            position: Position::new(1.0, 2.0),
            size: Size {
                width: 180.0,
                height: 80.0,
            },
            data: NodeData {
                label: "Webhook".to_string(),
                config: serde_json::Map::new(),
                description: String::new(),
            },
            locked: false,
            selected: false,
            is_start: true,
        });

        let export = WorkflowExport::from_document(&doc);
        let json = serde_json::to_value(&export).unwrap();
        let node = &json["nodes"][0];
        assert_eq!(node["type"], "trigger");
        assert_eq!(node["subtype"], "webhook");
        assert_eq!(node["isStartNode"], true);
        assert_eq!(node["position"]["x"], 1.0);
    }
}
