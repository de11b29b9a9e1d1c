//! Common test utilities for building editors and small documents.
use flowboard::prelude::*;

/// Creates an editor with snapping disabled so test positions stay literal.
#[allow(dead_code)]
pub fn bare_editor() -> Editor {
    let mut editor = Editor::new();
    editor.set_snap_to_grid(false);
    editor
}

/// Adds `count` action nodes at staggered positions and returns their ids.
#[allow(dead_code)]
pub fn add_row(editor: &mut Editor, count: usize) -> Vec<NodeId> {
    (0..count)
        .map(|i| {
            editor
                .add_node(
                    NodeKind::Action,
                    "http_request",
                    Position::new(i as f64 * 50.0, i as f64 * 10.0),
                )
                .unwrap()
        })
        .collect()
}

/// Replaces the selection with exactly the given nodes.
#[allow(dead_code)]
pub fn select_nodes(editor: &mut Editor, ids: &[NodeId]) {
    editor.clear_selection();
    for id in ids {
        editor.toggle_select_node(id);
    }
}
