//! Facade-level behavior: history granularity, cascade semantics, clipboard,
//! locking, and the drag/connect gestures.
mod common;

use common::{add_row, bare_editor, select_nodes};
use flowboard::prelude::*;

#[test]
fn test_undo_all_returns_to_empty_document() {
    let mut editor = bare_editor();
    let ids = add_row(&mut editor, 3);
    editor.connect(&ids[0], &ids[1], None, None).unwrap();
    editor.delete_node(&ids[2]);

    let after_all = editor.document().clone();

    for _ in 0..5 {
        assert!(editor.undo());
    }
    assert!(!editor.undo());
    assert_eq!(editor.document(), &GraphDocument::new());

    for _ in 0..5 {
        assert!(editor.redo());
    }
    assert!(!editor.redo());
    assert_eq!(editor.document(), &after_all);
}

#[test]
fn test_new_command_discards_redo() {
    let mut editor = bare_editor();
    add_row(&mut editor, 2);
    editor.undo();
    assert!(editor.can_redo());

    add_row(&mut editor, 1);
    assert!(!editor.can_redo());
}

#[test]
fn test_cascade_delete_and_restore() {
    let mut editor = bare_editor();
    let a = editor
        .add_node(NodeKind::Trigger, "webhook", Position::new(0.0, 0.0))
        .unwrap();
    let b = editor
        .add_node(NodeKind::Action, "http_request", Position::new(200.0, 0.0))
        .unwrap();
    editor.connect(&a, &b, None, None).unwrap();

    editor.delete_node(&a);
    assert!(editor.document().find_node(&a).is_none());
    assert!(
        editor
            .edges()
            .iter()
            .all(|e| e.source != a && e.target != a)
    );
    assert!(editor.edges().is_empty());

    // One undo restores the node and the cascaded edge together.
    assert!(editor.undo());
    assert!(editor.document().find_node(&a).is_some());
    assert_eq!(editor.edges().len(), 1);
    assert_eq!(editor.edges()[0].source, a);
}

#[test]
fn test_connect_into_trigger_is_rejected_without_history() {
    let mut editor = bare_editor();
    let trigger = editor
        .add_node(NodeKind::Trigger, "webhook", Position::new(0.0, 0.0))
        .unwrap();
    let action = editor
        .add_node(NodeKind::Action, "run_script", Position::new(200.0, 0.0))
        .unwrap();

    let err = editor.connect(&action, &trigger, None, None).unwrap_err();
    assert!(matches!(err, EditorError::InvalidConnection { .. }));
    assert!(editor.edges().is_empty());

    // Only the two adds are undoable.
    assert!(editor.undo());
    assert!(editor.undo());
    assert!(!editor.can_undo());
}

#[test]
fn test_warning_connection_commits_with_state() {
    let mut editor = bare_editor();
    let delay = editor
        .add_node(NodeKind::Delay, "fixed_delay", Position::new(0.0, 0.0))
        .unwrap();
    let action = editor
        .add_node(NodeKind::Action, "http_request", Position::new(200.0, 0.0))
        .unwrap();

    let edge_id = editor
        .connect(&delay, &action, Some("timeout"), None)
        .unwrap();
    let edge = editor.document().find_edge(&edge_id).unwrap();
    assert_eq!(edge.validation_state, ConnectionState::Warning);
}

#[test]
fn test_batch_alignment_undoes_as_one_step() {
    let mut editor = bare_editor();
    let ids = add_row(&mut editor, 5);
    let originals: Vec<Position> = ids
        .iter()
        .map(|id| editor.document().find_node(id).unwrap().position)
        .collect();

    select_nodes(&mut editor, &ids);
    editor.align_selected(Alignment::Left);
    for id in &ids {
        assert_eq!(editor.document().find_node(id).unwrap().position.x, 0.0);
    }

    assert!(editor.undo());
    for (id, original) in ids.iter().zip(&originals) {
        assert_eq!(
            editor.document().find_node(id).unwrap().position,
            *original
        );
    }
}

#[test]
fn test_distribute_fixes_endpoints() {
    let mut editor = bare_editor();
    let xs = [0.0, 50.0, 200.0];
    let ids: Vec<NodeId> = xs
        .iter()
        .map(|&x| {
            editor
                .add_node(NodeKind::Action, "http_request", Position::new(x, 0.0))
                .unwrap()
        })
        .collect();

    select_nodes(&mut editor, &ids);
    editor.distribute_selected(Distribution::Horizontal);

    let x_of = |id: &str| editor.document().find_node(id).unwrap().position.x;
    assert_eq!(x_of(&ids[0]), 0.0);
    assert_eq!(x_of(&ids[1]), 100.0);
    assert_eq!(x_of(&ids[2]), 200.0);
}

#[test]
fn test_locked_node_is_skipped_by_alignment() {
    let mut editor = bare_editor();
    let ids = add_row(&mut editor, 3);

    // Lock the last node, then align all three.
    select_nodes(&mut editor, &ids[2..]);
    editor.lock_selected();
    let locked_position = editor.document().find_node(&ids[2]).unwrap().position;

    select_nodes(&mut editor, &ids);
    editor.align_selected(Alignment::Left);

    assert_eq!(
        editor.document().find_node(&ids[2]).unwrap().position,
        locked_position
    );
    assert_eq!(editor.document().find_node(&ids[1]).unwrap().position.x, 0.0);
}

#[test]
fn test_locked_node_drag_is_inert() {
    let mut editor = bare_editor();
    let id = editor
        .add_node(NodeKind::Action, "http_request", Position::new(10.0, 10.0))
        .unwrap();
    editor.select_node(&id);
    editor.lock_selected();

    editor.begin_drag();
    editor.drag_to((100.0, 100.0));
    editor.end_drag();

    let node = editor.document().find_node(&id).unwrap();
    assert_eq!(node.position, Position::new(10.0, 10.0));

    // The next undo reverts the lock, proving the drag recorded nothing.
    assert!(editor.undo());
    assert!(!editor.document().find_node(&id).unwrap().locked);
}

#[test]
fn test_drag_is_one_history_entry() {
    let mut editor = bare_editor();
    let id = editor
        .add_node(NodeKind::Action, "http_request", Position::new(0.0, 0.0))
        .unwrap();
    editor.select_node(&id);

    editor.begin_drag();
    for i in 1..20 {
        editor.drag_to((i as f64, i as f64));
    }
    editor.end_drag();
    assert_eq!(
        editor.document().find_node(&id).unwrap().position,
        Position::new(19.0, 19.0)
    );

    // One undo reverts the whole gesture.
    assert!(editor.undo());
    assert_eq!(
        editor.document().find_node(&id).unwrap().position,
        Position::new(0.0, 0.0)
    );
}

#[test]
fn test_drag_end_snaps_when_enabled() {
    let mut editor = bare_editor();
    let id = editor
        .add_node(NodeKind::Action, "http_request", Position::new(0.0, 0.0))
        .unwrap();
    editor.set_snap_to_grid(true);
    editor.set_grid_size(20.0);
    editor.select_node(&id);

    editor.begin_drag();
    editor.drag_to((33.0, 7.0));
    editor.end_drag();

    assert_eq!(
        editor.document().find_node(&id).unwrap().position,
        Position::new(40.0, 0.0)
    );
}

#[test]
fn test_cancel_drag_restores_and_records_nothing() {
    let mut editor = bare_editor();
    let id = editor
        .add_node(NodeKind::Action, "http_request", Position::new(5.0, 5.0))
        .unwrap();
    editor.select_node(&id);

    editor.begin_drag();
    editor.drag_to((500.0, 500.0));
    editor.cancel_drag();

    assert_eq!(
        editor.document().find_node(&id).unwrap().position,
        Position::new(5.0, 5.0)
    );
    // Only the add is in history.
    assert!(editor.undo());
    assert!(!editor.can_undo());
}

#[test]
fn test_edge_draw_gesture() {
    let mut editor = bare_editor();
    let a = editor
        .add_node(NodeKind::Action, "http_request", Position::new(0.0, 0.0))
        .unwrap();
    let b = editor
        .add_node(NodeKind::Trigger, "webhook", Position::new(200.0, 0.0))
        .unwrap();

    editor.begin_connect(&a, None);
    let preview = editor.preview_connect(&b, None).unwrap();
    assert!(!preview.is_valid);

    // Dropping on the invalid target aborts without touching the document.
    assert!(editor.end_connect(&b, None).is_err());
    assert!(editor.edges().is_empty());

    // A finished draw with no draft in progress is a quiet no-op.
    assert_eq!(editor.end_connect(&a, None).unwrap(), None);

    editor.begin_connect(&b, None);
    let id = editor.end_connect(&a, None).unwrap().unwrap();
    assert_eq!(editor.edges().len(), 1);
    assert_eq!(editor.document().find_edge(&id).unwrap().source, b);
}

#[test]
fn test_paste_twice_yields_disjoint_ids() {
    let mut editor = bare_editor();
    let ids = add_row(&mut editor, 2);
    editor.connect(&ids[0], &ids[1], None, None).unwrap();

    select_nodes(&mut editor, &ids);
    editor.copy_selected();

    let first = editor.paste();
    let second = editor.paste();
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert!(first.iter().all(|id| !second.contains(id)));
    assert!(first.iter().all(|id| !ids.contains(id)));

    // Internal edge came along both times.
    assert_eq!(editor.edges().len(), 3);
    assert_eq!(editor.nodes().len(), 6);

    // Pasted copies are offset from their source.
    let source = editor.document().find_node(&ids[0]).unwrap().position;
    let copy = editor.document().find_node(&first[0]).unwrap().position;
    assert_eq!(copy, source.offset(40.0, 40.0));

    // A paste is one undoable step.
    assert!(editor.undo());
    assert_eq!(editor.nodes().len(), 4);
}

#[test]
fn test_cut_then_paste_moves_subgraph() {
    let mut editor = bare_editor();
    let ids = add_row(&mut editor, 2);
    editor.connect(&ids[0], &ids[1], None, None).unwrap();

    select_nodes(&mut editor, &ids);
    editor.cut_selected();
    assert!(editor.nodes().is_empty());
    assert!(editor.edges().is_empty());

    let pasted = editor.paste();
    assert_eq!(pasted.len(), 2);
    assert_eq!(editor.edges().len(), 1);

    // The cut deletion was one entry: a single undo restores the originals.
    // (The paste sits above it.)
    assert!(editor.undo());
    assert!(editor.undo());
    assert_eq!(editor.nodes().len(), 2);
}

#[test]
fn test_duplicate_leaves_clipboard_untouched() {
    let mut editor = bare_editor();
    let ids = add_row(&mut editor, 1);
    select_nodes(&mut editor, &ids);
    editor.copy_selected();
    let before = editor.clipboard().node_count();

    let dupes = editor.duplicate_selected();
    assert_eq!(dupes.len(), 1);
    assert_ne!(dupes[0], ids[0]);
    assert_eq!(editor.clipboard().node_count(), before);

    // Duplicates become the new selection.
    assert!(editor.selection().contains_node(&dupes[0]));
    assert!(!editor.selection().contains_node(&ids[0]));
}

#[test]
fn test_selection_pruned_on_delete_and_undo() {
    let mut editor = bare_editor();
    let ids = add_row(&mut editor, 2);
    select_nodes(&mut editor, &ids);

    editor.delete_node(&ids[0]);
    assert!(!editor.selection().contains_node(&ids[0]));
    assert!(editor.selection().contains_node(&ids[1]));

    // Restoring the node does not resurrect its selection.
    editor.undo();
    assert!(!editor.selection().contains_node(&ids[0]));
    assert!(!editor.document().find_node(&ids[0]).unwrap().selected);
}

#[test]
fn test_marquee_replaces_selection() {
    let mut editor = bare_editor();
    let ids = add_row(&mut editor, 3); // x = 0, 50, 100
    editor.select_node(&ids[2]);

    editor.marquee_select(Position::new(-10.0, -10.0), Position::new(60.0, 60.0));
    assert!(editor.selection().contains_node(&ids[0]));
    assert!(editor.selection().contains_node(&ids[1]));
    // x=100 node starts past the marquee right edge at 60... but extends
    // from 100, so it does not intersect.
    assert!(!editor.selection().contains_node(&ids[2]));
}

#[test]
fn test_view_toggles_are_not_undoable() {
    let mut editor = bare_editor();
    editor.set_grid_visible(false);
    editor.set_minimap_visible(true);
    editor.set_grid_size(40.0);
    assert!(!editor.can_undo());
    assert!(!editor.view().grid_visible);
    assert!(editor.view().minimap_visible);
}

#[test]
fn test_update_node_data_round_trip() {
    let mut editor = bare_editor();
    let id = editor
        .add_node(NodeKind::Action, "http_request", Position::new(0.0, 0.0))
        .unwrap();
    let original = editor.document().find_node(&id).unwrap().data.clone();

    let mut data = original.clone();
    data.label = "Call billing API".to_string();
    data.config
        .insert("url".to_string(), serde_json::json!("https://example.test"));
    editor.update_node_data(&id, data.clone());
    assert_eq!(editor.document().find_node(&id).unwrap().data, data);

    editor.undo();
    assert_eq!(editor.document().find_node(&id).unwrap().data, original);
}

#[test]
fn test_delete_unknown_ids_are_noops() {
    let mut editor = bare_editor();
    editor.delete_node("ghost");
    editor.delete_edge("phantom");
    editor.update_node_data("ghost", NodeData::default());
    assert!(!editor.can_undo());
}

#[test]
fn test_unknown_template_is_rejected() {
    let mut editor = bare_editor();
    let err = editor
        .add_node(NodeKind::Action, "teleport", Position::new(0.0, 0.0))
        .unwrap_err();
    assert!(matches!(err, EditorError::UnknownTemplate { .. }));
    assert!(editor.nodes().is_empty());
}

#[test]
fn test_revision_moves_on_every_mutation() {
    let mut editor = bare_editor();
    let r0 = editor.revision();
    let id = editor
        .add_node(NodeKind::Action, "http_request", Position::new(0.0, 0.0))
        .unwrap();
    let r1 = editor.revision();
    assert!(r1 > r0);

    editor.select_node(&id);
    assert!(editor.revision() > r1);
}
