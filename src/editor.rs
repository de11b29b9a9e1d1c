//! The editor facade: the single public surface the application calls.
//!
//! The facade owns the document, the history, the selection, the clipboard,
//! and the view state. Every document mutation is expressed as a command
//! with a precomputed inverse and committed through exactly one history
//! entry, sized to the user-perceived action: aligning five nodes or pasting
//! a subgraph undoes as one step.
//!
//! Ephemeral gestures are the exception. A node drag updates live positions
//! directly and records a single entry at pointer-up; an edge draw runs the
//! validator before any command exists, so an invalid drop never reaches the
//! history. Both gestures are independently cancellable.

use crate::catalog::{NodeCatalog, NodeKind};
use crate::clipboard::{Clipboard, PASTE_OFFSET};
use crate::connect::{
    ConnectionVerdict, DEFAULT_SOURCE_HANDLE, DEFAULT_TARGET_HANDLE, validate_connection,
};
use crate::document::{
    Edge, EdgeId, GraphDocument, IdAllocator, Node, NodeData, NodeId, Position, Size,
};
use crate::error::EditorError;
use crate::export::WorkflowExport;
use crate::geometry::{self, Alignment, Distribution, NodeExtent, snap_to_grid};
use crate::history::{self, Command, DEFAULT_HISTORY_DEPTH, History, HistoryEntry};
use crate::selection::Selection;
use crate::view::{ViewState, Viewport};
use ahash::AHashSet;
use log::{debug, warn};

/// A node drag in progress: the origin position of every participating
/// (selected, unlocked) node.
#[derive(Debug, Clone)]
struct DragGesture {
    origins: Vec<(NodeId, Position)>,
}

/// An edge draw in progress, anchored at a source handle.
#[derive(Debug, Clone)]
struct ConnectDraft {
    source: NodeId,
    source_handle: Option<String>,
}

/// An explicit, constructible editing engine for one workflow document.
///
/// Own one per open document; there is no global instance. All operations
/// are synchronous and complete before returning.
#[derive(Debug)]
pub struct Editor {
    catalog: NodeCatalog,
    document: GraphDocument,
    history: History,
    selection: Selection,
    clipboard: Clipboard,
    view: ViewState,
    ids: IdAllocator,
    revision: u64,
    drag: Option<DragGesture>,
    connect_draft: Option<ConnectDraft>,
}

impl Editor {
    /// Creates an empty editor over the built-in node catalog.
    pub fn new() -> Self {
        Self::with_catalog(NodeCatalog::with_defaults())
    }

    pub fn with_catalog(catalog: NodeCatalog) -> Self {
        Self {
            catalog,
            document: GraphDocument::new(),
            history: History::new(DEFAULT_HISTORY_DEPTH),
            selection: Selection::new(),
            clipboard: Clipboard::new(),
            view: ViewState::default(),
            ids: IdAllocator::new(),
            revision: 0,
            drag: None,
            connect_draft: None,
        }
    }

    /// Rebuilds an editor from a persisted workflow. Loading is not an
    /// undoable action; history starts empty.
    pub fn from_export(
        catalog: NodeCatalog,
        export: WorkflowExport,
    ) -> Result<Self, EditorError> {
        let document = export.into_document(&catalog)?;
        let mut ids = IdAllocator::new();
        for node in &document.nodes {
            ids.reserve(&node.id);
        }
        for edge in &document.edges {
            ids.reserve(&edge.id);
        }
        let mut editor = Self::with_catalog(catalog);
        editor.document = document;
        editor.ids = ids;
        Ok(editor)
    }

    // ── Read-only snapshot ─────────────────────────────────────────────

    pub fn document(&self) -> &GraphDocument {
        &self.document
    }

    pub fn nodes(&self) -> &[Node] {
        &self.document.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.document.edges
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn catalog(&self) -> &NodeCatalog {
        &self.catalog
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Monotonically increasing change counter. Renderers compare revisions
    /// and re-read the snapshot accessors when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The persistence shape of the current document.
    pub fn export(&self) -> WorkflowExport {
        WorkflowExport::from_document(&self.document)
    }

    // ── Node and edge operations ───────────────────────────────────────

    /// Adds a catalog node at the given graph-space position and returns its
    /// id. Snap-to-grid applies here, at creation time, when enabled.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        subtype: &str,
        position: Position,
    ) -> Result<NodeId, EditorError> {
        let template = self
            .catalog
            .template(kind, subtype)
            .ok_or_else(|| EditorError::UnknownTemplate {
                kind,
                subtype: subtype.to_string(),
            })?
            .clone();

        let position = if self.view.snap_to_grid_enabled {
            snap_to_grid(position, self.view.grid_size)
        } else {
            position
        };

        // The first trigger placed becomes the workflow's entry node.
        let is_start =
            kind == NodeKind::Trigger && !self.document.nodes.iter().any(|n| n.is_start);

        let id = self.ids.fresh_node_id();
        let node = Node {
            id: id.clone(),
            kind,
            subtype: subtype.to_string(),
            position,
            size: Size {
                width: template.width,
                height: template.height,
            },
            data: NodeData {
                label: template.label.clone(),
                config: template.default_config.clone(),
                description: template.description.clone(),
            },
            locked: false,
            selected: false,
            is_start,
        };

        self.commit(
            Command::AddNode { node: node.clone() },
            Command::RemoveNode {
                node,
                edges: Vec::new(),
            },
        );
        Ok(id)
    }

    /// Replaces a node's editable payload. Unknown ids are a no-op.
    pub fn update_node_data(&mut self, id: &str, data: NodeData) {
        let Some(node) = self.document.find_node(id) else {
            return;
        };
        let old = node.data.clone();
        if old == data {
            return;
        }
        self.commit(
            Command::UpdateNodeData {
                id: id.to_string(),
                data,
            },
            Command::UpdateNodeData {
                id: id.to_string(),
                data: old,
            },
        );
    }

    /// Deletes a node, cascading deletion of every edge referencing it. One
    /// undo restores the node and all cascaded edges. Unknown ids no-op.
    pub fn delete_node(&mut self, id: &str) {
        let Some(node) = self.document.find_node(id).cloned() else {
            return;
        };
        let edges = self.document.edges_touching(id);
        let invert = restore_node_command(&node, &edges);
        self.commit(Command::RemoveNode { node, edges }, invert);
    }

    /// Commits a validated connection and returns the new edge id.
    ///
    /// An `invalid` verdict (or an unknown endpoint) rejects the write with
    /// [`EditorError::InvalidConnection`]; a `warning` verdict admits the
    /// edge, which then carries the non-fatal state for the renderer.
    pub fn connect(
        &mut self,
        source: &str,
        target: &str,
        source_handle: Option<&str>,
        target_handle: Option<&str>,
    ) -> Result<EdgeId, EditorError> {
        let source_kind = self
            .document
            .find_node(source)
            .ok_or_else(|| EditorError::InvalidConnection {
                message: format!("Source node '{source}' does not exist."),
            })?
            .kind;
        let target_kind = self
            .document
            .find_node(target)
            .ok_or_else(|| EditorError::InvalidConnection {
                message: format!("Target node '{target}' does not exist."),
            })?
            .kind;

        let verdict = validate_connection(source_handle, target_handle, source_kind, target_kind);
        if !verdict.is_valid {
            let message = verdict.message.unwrap_or_default();
            warn!("rejected connection {source} -> {target}: {message}");
            return Err(EditorError::InvalidConnection { message });
        }

        let id = self.ids.fresh_edge_id();
        let edge = Edge {
            id: id.clone(),
            source: source.to_string(),
            target: target.to_string(),
            source_handle: source_handle.unwrap_or(DEFAULT_SOURCE_HANDLE).to_string(),
            target_handle: target_handle.unwrap_or(DEFAULT_TARGET_HANDLE).to_string(),
            label: None,
            validation_state: verdict.state,
        };
        self.commit(
            Command::AddEdge { edge: edge.clone() },
            Command::RemoveEdge { edge },
        );
        Ok(id)
    }

    pub fn delete_edge(&mut self, id: &str) {
        let Some(edge) = self.document.find_edge(id).cloned() else {
            return;
        };
        self.commit(
            Command::RemoveEdge { edge: edge.clone() },
            Command::AddEdge { edge },
        );
    }

    pub fn update_edge_label(&mut self, id: &str, label: Option<String>) {
        let Some(edge) = self.document.find_edge(id) else {
            return;
        };
        let old = edge.label.clone();
        if old == label {
            return;
        }
        self.commit(
            Command::UpdateEdgeLabel {
                id: id.to_string(),
                label,
            },
            Command::UpdateEdgeLabel {
                id: id.to_string(),
                label: old,
            },
        );
    }

    // ── History ────────────────────────────────────────────────────────

    /// Reverts the most recent entry. Returns false (a no-op) on an empty
    /// stack.
    pub fn undo(&mut self) -> bool {
        if self.history.undo(&mut self.document) {
            self.after_document_change();
            true
        } else {
            false
        }
    }

    pub fn redo(&mut self) -> bool {
        if self.history.redo(&mut self.document) {
            self.after_document_change();
            true
        } else {
            false
        }
    }

    // ── Selection ──────────────────────────────────────────────────────

    pub fn select_node(&mut self, id: &str) {
        if self.document.contains_node(id) {
            self.selection.click_node(id);
            self.after_selection_change();
        }
    }

    pub fn toggle_select_node(&mut self, id: &str) {
        if self.document.contains_node(id) {
            self.selection.toggle_node(id);
            self.after_selection_change();
        }
    }

    pub fn select_edge(&mut self, id: &str) {
        if self.document.find_edge(id).is_some() {
            self.selection.click_edge(id);
            self.after_selection_change();
        }
    }

    pub fn toggle_select_edge(&mut self, id: &str) {
        if self.document.find_edge(id).is_some() {
            self.selection.toggle_edge(id);
            self.after_selection_change();
        }
    }

    /// Replaces the selection with every node whose bounding box intersects
    /// the marquee rectangle.
    pub fn marquee_select(&mut self, min: Position, max: Position) {
        let hits: Vec<NodeId> = self
            .document
            .nodes
            .iter()
            .filter(|n| geometry::intersects_rect(n.position, n.size, min, max))
            .map(|n| n.id.clone())
            .collect();
        self.selection.replace_nodes(hits);
        self.after_selection_change();
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&self.document);
        self.after_selection_change();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.after_selection_change();
    }

    /// Deletes every selected node (with cascaded edges) and edge as one
    /// atomic history entry.
    pub fn delete_selected(&mut self) {
        if self.selection.is_empty() {
            return;
        }

        let selected_nodes: Vec<Node> = self
            .document
            .nodes
            .iter()
            .filter(|n| self.selection.contains_node(&n.id))
            .cloned()
            .collect();

        let mut seen_edges: AHashSet<EdgeId> = AHashSet::new();
        let mut cascade_edges: Vec<Edge> = Vec::new();
        for node in &selected_nodes {
            for edge in self.document.edges_touching(&node.id) {
                if seen_edges.insert(edge.id.clone()) {
                    cascade_edges.push(edge);
                }
            }
        }
        let selected_edges: Vec<Edge> = self
            .document
            .edges
            .iter()
            .filter(|e| self.selection.contains_edge(&e.id) && !seen_edges.contains(&e.id))
            .cloned()
            .collect();

        let mut forward: Vec<Command> = selected_edges
            .iter()
            .map(|edge| Command::RemoveEdge { edge: edge.clone() })
            .collect();
        for node in &selected_nodes {
            forward.push(Command::RemoveNode {
                node: node.clone(),
                edges: self.document.edges_touching(&node.id),
            });
        }

        let mut inverse: Vec<Command> = selected_nodes
            .iter()
            .map(|node| Command::AddNode { node: node.clone() })
            .collect();
        inverse.extend(
            cascade_edges
                .iter()
                .chain(selected_edges.iter())
                .map(|edge| Command::AddEdge { edge: edge.clone() }),
        );

        self.commit(Command::Batch(forward), Command::Batch(inverse));
    }

    // ── Clipboard ──────────────────────────────────────────────────────

    /// Snapshots the selected nodes (and their internal edges) into the
    /// clipboard. Does not touch the document.
    pub fn copy_selected(&mut self) {
        self.clipboard = Clipboard::capture(&self.document, self.selection.nodes());
    }

    /// Copy followed by a single-entry deletion of the selection.
    pub fn cut_selected(&mut self) {
        self.copy_selected();
        self.delete_selected();
    }

    /// Pastes the clipboard with fresh ids and the standard offset, selects
    /// the pasted nodes, and returns their ids. One history entry.
    pub fn paste(&mut self) -> Vec<NodeId> {
        if self.clipboard.is_empty() {
            return Vec::new();
        }
        let (nodes, edges) = self.clipboard.materialize(&mut self.ids, PASTE_OFFSET);
        self.insert_copies(nodes, edges)
    }

    /// Duplicates the selection in place (clipboard untouched) and returns
    /// the new ids.
    pub fn duplicate_selected(&mut self) -> Vec<NodeId> {
        let buffer = Clipboard::capture(&self.document, self.selection.nodes());
        if buffer.is_empty() {
            return Vec::new();
        }
        let (nodes, edges) = buffer.materialize(&mut self.ids, PASTE_OFFSET);
        self.insert_copies(nodes, edges)
    }

    fn insert_copies(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) -> Vec<NodeId> {
        let pasted: Vec<NodeId> = nodes.iter().map(|n| n.id.clone()).collect();

        let mut forward: Vec<Command> = nodes
            .iter()
            .map(|node| Command::AddNode { node: node.clone() })
            .collect();
        forward.extend(
            edges
                .iter()
                .map(|edge| Command::AddEdge { edge: edge.clone() }),
        );

        let mut inverse: Vec<Command> = edges
            .iter()
            .map(|edge| Command::RemoveEdge { edge: edge.clone() })
            .collect();
        inverse.extend(nodes.iter().map(|node| Command::RemoveNode {
            node: node.clone(),
            edges: Vec::new(),
        }));

        self.commit(Command::Batch(forward), Command::Batch(inverse));
        self.selection.replace_nodes(pasted.iter().cloned());
        self.after_selection_change();
        pasted
    }

    // ── Locking ────────────────────────────────────────────────────────

    pub fn lock_selected(&mut self) {
        self.set_selected_locked(true);
    }

    pub fn unlock_selected(&mut self) {
        self.set_selected_locked(false);
    }

    fn set_selected_locked(&mut self, locked: bool) {
        let ids: Vec<NodeId> = self
            .document
            .nodes
            .iter()
            .filter(|n| self.selection.contains_node(&n.id) && n.locked != locked)
            .map(|n| n.id.clone())
            .collect();
        if ids.is_empty() {
            return;
        }
        self.commit(
            Command::SetLocked {
                ids: ids.clone(),
                locked,
            },
            Command::SetLocked {
                ids,
                locked: !locked,
            },
        );
    }

    // ── Geometry operations ────────────────────────────────────────────

    /// Aligns the selected nodes. Locked nodes are silently skipped, both
    /// from moving and from the reference computation. One history entry.
    pub fn align_selected(&mut self, alignment: Alignment) {
        let extents = self.selected_unlocked_extents();
        let moves = geometry::align(&extents, alignment);
        self.commit_moves(moves);
    }

    /// Distributes the selected nodes evenly along one axis. Locked nodes
    /// are silently skipped. One history entry.
    pub fn distribute_selected(&mut self, axis: Distribution) {
        let extents = self.selected_unlocked_extents();
        let moves = geometry::distribute(&extents, axis);
        self.commit_moves(moves);
    }

    fn selected_unlocked_extents(&self) -> Vec<NodeExtent> {
        self.document
            .nodes
            .iter()
            .filter(|n| self.selection.contains_node(&n.id) && !n.locked)
            .map(|n| NodeExtent {
                id: n.id.clone(),
                position: n.position,
                size: n.size,
            })
            .collect()
    }

    fn commit_moves(&mut self, moves: Vec<(NodeId, Position)>) {
        if moves.is_empty() {
            return;
        }
        let origins: Vec<(NodeId, Position)> = moves
            .iter()
            .filter_map(|(id, _)| {
                self.document
                    .find_node(id)
                    .map(|n| (id.clone(), n.position))
            })
            .collect();
        let unchanged = moves.iter().all(|(id, position)| {
            self.document
                .find_node(id)
                .is_none_or(|n| n.position == *position)
        });
        if unchanged {
            return;
        }
        self.commit(
            Command::SetPositions { moves },
            Command::SetPositions { moves: origins },
        );
    }

    // ── Drag gesture ───────────────────────────────────────────────────

    /// Starts dragging the current selection. Locked nodes never
    /// participate; if nothing unlocked is selected the gesture is inert.
    pub fn begin_drag(&mut self) {
        let origins: Vec<(NodeId, Position)> = self
            .document
            .nodes
            .iter()
            .filter(|n| self.selection.contains_node(&n.id) && !n.locked)
            .map(|n| (n.id.clone(), n.position))
            .collect();
        self.drag = if origins.is_empty() {
            None
        } else {
            Some(DragGesture { origins })
        };
    }

    /// Applies the current drag delta directly to the live document.
    /// History is deferred to [`Editor::end_drag`], so a whole gesture is
    /// one undo step no matter how many intermediate positions it visits.
    pub fn drag_to(&mut self, delta: (f64, f64)) {
        let Some(drag) = &self.drag else {
            return;
        };
        let origins = drag.origins.clone();
        for (id, origin) in &origins {
            if let Some(node) = self.document.find_node_mut(id) {
                node.position = origin.offset(delta.0, delta.1);
            }
        }
        self.revision += 1;
    }

    /// Finishes the drag: snaps the landing positions when snapping is
    /// enabled and records exactly one history entry. A drag that ends where
    /// it started records nothing.
    pub fn end_drag(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let mut moves: Vec<(NodeId, Position)> = Vec::new();
        let mut changed = false;
        for (id, origin) in &drag.origins {
            let Some(node) = self.document.find_node(id) else {
                continue;
            };
            let landed = if self.view.snap_to_grid_enabled {
                snap_to_grid(node.position, self.view.grid_size)
            } else {
                node.position
            };
            if landed != *origin {
                changed = true;
            }
            moves.push((id.clone(), landed));
        }
        if !changed {
            // Snapping can land the gesture exactly back on its origin while
            // the live document still holds an unsnapped position.
            for (id, origin) in &drag.origins {
                if let Some(node) = self.document.find_node_mut(id) {
                    node.position = *origin;
                }
            }
            self.revision += 1;
            return;
        }
        self.commit(
            Command::SetPositions { moves },
            Command::SetPositions {
                moves: drag.origins,
            },
        );
    }

    /// Aborts the drag and restores every origin position. No history entry.
    pub fn cancel_drag(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        for (id, origin) in &drag.origins {
            if let Some(node) = self.document.find_node_mut(id) {
                node.position = *origin;
            }
        }
        self.revision += 1;
    }

    // ── Edge-draw gesture ──────────────────────────────────────────────

    /// Starts drawing an edge from a source handle.
    pub fn begin_connect(&mut self, source: &str, source_handle: Option<&str>) {
        if self.document.contains_node(source) {
            self.connect_draft = Some(ConnectDraft {
                source: source.to_string(),
                source_handle: source_handle.map(str::to_string),
            });
        }
    }

    /// Validates the in-flight edge against a hovered target without
    /// mutating anything. `None` when no draw is in progress or the target
    /// is unknown.
    pub fn preview_connect(
        &self,
        target: &str,
        target_handle: Option<&str>,
    ) -> Option<ConnectionVerdict> {
        let draft = self.connect_draft.as_ref()?;
        let source_kind = self.document.find_node(&draft.source)?.kind;
        let target_kind = self.document.find_node(target)?.kind;
        Some(validate_connection(
            draft.source_handle.as_deref(),
            target_handle,
            source_kind,
            target_kind,
        ))
    }

    /// Drops the in-flight edge on a target. An invalid target clears the
    /// draft and reports the reason without touching document or history; a
    /// finished draw with no draft in progress is `Ok(None)`.
    pub fn end_connect(
        &mut self,
        target: &str,
        target_handle: Option<&str>,
    ) -> Result<Option<EdgeId>, EditorError> {
        let Some(draft) = self.connect_draft.take() else {
            return Ok(None);
        };
        self.connect(
            &draft.source,
            target,
            draft.source_handle.as_deref(),
            target_handle,
        )
        .map(Some)
    }

    /// Aborts the in-flight edge draw.
    pub fn cancel_connect(&mut self) {
        self.connect_draft = None;
    }

    // ── View state ─────────────────────────────────────────────────────

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.view.viewport = viewport;
        self.revision += 1;
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        self.view.grid_visible = visible;
        self.revision += 1;
    }

    pub fn set_snap_to_grid(&mut self, enabled: bool) {
        self.view.snap_to_grid_enabled = enabled;
        self.revision += 1;
    }

    pub fn set_grid_size(&mut self, grid_size: f64) {
        self.view.grid_size = grid_size;
        self.revision += 1;
    }

    pub fn set_minimap_visible(&mut self, visible: bool) {
        self.view.minimap_visible = visible;
        self.revision += 1;
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn commit(&mut self, apply: Command, invert: Command) {
        debug!("commit: {apply:?}");
        history::apply(&mut self.document, &apply);
        self.history.record(HistoryEntry { apply, invert });
        self.after_document_change();
    }

    fn after_document_change(&mut self) {
        self.document.revalidate_edges();
        self.selection.prune(&self.document);
        self.sync_selection_flags();
        self.revision += 1;
    }

    fn after_selection_change(&mut self) {
        self.sync_selection_flags();
        self.revision += 1;
    }

    fn sync_selection_flags(&mut self) {
        for node in &mut self.document.nodes {
            node.selected = self.selection.contains_node(&node.id);
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

/// Inverse of a cascading node removal: re-add the node, then its edges.
fn restore_node_command(node: &Node, edges: &[Edge]) -> Command {
    let mut commands = vec![Command::AddNode { node: node.clone() }];
    commands.extend(
        edges
            .iter()
            .map(|edge| Command::AddEdge { edge: edge.clone() }),
    );
    Command::Batch(commands)
}
