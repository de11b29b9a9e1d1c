//! Pure geometry helpers: snap-to-grid, alignment, distribution, and the
//! marquee intersection test.
//!
//! Everything here operates on plain position data and returns the positions
//! nodes *should* move to; turning those moves into a single undoable batch
//! command is the facade's job.

use crate::document::{NodeId, Position, Size};
use itertools::Itertools;

/// Grid pitch used when the view state does not override it.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Snaps a raw position to the nearest grid intersection.
///
/// Applied at node-creation and drag-drop time when snapping is enabled;
/// never retroactively applied to nodes already at rest.
pub fn snap_to_grid(position: Position, grid_size: f64) -> Position {
    if grid_size <= 0.0 {
        return position;
    }
    Position {
        x: (position.x / grid_size).round() * grid_size,
        y: (position.y / grid_size).round() * grid_size,
    }
}

/// An axis-aligned alignment over a selected node set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Align left edges to the minimum x.
    Left,
    /// Align horizontal centers to the mean center x.
    Center,
    /// Align right edges to the maximum right edge.
    Right,
    /// Align top edges to the minimum y.
    Top,
    /// Align bottom edges to the maximum bottom edge.
    Bottom,
}

/// Even spacing along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    Horizontal,
    Vertical,
}

/// A node's id plus the geometric data alignment math needs.
#[derive(Debug, Clone)]
pub struct NodeExtent {
    pub id: NodeId,
    pub position: Position,
    pub size: Size,
}

/// Computes aligned positions for a set of nodes.
///
/// The reference coordinate comes from the set's current bounding boxes; the
/// orthogonal axis of every node is left untouched. Fewer than two nodes is
/// a no-op (empty result).
pub fn align(extents: &[NodeExtent], alignment: Alignment) -> Vec<(NodeId, Position)> {
    if extents.len() < 2 {
        return Vec::new();
    }

    let reference = match alignment {
        Alignment::Left => extents
            .iter()
            .map(|e| e.position.x)
            .fold(f64::INFINITY, f64::min),
        Alignment::Center => {
            let sum: f64 = extents
                .iter()
                .map(|e| e.position.x + e.size.width / 2.0)
                .sum();
            sum / extents.len() as f64
        }
        Alignment::Right => extents
            .iter()
            .map(|e| e.position.x + e.size.width)
            .fold(f64::NEG_INFINITY, f64::max),
        Alignment::Top => extents
            .iter()
            .map(|e| e.position.y)
            .fold(f64::INFINITY, f64::min),
        Alignment::Bottom => extents
            .iter()
            .map(|e| e.position.y + e.size.height)
            .fold(f64::NEG_INFINITY, f64::max),
    };

    extents
        .iter()
        .map(|e| {
            let position = match alignment {
                Alignment::Left => Position::new(reference, e.position.y),
                Alignment::Center => {
                    Position::new(reference - e.size.width / 2.0, e.position.y)
                }
                Alignment::Right => {
                    Position::new(reference - e.size.width, e.position.y)
                }
                Alignment::Top => Position::new(e.position.x, reference),
                Alignment::Bottom => {
                    Position::new(e.position.x, reference - e.size.height)
                }
            };
            (e.id.clone(), position)
        })
        .collect()
}

/// Computes evenly distributed positions along one axis.
///
/// Nodes are sorted by the relevant coordinate; the first and last stay
/// fixed and the intermediates are spaced at equal intervals between them.
/// Fewer than three nodes is a no-op (empty result).
pub fn distribute(extents: &[NodeExtent], axis: Distribution) -> Vec<(NodeId, Position)> {
    if extents.len() < 3 {
        return Vec::new();
    }

    let coordinate = |e: &NodeExtent| match axis {
        Distribution::Horizontal => e.position.x,
        Distribution::Vertical => e.position.y,
    };

    let sorted: Vec<&NodeExtent> = extents
        .iter()
        .sorted_by(|a, b| coordinate(a).total_cmp(&coordinate(b)))
        .collect();

    let first = coordinate(sorted[0]);
    let last = coordinate(sorted[sorted.len() - 1]);
    let step = (last - first) / (sorted.len() - 1) as f64;

    sorted
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let value = first + step * i as f64;
            let position = match axis {
                Distribution::Horizontal => Position::new(value, e.position.y),
                Distribution::Vertical => Position::new(e.position.x, value),
            };
            (e.id.clone(), position)
        })
        .collect()
}

/// True when a node's bounding box intersects the marquee rectangle spanned
/// by `min` and `max`.
pub fn intersects_rect(position: Position, size: Size, min: Position, max: Position) -> bool {
    position.x <= max.x
        && position.x + size.width >= min.x
        && position.y <= max.y
        && position.y + size.height >= min.y
}
