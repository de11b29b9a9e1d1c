//! View preferences: viewport, grid, and minimap state.
//!
//! These are presentation preferences, not document content, so they are
//! mutated directly and never enter the undo history.

use crate::geometry::DEFAULT_GRID_SIZE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub viewport: Viewport,
    pub grid_visible: bool,
    pub snap_to_grid_enabled: bool,
    pub grid_size: f64,
    pub minimap_visible: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            grid_visible: true,
            snap_to_grid_enabled: true,
            grid_size: DEFAULT_GRID_SIZE,
            minimap_visible: false,
        }
    }
}
