//! The connection validator.
//!
//! A single pure function decides whether a proposed edge is legal, suspect,
//! or forbidden. It runs in two places with identical semantics: against the
//! live edge-draw preview before anything is committed, and against every
//! committed edge after a structural change, so the renderer can refresh
//! validation badges.
//!
//! Port names double as port types. The compatibility table is deliberately
//! permissive: a mismatch produces a warning, never a hard rejection, and a
//! source port the table does not know falls back to the generic `default`
//! acceptance set. That fallback mirrors the observed behavior of graphs in
//! the field and must not be tightened, or previously-valid documents would
//! start rejecting.

use crate::catalog::NodeKind;
use serde::{Deserialize, Serialize};

/// The derived legality classification of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Valid,
    Invalid,
    Warning,
    /// Not yet validated.
    #[default]
    None,
}

/// The outcome of validating one proposed or committed connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionVerdict {
    /// Whether the edge may be committed at all.
    pub is_valid: bool,
    pub state: ConnectionState,
    /// Human-readable reason, present for invalid and warning verdicts.
    pub message: Option<String>,
}

impl ConnectionVerdict {
    fn valid() -> Self {
        Self {
            is_valid: true,
            state: ConnectionState::Valid,
            message: None,
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            state: ConnectionState::Invalid,
            message: Some(message.into()),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            state: ConnectionState::Warning,
            message: Some(message.into()),
        }
    }
}

/// Handle name assumed when the source side of a connection names none.
pub const DEFAULT_SOURCE_HANDLE: &str = "default";

/// Handle name assumed when the target side of a connection names none.
pub const DEFAULT_TARGET_HANDLE: &str = "input";

/// Target port types each known source port type may connect to.
///
/// Unlisted source ports fall back to the `default` row.
fn compatible_targets(source_port: &str) -> &'static [&'static str] {
    match source_port {
        "success" => &["default", "input", "success"],
        "failure" => &["default", "input", "failure"],
        "input" => &["default", "success", "failure", "conditional"],
        _ => &["default", "input"],
    }
}

/// Validates a proposed connection between two node ports.
///
/// Rules are checked in priority order:
/// 1. Trigger nodes accept no incoming edges at all (`invalid`).
/// 2. Port-type compatibility per the table; a target handle literally named
///    `input` is always accepted; any other mismatch is a `warning`.
/// 3. A delay node emitting from a non-`default` handle is a `warning`.
///
/// Pure: no document access, no side effects.
pub fn validate_connection(
    source_handle: Option<&str>,
    target_handle: Option<&str>,
    source_kind: NodeKind,
    target_kind: NodeKind,
) -> ConnectionVerdict {
    if target_kind == NodeKind::Trigger {
        return ConnectionVerdict::invalid("Triggers cannot have input connections.");
    }

    let source_port = source_handle.unwrap_or(DEFAULT_SOURCE_HANDLE);
    let target_port = target_handle.unwrap_or(DEFAULT_TARGET_HANDLE);

    // A target named exactly "input" is the generic escape hatch.
    if target_port != DEFAULT_TARGET_HANDLE
        && !compatible_targets(source_port).contains(&target_port)
    {
        return ConnectionVerdict::warning(format!(
            "Output '{source_port}' does not usually connect to input '{target_port}'."
        ));
    }

    if source_kind == NodeKind::Delay && source_port != DEFAULT_SOURCE_HANDLE {
        return ConnectionVerdict::warning("Delay nodes typically have single output");
    }

    ConnectionVerdict::valid()
}
