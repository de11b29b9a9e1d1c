//! The read-only node-type catalog.
//!
//! The catalog is the static registry of node templates an operator can place
//! on the canvas. The document model only constructs nodes whose
//! `(kind, subtype)` pair the catalog knows, which keeps the editable graph
//! aligned with what the downstream execution engine understands.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// The broad behavioral category of a workflow node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Entry points that start a workflow run.
    Trigger,
    /// Concrete automation steps (HTTP calls, scripts, notifications).
    Action,
    /// Human sign-off gates.
    Approval,
    /// Branching logic.
    Condition,
    /// Timed waits.
    Delay,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Trigger => "trigger",
            NodeKind::Action => "action",
            NodeKind::Approval => "approval",
            NodeKind::Condition => "condition",
            NodeKind::Delay => "delay",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constructible node template: catalog key, display metadata, default
/// configuration, and the nominal graph-space extent used by alignment math.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTemplate {
    pub kind: NodeKind,
    pub subtype: String,
    pub label: String,
    pub description: String,
    #[serde(default)]
    pub default_config: serde_json::Map<String, serde_json::Value>,
    pub width: f64,
    pub height: f64,
}

impl NodeTemplate {
    pub fn new(
        kind: NodeKind,
        subtype: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            subtype: subtype.into(),
            label: label.into(),
            description: description.into(),
            default_config: serde_json::Map::new(),
            width: DEFAULT_NODE_WIDTH,
            height: DEFAULT_NODE_HEIGHT,
        }
    }

    pub fn with_config(mut self, config: serde_json::Map<String, serde_json::Value>) -> Self {
        self.default_config = config;
        self
    }

    pub fn with_extent(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Nominal extent given to nodes whose template does not override it.
pub const DEFAULT_NODE_WIDTH: f64 = 180.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 80.0;

/// The registry of node templates, keyed by `(kind, subtype)`.
#[derive(Debug, Clone, Default)]
pub struct NodeCatalog {
    templates: AHashMap<(NodeKind, String), NodeTemplate>,
}

impl NodeCatalog {
    /// Creates an empty catalog. Most callers want [`NodeCatalog::with_defaults`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog pre-populated with the built-in template set.
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for template in default_templates() {
            catalog.register(template);
        }
        catalog
    }

    /// Registers a template, replacing any existing one with the same key.
    pub fn register(&mut self, template: NodeTemplate) {
        self.templates
            .insert((template.kind, template.subtype.clone()), template);
    }

    /// Looks up the template for a `(kind, subtype)` pair.
    pub fn template(&self, kind: NodeKind, subtype: &str) -> Option<&NodeTemplate> {
        self.templates.get(&(kind, subtype.to_string()))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterates over all registered templates in unspecified order.
    pub fn templates(&self) -> impl Iterator<Item = &NodeTemplate> {
        self.templates.values()
    }
}

fn default_templates() -> Vec<NodeTemplate> {
    vec![
        NodeTemplate::new(
            NodeKind::Trigger,
            "webhook",
            "Webhook",
            "Starts the workflow when an HTTP callback arrives",
        ),
        NodeTemplate::new(
            NodeKind::Trigger,
            "schedule",
            "Schedule",
            "Starts the workflow on a cron-style schedule",
        ),
        NodeTemplate::new(
            NodeKind::Trigger,
            "manual",
            "Manual trigger",
            "Started explicitly by an operator",
        ),
        NodeTemplate::new(
            NodeKind::Action,
            "http_request",
            "HTTP request",
            "Calls an external HTTP endpoint",
        ),
        NodeTemplate::new(
            NodeKind::Action,
            "run_script",
            "Run script",
            "Executes a configured script",
        ),
        NodeTemplate::new(
            NodeKind::Action,
            "send_notification",
            "Send notification",
            "Delivers a message to a notification channel",
        ),
        NodeTemplate::new(
            NodeKind::Approval,
            "manual_approval",
            "Manual approval",
            "Waits for a human sign-off before continuing",
        ),
        NodeTemplate::new(
            NodeKind::Condition,
            "branch",
            "Branch",
            "Routes the run based on a configured expression",
        ),
        NodeTemplate::new(
            NodeKind::Delay,
            "fixed_delay",
            "Delay",
            "Pauses the run for a fixed duration",
        ),
    ]
}
