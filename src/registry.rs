//! The catalog of placeable node kinds and their display metadata.
//!
//! The canvas itself is type-agnostic: every node carries a free-form
//! `node_type` tag, and editing operations never inspect it. The registry is
//! the one place that maps tags to presentation (label, icon, color) and to
//! the default port lists a freshly placed node starts with. Tags the
//! registry has never heard of resolve to a fallback style, so a definition
//! loaded from the service can always be rendered and edited.

use std::fmt;
use std::str::FromStr;

use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The built-in node kinds the palette offers for placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Start,
    End,
    AiTask,
    DataProcessing,
    Condition,
    Loop,
    Wait,
    Webhook,
    Email,
}

impl NodeKind {
    /// Every placeable kind, in palette order.
    pub const ALL: [NodeKind; 9] = [
        NodeKind::Start,
        NodeKind::End,
        NodeKind::AiTask,
        NodeKind::DataProcessing,
        NodeKind::Condition,
        NodeKind::Loop,
        NodeKind::Wait,
        NodeKind::Webhook,
        NodeKind::Email,
    ];

    /// The wire tag stored in [`Node::node_type`](crate::model::Node).
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::End => "end",
            NodeKind::AiTask => "ai_task",
            NodeKind::DataProcessing => "data_processing",
            NodeKind::Condition => "condition",
            NodeKind::Loop => "loop",
            NodeKind::Wait => "wait",
            NodeKind::Webhook => "webhook",
            NodeKind::Email => "email",
        }
    }

    /// Default `(inputs, outputs)` port names for a freshly placed node.
    ///
    /// Start nodes have no inputs, end nodes no outputs, and condition nodes
    /// expose one output per branch. Everything else is a plain one-in
    /// one-out step.
    pub fn default_ports(&self) -> (&'static [&'static str], &'static [&'static str]) {
        match self {
            NodeKind::Start => (&[], &["output"]),
            NodeKind::End => (&["input"], &[]),
            NodeKind::Condition => (&["input"], &["true", "false"]),
            _ => (&["input"], &["output"]),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| format!("unknown node kind '{s}'"))
    }
}

/// How one node type is presented on the canvas and in the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStyle {
    /// Human-readable palette label.
    pub label: String,
    /// Icon identifier, resolved by the embedding frontend.
    pub icon: String,
    /// Accent color as a `#rrggbb` hex string.
    pub color: String,
}

impl NodeStyle {
    pub fn new(
        label: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            icon: icon.into(),
            color: color.into(),
        }
    }
}

/// Lookup table from node-type tags to display metadata.
///
/// `style` never fails: unknown tags fall back to a neutral style so that
/// definitions containing node types this build does not know about still
/// render.
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    styles: AHashMap<String, NodeStyle>,
    fallback: NodeStyle,
}

impl NodeRegistry {
    /// An empty registry with only the fallback style.
    pub fn new() -> Self {
        Self {
            styles: AHashMap::new(),
            fallback: NodeStyle::new("Unknown", "help-circle", "#9e9e9e"),
        }
    }

    /// A registry pre-populated with the nine built-in kinds.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        register_default_styles(&mut registry);
        registry
    }

    /// Register (or replace) the style for a tag.
    pub fn register(&mut self, tag: impl Into<String>, style: NodeStyle) {
        self.styles.insert(tag.into(), style);
    }

    /// The style for a tag, falling back for unknown ones.
    pub fn style(&self, tag: &str) -> &NodeStyle {
        self.styles.get(tag).unwrap_or(&self.fallback)
    }

    /// True if the tag was explicitly registered.
    pub fn contains(&self, tag: &str) -> bool {
        self.styles.contains_key(tag)
    }

    /// All registered tags, sorted for stable palette listings.
    pub fn tags(&self) -> Vec<&str> {
        self.styles.keys().map(String::as_str).sorted().collect()
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Installs the display styles for all built-in node kinds.
pub fn register_default_styles(registry: &mut NodeRegistry) {
    registry.register("start", NodeStyle::new("Start", "play", "#2e7d32"));
    registry.register("end", NodeStyle::new("End", "square", "#c62828"));
    registry.register("ai_task", NodeStyle::new("AI Task", "sparkles", "#7b1fa2"));
    registry.register(
        "data_processing",
        NodeStyle::new("Data Processing", "database", "#1976d2"),
    );
    registry.register(
        "condition",
        NodeStyle::new("Condition", "git-branch", "#e65100"),
    );
    registry.register("loop", NodeStyle::new("Loop", "repeat", "#00838f"));
    registry.register("wait", NodeStyle::new("Wait", "clock", "#757575"));
    registry.register("webhook", NodeStyle::new("Webhook", "globe", "#455a64"));
    registry.register("email", NodeStyle::new("Email", "mail", "#ad1457"));
}
