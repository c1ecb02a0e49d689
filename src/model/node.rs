use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A point in canvas pixel space. Origin is the canvas top-left corner;
/// coordinates are unclamped, so negative values are legal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One placed step in the canvas graph.
///
/// Field names and casing follow the workflow service wire format, so a node
/// moves between the canvas and a fetched [`WorkflowDefinition`] without a
/// mapping layer.
///
/// [`WorkflowDefinition`]: crate::gateway::types::WorkflowDefinition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Opaque identifier, unique within one canvas and stable for the node's
    /// lifetime. Connections reference nodes by this id.
    pub id: String,
    /// Node-type tag. Placement always writes one of the built-in kinds, but
    /// loaded definitions may carry tags this build has never seen; editing
    /// does not care and display falls back.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Human-editable display name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Top-left corner of the node's box on the canvas.
    pub position: Position,
    /// Node-type-specific parameters, opaque to the canvas.
    #[serde(default)]
    pub config: HashMap<String, serde_json::Value>,
    /// Declared input port names. Presence only; nothing validates them.
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Declared output port names. Presence only; nothing validates them.
    #[serde(default)]
    pub outputs: Vec<String>,
}
