//! Wire types shared with the workflow service.
//!
//! The canvas treats the service's JSON as the source of truth for shape:
//! [`Node`] and [`Connection`] appear verbatim inside [`WorkflowDefinition`],
//! so loading and saving move arrays around instead of mapping between
//! representations. Definition and execution documents use camelCase keys;
//! request bodies for execute and template instantiation use snake_case,
//! matching the service's endpoints exactly.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Connection, Node};

/// A workflow as the service stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    /// Workflow-level variables, opaque to the canvas.
    #[serde(default)]
    pub variables: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle state of one execution record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl ExecutionStatus {
    /// True once the service will never touch this execution again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// One run of a workflow, as reported by the executions listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowExecution {
    pub id: String,
    pub workflow_id: String,
    pub status: ExecutionStatus,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub inputs: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub outputs: HashMap<String, serde_json::Value>,
    /// Per-node progress, keyed by node id.
    #[serde(default)]
    pub node_executions: HashMap<String, NodeExecution>,
    /// Log lines in the order the service emitted them.
    #[serde(default)]
    pub logs: Vec<ExecutionLogEntry>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Progress of a single node within one execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeExecution {
    pub status: ExecutionStatus,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub output: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One line of execution log output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionLogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: String,
    pub message: String,
    #[serde(default)]
    pub node_id: Option<String>,
}

/// Body of `POST /workflows/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateWorkflowRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
    pub variables: HashMap<String, serde_json::Value>,
}

/// Body of `PUT /workflows/{id}`: a partial update carrying only the graph.
/// Name, category, and the rest stay untouched on the service side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateWorkflowRequest {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}

/// Body of `POST /workflows/{id}/execute`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecuteRequest {
    pub inputs: HashMap<String, serde_json::Value>,
    /// Always true from the canvas; runs are observed through the
    /// executions listing rather than awaited inline.
    pub async_execution: bool,
}

/// Body of `POST /workflows/templates/{id}/create`.
///
/// The template id travels in both the path and the body; the service wants
/// it that way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstantiateTemplateRequest {
    pub template_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
