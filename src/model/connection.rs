use serde::{Deserialize, Serialize};

/// A directed edge between two placed nodes.
///
/// The model deliberately places no structural restrictions on connections:
/// duplicate edges and self loops are representable and accepted, mirroring
/// what the service stores. Validation of graph shape is a service concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub source_node_id: String,
    pub target_node_id: String,
    /// Output port on the source node, if the definition names one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_output: Option<String>,
    /// Input port on the target node, if the definition names one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_input: Option<String>,
}

impl Connection {
    /// True if either endpoint references the given node.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source_node_id == node_id || self.target_node_id == node_id
    }
}
