use thiserror::Error;

/// Errors that can occur while mutating the in-memory canvas graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    #[error("Connection references unknown node '{node_id}' on the {end} end")]
    UnknownEndpoint { node_id: String, end: &'static str },
}

/// Errors that can occur while talking to the remote workflow service.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid workflow service URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("Workflow service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Workflow service returned {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed workflow service response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No workflow is associated with this canvas yet; save or load first")]
    NoWorkflow,
}
