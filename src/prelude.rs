//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the flowcanvas
//! crate. Import this module to get access to the core editing surface
//! without having to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! // Use the prelude to get easy access to all the core types.
//! use flowcanvas::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let mut editor = CanvasEditor::new();
//! let registry = NodeRegistry::with_defaults();
//!
//! let node = editor.add_node(NodeKind::Webhook);
//! println!(
//!     "placed '{}' ({}) at ({}, {})",
//!     node.name,
//!     registry.style(&node.node_type).label,
//!     node.position.x,
//!     node.position.y,
//! );
//! # Ok(())
//! # }
//! ```

// Editing surface
pub use crate::editor::CanvasEditor;
pub use crate::controller::{
    Interaction, InteractionController, InteractionOutcome, NODE_HEIGHT, NODE_WIDTH,
};
pub use crate::model::{CanvasModel, Connection, ModelEvent, Node, Position};

// Node catalog
pub use crate::registry::{NodeKind, NodeRegistry, NodeStyle};

// Persistence
pub use crate::gateway::types::{ExecutionStatus, WorkflowDefinition, WorkflowExecution};
pub use crate::gateway::{WorkflowClient, WorkflowGateway};

// Error types
pub use crate::error::{CanvasError, GatewayError};

// Standard library re-exports commonly used with this crate
pub use std::collections::HashMap;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
