//! The authoritative in-memory graph for one open workflow.

use std::collections::HashMap;
use std::fmt;

use uuid::Uuid;

use crate::error::CanvasError;
use crate::registry::NodeKind;

use super::{Connection, Node, Position};

/// Top-left origin of the default placement grid.
pub const GRID_ORIGIN: Position = Position { x: 50.0, y: 50.0 };
/// Nodes per row before default placement wraps.
pub const GRID_COLUMNS: usize = 4;
/// Horizontal spacing between default placement slots.
pub const GRID_H_SPACING: f64 = 150.0;
/// Vertical spacing between default placement rows.
pub const GRID_V_SPACING: f64 = 100.0;

/// Default position for the node placed at a given zero-based ordinal.
///
/// Placement packs nodes left to right into rows of [`GRID_COLUMNS`]. The
/// ordinal is the node count at placement time, so deleting nodes frees up
/// slots for reuse and stacking two nodes on one slot is possible. The
/// canvas does not care; overlap is resolved visually by paint order.
pub fn default_position(ordinal: usize) -> Position {
    Position {
        x: GRID_ORIGIN.x + (ordinal % GRID_COLUMNS) as f64 * GRID_H_SPACING,
        y: GRID_ORIGIN.y + (ordinal / GRID_COLUMNS) as f64 * GRID_V_SPACING,
    }
}

/// Pushed to every subscribed listener after a mutation has been applied.
///
/// Listeners always observe the model in its post-mutation state. This is
/// the crate's render trigger: an embedding frontend subscribes once and
/// repaints whatever the event names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEvent {
    NodeAdded { node_id: String },
    NodeMoved { node_id: String },
    /// Name, description, or config changed.
    NodeUpdated { node_id: String },
    NodeRemoved {
        node_id: String,
        /// How many connections were cascaded away with the node.
        connections_removed: usize,
    },
    ConnectionAdded { connection_id: String },
    /// The whole graph was replaced by a loaded definition.
    Hydrated,
}

type Listener = Box<dyn FnMut(&ModelEvent)>;

/// The mutable node/connection graph for one open workflow.
///
/// All canvas interactions and panel edits funnel into the mutation methods
/// here, which are the only code paths that touch the graph. Each successful
/// mutation notifies subscribed listeners synchronously, in subscription
/// order, after the change is applied.
///
/// Nodes and connections keep insertion order. For nodes that order doubles
/// as paint order, which is what makes "topmost wins" hit-testing possible.
#[derive(Default)]
pub struct CanvasModel {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    listeners: Vec<Listener>,
}

impl fmt::Debug for CanvasModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasModel")
            .field("nodes", &self.nodes)
            .field("connections", &self.connections)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl CanvasModel {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Read access ---

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// All connections touching the given node, in insertion order.
    pub fn connections_for<'a>(
        &'a self,
        node_id: &'a str,
    ) -> impl Iterator<Item = &'a Connection> + 'a {
        self.connections.iter().filter(move |c| c.touches(node_id))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.connections.is_empty()
    }

    // --- Change notification ---

    /// Subscribe a listener to all future mutations.
    ///
    /// Listeners cannot be removed; a canvas and its observers live and die
    /// together with the editing session.
    pub fn subscribe(&mut self, listener: impl FnMut(&ModelEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, event: ModelEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    // --- Mutations ---

    /// Place a new node of the given kind at the next default grid slot.
    ///
    /// The node gets a fresh unique id, the name `{tag}_{count + 1}`, the
    /// kind's default ports, and an empty config. Returns a copy of the
    /// created node.
    pub fn add_node(&mut self, kind: NodeKind) -> Node {
        let ordinal = self.nodes.len();
        let (inputs, outputs) = kind.default_ports();
        let node = Node {
            id: Uuid::new_v4().to_string(),
            node_type: kind.tag().to_string(),
            name: format!("{}_{}", kind.tag(), ordinal + 1),
            description: None,
            position: default_position(ordinal),
            config: HashMap::new(),
            inputs: inputs.iter().map(|port| port.to_string()).collect(),
            outputs: outputs.iter().map(|port| port.to_string()).collect(),
        };
        self.nodes.push(node.clone());
        self.notify(ModelEvent::NodeAdded {
            node_id: node.id.clone(),
        });
        node
    }

    /// Move a node to an absolute position. Returns false for unknown ids.
    ///
    /// Positions are written as given; there is no clamping or collision
    /// handling, and dragging past the canvas edge is allowed.
    pub fn move_node(&mut self, id: &str, position: Position) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|node| node.id == id) else {
            return false;
        };
        node.position = position;
        self.notify(ModelEvent::NodeMoved {
            node_id: id.to_string(),
        });
        true
    }

    /// Replace a node's display name. Any string is accepted, empty included.
    pub fn rename_node(&mut self, id: &str, name: impl Into<String>) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|node| node.id == id) else {
            return false;
        };
        node.name = name.into();
        self.notify(ModelEvent::NodeUpdated {
            node_id: id.to_string(),
        });
        true
    }

    /// Replace a node's description.
    pub fn set_node_description(&mut self, id: &str, description: impl Into<String>) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|node| node.id == id) else {
            return false;
        };
        node.description = Some(description.into());
        self.notify(ModelEvent::NodeUpdated {
            node_id: id.to_string(),
        });
        true
    }

    /// Set one config entry on a node. The value is opaque to the canvas.
    pub fn set_config_value(
        &mut self,
        id: &str,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|node| node.id == id) else {
            return false;
        };
        node.config.insert(key.into(), value);
        self.notify(ModelEvent::NodeUpdated {
            node_id: id.to_string(),
        });
        true
    }

    /// Remove a node and every connection touching it.
    ///
    /// Returns the removed node, or `None` for unknown ids. The cascade is
    /// what keeps the graph free of dangling endpoints.
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let index = self.nodes.iter().position(|node| node.id == id)?;
        let node = self.nodes.remove(index);
        let before = self.connections.len();
        self.connections.retain(|c| !c.touches(id));
        let connections_removed = before - self.connections.len();
        self.notify(ModelEvent::NodeRemoved {
            node_id: node.id.clone(),
            connections_removed,
        });
        Some(node)
    }

    /// Connect two nodes, source to target.
    ///
    /// Both endpoints must exist; beyond that anything goes. Duplicate edges
    /// and self loops are accepted on purpose, matching what the service
    /// will store. Ports are left unset; the canvas connects node bodies,
    /// not named ports.
    pub fn add_connection(
        &mut self,
        source_id: &str,
        target_id: &str,
    ) -> Result<Connection, CanvasError> {
        if !self.contains_node(source_id) {
            return Err(CanvasError::UnknownEndpoint {
                node_id: source_id.to_string(),
                end: "source",
            });
        }
        if !self.contains_node(target_id) {
            return Err(CanvasError::UnknownEndpoint {
                node_id: target_id.to_string(),
                end: "target",
            });
        }
        let connection = Connection {
            id: Uuid::new_v4().to_string(),
            source_node_id: source_id.to_string(),
            target_node_id: target_id.to_string(),
            source_output: None,
            target_input: None,
        };
        self.connections.push(connection.clone());
        self.notify(ModelEvent::ConnectionAdded {
            connection_id: connection.id.clone(),
        });
        Ok(connection)
    }

    /// Replace the whole graph with a loaded definition's arrays.
    ///
    /// Contents are taken as-is. The service is trusted on referential
    /// integrity here; a stored definition with a dangling connection loads
    /// without complaint and saves back out unchanged.
    pub fn hydrate(&mut self, nodes: Vec<Node>, connections: Vec<Connection>) {
        self.nodes = nodes;
        self.connections = connections;
        self.notify(ModelEvent::Hydrated);
    }
}
