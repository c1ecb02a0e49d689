//! Fixed-box hit-testing for the canvas surface.

use crate::model::{CanvasModel, Node, Position};

/// Rendered width of every node box, in canvas pixels.
pub const NODE_WIDTH: f64 = 120.0;
/// Rendered height of every node box, in canvas pixels.
pub const NODE_HEIGHT: f64 = 60.0;

/// True if the point falls inside the node's box.
///
/// Every node renders as a fixed [`NODE_WIDTH`] by [`NODE_HEIGHT`] rectangle
/// anchored at its top-left `position`; boxes never vary with content.
/// Edges count as inside.
pub fn node_contains(node: &Node, point: Position) -> bool {
    point.x >= node.position.x
        && point.x <= node.position.x + NODE_WIDTH
        && point.y >= node.position.y
        && point.y <= node.position.y + NODE_HEIGHT
}

/// The node under the point, if any.
///
/// Nodes paint in insertion order, so the last-added node is on top where
/// boxes overlap. The scan runs in reverse to make the topmost node win.
pub fn node_at(model: &CanvasModel, point: Position) -> Option<&Node> {
    model
        .nodes()
        .iter()
        .rev()
        .find(|node| node_contains(node, point))
}

/// Center of a node's box.
///
/// This is where a connection preview starts from, and the point that ends
/// up under the pointer while a node is dragged.
pub fn node_center(node: &Node) -> Position {
    Position {
        x: node.position.x + NODE_WIDTH / 2.0,
        y: node.position.y + NODE_HEIGHT / 2.0,
    }
}
