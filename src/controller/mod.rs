//! The pointer-driven interaction state machine for the canvas surface.
//!
//! An embedding frontend forwards raw pointer events (`pointer_down`,
//! `pointer_move`, `pointer_up`) plus clicks on node output handles
//! (`begin_connection`) and the controller turns them into model mutations.
//! The controller holds all transient gesture state; nothing about an
//! in-progress drag or pending connection ever leaks into [`CanvasModel`].
//!
//! Local failures are absorbed, not raised: pressing empty canvas while a
//! connection is pending cancels it, dragging a node that was deleted
//! mid-gesture drops the gesture. The returned [`InteractionOutcome`] tells
//! the embedder what happened so it can repaint, but there is nothing to
//! handle beyond that.

pub mod hit;

pub use hit::*;

use crate::model::{CanvasModel, Position};

/// What the controller is currently doing with the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    /// No gesture in progress.
    Idle,
    /// A node body is held and follows the pointer.
    Dragging { node_id: String },
    /// An output handle was clicked; a pending connection follows the
    /// pointer until the next press commits it (on a node) or cancels it
    /// (on empty canvas).
    Connecting {
        source_id: String,
        /// Live endpoint of the connection preview.
        pointer: Position,
    },
}

/// What a single pointer event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// Nothing observable changed.
    Ignored,
    SelectionCleared,
    NodeSelected { node_id: String },
    /// The held node committed a new position.
    NodeDragged { node_id: String },
    DragFinished { node_id: String },
    ConnectionStarted { source_id: String },
    /// The pending connection's preview endpoint moved.
    PreviewMoved,
    ConnectionMade { connection_id: String },
    ConnectionCancelled,
}

/// Translates pointer events over the canvas into model mutations.
///
/// One controller edits one [`CanvasModel`]; the two are passed together on
/// every entry point and typically travel as a [`CanvasEditor`].
///
/// [`CanvasEditor`]: crate::editor::CanvasEditor
#[derive(Debug, Clone)]
pub struct InteractionController {
    interaction: Interaction,
    selected: Option<String>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            interaction: Interaction::Idle,
            selected: None,
        }
    }

    /// The gesture currently in progress.
    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Id of the node the properties panel should show, if any.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Drop the selection without touching the model.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Source node id and live pointer position of the pending connection,
    /// for drawing the preview line.
    pub fn connection_preview(&self) -> Option<(&str, Position)> {
        match &self.interaction {
            Interaction::Connecting { source_id, pointer } => {
                Some((source_id.as_str(), *pointer))
            }
            _ => None,
        }
    }

    /// Handle a press on the canvas surface.
    ///
    /// A pending connection resolves first: a press on any node commits it
    /// (self loops included), a press on empty canvas cancels it. Otherwise
    /// a press on a node selects it and starts a drag, and a press on empty
    /// canvas clears the selection.
    pub fn pointer_down(&mut self, model: &mut CanvasModel, point: Position) -> InteractionOutcome {
        if let Interaction::Connecting { source_id, .. } = self.interaction.clone() {
            self.interaction = Interaction::Idle;
            let target = node_at(model, point).map(|node| node.id.clone());
            return match target {
                Some(target_id) => match model.add_connection(&source_id, &target_id) {
                    Ok(connection) => InteractionOutcome::ConnectionMade {
                        connection_id: connection.id,
                    },
                    // Source vanished while the connection was pending
                    // (deleted through the panel). Nothing to commit.
                    Err(_) => InteractionOutcome::ConnectionCancelled,
                },
                None => InteractionOutcome::ConnectionCancelled,
            };
        }

        match node_at(model, point).map(|node| node.id.clone()) {
            Some(node_id) => {
                self.selected = Some(node_id.clone());
                self.interaction = Interaction::Dragging {
                    node_id: node_id.clone(),
                };
                InteractionOutcome::NodeSelected { node_id }
            }
            None => {
                self.interaction = Interaction::Idle;
                if self.selected.take().is_some() {
                    InteractionOutcome::SelectionCleared
                } else {
                    InteractionOutcome::Ignored
                }
            }
        }
    }

    /// Handle pointer movement.
    ///
    /// While dragging, each move commits a new position immediately; the
    /// held node's center lands under the pointer. While a connection is
    /// pending, moves only update the preview endpoint.
    pub fn pointer_move(&mut self, model: &mut CanvasModel, point: Position) -> InteractionOutcome {
        match self.interaction.clone() {
            Interaction::Idle => InteractionOutcome::Ignored,
            Interaction::Dragging { node_id } => {
                let anchored = Position {
                    x: point.x - NODE_WIDTH / 2.0,
                    y: point.y - NODE_HEIGHT / 2.0,
                };
                if model.move_node(&node_id, anchored) {
                    InteractionOutcome::NodeDragged { node_id }
                } else {
                    // Node deleted out from under the drag.
                    self.interaction = Interaction::Idle;
                    InteractionOutcome::Ignored
                }
            }
            Interaction::Connecting { source_id, .. } => {
                self.interaction = Interaction::Connecting {
                    source_id,
                    pointer: point,
                };
                InteractionOutcome::PreviewMoved
            }
        }
    }

    /// Handle a pointer release.
    ///
    /// Only ends a drag; the node stays wherever the last move put it. A
    /// pending connection survives releases and resolves on the next press.
    pub fn pointer_up(&mut self) -> InteractionOutcome {
        match self.interaction.clone() {
            Interaction::Dragging { node_id } => {
                self.interaction = Interaction::Idle;
                InteractionOutcome::DragFinished { node_id }
            }
            _ => InteractionOutcome::Ignored,
        }
    }

    /// Handle a click on a node's output handle: arms connection drawing
    /// from that node, with the preview starting at the node's center.
    ///
    /// Allowed from any state; an in-progress drag is abandoned. Unknown
    /// ids are ignored, since the handle belonged to a node that no longer
    /// exists.
    pub fn begin_connection(
        &mut self,
        model: &CanvasModel,
        source_id: &str,
    ) -> InteractionOutcome {
        let Some(node) = model.node(source_id) else {
            return InteractionOutcome::Ignored;
        };
        let pointer = node_center(node);
        self.interaction = Interaction::Connecting {
            source_id: source_id.to_string(),
            pointer,
        };
        InteractionOutcome::ConnectionStarted {
            source_id: source_id.to_string(),
        }
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}
