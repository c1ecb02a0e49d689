//! The editor facade: one owned aggregate of graph and gesture state.
//!
//! [`CanvasEditor`] is the type an embedding frontend holds. It bundles the
//! [`CanvasModel`] with its [`InteractionController`], forwards pointer
//! events, and carries the properties-panel operations, which always act on
//! the current selection.

use crate::controller::{InteractionController, InteractionOutcome};
use crate::model::{CanvasModel, Node, Position};
use crate::registry::NodeKind;

/// An open canvas plus its interaction state.
///
/// Fields are public on purpose: the model is the render source of truth
/// and embedders subscribe to it directly, while the controller exposes the
/// selection and any connection preview to draw.
#[derive(Debug, Default)]
pub struct CanvasEditor {
    pub model: CanvasModel,
    pub controller: InteractionController,
}

impl CanvasEditor {
    /// An empty canvas with no selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// An editor over an already-populated model, as after a load.
    pub fn with_model(model: CanvasModel) -> Self {
        Self {
            model,
            controller: InteractionController::new(),
        }
    }

    // --- Palette ---

    /// Place a new node of the given kind at the next default grid slot.
    pub fn add_node(&mut self, kind: NodeKind) -> Node {
        self.model.add_node(kind)
    }

    // --- Pointer events, forwarded to the controller ---

    pub fn pointer_down(&mut self, point: Position) -> InteractionOutcome {
        self.controller.pointer_down(&mut self.model, point)
    }

    pub fn pointer_move(&mut self, point: Position) -> InteractionOutcome {
        self.controller.pointer_move(&mut self.model, point)
    }

    pub fn pointer_up(&mut self) -> InteractionOutcome {
        self.controller.pointer_up()
    }

    /// Click on a node's output handle.
    pub fn begin_connection(&mut self, source_id: &str) -> InteractionOutcome {
        self.controller.begin_connection(&self.model, source_id)
    }

    // --- Properties panel ---

    /// The node the panel is currently showing, if any.
    pub fn selected_node(&self) -> Option<&Node> {
        self.controller.selected().and_then(|id| self.model.node(id))
    }

    /// Live-rename the selected node. Returns false with nothing selected.
    pub fn rename_selected(&mut self, name: impl Into<String>) -> bool {
        let Some(id) = self.controller.selected().map(str::to_owned) else {
            return false;
        };
        self.model.rename_node(&id, name)
    }

    /// Replace the selected node's description.
    pub fn describe_selected(&mut self, description: impl Into<String>) -> bool {
        let Some(id) = self.controller.selected().map(str::to_owned) else {
            return false;
        };
        self.model.set_node_description(&id, description)
    }

    /// Set one config entry on the selected node.
    pub fn configure_selected(&mut self, key: impl Into<String>, value: serde_json::Value) -> bool {
        let Some(id) = self.controller.selected().map(str::to_owned) else {
            return false;
        };
        self.model.set_config_value(&id, key, value)
    }

    /// Delete the selected node, cascading its connections, and clear the
    /// selection. Returns false with nothing selected.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.controller.selected().map(str::to_owned) else {
            return false;
        };
        let removed = self.model.remove_node(&id).is_some();
        self.controller.clear_selection();
        removed
    }
}
