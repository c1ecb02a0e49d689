//! Common test utilities for driving the editor and canning wire documents.
use std::cell::RefCell;
use std::rc::Rc;

use flowcanvas::controller::node_center;
use flowcanvas::prelude::*;
use serde_json::json;

/// Places a start, an ai_task, and an end node, returning their ids.
#[allow(dead_code)]
pub fn place_three_nodes(editor: &mut CanvasEditor) -> (String, String, String) {
    let start = editor.add_node(NodeKind::Start);
    let task = editor.add_node(NodeKind::AiTask);
    let end = editor.add_node(NodeKind::End);
    (start.id, task.id, end.id)
}

/// Center of a node's box, the natural press target for gestures.
#[allow(dead_code)]
pub fn center_of(editor: &CanvasEditor, node_id: &str) -> Position {
    let node = editor.model.node(node_id).expect("node should exist");
    node_center(node)
}

/// Selects a node with a press-release on its center.
#[allow(dead_code)]
pub fn select(editor: &mut CanvasEditor, node_id: &str) {
    let center = center_of(editor, node_id);
    editor.pointer_down(center);
    editor.pointer_up();
}

/// Drags a node so that its center lands on `to`.
#[allow(dead_code)]
pub fn drag(editor: &mut CanvasEditor, node_id: &str, to: Position) {
    let from = center_of(editor, node_id);
    editor.pointer_down(from);
    editor.pointer_move(to);
    editor.pointer_up();
}

/// Connects two nodes through the pointer grammar: output-handle click on
/// the source, then a press on the target's center.
#[allow(dead_code)]
pub fn connect(editor: &mut CanvasEditor, source_id: &str, target_id: &str) -> InteractionOutcome {
    editor.begin_connection(source_id);
    let target = center_of(editor, target_id);
    editor.pointer_down(target)
}

/// Subscribes a recording listener and returns the shared event log.
#[allow(dead_code)]
pub fn record_events(model: &mut CanvasModel) -> Rc<RefCell<Vec<ModelEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    model.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    log
}

/// A wire-format node document as the service would store it.
#[allow(dead_code)]
pub fn node_json(id: &str, node_type: &str, name: &str, x: f64, y: f64) -> serde_json::Value {
    json!({
        "id": id,
        "type": node_type,
        "name": name,
        "position": {"x": x, "y": y},
        "config": {},
        "inputs": ["input"],
        "outputs": ["output"],
    })
}

/// A wire-format connection document.
#[allow(dead_code)]
pub fn connection_json(id: &str, source: &str, target: &str) -> serde_json::Value {
    json!({
        "id": id,
        "sourceNodeId": source,
        "targetNodeId": target,
    })
}

/// A full workflow definition document around the given graph arrays.
#[allow(dead_code)]
pub fn definition_json(
    id: &str,
    nodes: serde_json::Value,
    connections: serde_json::Value,
) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Demo workflow",
        "description": "Canned definition for tests",
        "category": "custom",
        "tags": ["demo"],
        "nodes": nodes,
        "connections": connections,
        "variables": {},
        "isActive": false,
        "createdAt": "2025-06-01T12:00:00Z",
        "updatedAt": "2025-06-02T08:30:00Z",
    })
}

/// An execution record document in the given lifecycle state.
#[allow(dead_code)]
pub fn execution_json(id: &str, workflow_id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "workflowId": workflow_id,
        "status": status,
        "inputs": {},
        "outputs": {},
        "nodeExecutions": {},
        "logs": [],
    })
}
