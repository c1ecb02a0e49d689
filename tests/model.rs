//! Tests for the canvas graph model: placement, mutation, cascading
//! removal, and change notification.
mod common;
use common::*;
use flowcanvas::model::default_position;
use flowcanvas::prelude::*;
use itertools::Itertools;
use serde_json::json;

#[test]
fn test_default_placement_packs_a_grid() {
    let mut model = CanvasModel::new();
    assert!(model.is_empty());
    for _ in 0..16 {
        model.add_node(NodeKind::Wait);
    }

    let expected = [
        (50.0, 50.0),
        (200.0, 50.0),
        (350.0, 50.0),
        (500.0, 50.0),
        (50.0, 150.0),
        (200.0, 150.0),
        (350.0, 150.0),
        (500.0, 150.0),
        (50.0, 250.0),
        (200.0, 250.0),
        (350.0, 250.0),
        (500.0, 250.0),
        (50.0, 350.0),
        (200.0, 350.0),
        (350.0, 350.0),
        (500.0, 350.0),
    ];
    assert_eq!(model.nodes().len(), expected.len());
    for (node, (x, y)) in model.nodes().iter().zip(expected) {
        assert_eq!(node.position, Position::new(x, y));
    }

    // The helper is the same rule, usable without a model.
    assert_eq!(default_position(5), Position::new(200.0, 150.0));
}

#[test]
fn test_node_ids_are_unique() {
    let mut model = CanvasModel::new();
    let ids: Vec<String> = (0..20)
        .map(|_| model.add_node(NodeKind::DataProcessing).id)
        .collect();
    assert_eq!(ids.iter().duplicates().count(), 0);
}

#[test]
fn test_default_names_count_from_total() {
    let mut model = CanvasModel::new();
    assert_eq!(model.add_node(NodeKind::Start).name, "start_1");
    assert_eq!(model.add_node(NodeKind::AiTask).name, "ai_task_2");
    assert_eq!(model.add_node(NodeKind::End).name, "end_3");
}

#[test]
fn test_removal_frees_grid_slot_and_ordinal() {
    let mut model = CanvasModel::new();
    let first = model.add_node(NodeKind::Start);
    model.add_node(NodeKind::AiTask);
    let third = model.add_node(NodeKind::End);
    model.remove_node(&third.id);

    // Count dropped back to two, so the next node takes ordinal 3 and the
    // third grid slot again. Names are count-derived, not unique.
    let replacement = model.add_node(NodeKind::Wait);
    assert_eq!(replacement.name, "wait_3");
    assert_eq!(replacement.position, default_position(2));
    assert_ne!(replacement.id, first.id);
}

#[test]
fn test_default_ports_per_kind() {
    let mut model = CanvasModel::new();
    let start = model.add_node(NodeKind::Start);
    let end = model.add_node(NodeKind::End);
    let condition = model.add_node(NodeKind::Condition);
    let task = model.add_node(NodeKind::AiTask);

    assert!(start.inputs.is_empty());
    assert_eq!(start.outputs, vec!["output"]);
    assert_eq!(end.inputs, vec!["input"]);
    assert!(end.outputs.is_empty());
    assert_eq!(condition.outputs, vec!["true", "false"]);
    assert_eq!(task.inputs, vec!["input"]);
    assert_eq!(task.outputs, vec!["output"]);
}

#[test]
fn test_connection_endpoints_must_exist() {
    let mut model = CanvasModel::new();
    let a = model.add_node(NodeKind::Start);
    let b = model.add_node(NodeKind::End);

    assert!(model.add_connection(&a.id, &b.id).is_ok());

    let err = model.add_connection("ghost", &b.id).unwrap_err();
    assert_eq!(
        err,
        CanvasError::UnknownEndpoint {
            node_id: "ghost".to_string(),
            end: "source",
        }
    );

    let err = model.add_connection(&a.id, "ghost").unwrap_err();
    assert_eq!(
        err,
        CanvasError::UnknownEndpoint {
            node_id: "ghost".to_string(),
            end: "target",
        }
    );
    assert_eq!(model.connections().len(), 1);
}

#[test]
fn test_duplicate_and_self_connections_are_accepted() {
    let mut model = CanvasModel::new();
    let a = model.add_node(NodeKind::Start);
    let b = model.add_node(NodeKind::End);

    let first = model.add_connection(&a.id, &b.id).unwrap();
    let second = model.add_connection(&a.id, &b.id).unwrap();
    let looped = model.add_connection(&a.id, &a.id).unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(looped.source_node_id, looped.target_node_id);
    assert_eq!(model.connections().len(), 3);
}

#[test]
fn test_remove_node_cascades_connections() {
    let mut model = CanvasModel::new();
    let a = model.add_node(NodeKind::Start);
    let b = model.add_node(NodeKind::AiTask);
    let c = model.add_node(NodeKind::End);
    model.add_connection(&a.id, &b.id).unwrap();
    model.add_connection(&b.id, &c.id).unwrap();
    assert_eq!(model.connections_for(&b.id).count(), 2);
    assert_eq!(model.connections_for(&c.id).count(), 1);

    let events = record_events(&mut model);
    let removed = model.remove_node(&b.id).expect("node should be removed");

    assert_eq!(removed.id, b.id);
    assert_eq!(model.nodes().len(), 2);
    assert!(model.connections().is_empty());
    assert_eq!(
        events.borrow().as_slice(),
        &[ModelEvent::NodeRemoved {
            node_id: b.id.clone(),
            connections_removed: 2,
        }]
    );

    // Already gone.
    assert!(model.remove_node(&b.id).is_none());
}

#[test]
fn test_move_node_is_unclamped() {
    let mut model = CanvasModel::new();
    let node = model.add_node(NodeKind::Webhook);

    assert!(model.move_node(&node.id, Position::new(-40.0, -10.0)));
    assert_eq!(
        model.node(&node.id).unwrap().position,
        Position::new(-40.0, -10.0)
    );
    assert!(!model.move_node("ghost", Position::new(0.0, 0.0)));
}

#[test]
fn test_field_edits_apply_immediately() {
    let mut model = CanvasModel::new();
    let node = model.add_node(NodeKind::Email);

    assert!(model.rename_node(&node.id, "notify ops"));
    assert!(model.set_node_description(&node.id, "Mail the on-call rotation"));
    assert!(model.set_config_value(&node.id, "retries", json!(3)));

    let updated = model.node(&node.id).unwrap();
    assert_eq!(updated.name, "notify ops");
    assert_eq!(updated.description.as_deref(), Some("Mail the on-call rotation"));
    assert_eq!(updated.config.get("retries"), Some(&json!(3)));

    // The empty string is a legal name; clearing a field is the panel's call.
    assert!(model.rename_node(&node.id, ""));
    assert_eq!(model.node(&node.id).unwrap().name, "");

    assert!(!model.rename_node("ghost", "x"));
    assert!(!model.set_node_description("ghost", "x"));
    assert!(!model.set_config_value("ghost", "k", json!(null)));
}

#[test]
fn test_hydrate_replaces_graph_wholesale() {
    let mut model = CanvasModel::new();
    model.add_node(NodeKind::Start);
    model.add_node(NodeKind::End);

    let events = record_events(&mut model);
    let node = Node {
        id: "n-1".to_string(),
        node_type: "start".to_string(),
        name: "start_1".to_string(),
        description: None,
        position: Position::new(50.0, 50.0),
        config: HashMap::new(),
        inputs: Vec::new(),
        outputs: vec!["output".to_string()],
    };
    model.hydrate(vec![node], Vec::new());

    assert_eq!(model.nodes().len(), 1);
    assert_eq!(model.nodes()[0].id, "n-1");
    assert!(model.connections().is_empty());
    assert_eq!(events.borrow().as_slice(), &[ModelEvent::Hydrated]);
}

#[test]
fn test_listeners_see_postmutation_state_in_order() {
    let mut model = CanvasModel::new();
    let events = record_events(&mut model);

    let a = model.add_node(NodeKind::Start);
    let b = model.add_node(NodeKind::End);
    model.move_node(&a.id, Position::new(10.0, 20.0));
    let connection = model.add_connection(&a.id, &b.id).unwrap();
    model.rename_node(&b.id, "done");
    model.remove_node(&a.id);

    assert_eq!(
        events.borrow().as_slice(),
        &[
            ModelEvent::NodeAdded { node_id: a.id.clone() },
            ModelEvent::NodeAdded { node_id: b.id.clone() },
            ModelEvent::NodeMoved { node_id: a.id.clone() },
            ModelEvent::ConnectionAdded { connection_id: connection.id.clone() },
            ModelEvent::NodeUpdated { node_id: b.id.clone() },
            ModelEvent::NodeRemoved {
                node_id: a.id.clone(),
                connections_removed: 1,
            },
        ]
    );
}

#[test]
fn test_listeners_run_in_subscription_order() {
    let mut model = CanvasModel::new();
    let order = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));

    let first = std::rc::Rc::clone(&order);
    model.subscribe(move |_| first.borrow_mut().push("first"));
    let second = std::rc::Rc::clone(&order);
    model.subscribe(move |_| second.borrow_mut().push("second"));

    model.add_node(NodeKind::Loop);
    assert_eq!(order.borrow().as_slice(), &["first", "second"]);
}

#[test]
fn test_wire_format_round_trip() {
    let mut model = CanvasModel::new();
    let a = model.add_node(NodeKind::Start);
    let b = model.add_node(NodeKind::AiTask);
    model.rename_node(&b.id, "classify");
    model.set_node_description(&b.id, "Classify the incoming ticket");
    model.set_config_value(&b.id, "model", json!("gpt-4o"));
    model.add_connection(&a.id, &b.id).unwrap();

    let nodes = serde_json::to_value(model.nodes()).unwrap();
    let connections = serde_json::to_value(model.connections()).unwrap();

    // Wire casing: `type` on nodes, camelCase endpoint keys on connections.
    assert_eq!(nodes[0]["type"], json!("start"));
    assert_eq!(connections[0]["sourceNodeId"], json!(a.id));
    assert_eq!(connections[0]["targetNodeId"], json!(b.id));

    let parsed_nodes: Vec<Node> = serde_json::from_value(nodes).unwrap();
    let parsed_connections: Vec<Connection> = serde_json::from_value(connections).unwrap();

    let mut reloaded = CanvasModel::new();
    reloaded.hydrate(parsed_nodes, parsed_connections);
    assert_eq!(reloaded.nodes(), model.nodes());
    assert_eq!(reloaded.connections(), model.connections());
}
