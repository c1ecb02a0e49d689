//! # Flowcanvas - Workflow Canvas Editing Core
//!
//! **Flowcanvas** is the headless core of a node-based workflow editor: an
//! owned graph model, a pointer-driven interaction state machine, and a REST
//! gateway to a workflow service. It contains no rendering and no event
//! loop; an embedding frontend draws the canvas and forwards raw pointer
//! events, and flowcanvas answers with what changed.
//!
//! ## Core Workflow
//!
//! The crate is built around one owned aggregate, the [`CanvasEditor`],
//! which pairs a [`CanvasModel`] with an [`InteractionController`]:
//!
//! 1.  **Open a canvas**: start empty, or load a stored workflow through the
//!     [`WorkflowGateway`] and hydrate the model from its definition.
//! 2.  **Observe**: subscribe to the model once; every applied mutation is
//!     pushed to listeners synchronously, and that push is the render
//!     trigger.
//! 3.  **Edit**: forward `pointer_down` / `pointer_move` / `pointer_up` and
//!     output-handle clicks to the editor; use the panel operations
//!     (rename, describe, configure, delete) on the current selection.
//! 4.  **Persist and run**: `save` creates or updates the stored workflow
//!     in one shot; `execute` starts an asynchronous run and returns the
//!     initial execution record.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowcanvas::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     // 1. An empty canvas; repaint whenever the model says so.
//!     let mut editor = CanvasEditor::new();
//!     editor.model.subscribe(|event| println!("changed: {event:?}"));
//!
//!     // 2. Place two nodes from the palette.
//!     let start = editor.add_node(NodeKind::Start);
//!     let task = editor.add_node(NodeKind::AiTask);
//!
//!     // 3. Drag the task node: press its center, move, release.
//!     editor.pointer_down(Position::new(task.position.x + 60.0, task.position.y + 30.0));
//!     editor.pointer_move(Position::new(400.0, 220.0));
//!     editor.pointer_up();
//!
//!     // 4. Connect start -> task: click the output handle, then press the
//!     //    target node. The task's center is now at (400, 220).
//!     editor.begin_connection(&start.id);
//!     editor.pointer_down(Position::new(400.0, 220.0));
//!
//!     // 5. Rename through the properties panel; the task node is still
//!     //    selected from the drag in step 3.
//!     editor.rename_selected("classify input");
//!
//!     // 6. Save to the workflow service, then start a run.
//!     let client = WorkflowClient::new("http://localhost:8000/api")?;
//!     let mut gateway = WorkflowGateway::new(client);
//!     let saved = gateway.save(&editor.model).await?;
//!     println!("saved workflow {}", saved.id);
//!
//!     let execution = gateway.execute(HashMap::new()).await?;
//!     println!("execution {} is {}", execution.id, execution.status);
//!
//!     Ok(())
//! }
//! ```
//!
//! [`CanvasEditor`]: crate::editor::CanvasEditor
//! [`CanvasModel`]: crate::model::CanvasModel
//! [`InteractionController`]: crate::controller::InteractionController
//! [`WorkflowGateway`]: crate::gateway::WorkflowGateway

pub mod controller;
pub mod editor;
pub mod error;
pub mod gateway;
pub mod model;
pub mod prelude;
pub mod registry;
