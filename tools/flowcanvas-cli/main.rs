use chrono::Utc;
use clap::Parser;
use flowcanvas::controller::node_center;
use flowcanvas::gateway::{DEFAULT_WORKFLOW_CATEGORY, DEFAULT_WORKFLOW_NAME};
use flowcanvas::prelude::*;
use serde::Deserialize;
use std::fs;
use std::io::{self, Write};
use uuid::Uuid;

// --- Edit Script Format ---
// A script is a JSON array of these commands, applied in order. High-level
// commands (select, move, connect) drive the same pointer grammar a frontend
// would, so scripts exercise the real interaction paths.

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum ScriptCommand {
    Add { kind: NodeKind },
    Select { name: String },
    Move { name: String, x: f64, y: f64 },
    Connect { from: String, to: String },
    Rename { name: String },
    Describe { text: String },
    Configure { key: String, value: serde_json::Value },
    Delete,
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
}

/// A headless workflow-canvas editor CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a stored workflow definition JSON file to open
    definition_path: Option<String>,
    /// Path to an edit script JSON file to apply
    script_path: Option<String>,

    /// Write the resulting definition JSON to this path
    #[arg(short, long)]
    out: Option<String>,

    /// Run in interactive mode with a command prompt
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let (editor, definition) = match &cli.definition_path {
        Some(path) => open_definition(path),
        None => (CanvasEditor::new(), None),
    };

    if cli.human {
        run_interactive(editor, definition);
    } else {
        run_non_interactive(cli, editor, definition);
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Reads and hydrates a stored definition into a fresh editor.
fn open_definition(path: &str) -> (CanvasEditor, Option<WorkflowDefinition>) {
    let raw = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read definition file '{}': {}", path, e))
    });
    let definition: WorkflowDefinition = serde_json::from_str(&raw)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse definition JSON: {}", e)));

    let mut model = CanvasModel::new();
    model.hydrate(definition.nodes.clone(), definition.connections.clone());
    println!(
        "Opened workflow '{}' ({} nodes, {} connections)",
        definition.name,
        model.nodes().len(),
        model.connections().len()
    );
    (CanvasEditor::with_model(model), Some(definition))
}

/// Runs the CLI in non-interactive mode: apply the script, print the
/// summary, optionally write the result.
fn run_non_interactive(
    cli: Cli,
    mut editor: CanvasEditor,
    mut definition: Option<WorkflowDefinition>,
) {
    if let Some(script_path) = &cli.script_path {
        let raw = fs::read_to_string(script_path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to read script file '{}': {}", script_path, e))
        });
        let commands: Vec<ScriptCommand> = serde_json::from_str(&raw)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse edit script: {}", e)));

        println!("Applying {} scripted edit(s)...", commands.len());
        for command in commands {
            apply_command(&mut editor, command);
        }
    }

    let registry = NodeRegistry::with_defaults();
    print_summary(&editor, &registry);

    if let Some(out) = &cli.out {
        save_definition(&editor, &mut definition, out);
    }
}

/// Runs the CLI in an interactive, human-friendly mode with a prompt.
fn run_interactive(mut editor: CanvasEditor, mut definition: Option<WorkflowDefinition>) {
    println!("--- Flowcanvas Interactive Mode ---");
    println!("Type 'help' for the command list.");
    let registry = NodeRegistry::with_defaults();

    loop {
        let line = prompt_for_input("canvas", None);
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let rest: Vec<&str> = parts.collect();

        match command {
            "help" => print_help(),
            "kinds" => {
                for tag in registry.tags() {
                    println!("  {:<16} {}", tag, registry.style(tag).label);
                }
            }
            "list" => print_summary(&editor, &registry),
            "add" => match rest.first().map(|raw| raw.parse::<NodeKind>()) {
                Some(Ok(kind)) => apply_command(&mut editor, ScriptCommand::Add { kind }),
                Some(Err(message)) => println!("{}", message),
                None => println!("Usage: add <kind>"),
            },
            "select" => match rest.first() {
                Some(name) => {
                    let name = name.to_string();
                    apply_command(&mut editor, ScriptCommand::Select { name });
                }
                None => println!("Usage: select <name>"),
            },
            "move" => match (rest.first(), parse_coord(rest.get(1)), parse_coord(rest.get(2))) {
                (Some(name), Some(x), Some(y)) => {
                    let name = name.to_string();
                    apply_command(&mut editor, ScriptCommand::Move { name, x, y });
                }
                _ => println!("Usage: move <name> <x> <y>"),
            },
            "connect" => match (rest.first(), rest.get(1)) {
                (Some(from), Some(to)) => apply_command(
                    &mut editor,
                    ScriptCommand::Connect { from: from.to_string(), to: to.to_string() },
                ),
                _ => println!("Usage: connect <from> <to>"),
            },
            "rename" => {
                if rest.is_empty() {
                    println!("Usage: rename <new name>");
                } else {
                    apply_command(&mut editor, ScriptCommand::Rename { name: rest.join(" ") });
                }
            }
            "describe" => {
                if rest.is_empty() {
                    println!("Usage: describe <text>");
                } else {
                    apply_command(&mut editor, ScriptCommand::Describe { text: rest.join(" ") });
                }
            }
            "config" => match rest.first() {
                Some(key) if rest.len() > 1 => {
                    let raw = rest[1..].join(" ");
                    let value = serde_json::from_str(&raw)
                        .unwrap_or(serde_json::Value::String(raw));
                    apply_command(
                        &mut editor,
                        ScriptCommand::Configure { key: key.to_string(), value },
                    );
                }
                _ => println!("Usage: config <key> <value>"),
            },
            "delete" => apply_command(&mut editor, ScriptCommand::Delete),
            "open" => match rest.first() {
                Some(path) => {
                    let (opened_editor, opened_definition) = open_definition(path);
                    editor = opened_editor;
                    definition = opened_definition;
                }
                None => println!("Usage: open <path>"),
            },
            "save" => match rest.first() {
                Some(path) => save_definition(&editor, &mut definition, path),
                None => println!("Usage: save <path>"),
            },
            "quit" | "exit" => break,
            _ => println!("Unknown command '{}'. Type 'help' for the command list.", command),
        }
    }
}

/// Applies one edit, going through the pointer grammar where a frontend
/// would, so the CLI exercises the same paths.
fn apply_command(editor: &mut CanvasEditor, command: ScriptCommand) {
    match command {
        ScriptCommand::Add { kind } => {
            let node = editor.add_node(kind);
            println!(
                "-> Placed '{}' at ({}, {})",
                node.name, node.position.x, node.position.y
            );
        }
        ScriptCommand::Select { name } => match resolve_node(editor, &name) {
            Some((_, center)) => {
                editor.pointer_down(center);
                editor.pointer_up();
                // The press selects whatever is topmost there, which can
                // differ from the named node when boxes overlap.
                match editor.selected_node() {
                    Some(node) => println!("-> Selected '{}'", node.name),
                    None => println!("-> Selection failed for '{}'", name),
                }
            }
            None => println!("-> No node named '{}'", name),
        },
        ScriptCommand::Move { name, x, y } => match resolve_node(editor, &name) {
            Some((_, center)) => {
                editor.pointer_down(center);
                editor.pointer_move(Position::new(x + NODE_WIDTH / 2.0, y + NODE_HEIGHT / 2.0));
                editor.pointer_up();
                println!("-> Moved '{}' to ({}, {})", name, x, y);
            }
            None => println!("-> No node named '{}'", name),
        },
        ScriptCommand::Connect { from, to } => {
            let Some((source_id, _)) = resolve_node(editor, &from) else {
                println!("-> No node named '{}'", from);
                return;
            };
            let Some((_, target_center)) = resolve_node(editor, &to) else {
                println!("-> No node named '{}'", to);
                return;
            };
            editor.begin_connection(&source_id);
            match editor.pointer_down(target_center) {
                InteractionOutcome::ConnectionMade { .. } => {
                    println!("-> Connected '{}' -> '{}'", from, to)
                }
                other => println!("-> Connection '{}' -> '{}' not made: {:?}", from, to, other),
            }
        }
        ScriptCommand::Rename { name } => {
            if editor.rename_selected(name) {
                println!("-> Renamed the selected node");
            } else {
                println!("-> Nothing selected to rename");
            }
        }
        ScriptCommand::Describe { text } => {
            if editor.describe_selected(text) {
                println!("-> Updated the selected node's description");
            } else {
                println!("-> Nothing selected to describe");
            }
        }
        ScriptCommand::Configure { key, value } => {
            if editor.configure_selected(key, value) {
                println!("-> Updated the selected node's config");
            } else {
                println!("-> Nothing selected to configure");
            }
        }
        ScriptCommand::Delete => {
            if editor.delete_selected() {
                println!("-> Deleted the selected node");
            } else {
                println!("-> Nothing selected to delete");
            }
        }
        ScriptCommand::PointerDown { x, y } => {
            println!("-> {:?}", editor.pointer_down(Position::new(x, y)));
        }
        ScriptCommand::PointerMove { x, y } => {
            println!("-> {:?}", editor.pointer_move(Position::new(x, y)));
        }
        ScriptCommand::PointerUp => {
            println!("-> {:?}", editor.pointer_up());
        }
    }
}

/// First node whose name or id matches, with its current center.
fn resolve_node(editor: &CanvasEditor, name: &str) -> Option<(String, Position)> {
    editor
        .model
        .nodes()
        .iter()
        .find(|node| node.name == name || node.id == name)
        .map(|node| (node.id.clone(), node_center(node)))
}

fn print_summary(editor: &CanvasEditor, registry: &NodeRegistry) {
    println!("\n--- Canvas Summary ---");
    println!("Nodes: {}", editor.model.nodes().len());
    for node in editor.model.nodes() {
        let marker = if editor.controller.selected() == Some(node.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            "  {} {:<24} {:<16} at ({:>7.1}, {:>7.1})",
            marker,
            node.name,
            registry.style(&node.node_type).label,
            node.position.x,
            node.position.y
        );
    }
    println!("Connections: {}", editor.model.connections().len());
    for connection in editor.model.connections() {
        println!(
            "  {} -> {}",
            node_name(editor, &connection.source_node_id),
            node_name(editor, &connection.target_node_id)
        );
    }
    println!();
}

fn node_name<'a>(editor: &'a CanvasEditor, id: &'a str) -> &'a str {
    editor
        .model
        .node(id)
        .map(|node| node.name.as_str())
        .unwrap_or(id)
}

/// Writes the canvas back out as a definition document, reusing the opened
/// definition's identity or minting a fresh local one.
fn save_definition(editor: &CanvasEditor, definition: &mut Option<WorkflowDefinition>, path: &str) {
    let nodes = editor.model.nodes().to_vec();
    let connections = editor.model.connections().to_vec();
    let now = Utc::now();
    let updated = match definition.take() {
        Some(mut existing) => {
            existing.nodes = nodes;
            existing.connections = connections;
            existing.updated_at = now;
            existing
        }
        None => WorkflowDefinition {
            id: Uuid::new_v4().to_string(),
            name: DEFAULT_WORKFLOW_NAME.to_string(),
            description: None,
            category: Some(DEFAULT_WORKFLOW_CATEGORY.to_string()),
            tags: Vec::new(),
            nodes,
            connections,
            variables: HashMap::new(),
            is_active: false,
            created_at: now,
            updated_at: now,
        },
    };

    let json = serde_json::to_string_pretty(&updated)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize definition: {}", e)));
    fs::write(path, json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", path, e)));
    println!("Saved workflow '{}' to '{}'", updated.name, path);
    *definition = Some(updated);
}

fn print_help() {
    println!("Commands:");
    println!("  add <kind>              Place a new node (see 'kinds')");
    println!("  list                    Print the canvas summary");
    println!("  kinds                   List placeable node kinds");
    println!("  select <name>           Select a node by name or id");
    println!("  move <name> <x> <y>     Drag a node so its corner lands at (x, y)");
    println!("  connect <from> <to>     Draw a connection between two nodes");
    println!("  rename <new name>       Rename the selected node");
    println!("  describe <text>         Set the selected node's description");
    println!("  config <key> <value>    Set a config entry on the selected node");
    println!("  delete                  Delete the selected node");
    println!("  open <path>             Open a stored definition file");
    println!("  save <path>             Write the canvas to a definition file");
    println!("  quit                    Leave interactive mode");
}

fn parse_coord(value: Option<&&str>) -> Option<f64> {
    value.and_then(|raw| raw.parse().ok())
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    io::stdout().flush().unwrap();

    io::stdin()
        .read_line(&mut line)
        .expect("Failed to read line");
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
