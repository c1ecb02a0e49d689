use clap::Parser;
use flowcanvas::prelude::*;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::fs;

/// A CLI tool to generate random workflow definitions for canvas testing
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_workflow.json")]
    output: String,

    /// The number of nodes to place
    #[arg(long, default_value_t = 8)]
    nodes: usize,

    /// The number of connections to draw between distinct nodes
    #[arg(long, default_value_t = 10)]
    connections: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Scatter nodes randomly instead of leaving them on the placement grid
    #[arg(long)]
    scatter: bool,
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.nodes == 0 && cli.connections > 0 {
        eprintln!("Error: --connections requires at least one node");
        std::process::exit(1);
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    println!(
        "Generating workflow with {} node(s) and up to {} connection(s) (seed {})...",
        cli.nodes, cli.connections, seed
    );

    // Build through the real model so placement, naming, and ports are
    // exactly what the editor would produce.
    let mut model = CanvasModel::new();
    for _ in 0..cli.nodes {
        let kind = NodeKind::ALL[rng.random_range(0..NodeKind::ALL.len())];
        let node = model.add_node(kind);
        if cli.scatter {
            let x = rng.random_range(0.0..1200.0);
            let y = rng.random_range(0.0..700.0);
            model.move_node(&node.id, Position::new(x, y));
        }
    }
    println!("-> Placed {} node(s).", model.nodes().len());

    // Draw connections over a random sample of distinct ordered pairs. The
    // editor would accept self loops too; generated fixtures stay tidy.
    let ids: Vec<String> = model.nodes().iter().map(|node| node.id.clone()).collect();
    let pairs: Vec<(usize, usize)> = (0..ids.len())
        .cartesian_product(0..ids.len())
        .filter(|(source, target)| source != target)
        .collect();
    for (source, target) in pairs.choose_multiple(&mut rng, cli.connections) {
        model.add_connection(&ids[*source], &ids[*target])?;
    }
    println!("-> Drew {} connection(s).", model.connections().len());

    let now = chrono::Utc::now();
    let definition = WorkflowDefinition {
        id: uuid::Uuid::new_v4().to_string(),
        name: "Generated workflow".to_string(),
        description: Some(format!("Randomly generated canvas (seed {})", seed)),
        category: Some("generated".to_string()),
        tags: vec!["generated".to_string()],
        nodes: model.nodes().to_vec(),
        connections: model.connections().to_vec(),
        variables: HashMap::new(),
        is_active: false,
        created_at: now,
        updated_at: now,
    };

    let json_output = serde_json::to_string_pretty(&definition)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved workflow to '{}'",
        cli.output
    );

    Ok(())
}
