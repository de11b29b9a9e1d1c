use clap::Parser;
use flowboard::prelude::*;
use std::fs;
use std::process::ExitCode;

/// Inspect a persisted workflow: rebuild the document and report the
/// validation verdict of every edge.
#[derive(Parser, Debug)]
#[command(name = "flowboard-cli", version, about)]
struct Args {
    /// Path to an exported workflow JSON file
    workflow: String,

    /// Only print edges that are not fully valid
    #[arg(short, long)]
    problems_only: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let raw = match fs::read_to_string(&args.workflow) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Error: could not read '{}': {}", args.workflow, e);
            return ExitCode::FAILURE;
        }
    };

    let export: WorkflowExport = match serde_json::from_str(&raw) {
        Ok(export) => export,
        Err(e) => {
            eprintln!("Error: could not parse workflow JSON: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let editor = match Editor::from_export(NodeCatalog::with_defaults(), export) {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error: could not load workflow: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!(
        "Loaded workflow: {} nodes, {} edges",
        editor.nodes().len(),
        editor.edges().len()
    );

    let mut warnings = 0usize;
    for edge in editor.edges() {
        let state = edge.validation_state;
        if args.problems_only && state == ConnectionState::Valid {
            continue;
        }
        if state == ConnectionState::Warning {
            warnings += 1;
        }
        println!(
            "  {} -> {} [{}] {:?}",
            edge.source, edge.target, edge.source_handle, state
        );
    }

    if warnings > 0 {
        println!("{} edge(s) carry warnings", warnings);
    } else {
        println!("All edges valid");
    }

    ExitCode::SUCCESS
}
