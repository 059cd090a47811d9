use std::path::Path;

use serde::Serialize;

use crate::collector::Collection;
use crate::error::Error;
use crate::types::{FileRecord, Warning};

/// Print the flattening plan as markdown, or as JSON when `json` is set.
///
/// # Errors
///
/// Returns `Error::Json` if the plan cannot be serialized.
pub fn print(root: &Path, collection: &Collection, json: bool) -> Result<(), Error> {
    let plan = build(root, collection);
    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_markdown(&plan);
    }
    return Ok(());
}

// ── Plan gathering ────────────────────────────────────────────────────

#[derive(Serialize)]
struct Plan<'a> {
    files: Vec<PlanEntry<'a>>,
    project: String,
    root: String,
    warnings: &'a [Warning],
}

#[derive(Serialize)]
struct PlanEntry<'a> {
    flattened: &'a str,
    role: &'static str,
    source: String,
}

fn build<'a>(root: &Path, collection: &'a Collection) -> Plan<'a> {
    let base = collection.state.base_dir();
    return Plan {
        files: collection.state.files().map(|record| return entry(base, record)).collect(),
        project: base.display().to_string(),
        root: root.display().to_string(),
        warnings: &collection.warnings,
    };
}

fn entry<'a>(base: &Path, record: &'a FileRecord) -> PlanEntry<'a> {
    let source = record.original.strip_prefix(base).unwrap_or(&record.original);
    return PlanEntry {
        flattened: &record.flattened,
        role: if record.is_document { "document" } else { "asset" },
        source: source.display().to_string(),
    };
}

// ── Markdown output ───────────────────────────────────────────────────

fn print_markdown(plan: &Plan<'_>) {
    println!("# Flattening plan\n");
    println!("Root:    {}", plan.root);
    println!("Project: {}\n", plan.project);

    println!("| Source | Flattened | Role |");
    println!("|--------|-----------|------|");
    for file in &plan.files {
        println!("| {} | {} | {} |", file.source, file.flattened, file.role);
    }

    if !plan.warnings.is_empty() {
        println!("\n## Warnings\n");
        for warning in plan.warnings {
            println!("- {warning}");
        }
    }
}
