//! CLI commands for arxivate: prepare, plan, clean.

use std::path::{Path, PathBuf};

use crate::cleanup;
use crate::collector::{self, Collection};
use crate::config::Config;
use crate::error;
use crate::grammar;
use crate::plan;
use crate::rewriter;
use crate::state::ResolutionState;
use crate::stripper;
use crate::toolchain::Toolchain;
use crate::types::Warning;

/// Suffix appended to the root stem for the default output directory.
const DEFAULT_OUTPUT_SUFFIX: &str = "_submission";

/// Flags of the `prepare` command that override the project config.
pub struct PrepareOptions {
    /// Leave toolchain byproducts in place.
    pub keep_temp: bool,
    /// Skip the toolchain entirely.
    pub no_compile: bool,
    /// Output directory; defaults to `<stem>_submission`.
    pub output: Option<PathBuf>,
}

/// Remove byproducts from an already prepared directory.
///
/// # Errors
///
/// Returns `Error::Io` if the directory cannot be listed or cleaned.
pub fn clean(dir: &Path) -> Result<(), error::Error> {
    let report = cleanup::remove_byproducts(dir, &[])?;
    println!("Kept {} files, removed {} temporary files", report.kept, report.removed);
    return Ok(());
}

/// Default output directory for a root document: `<stem>_submission`.
fn default_output_dir(main: &Path) -> PathBuf {
    let stem = main
        .file_stem()
        .map_or_else(String::new, |s| return s.to_string_lossy().into_owned());
    return PathBuf::from(format!("{stem}{DEFAULT_OUTPUT_SUFFIX}"));
}

/// Refuse output directories that equal or contain the project, since
/// preparing one deletes it first. Returns the absolute output path.
///
/// # Errors
///
/// Returns `Error::OutputOverlapsProject` on overlap, or `Error::Io` if the
/// path cannot be made absolute.
fn ensure_output_is_separate(output: &Path, project: &Path) -> Result<PathBuf, error::Error> {
    let absolute = std::fs::canonicalize(output).or_else(|_err| return std::path::absolute(output))?;
    if project.starts_with(&absolute) {
        return Err(error::Error::OutputOverlapsProject {
            output: absolute,
            project: project.to_path_buf(),
        });
    }
    return Ok(absolute);
}

/// Log a warning and keep it for the summary.
fn log_warning(warnings: &mut Vec<Warning>, warning: Warning) {
    tracing::warn!("{warning}");
    warnings.push(warning);
}

/// Wrap an I/O failure on `path` as an output error.
fn output_write(path: &Path) -> impl FnOnce(std::io::Error) -> error::Error {
    let path = path.to_path_buf();
    return move |source| return error::Error::OutputWrite { path, source };
}

/// Collect dependencies and print the flattening plan without writing anything.
///
/// # Errors
///
/// Returns pre-flight, config, or JSON serialization errors.
pub fn plan(main: &Path, json: bool) -> Result<(), error::Error> {
    let root = preflight(main)?;
    let config = Config::load(project_dir(&root))?;
    let collection = collector::collect(&root, config.follow_include);
    return plan::print(&root, &collection, json);
}

/// Validate the root document and return its canonical path.
///
/// # Errors
///
/// Returns `Error::DocumentNotFound` if `main` is not an existing file,
/// `Error::NotADocument` if it is not `.tex`, or `Error::Io` if it cannot
/// be canonicalized.
pub fn preflight(main: &Path) -> Result<PathBuf, error::Error> {
    if !main.is_file() {
        return Err(error::Error::DocumentNotFound { path: main.to_path_buf() });
    }
    if !grammar::is_document(main) {
        return Err(error::Error::NotADocument { path: main.to_path_buf() });
    }
    return Ok(std::fs::canonicalize(main)?);
}

/// Run the whole pipeline: collect, copy, rewrite, compile, clean.
///
/// # Errors
///
/// Returns pre-flight and config errors, and any failure to write the
/// output directory. Everything else is reported as a warning.
pub fn prepare(main: &Path, options: &PrepareOptions) -> Result<(), error::Error> {
    let root = preflight(main)?;
    let project = project_dir(&root);
    let config = Config::load(project)?;
    let requested = options.output.clone().unwrap_or_else(|| return default_output_dir(main));
    let output_dir = ensure_output_is_separate(&requested, project)?;

    println!("Preparing arXiv submission from: {}", root.display());
    println!("Output directory: {}", output_dir.display());

    println!("\n[1/5] Collecting dependencies...");
    let Collection { state, mut warnings } = collector::collect(&root, config.follow_include);
    println!("      Found {} files", state.files().count());
    if let Some(inside) = state.files().find(|record| return record.original.starts_with(&output_dir)) {
        return Err(error::Error::OutputOverlapsProject {
            output: output_dir,
            project: inside.original.clone(),
        });
    }

    println!("\n[2/5] Creating output directory and copying files...");
    setup_output_dir(&output_dir, &state)?;

    println!("\n[3/5] Stripping comments and updating paths...");
    write_documents(&output_dir, &state, &mut warnings)?;

    println!("\n[4/5] Compiling document...");
    let root_name = state.get(&root).map(|record| return record.flattened.as_str());
    match root_name {
        Some(name) if config.compile && !options.no_compile => {
            warnings.extend(Toolchain::from_config(&config).compile(&output_dir, name));
        },
        _ => println!("      Skipped"),
    }

    println!("\n[5/5] Cleaning up temporary files...");
    if config.clean && !options.keep_temp {
        let report = cleanup::remove_byproducts(&output_dir, &config.extra_byproducts)?;
        println!("      Kept {} files, removed {} temporary files", report.kept, report.removed);
    } else {
        println!("      Skipped");
    }

    print_summary(&output_dir, &warnings);
    return Ok(());
}

/// Closing line, with the warning count when there were any. Each warning
/// was already logged when it was detected.
fn print_summary(output_dir: &Path, warnings: &[Warning]) {
    println!();
    if !warnings.is_empty() {
        println!("Finished with {} warning(s), see above", warnings.len());
    }
    println!("Done! arXiv submission ready at: {}", output_dir.display());
}

/// Directory holding the root document.
fn project_dir(root: &Path) -> &Path {
    return root.parent().unwrap_or_else(|| return Path::new("."));
}

/// Recreate the output directory and copy every non-document file into it
/// byte for byte under its flat name.
///
/// # Errors
///
/// Returns `Error::OutputWrite` if the directory cannot be recreated or a
/// file cannot be copied.
fn setup_output_dir(output_dir: &Path, state: &ResolutionState) -> Result<(), error::Error> {
    if output_dir.exists() {
        std::fs::remove_dir_all(output_dir).map_err(output_write(output_dir))?;
    }
    std::fs::create_dir_all(output_dir).map_err(output_write(output_dir))?;

    for record in state.files().filter(|record| return !record.is_document) {
        let dest = output_dir.join(&record.flattened);
        std::fs::copy(&record.original, &dest).map_err(output_write(&dest))?;
        println!("      Copied: {}", record.flattened);
    }
    return Ok(());
}

/// Strip and rewrite every document into the output directory.
///
/// # Errors
///
/// Returns `Error::OutputWrite` if a processed document cannot be written.
fn write_documents(
    output_dir: &Path,
    state: &ResolutionState,
    warnings: &mut Vec<Warning>,
) -> Result<(), error::Error> {
    for record in state.documents() {
        let content = match std::fs::read(&record.original) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                log_warning(
                    warnings,
                    Warning::UnreadableDocument { path: record.original.clone(), reason: e.to_string() },
                );
                continue;
            },
        };

        let stripped = stripper::strip_comments(&content);
        let rewritten = rewriter::rewrite_references(&stripped, &record.original, state, warnings);

        let dest = output_dir.join(&record.flattened);
        std::fs::write(&dest, rewritten).map_err(output_write(&dest))?;
        println!("      Processed: {}", record.flattened);
    }
    return Ok(());
}
