use crate::config::CONFIG_FILE;
use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where there is
/// one, how to fix it.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::DocumentNotFound { path } => format!("\
# Error: Document Not Found

`{}` does not exist.

## Fix

Pass the path of the project's main `.tex` file:

    arxivate prepare path/to/main.tex
", path.display()),

        Error::NotADocument { path } => format!("\
# Error: Not a LaTeX Document

`{}` is not a `.tex` file.

## Fix

Pass the main `.tex` file, not a generated or auxiliary file.
", path.display()),

        Error::OutputOverlapsProject { output, project } => render_output_overlap(output, project),

        Error::OutputWrite { path, source } => format!("\
# Error: Cannot Write Output

Writing `{}` failed: {source}
", path.display()),

        Error::TomlDe(e) => format!("\
# Error: Invalid {CONFIG_FILE}

{e}

## Fix

Correct or delete `{CONFIG_FILE}` next to the main document.
"),

        Error::Io(_) | Error::Json(_) => format!("\
# Error

{e}
"),
    }
}

fn render_output_overlap(output: &std::path::Path, project: &std::path::Path) -> String {
    format!("\
# Error: Output Overlaps Project

The output directory `{}` overlaps `{}`.
The output directory is deleted and recreated on every run, so it must be
separate from the sources it is built from.

## Fix

Choose another output directory:

    arxivate prepare main.tex --output ../main_submission
", output.display(), project.display())
}
