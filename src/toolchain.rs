//! External typesetting: engine, bibliography, engine, engine.

use std::path::Path;
use std::process::Command;

use crate::config::Config;
use crate::types::Warning;

/// One command in the compile sequence.
struct Step {
    /// Arguments after the program name.
    args: Vec<String>,
    /// Program to run.
    program: String,
    /// Non-zero exit is expected and ignored (bibtex without citations).
    tolerate_failure: bool,
}

/// Commands used to build the flattened document.
pub struct Toolchain {
    /// Bibliography processor, run on the root stem.
    bibliography_tool: String,
    /// Typesetting engine, run on the root file name.
    engine: String,
}

impl Toolchain {
    /// Run the full sequence in `output_dir` against `root_name`.
    ///
    /// Never fails: a missing engine skips compilation, a missing
    /// bibliography tool skips that step, and non-zero engine exits are
    /// warnings. All of them come back in the returned list.
    pub fn compile(&self, output_dir: &Path, root_name: &str) -> Vec<Warning> {
        let mut warnings = Vec::new();

        if which::which(&self.engine).is_err() {
            push_warning(&mut warnings, Warning::ToolUnavailable { tool: self.engine.clone() });
            return warnings;
        }
        let bibliography_available = which::which(&self.bibliography_tool).is_ok();
        if !bibliography_available {
            push_warning(
                &mut warnings,
                Warning::ToolUnavailable { tool: self.bibliography_tool.clone() },
            );
        }

        for step in self.steps(root_name) {
            if step.tolerate_failure && !bibliography_available {
                continue;
            }
            run_step(&step, output_dir, &mut warnings);
        }
        return warnings;
    }

    /// Build the toolchain described by the project config.
    pub fn from_config(config: &Config) -> Self {
        return Self {
            bibliography_tool: config.bibliography_tool.clone(),
            engine: config.engine.clone(),
        };
    }

    /// The fixed sequence: typeset, bibliography, typeset, typeset.
    fn steps(&self, root_name: &str) -> Vec<Step> {
        let stem = Path::new(root_name)
            .file_stem()
            .map_or_else(|| return root_name.to_string(), |s| return s.to_string_lossy().into_owned());
        let typeset = || {
            return Step {
                args: vec!["-interaction=nonstopmode".to_string(), root_name.to_string()],
                program: self.engine.clone(),
                tolerate_failure: false,
            };
        };
        return vec![
            typeset(),
            Step {
                args: vec![stem],
                program: self.bibliography_tool.clone(),
                tolerate_failure: true,
            },
            typeset(),
            typeset(),
        ];
    }
}

/// Log a warning and keep it.
fn push_warning(warnings: &mut Vec<Warning>, warning: Warning) {
    tracing::warn!("{warning}");
    warnings.push(warning);
}

/// Run one step with captured output.
fn run_step(step: &Step, output_dir: &Path, warnings: &mut Vec<Warning>) {
    println!("      Running: {} {}", step.program, step.args.join(" "));
    let result = Command::new(&step.program)
        .args(&step.args)
        .current_dir(output_dir)
        .output();

    match result {
        Err(e) => {
            tracing::debug!(program = %step.program, error = %e, "spawn failed");
            push_warning(warnings, Warning::ToolUnavailable { tool: step.program.clone() });
        },
        Ok(output) if output.status.success() => {},
        Ok(output) if step.tolerate_failure => {
            tracing::debug!(program = %step.program, status = %output.status, "ignored failure");
        },
        Ok(output) => {
            push_warning(
                warnings,
                Warning::ToolFailed { code: output.status.code(), tool: step.program.clone() },
            );
        },
    }
}
