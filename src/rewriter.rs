//! Reference rewriting: point every construct at the flattened file name.

use std::path::Path;

use regex::Captures;

use crate::grammar::ReferenceKind;
use crate::resolver;
use crate::scanner;
use crate::state::ResolutionState;
use crate::types::Warning;

/// What one reference points at once collection is over.
enum Target {
    /// A discovered file, with the name to write in its place.
    Flat(String),
    /// A file on disk that collection never reached.
    Uncollected,
    /// Nothing on disk. Collection already warned.
    Unresolved,
}

/// The document being rewritten and the warnings it produces.
struct Rewrite<'a> {
    /// Document the text came from, for warnings.
    document: &'a Path,
    /// Completed collection.
    state: &'a ResolutionState,
    /// Sink for uncollected references.
    warnings: &'a mut Vec<Warning>,
}

impl Rewrite<'_> {
    /// Rebuild one match with a new argument, leaving the command, options
    /// and braces exactly as written.
    fn rewrite_match(&mut self, caps: &Captures<'_>, kind: ReferenceKind) -> String {
        let Some(whole) = caps.get(0) else {
            return String::new();
        };
        let Some(argument) = caps.get(1) else {
            return whole.as_str().to_string();
        };

        let replacement = if kind.is_list() {
            let mut any_flat = false;
            let mut parts = Vec::new();
            for part in scanner::split_list(argument.as_str()) {
                match self.target(part, kind) {
                    Target::Flat(flat) => {
                        any_flat = true;
                        parts.push(flat);
                    },
                    Target::Uncollected | Target::Unresolved => parts.push(part.to_string()),
                }
            }
            if !any_flat {
                return whole.as_str().to_string();
            }
            parts.join(", ")
        } else {
            match self.target(argument.as_str().trim(), kind) {
                Target::Flat(flat) => flat,
                Target::Uncollected | Target::Unresolved => return whole.as_str().to_string(),
            }
        };

        let head_len = argument.start().saturating_sub(whole.start());
        let tail_start = argument.end().saturating_sub(whole.start());
        let head = whole.as_str().get(..head_len).unwrap_or_default();
        let tail = whole.as_str().get(tail_start..).unwrap_or_default();
        return format!("{head}{replacement}{tail}");
    }

    /// Look up one reference, warning when it names a file that exists but
    /// was not collected.
    fn target(&mut self, reference: &str, kind: ReferenceKind) -> Target {
        let Some(resolved) = resolver::resolve(self.state.base_dir(), reference, kind.extensions()) else {
            tracing::debug!(reference, "left unchanged");
            return Target::Unresolved;
        };
        let Some(record) = self.state.get(&resolved) else {
            let warning = Warning::UncollectedReference {
                document: self.document.to_path_buf(),
                kind,
                path: resolved,
                reference: reference.to_string(),
            };
            tracing::warn!("{warning}");
            self.warnings.push(warning);
            return Target::Uncollected;
        };

        if !kind.omits_extension(&resolved) {
            return Target::Flat(record.flattened.clone());
        }
        return Path::new(&record.flattened)
            .file_stem()
            .map_or(Target::Unresolved, |stem| return Target::Flat(stem.to_string_lossy().into_owned()));
    }
}

/// Replace the path argument of every reference construct in `document`
/// with its flattened name.
///
/// Extensions are dropped for `.tex`, `.bib` and `.bst` targets of
/// constructs that add them back. Each entry of a bibliography list is
/// flattened on its own and the list is rejoined with `", "`. A reference
/// that does not resolve to a discovered file is left exactly as written.
/// If it names an existing file that collection skipped, a
/// `Warning::UncollectedReference` is pushed onto `warnings`; references
/// that resolve to nothing were already reported by collection.
pub fn rewrite_references(
    content: &str,
    document: &Path,
    state: &ResolutionState,
    warnings: &mut Vec<Warning>,
) -> String {
    let mut rewrite = Rewrite { document, state, warnings };
    let mut text = content.to_string();
    for kind in ReferenceKind::ALL {
        text = kind
            .pattern()
            .replace_all(&text, |caps: &Captures<'_>| return rewrite.rewrite_match(caps, kind))
            .into_owned();
    }
    return text;
}
