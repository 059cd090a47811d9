//! Dependency collection: a depth-first walk from the root document.

use std::path::{Path, PathBuf};

use crate::grammar::{self, ReferenceKind};
use crate::resolver;
use crate::scanner;
use crate::state::ResolutionState;
use crate::types::Warning;

/// Result of a collection pass. The state is complete and will not change.
#[derive(Debug)]
pub struct Collection {
    /// Every file reachable from the root document.
    pub state: ResolutionState,
    /// Recoverable problems met along the way, in detection order.
    pub warnings: Vec<Warning>,
}

/// Walk state for one collection pass.
struct Collector {
    /// Descend into `\include`d documents as well as `\input`.
    follow_include: bool,
    /// State being built.
    state: ResolutionState,
    /// Warnings emitted so far.
    warnings: Vec<Warning>,
}

impl Collector {
    /// Resolve one reference, register it, and descend when the kind allows.
    fn follow(&mut self, from: &Path, kind: ReferenceKind, reference: &str) {
        let Some(resolved) = resolver::resolve(self.state.base_dir(), reference, kind.extensions()) else {
            self.warn(Warning::UnresolvedReference {
                document: from.to_path_buf(),
                kind,
                reference: reference.to_string(),
            });
            return;
        };

        let is_document = grammar::is_document(&resolved);
        self.state.register(&resolved, is_document);

        if is_document && kind.walks_into(self.follow_include) {
            self.visit(&resolved);
        }
    }

    /// Scan one document. Each document is read at most once, which also
    /// ends the walk on cyclic references.
    fn visit(&mut self, document: &Path) {
        if !self.state.mark_processed(document) {
            return;
        }
        if !document.is_file() {
            self.warn(Warning::MissingDocument { path: document.to_path_buf() });
            return;
        }

        self.state.register(document, true);
        let content = match std::fs::read(document) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                self.warn(Warning::UnreadableDocument {
                    path: document.to_path_buf(),
                    reason: e.to_string(),
                });
                return;
            },
        };

        for kind in ReferenceKind::ALL {
            for raw in scanner::extract(&content, kind) {
                for reference in scanner::references(kind, raw) {
                    self.follow(document, kind, reference);
                }
            }
        }
    }

    /// Log a warning and keep it for the summary.
    fn warn(&mut self, warning: Warning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }
}

/// Collect every file transitively referenced from `root`.
///
/// `root` should be canonical; the project base is its parent directory.
/// Unresolvable references and missing sub-documents become warnings and
/// the walk continues with whatever else it can reach.
pub fn collect(root: &Path, follow_include: bool) -> Collection {
    let root = std::fs::canonicalize(root).unwrap_or_else(|_err| return root.to_path_buf());
    let base_dir = root.parent().map_or_else(PathBuf::new, Path::to_path_buf);

    let mut collector = Collector {
        follow_include,
        state: ResolutionState::new(base_dir),
        warnings: Vec::new(),
    };
    collector.visit(&root);

    return Collection { state: collector.state, warnings: collector.warnings };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(files: &[(&str, &str)]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let base = std::fs::canonicalize(dir.path()).unwrap();
        for (rel, content) in files {
            let path = base.join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }
        (dir, base)
    }

    fn names(collection: &Collection) -> Vec<&str> {
        collection.state.files().map(|r| r.flattened.as_str()).collect()
    }

    #[test]
    fn walks_nested_inputs() {
        let (_dir, base) = project(&[
            ("main.tex", r"\input{sections/intro}"),
            ("sections/intro.tex", r"\input{sections/detail} \includegraphics{figs/a}"),
            ("sections/detail.tex", "plain"),
            ("figs/a.png", "png"),
        ]);

        let collection = collect(&base.join("main.tex"), false);
        assert_eq!(
            names(&collection),
            vec!["main.tex", "sections_intro.tex", "sections_detail.tex", "figs_a.png"]
        );
        assert!(collection.warnings.is_empty());
    }

    #[test]
    fn cycles_terminate() {
        let (_dir, base) = project(&[
            ("main.tex", r"\input{a}"),
            ("a.tex", r"\input{b}"),
            ("b.tex", r"\input{main} \input{a}"),
        ]);

        let collection = collect(&base.join("main.tex"), false);
        assert_eq!(names(&collection), vec!["main.tex", "a.tex", "b.tex"]);
        assert!(collection.warnings.is_empty());
    }

    #[test]
    fn shared_subdocument_is_registered_once() {
        let (_dir, base) = project(&[
            ("main.tex", r"\input{a} \input{b}"),
            ("a.tex", r"\input{common}"),
            ("b.tex", r"\input{common}"),
            ("common.tex", r"\includegraphics{logo.pdf}"),
            ("logo.pdf", "pdf"),
        ]);

        let collection = collect(&base.join("main.tex"), false);
        assert_eq!(
            names(&collection),
            vec!["main.tex", "a.tex", "common.tex", "logo.pdf", "b.tex"]
        );
    }

    #[test]
    fn include_is_registered_but_not_walked() {
        let (_dir, base) = project(&[
            ("main.tex", r"\include{chapter}"),
            ("chapter.tex", r"\includegraphics{inner.png}"),
            ("inner.png", "png"),
        ]);

        let collection = collect(&base.join("main.tex"), false);
        assert_eq!(names(&collection), vec!["main.tex", "chapter.tex"]);
        assert!(collection.state.get(&base.join("chapter.tex")).unwrap().is_document);
    }

    #[test]
    fn follow_include_walks_chapters() {
        let (_dir, base) = project(&[
            ("main.tex", r"\include{chapter}"),
            ("chapter.tex", r"\includegraphics{inner.png}"),
            ("inner.png", "png"),
        ]);

        let collection = collect(&base.join("main.tex"), true);
        assert_eq!(names(&collection), vec!["main.tex", "chapter.tex", "inner.png"]);
    }

    #[test]
    fn bibliography_lists_resolve_each_entry() {
        let (_dir, base) = project(&[
            ("main.tex", r"\bibliography{refs1, bib/refs2}\bibliographystyle{style}"),
            ("refs1.bib", ""),
            ("bib/refs2.bib", ""),
            ("style.bst", ""),
        ]);

        let collection = collect(&base.join("main.tex"), false);
        assert_eq!(
            names(&collection),
            vec!["main.tex", "refs1.bib", "bib_refs2.bib", "style.bst"]
        );
    }

    #[test]
    fn unresolved_reference_warns_once_and_continues() {
        let (_dir, base) = project(&[
            ("main.tex", r"\includegraphics{missing} \includegraphics{present}"),
            ("present.pdf", "pdf"),
        ]);

        let collection = collect(&base.join("main.tex"), false);
        assert_eq!(names(&collection), vec!["main.tex", "present.pdf"]);
        assert_eq!(
            collection.warnings,
            vec![Warning::UnresolvedReference {
                document: base.join("main.tex"),
                kind: ReferenceKind::Graphics,
                reference: "missing".to_string(),
            }]
        );
    }

    #[test]
    fn listing_of_a_tex_file_is_a_document_but_not_walked() {
        let (_dir, base) = project(&[
            ("main.tex", r"\lstinputlisting{snippet.tex}"),
            ("snippet.tex", r"\input{never}"),
        ]);

        let collection = collect(&base.join("main.tex"), false);
        assert_eq!(names(&collection), vec!["main.tex", "snippet.tex"]);
        assert!(collection.warnings.is_empty());
    }

    #[test]
    fn colliding_flat_names_are_disambiguated() {
        let (_dir, base) = project(&[
            ("main.tex", r"\includegraphics{fig_plot.pdf} \includegraphics{fig/plot.pdf}"),
            ("fig_plot.pdf", "a"),
            ("fig/plot.pdf", "b"),
        ]);

        let collection = collect(&base.join("main.tex"), false);
        assert_eq!(names(&collection), vec!["main.tex", "fig_plot.pdf", "fig_plot_1.pdf"]);
    }

    #[test]
    fn files_outside_the_project_keep_their_basename() {
        let (_dir, base) = project(&[
            ("paper/main.tex", r"\includegraphics{../a/logo.png} \includegraphics{../b/logo.png}"),
            ("a/logo.png", "a"),
            ("b/logo.png", "b"),
        ]);

        let collection = collect(&base.join("paper/main.tex"), false);
        assert_eq!(names(&collection), vec!["main.tex", "logo.png", "logo_1.png"]);
        assert_eq!(
            collection.state.get(&base.join("b/logo.png")).unwrap().flattened,
            "logo_1.png"
        );
    }

    #[test]
    fn missing_root_is_a_warning() {
        let (_dir, base) = project(&[]);
        let collection = collect(&base.join("main.tex"), false);
        assert_eq!(names(&collection), Vec::<&str>::new());
        assert!(matches!(collection.warnings.as_slice(), [Warning::MissingDocument { .. }]));
    }
}
