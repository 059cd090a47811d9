/// Core domain types shared by the collection, naming and rewriting phases.
use std::fmt;
use std::path::PathBuf;

use crate::grammar::ReferenceKind;

/// One discovered file. Created the first time its canonical path is seen
/// and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FileRecord {
    /// Unique name inside the output directory; never contains a separator.
    pub flattened: String,
    /// Whether the file is a `.tex` document (stripped and rewritten, not copied).
    pub is_document: bool,
    /// Canonical path of the source file.
    pub original: PathBuf,
}

/// A recoverable problem. Logged where it is detected, collected for the
/// closing summary, and never aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum Warning {
    /// A document reached through a sub-document reference is gone.
    MissingDocument {
        /// Canonical path that was expected.
        path: PathBuf,
    },
    /// A toolchain step exited non-zero.
    ToolFailed {
        /// Exit code, or `None` when killed by a signal.
        code: Option<i32>,
        /// Command that failed.
        tool: String,
    },
    /// A toolchain command is not on `PATH`.
    ToolUnavailable {
        /// Command that was looked up.
        tool: String,
    },
    /// A reference resolves on disk to a file that was never collected,
    /// because the document holding it was not walked.
    UncollectedReference {
        /// Document containing the reference.
        document: PathBuf,
        /// Construct that introduced it.
        kind: ReferenceKind,
        /// Canonical path the reference resolves to.
        path: PathBuf,
        /// Raw path argument as written.
        reference: String,
    },
    /// A document exists but could not be read.
    UnreadableDocument {
        /// Document path.
        path: PathBuf,
        /// I/O error text.
        reason: String,
    },
    /// No candidate file exists for a reference.
    UnresolvedReference {
        /// Document containing the reference.
        document: PathBuf,
        /// Construct that introduced it.
        kind: ReferenceKind,
        /// Raw path argument as written.
        reference: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Self::MissingDocument { path } => write!(f, "file not found: {}", path.display()),
            Self::ToolFailed { code: Some(code), tool } => write!(f, "{tool} returned {code}"),
            Self::ToolFailed { code: None, tool } => write!(f, "{tool} was terminated by a signal"),
            Self::ToolUnavailable { tool } => write!(f, "{tool} not found on PATH, skipping"),
            Self::UncollectedReference { document, kind, path, reference } => write!(
                f,
                "{}{{{reference}}} in {} names {}, which is not part of the submission",
                kind.command(),
                document.display(),
                path.display()
            ),
            Self::UnreadableDocument { path, reason } => {
                write!(f, "cannot read {}: {reason}", path.display())
            },
            Self::UnresolvedReference { document, kind, reference } => write!(
                f,
                "could not resolve {}{{{reference}}} in {}",
                kind.command(),
                document.display()
            ),
        };
    }
}
