/// Crate-level error types for arxivate diagnostics.
use std::path::PathBuf;

/// Fatal failures only. Everything the pipeline can recover from is a
/// [`crate::types::Warning`] instead. Each variant names the file or reason
/// for failure so the diagnostic is useful without a debugger.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The root document given on the command line does not exist.
    #[error("document not found: {}", path.display())]
    DocumentNotFound {
        /// Path as given by the user.
        path: PathBuf,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization of the plan failed.
    #[error("json: {0}")]
    Json(
        /// The wrapped serde_json error.
        #[from]
        serde_json::Error,
    ),

    /// The root document does not carry the `.tex` extension.
    #[error("not a .tex document: {}", path.display())]
    NotADocument {
        /// Path as given by the user.
        path: PathBuf,
    },

    /// The output directory would swallow the project it is built from.
    /// Preparing it wipes the directory first, so this is refused up front.
    #[error("output directory {} overlaps project {}", output.display(), project.display())]
    OutputOverlapsProject {
        /// Requested output directory.
        output: PathBuf,
        /// Directory containing the root document.
        project: PathBuf,
    },

    /// A file could not be written into the output directory.
    #[error("cannot write {}: {source}", path.display())]
    OutputWrite {
        /// Destination that failed.
        path: PathBuf,
        /// The wrapped I/O error.
        source: std::io::Error,
    },

    /// TOML deserialization of `.arxivate.toml` failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}
