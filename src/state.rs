//! Run-scoped resolution state: every discovered file, keyed by canonical path.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::namer;
use crate::types::FileRecord;

/// Built by the collector, then handed out by shared reference only.
/// Insertion order is discovery order, which makes naming reproducible.
#[derive(Debug)]
pub struct ResolutionState {
    /// Directory of the root document; references resolve against it.
    base_dir: PathBuf,
    /// Canonical path to record, in discovery order.
    files: IndexMap<PathBuf, FileRecord>,
    /// Documents already scanned for references.
    processed: HashSet<PathBuf>,
}

impl ResolutionState {
    /// Directory all references are resolved against.
    pub fn base_dir(&self) -> &Path {
        return &self.base_dir;
    }

    /// Records that are documents, in discovery order.
    pub fn documents(&self) -> impl Iterator<Item = &FileRecord> {
        return self.files.values().filter(|record| return record.is_document);
    }

    /// Every record, in discovery order.
    pub fn files(&self) -> impl Iterator<Item = &FileRecord> {
        return self.files.values();
    }

    /// Record for a canonical path, if it was discovered.
    pub fn get(&self, path: &Path) -> Option<&FileRecord> {
        return self.files.get(path);
    }

    /// Record the document as processed. Returns `false` if it already was.
    pub fn mark_processed(&mut self, document: &Path) -> bool {
        return self.processed.insert(document.to_path_buf());
    }

    /// Create an empty state for a project rooted at `base_dir`.
    pub fn new(base_dir: PathBuf) -> Self {
        return Self {
            base_dir,
            files: IndexMap::new(),
            processed: HashSet::new(),
        };
    }

    /// Register a file under a fresh flat name. A path that is already
    /// known keeps its first record; returns whether a record was created.
    pub fn register(&mut self, path: &Path, is_document: bool) -> bool {
        if self.files.contains_key(path) {
            return false;
        }
        let candidate = namer::flat_candidate(path, &self.base_dir);
        let flattened = namer::disambiguate(&candidate, |name| {
            return self.files.values().any(|record| return record.flattened == name);
        });
        tracing::debug!(path = %path.display(), %flattened, "registered");
        self.files.insert(
            path.to_path_buf(),
            FileRecord { flattened, is_document, original: path.to_path_buf() },
        );
        return true;
    }
}
