//! Removal of toolchain byproducts from the output directory.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::Error;

/// Name suffixes of files the toolchain leaves behind.
pub const BYPRODUCT_SUFFIXES: [&str; 27] = [
    ".aux", ".log", ".out", ".blg", ".toc", ".lof", ".lot", ".fls", ".fdb_latexmk",
    ".synctex.gz", ".nav", ".snm", ".vrb", ".brf", ".idx", ".ilg", ".ind", ".glo", ".gls",
    ".glg", ".ist", ".acn", ".acr", ".alg", ".run.xml", "-blx.bib", ".bcf",
];

/// Counts reported after a cleanup pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Files left in place.
    pub kept: usize,
    /// Files deleted.
    pub removed: usize,
}

/// Whether a file name ends in a byproduct suffix, ignoring case.
fn is_byproduct(name: &str, extra: &[String]) -> bool {
    let lowered = name.to_lowercase();
    return BYPRODUCT_SUFFIXES.iter().any(|suffix| return lowered.ends_with(suffix))
        || extra.iter().any(|suffix| return lowered.ends_with(&suffix.to_lowercase()));
}

/// Delete every top-level file in `dir` whose name ends in a byproduct
/// suffix (built-in list plus `extra`). Subdirectories are not entered.
///
/// # Errors
///
/// Returns `Error::Io` if the directory cannot be listed or a file cannot
/// be removed.
pub fn remove_byproducts(dir: &Path, extra: &[String]) -> Result<CleanupReport, Error> {
    let mut report = CleanupReport::default();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if is_byproduct(&name, extra) {
            std::fs::remove_file(entry.path())?;
            tracing::debug!(file = %name, "removed");
            report.removed = report.removed.saturating_add(1);
        } else {
            report.kept = report.kept.saturating_add(1);
        }
    }

    return Ok(report);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_only_byproducts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["main.tex", "main.pdf", "main.AUX", "main.log", "main.synctex.gz", "refs-blx.bib", "refs.bib"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.aux")).unwrap();

        let report = remove_byproducts(dir.path(), &[]).unwrap();
        assert_eq!(report, CleanupReport { kept: 3, removed: 4 });
        assert!(dir.path().join("main.pdf").exists());
        assert!(dir.path().join("refs.bib").exists());
        assert!(!dir.path().join("main.AUX").exists());
        assert!(dir.path().join("nested.aux").is_dir());
    }

    #[test]
    fn extra_suffixes_are_honored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main.xdv"), "").unwrap();
        let report = remove_byproducts(dir.path(), &[".XDV".to_string()]).unwrap();
        assert_eq!(report.removed, 1);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(remove_byproducts(&dir.path().join("gone"), &[]).is_err());
    }
}
