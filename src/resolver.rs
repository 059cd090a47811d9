use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Locate the file a raw reference names.
///
/// Each candidate suffix is appended to `base_dir/raw` in order (the empty
/// suffix uses the path as written) and the first regular file found wins,
/// returned canonicalized. Order is a priority list: when `fig.pdf` and
/// `fig.png` both exist, `\includegraphics{fig}` picks whichever suffix is
/// listed first. Returns `None` when nothing exists; that is the caller's
/// warning to emit, not an error.
pub fn resolve(base_dir: &Path, raw: &str, extensions: &[&str]) -> Option<PathBuf> {
    let stem = base_dir.join(raw);
    return extensions
        .iter()
        .map(|ext| return with_suffix(&stem, ext))
        .find(|candidate| return candidate.is_file())
        .and_then(|found| return std::fs::canonicalize(found).ok());
}

/// Append a raw suffix to the final component (`fig` + `.pdf`, `a.b` + `.tex`).
/// Unlike `Path::with_extension`, never replaces an existing extension.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    if suffix.is_empty() {
        return path.to_path_buf();
    }
    let mut joined = OsString::from(path.as_os_str());
    joined.push(suffix);
    return PathBuf::from(joined);
}
