//! Flat naming: map a project path to a separator-free file name.

use std::path::{Component, Path};

/// Build the undecorated flat name for `path`.
///
/// Inside `base_dir` the relative path's components are joined with `_`
/// (`figures/exp/plot.pdf` becomes `figures_exp_plot.pdf`). Outside it only
/// the file name survives.
pub fn flat_candidate(path: &Path, base_dir: &Path) -> String {
    let Ok(relative) = path.strip_prefix(base_dir) else {
        return bare_file_name(path);
    };
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => return Some(part.to_string_lossy().into_owned()),
            Component::CurDir | Component::ParentDir | Component::Prefix(_) | Component::RootDir => {
                return None;
            },
        })
        .collect();
    if parts.is_empty() {
        return bare_file_name(path);
    }
    return parts.join("_");
}

/// The last component, or an empty string for paths that have none.
fn bare_file_name(path: &Path) -> String {
    return path
        .file_name()
        .map(|name| return name.to_string_lossy().into_owned())
        .unwrap_or_default();
}

/// Make `candidate` unique against `is_taken`.
///
/// A free candidate is returned unchanged. Otherwise `_1`, `_2`, ... is
/// inserted before the extension (`plot.pdf` -> `plot_1.pdf`) until a free
/// name turns up. Deterministic for a given sequence of calls, so the first
/// path discovered keeps the plain name.
pub fn disambiguate(candidate: &str, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(candidate) {
        return candidate.to_string();
    }

    let as_path = Path::new(candidate);
    let stem = as_path
        .file_stem()
        .map_or_else(|| return candidate.to_string(), |s| return s.to_string_lossy().into_owned());
    let extension = as_path.extension().map(|e| return e.to_string_lossy().into_owned());

    let mut counter = 1_u64;
    loop {
        let decorated = match &extension {
            Some(ext) => format!("{stem}_{counter}.{ext}"),
            None => format!("{stem}_{counter}"),
        };
        if !is_taken(&decorated) {
            return decorated;
        }
        counter = counter.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn joins_relative_components() {
        let base = PathBuf::from("/project");
        assert_eq!(flat_candidate(Path::new("/project/main.tex"), &base), "main.tex");
        assert_eq!(
            flat_candidate(Path::new("/project/figures/exp/plot.pdf"), &base),
            "figures_exp_plot.pdf"
        );
    }

    #[test]
    fn outside_base_keeps_file_name() {
        let base = PathBuf::from("/project/paper");
        assert_eq!(flat_candidate(Path::new("/project/shared/logo.png"), &base), "logo.png");
    }

    #[test]
    fn free_candidate_is_unchanged() {
        assert_eq!(disambiguate("plot.pdf", |_| false), "plot.pdf");
    }

    #[test]
    fn counter_goes_before_extension() {
        let taken: HashSet<&str> = ["plot.pdf", "plot_1.pdf"].into_iter().collect();
        assert_eq!(disambiguate("plot.pdf", |n| taken.contains(n)), "plot_2.pdf");
    }

    #[test]
    fn extensionless_names_get_a_suffix() {
        let taken: HashSet<&str> = ["Makefile"].into_iter().collect();
        assert_eq!(disambiguate("Makefile", |n| taken.contains(n)), "Makefile_1");
    }

    #[test]
    fn only_last_extension_moves() {
        let taken: HashSet<&str> = ["data.tar.gz"].into_iter().collect();
        assert_eq!(disambiguate("data.tar.gz", |n| taken.contains(n)), "data.tar_1.gz");
    }
}
