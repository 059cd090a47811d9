//! Reference extraction: find every construct of a kind and yield its raw argument.

use crate::grammar::ReferenceKind;

/// Lazily yield the raw argument of every `kind` construct in `content`,
/// left to right. Bibliography lists come back unsplit; see [`split_list`].
pub fn extract<'t>(content: &'t str, kind: ReferenceKind) -> impl Iterator<Item = &'t str> + 't {
    return kind
        .pattern()
        .captures_iter(content)
        .filter_map(|cap| return cap.get(1))
        .map(|m| return m.as_str());
}

/// Turn one raw argument into the references it names. List kinds are
/// split on commas; every part is trimmed and empty parts are dropped.
pub fn references(kind: ReferenceKind, raw: &str) -> Vec<&str> {
    if kind.is_list() {
        return split_list(raw).collect();
    }
    return vec![raw.trim()];
}

/// Split a comma-separated argument into trimmed, non-empty entries.
pub fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    return raw.split(',').map(str::trim).filter(|part| return !part.is_empty());
}
