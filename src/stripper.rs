//! Comment removal for LaTeX sources.

/// Character that starts a line comment.
const COMMENT_MARKER: char = '%';

/// Character that turns a following marker into literal content.
const ESCAPE: char = '\\';

/// Remove every `%` comment, keeping escaped `\%` verbatim.
///
/// Lines are trimmed on the right afterwards. Comment-only and blank lines
/// stay behind as empty lines, since blank lines end paragraphs in LaTeX.
pub fn strip_comments(content: &str) -> String {
    return content.split('\n').map(strip_line).collect::<Vec<_>>().join("\n");
}

/// Byte offset of the first unescaped marker on a line.
fn comment_start(line: &str) -> Option<usize> {
    let mut previous = None;
    for (offset, c) in line.char_indices() {
        if c == COMMENT_MARKER && previous != Some(ESCAPE) {
            return Some(offset);
        }
        previous = Some(c);
    }
    return None;
}

/// Cut one line at its comment and drop trailing whitespace.
fn strip_line(line: &str) -> &str {
    let kept = match comment_start(line) {
        Some(offset) => line.get(..offset).unwrap_or(line),
        None => line,
    };
    return kept.trim_end();
}
