//! LaTeX reference-introducing constructs: one pattern and one extension list per kind.
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Extension of files that are themselves scanned and rewritten.
pub const DOCUMENT_EXTENSION: &str = "tex";

/// Extensions dropped from rewritten arguments. `\input`, `\include`,
/// `\bibliography` and `\bibliographystyle` conventionally omit them.
const STRIPPED_EXTENSIONS: [&str; 3] = ["bib", "bst", "tex"];

/// `\bibliography{refs, more}`; the argument may list several files.
static BIBLIOGRAPHY: LazyLock<Regex> = LazyLock::new(|| return compile(r"\\bibliography\s*\{([^}]+)\}"));

/// `\bibliographystyle{style}`.
static BIBLIOGRAPHY_STYLE: LazyLock<Regex> =
    LazyLock::new(|| return compile(r"\\bibliographystyle\s*\{([^}]+)\}"));

/// `\includegraphics[opts]{figure}`.
static GRAPHICS: LazyLock<Regex> =
    LazyLock::new(|| return compile(r"\\includegraphics\s*(?:\[[^\]]*\])?\s*\{([^}]+)\}"));

/// `\include{chapter}`.
static INCLUDE: LazyLock<Regex> = LazyLock::new(|| return compile(r"\\include\s*\{([^}]+)\}"));

/// `\input{section}`.
static INPUT: LazyLock<Regex> = LazyLock::new(|| return compile(r"\\input\s*\{([^}]+)\}"));

/// `\lstinputlisting[opts]{code.py}`.
static LISTING: LazyLock<Regex> =
    LazyLock::new(|| return compile(r"\\lstinputlisting\s*(?:\[[^\]]*\])?\s*\{([^}]+)\}"));

/// A construct that names another file. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// `\bibliography`: comma-separated list of `.bib` files.
    Bibliography,
    /// `\bibliographystyle`: a single `.bst` file.
    BibliographyStyle,
    /// `\includegraphics`: an image.
    Graphics,
    /// `\include`: a sub-document, walked unless `follow_include` is off.
    Include,
    /// `\input`: a sub-document that is walked recursively.
    Input,
    /// `\lstinputlisting`: a verbatim source listing.
    Listing,
}

impl ReferenceKind {
    /// Every kind, in discovery order. Discovery order decides which file
    /// keeps an undecorated flat name, so it must stay stable.
    pub const ALL: [Self; 6] = [
        Self::Input,
        Self::Include,
        Self::Graphics,
        Self::Bibliography,
        Self::BibliographyStyle,
        Self::Listing,
    ];

    /// The LaTeX command, for messages.
    pub const fn command(self) -> &'static str {
        return match self {
            Self::Bibliography => r"\bibliography",
            Self::BibliographyStyle => r"\bibliographystyle",
            Self::Graphics => r"\includegraphics",
            Self::Include => r"\include",
            Self::Input => r"\input",
            Self::Listing => r"\lstinputlisting",
        };
    }

    /// Candidate suffixes tried in order. The empty suffix means the
    /// argument is already a complete file name.
    pub const fn extensions(self) -> &'static [&'static str] {
        return match self {
            Self::Bibliography => &[".bib"],
            Self::BibliographyStyle => &[".bst"],
            Self::Graphics => &[".pdf", ".png", ".jpg", ".jpeg", ".eps", ".gif", ""],
            Self::Include => &[".tex"],
            Self::Input => &[".tex", ""],
            Self::Listing => &[""],
        };
    }

    /// Whether one match carries a comma-separated list of references.
    pub const fn is_list(self) -> bool {
        return matches!(self, Self::Bibliography);
    }

    /// Whether the flat name written for `path` drops its extension.
    ///
    /// Only `.tex`, `.bib` and `.bst` are dropped, and only by constructs
    /// that add the extension back when resolving. `\lstinputlisting` takes
    /// its argument verbatim, so a listed `snippet.tex` keeps its extension.
    pub fn omits_extension(self, path: &Path) -> bool {
        if !has_extension_in(path, &STRIPPED_EXTENSIONS) {
            return false;
        }
        let added: Vec<&str> = self
            .extensions()
            .iter()
            .filter_map(|suffix| return suffix.strip_prefix('.'))
            .collect();
        return has_extension_in(path, &added);
    }

    /// Pattern whose first capture group is the raw path argument.
    pub fn pattern(self) -> &'static Regex {
        return match self {
            Self::Bibliography => &BIBLIOGRAPHY,
            Self::BibliographyStyle => &BIBLIOGRAPHY_STYLE,
            Self::Graphics => &GRAPHICS,
            Self::Include => &INCLUDE,
            Self::Input => &INPUT,
            Self::Listing => &LISTING,
        };
    }

    /// Whether the collector descends into documents reached through this
    /// kind. `\include` is walked unless `follow_include` is turned off.
    pub const fn walks_into(self, follow_include: bool) -> bool {
        return match self {
            Self::Input => true,
            Self::Include => follow_include,
            Self::Bibliography
            | Self::BibliographyStyle
            | Self::Graphics
            | Self::Listing => false,
        };
    }
}

/// Compile one of the literal patterns above.
#[allow(clippy::expect_used, reason = "patterns are string literals covered by tests")]
fn compile(pattern: &str) -> Regex {
    return Regex::new(pattern).expect("valid reference pattern");
}

/// Case-insensitive extension membership test.
fn has_extension_in(path: &Path, extensions: &[&str]) -> bool {
    let Some(ext) = path.extension().and_then(|e| return e.to_str()) else {
        return false;
    };
    return extensions.iter().any(|candidate| return ext.eq_ignore_ascii_case(candidate));
}

/// Whether `path` names a document (`.tex`, any case).
pub fn is_document(path: &Path) -> bool {
    return has_extension_in(path, &[DOCUMENT_EXTENSION]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_compiles_with_one_group() {
        for kind in ReferenceKind::ALL {
            assert_eq!(kind.pattern().captures_len(), 2, "{}", kind.command());
        }
    }

    #[test]
    fn include_does_not_match_includegraphics() {
        let text = r"\includegraphics{fig} \include{chap}";
        let args: Vec<&str> = ReferenceKind::Include
            .pattern()
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .collect();
        assert_eq!(args, vec!["chap"]);
    }

    #[test]
    fn bibliography_does_not_match_style() {
        let text = r"\bibliographystyle{plain}";
        assert!(!ReferenceKind::Bibliography.pattern().is_match(text));
        assert!(ReferenceKind::BibliographyStyle.pattern().is_match(text));
    }

    #[test]
    fn document_detection_ignores_case() {
        assert!(is_document(Path::new("/p/Main.TEX")));
        assert!(!is_document(Path::new("/p/refs.bib")));
        assert!(!is_document(Path::new("/p/README")));
    }

    #[test]
    fn include_walk_follows_the_flag() {
        assert!(ReferenceKind::Input.walks_into(false));
        assert!(!ReferenceKind::Include.walks_into(false));
        assert!(ReferenceKind::Include.walks_into(true));
        assert!(!ReferenceKind::Listing.walks_into(true));
    }

    #[test]
    fn stripped_extensions() {
        assert!(ReferenceKind::Bibliography.omits_extension(Path::new("a/refs.bib")));
        assert!(ReferenceKind::BibliographyStyle.omits_extension(Path::new("plain.BST")));
        assert!(ReferenceKind::Input.omits_extension(Path::new("sec/intro.tex")));
        assert!(!ReferenceKind::Graphics.omits_extension(Path::new("fig.pdf")));
    }

    #[test]
    fn listings_keep_every_extension() {
        assert!(!ReferenceKind::Listing.omits_extension(Path::new("snippet.tex")));
        assert!(!ReferenceKind::Listing.omits_extension(Path::new("style.bst")));
        assert!(!ReferenceKind::Input.omits_extension(Path::new("refs.bib")));
    }
}
