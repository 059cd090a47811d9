use std::path::Path;

use crate::error::Error;

/// Name of the optional project file, looked up next to the root document.
pub const CONFIG_FILE: &str = ".arxivate.toml";

/// Project configuration loaded from `.arxivate.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Command run for the bibliography step.
    pub bibliography_tool: String,
    /// Delete toolchain byproducts after compiling.
    pub clean: bool,
    /// Run the typesetting toolchain at all.
    pub compile: bool,
    /// Typesetting command.
    pub engine: String,
    /// Byproduct suffixes removed in addition to the built-in list.
    pub extra_byproducts: Vec<String>,
    /// Walk into `\include`d documents as well as `\input`ed ones.
    pub follow_include: bool,
}

/// Raw TOML structure for `.arxivate.toml`. Every key is optional.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ArxivateTomlConfig {
    bibliography_tool: Option<String>,
    clean: Option<bool>,
    compile: Option<bool>,
    engine: Option<String>,
    #[serde(default)]
    extra_byproducts: Vec<String>,
    follow_include: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            bibliography_tool: "bibtex".to_string(),
            clean: true,
            compile: true,
            engine: "pdflatex".to_string(),
            extra_byproducts: Vec::new(),
            follow_include: true,
        };
    }
}

impl Config {
    /// Load config from `.arxivate.toml` in the project directory.
    /// Returns defaults if the file doesn't exist, and an error if it exists
    /// but is malformed. A config the user wrote is never silently ignored.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(project_dir: &Path) -> Result<Self, Error> {
        let path = project_dir.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
        };
        return Self::parse(&content);
    }

    /// Parse config text, filling unset keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: ArxivateTomlConfig = toml::from_str(content)?;
        let defaults = Self::default();
        return Ok(Self {
            bibliography_tool: raw.bibliography_tool.unwrap_or(defaults.bibliography_tool),
            clean: raw.clean.unwrap_or(defaults.clean),
            compile: raw.compile.unwrap_or(defaults.compile),
            engine: raw.engine.unwrap_or(defaults.engine),
            extra_byproducts: raw.extra_byproducts,
            follow_include: raw.follow_include.unwrap_or(defaults.follow_include),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::parse("engine = \"xelatex\"\nfollow_include = false\n").unwrap();
        assert_eq!(config.engine, "xelatex");
        assert!(!config.follow_include);
        assert_eq!(config.bibliography_tool, "bibtex");
        assert!(config.compile);
    }

    #[test]
    fn include_is_walked_by_default() {
        assert!(Config::default().follow_include);
        assert!(Config::parse("").unwrap().follow_include);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "compile = maybe").unwrap();
        assert!(matches!(Config::load(dir.path()), Err(Error::TomlDe(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse("enginee = \"lualatex\"").is_err());
    }
}
