use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use grammar::LexicalRules;
use serde::Deserialize;

use crate::error::{HostError, Result};

/// Host configuration, read from TOML. Every field has a default, so an
/// empty file is a valid configuration.
///
/// ```toml
/// [language_server]
/// enable = true
/// path = "/opt/npeg/bin/npeg-lsp"
///
/// [lexical]
/// line_comments = ["#"]
/// block_comments = [{ open = "#[", close = "]#" }]
///
/// [generate]
/// default_target = "nim"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    pub language_server: LanguageServerConfig,
    pub lexical: LexicalRules,
    pub generate: GenerateConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LanguageServerConfig {
    /// Only look for a server when enabled.
    pub enable: bool,
    /// Explicit server binary. Used as is, without checking it exists.
    pub path: Option<PathBuf>,
    /// Paths probed in order when `path` isn't set. Empty means the built in
    /// install locations.
    pub candidates: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    pub default_target: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        GenerateConfig {
            default_target: "nim".to_owned(),
        }
    }
}

impl HostConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| HostError::Io {
            path: path.to_owned(),
            source,
        })?;
        raw.parse()
    }
}

impl FromStr for HostConfig {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grammar::BlockComment;
    use std::io::Write;

    #[test]
    fn empty_config_is_default() {
        let config: HostConfig = "".parse().unwrap();
        assert_eq!(config, HostConfig::default());
        assert!(!config.language_server.enable);
        assert_eq!(config.generate.default_target, "nim");
        assert_eq!(config.lexical, LexicalRules::default());
    }

    #[test]
    fn full_config() {
        let config: HostConfig = r#"
            [language_server]
            enable = true
            candidates = ["/opt/bin/npeg-lsp"]

            [lexical]
            line_comments = ["//"]
            block_comments = [{ open = "/*", close = "*/" }]
            string_delimiters = ['"']

            [generate]
            default_target = "rust"
        "#
        .parse()
        .unwrap();

        assert!(config.language_server.enable);
        assert_eq!(config.language_server.path, None);
        assert_eq!(
            config.language_server.candidates,
            vec![PathBuf::from("/opt/bin/npeg-lsp")]
        );
        assert_eq!(config.lexical.line_comments, vec!["//"]);
        assert_eq!(
            config.lexical.block_comments,
            vec![BlockComment {
                open: "/*".to_owned(),
                close: "*/".to_owned()
            }]
        );
        assert_eq!(config.lexical.string_delimiters, vec!['"']);
        // Unset lexical fields keep their defaults.
        assert_eq!(config.lexical.escape, Some('\\'));
        assert_eq!(config.generate.default_target, "rust");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = "[language_server]\nenabled = true\n"
            .parse::<HostConfig>()
            .unwrap_err();
        assert!(matches!(err, HostError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[language_server]\npath = \"/x/npeg-lsp\"").unwrap();

        let config = HostConfig::load(file.path()).unwrap();
        assert_eq!(
            config.language_server.path,
            Some(PathBuf::from("/x/npeg-lsp"))
        );
    }

    #[test]
    fn load_missing_file() {
        let err = HostConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, HostError::Io { .. }));
    }
}
