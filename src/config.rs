//! Configuration file for kdoc-prose.
//!
//! ```yaml
//! excluded_paths:
//!   - "**/build/**"
//!   - "**/generated/**"
//! include_empty: false
//! default_file_path: "<kotlin>"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::processor::DEFAULT_FILE_PATH;

/// Default config file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["kdoc-prose.yaml", ".kdoc-prose.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    /// Glob patterns for paths to skip when walking directories (e.g., "**/build/**")
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Whether to report files without any KDoc comment. Default: false
    #[serde(default)]
    pub include_empty: bool,
    /// Path reported for messages when the host gives none. Default: "<kotlin>"
    #[serde(default = "default_file_path")]
    pub default_file_path: String,
}

fn default_file_path() -> String {
    DEFAULT_FILE_PATH.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            excluded_paths: Vec::new(),
            include_empty: false,
            default_file_path: default_file_path(),
        }
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse a config from YAML text. An empty document yields the defaults.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Check if a path should be excluded based on excluded_paths patterns.
    /// Uses globset for matching, which supports `**` for recursive directory matching.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();

        for pattern in &self.excluded_paths {
            if let Ok(glob) = globset::Glob::new(pattern) {
                let matcher = glob.compile_matcher();
                if matcher.is_match(&*path_str) {
                    return true;
                }
            }
        }
        false
    }
}

/// Discover a config file in `dir`. Returns `None` when there is none.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Validate a config for common errors.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    for pattern in &config.excluded_paths {
        if let Err(e) = globset::Glob::new(pattern) {
            anyhow::bail!("excluded_paths: invalid glob {:?}: {}", pattern, e);
        }
    }

    if config.default_file_path.trim().is_empty() {
        anyhow::bail!("default_file_path must not be empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
excluded_paths:
  - "**/build/**"
include_empty: true
default_file_path: "<stdin>"
"#;
        let config = Config::parse_str(yaml).unwrap();

        assert_eq!(config.excluded_paths, vec!["**/build/**".to_string()]);
        assert!(config.include_empty);
        assert_eq!(config.default_file_path, "<stdin>");
    }

    #[test]
    fn test_parse_defaults() {
        let config = Config::parse_str("include_empty: false\n").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_file_path, "<kotlin>");

        assert_eq!(Config::parse_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_rejects_unknown_types() {
        assert!(Config::parse_str("include_empty: [1, 2]\n").is_err());
    }

    #[test]
    fn test_excluded_paths() {
        let config = Config {
            excluded_paths: vec!["**/build/**".to_string(), "**/*Test.kt".to_string()],
            ..Config::default()
        };

        assert!(config.is_path_excluded(Path::new("app/build/gen/Foo.kt")));
        assert!(config.is_path_excluded(Path::new("src/FooTest.kt")));
        assert!(!config.is_path_excluded(Path::new("src/Foo.kt")));
    }

    #[test]
    fn test_validate() {
        assert!(validate(&Config::default()).is_ok());

        let bad_glob = Config {
            excluded_paths: vec!["[unclosed".to_string()],
            ..Config::default()
        };
        assert!(validate(&bad_glob).is_err());

        let empty_path = Config {
            default_file_path: " ".to_string(),
            ..Config::default()
        };
        assert!(validate(&empty_path).is_err());
    }

    #[test]
    fn test_discover() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(discover(dir.path()), None);

        let path = dir.path().join(".kdoc-prose.yaml");
        fs::write(&path, "include_empty: true\n").unwrap();
        assert_eq!(discover(dir.path()), Some(path.clone()));

        let config = Config::parse_file(&path).unwrap();
        assert!(config.include_empty);
    }
}
