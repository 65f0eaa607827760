use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_FRONT_PAGE: &str = "FrontPage";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Server settings. Every field may be omitted from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory holding one `<title>.txt` file per page
    pub data_dir: PathBuf,
    /// Directory holding `view.html` and `edit.html`
    pub templates_dir: PathBuf,
    /// Page the root path redirects to
    pub front_page: String,
    /// Emit page text outside of links without HTML-escaping it
    pub raw_html: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("data"),
            templates_dir: PathBuf::from("tmpl"),
            front_page: DEFAULT_FRONT_PAGE.to_string(),
            raw_html: false,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.data_dir = Self::expand_path(&config.data_dir);
        config.templates_dir = Self::expand_path(&config.templates_dir);

        Ok(Some(config))
    }

    /// Load `flatwiki.toml` from `base`; `Ok(None)` when there is no file.
    pub fn load(base: &Path) -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path(base))
    }

    /// The config file sits in the working directory, next to `data/`.
    pub fn config_path(base: &Path) -> PathBuf {
        base.join("flatwiki.toml")
    }

    /// Anchor relative directories to `base`, normally the working directory
    /// captured once at startup.
    pub fn resolve_dirs(mut self, base: &Path) -> Self {
        if self.data_dir.is_relative() {
            self.data_dir = base.join(&self.data_dir);
        }
        if self.templates_dir.is_relative() {
            self.templates_dir = base.join(&self.templates_dir);
        }
        self
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Only a leading `~` is expanded; `$VAR` is kept literally.
    fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        PathBuf::from(shellexpand::tilde(&path_str).as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.templates_dir, PathBuf::from("tmpl"));
        assert_eq!(config.front_page, "FrontPage");
        assert!(!config.raw_html);
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            port: 9000,
            data_dir: PathBuf::from("/tmp/wiki-data"),
            ..Config::default()
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("port = 3000\n").unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.front_page, DEFAULT_FRONT_PAGE);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/wiki/data");
        let expanded = Config::expand_path(&path);

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("wiki/data"));
    }

    #[test]
    fn test_expand_path_keeps_env_vars_literal() {
        let path = PathBuf::from("$FLATWIKI_DATA/pages");

        assert_eq!(Config::expand_path(&path), path);
    }

    #[test]
    fn test_tilde_in_file_is_expanded_on_load() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            Config::config_path(temp_dir.path()),
            "data_dir = \"~/pages\"\ntemplates_dir = \"${HOME}/tmpl\"\n",
        )
        .unwrap();

        let config = Config::load(temp_dir.path()).unwrap().unwrap();

        assert!(!config.data_dir.starts_with("~"));
        assert!(config.data_dir.ends_with("pages"));
        assert_eq!(config.templates_dir, PathBuf::from("${HOME}/tmpl"));
    }

    #[test]
    fn test_resolve_dirs_anchors_relative_paths() {
        let config = Config {
            templates_dir: PathBuf::from("/opt/tmpl"),
            ..Config::default()
        }
        .resolve_dirs(Path::new("/work"));

        assert_eq!(config.data_dir, PathBuf::from("/work/data"));
        assert_eq!(config.templates_dir, PathBuf::from("/opt/tmpl"));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nonexistent.toml");

        assert!(Config::load_from_path(&missing).unwrap().is_none());
    }

    #[test]
    fn test_load_config_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("flatwiki.toml");
        std::fs::write(&config_file, "port = \"not a number\"").unwrap();

        let result = Config::load_from_path(&config_file);
        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_load_from_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let test_config = Config {
            host: "0.0.0.0".to_string(),
            front_page: "Home".to_string(),
            raw_html: true,
            ..Config::default()
        };
        std::fs::write(
            temp_dir.path().join("flatwiki.toml"),
            toml::to_string_pretty(&test_config).unwrap(),
        )
        .unwrap();

        let loaded = Config::load(temp_dir.path()).unwrap().unwrap();

        assert_eq!(loaded, test_config);
    }

    #[test]
    fn test_load_without_file_in_base_directory() {
        let temp_dir = TempDir::new().unwrap();

        assert!(Config::load(temp_dir.path()).unwrap().is_none());
        assert_eq!(
            Config::config_path(temp_dir.path()),
            temp_dir.path().join("flatwiki.toml")
        );
    }
}
