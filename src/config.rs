use crate::model::table::PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn default_page_size() -> usize {
    PAGE_SIZE
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Rows per page for paginated tables
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Dataset snapshot (JSON or YAML); the built-in sample when unset
    #[serde(default)]
    pub data_file: Option<String>,
    /// Where submissions are appended; `outbox.jsonl` in the config dir when unset
    #[serde(default)]
    pub outbox_path: Option<String>,
    #[serde(default)]
    pub log_file: Option<String>,
    /// Whether the item dialog offers the created-at field
    #[serde(default = "default_true")]
    pub show_created_at: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            data_file: None,
            outbox_path: None,
            log_file: None,
            show_created_at: true,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".inventory-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        Self::load_from(Self::config_path()?)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Option<Config> {
        let path = path.as_ref();
        if !path.exists() {
            return None;
        }

        let contents = fs::read_to_string(path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    fn in_config_dir(name: &str) -> PathBuf {
        Self::config_dir()
            .map(|dir| dir.join(name))
            .unwrap_or_else(|| PathBuf::from(name))
    }

    pub fn outbox_path(&self) -> PathBuf {
        self.outbox_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| Self::in_config_dir("outbox.jsonl"))
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| Self::in_config_dir("inventory-tui.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_page_size() {
        let config = Config::default();
        assert_eq!(config.page_size, 50);
        assert!(config.show_created_at);
    }

    #[test]
    fn test_partial_file_takes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"data_file": "stock.yaml"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.page_size, 50);
        assert_eq!(config.data_file.as_deref(), Some("stock.yaml"));
        assert!(config.show_created_at);
    }

    #[test]
    fn test_written_config_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            page_size: 25,
            outbox_path: Some("/tmp/outbox.jsonl".into()),
            show_created_at: false,
            ..Default::default()
        };
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(Config::load_from(&path), Some(config.clone()));
        assert_eq!(config.outbox_path(), PathBuf::from("/tmp/outbox.jsonl"));
    }

    #[test]
    fn test_missing_or_invalid_file() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load_from(dir.path().join("none.json")).is_none());
        let bad = dir.path().join("bad.json");
        fs::write(&bad, "not json").unwrap();
        assert!(Config::load_from(bad).is_none());
    }
}
