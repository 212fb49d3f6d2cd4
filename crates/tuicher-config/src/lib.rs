use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::search_engine::SearchEngine;
use self::theme::Theme;
use self::ui::UiConfig;

pub mod search_engine;
pub mod theme;
pub mod ui;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    500
}

fn default_channel_capacity() -> usize {
    64
}

fn default_true() -> bool {
    true
}

fn default_session_manager_keyword() -> String {
    "s".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    pub theme: Theme,
    pub ui: UiConfig,
    #[serde(default = "search_engine::default_search_engines")]
    pub search_engines: Vec<SearchEngine>,
    /// Id of the engine used when nothing else matches
    pub default_search_engine: u64,
    /// Shutdown, restart, suspend and logout rows behind a keyword
    #[serde(default = "default_true")]
    pub enable_session_manager: bool,
    #[serde(default = "default_session_manager_keyword")]
    pub session_manager_keyword: String,
    /// Capacity of the controller event queue
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            theme: Theme::default(),
            ui: UiConfig::default(),
            search_engines: search_engine::default_search_engines(),
            default_search_engine: 0,
            enable_session_manager: default_true(),
            session_manager_keyword: default_session_manager_keyword(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let width = env::var("TUICHER_WIDTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_width);

        let height = env::var("TUICHER_HEIGHT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_height);

        Config {
            width,
            height,
            ui: UiConfig::new(),
            ..Config::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        let config = serde_json::from_str(&data)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn default_engine(&self) -> Option<&SearchEngine> {
        self.search_engines
            .iter()
            .find(|engine| engine.id == self.default_search_engine)
    }

    pub fn engine_for_keyword(&self, keyword: &str) -> Option<&SearchEngine> {
        self.search_engines
            .iter()
            .find(|engine| engine.keyword == keyword)
    }

    pub fn is_session_keyword(&self, keyword: &str) -> bool {
        self.enable_session_manager && self.session_manager_keyword == keyword
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"height": 320, "ui": {"row_height": 30}}"#).unwrap();
        assert_eq!(config.height, 320);
        assert_eq!(config.width, 800);
        assert_eq!(config.ui.row_height, 30);
        assert_eq!(config.ui.max_results, 50);
        assert_eq!(config.search_engines.len(), 2);
        assert_eq!(config.theme, Theme::default());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.json");
        fs::write(&path, r#"{"default_search_engine": 1}"#).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.default_engine().map(|e| e.name.as_str()), Some("DuckDuckGo"));
    }

    #[test]
    fn load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
        assert!(matches!(
            Config::load(&dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn keyword_lookup() {
        let config = Config::default();
        let engine = config.engine_for_keyword("g").unwrap();
        assert_eq!(engine.query_url("rust"), "https://www.google.com/search?q=rust");
        assert!(config.engine_for_keyword("zz").is_none());
    }

    #[test]
    fn session_keyword_can_be_disabled() {
        let mut config: Config =
            serde_json::from_str(r#"{"session_manager_keyword": "power"}"#).unwrap();
        assert!(config.is_session_keyword("power"));
        assert!(!config.is_session_keyword("s"));

        config.enable_session_manager = false;
        assert!(!config.is_session_keyword("power"));
    }
}
