use crate::search_path::SearchPath;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// Settings in effect after the user file, if any, has been applied to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Initial search path, highest priority first.
    pub path: Vec<String>,
    /// Prompt shown in interactive mode.
    pub prompt: String,
    /// Report `wish: <reason>` instead of the generic error message.
    pub verbose_errors: bool,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogSettings {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "off".to_string(),
            file: None,
        }
    }
}

/// A user file. Each key present replaces the default of the same name.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigOverlay {
    path: Option<Vec<String>>,
    prompt: Option<String>,
    verbose_errors: Option<bool>,
    #[serde(default)]
    log: LogOverlay,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct LogOverlay {
    level: Option<String>,
    file: Option<PathBuf>,
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Override with `explicit` if given, which must exist and parse; otherwise with
    ///    ~/.config/wish/config.toml if it exists
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default_config();
        let overlay = match explicit {
            Some(path) => Some(read_overlay(path)?),
            None => load_user_overlay(),
        };
        if let Some(overlay) = overlay {
            config.apply_overlay(overlay);
        }
        Ok(config)
    }

    /// Parse `toml_str` as a user file on top of the defaults.
    pub fn from_overlay_str(toml_str: &str) -> Result<Self> {
        let mut config = Self::default_config();
        config.apply_overlay(toml::from_str(toml_str).context("malformed configuration")?);
        Ok(config)
    }

    pub fn search_path(&self) -> SearchPath {
        SearchPath::new(self.path.iter().cloned())
    }

    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        if let Some(path) = overlay.path {
            self.path = path;
        }
        if let Some(prompt) = overlay.prompt {
            self.prompt = prompt;
        }
        if let Some(v) = overlay.verbose_errors {
            self.verbose_errors = v;
        }
        if let Some(level) = overlay.log.level {
            self.log.level = level;
        }
        if overlay.log.file.is_some() {
            self.log.file = overlay.log.file;
        }
    }
}

fn read_overlay(path: &Path) -> Result<ConfigOverlay> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("malformed config {}", path.display()))
}

/// Try to load user overlay from ~/.config/wish/config.toml.
fn load_user_overlay() -> Option<ConfigOverlay> {
    let home = std::env::var_os("HOME")?;
    let path = Path::new(&home).join(".config/wish/config.toml");
    if !path.exists() {
        return None;
    }
    match read_overlay(&path) {
        Ok(overlay) => Some(overlay),
        Err(e) => {
            eprintln!("wish: {e:#}");
            None
        }
    }
}
