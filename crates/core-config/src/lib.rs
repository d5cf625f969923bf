//! Runtime configuration.
//!
//! Configuration is read-only and opt-in: the binary passes the path given
//! with `--config`, otherwise built-in defaults apply. Nothing is discovered
//! implicitly and nothing is ever written back.
//!
//! Recognized keys (all optional):
//!
//! ```toml
//! [editor]
//! tab_stop = 4              # render width of a tab stop
//! quit_times = 3            # extra Ctrl-Q presses required with unsaved edits
//! message_timeout_secs = 5  # lifetime of transient status messages
//!
//! [scroll.margin]
//! vertical = 0              # rows kept between cursor and viewport edge
//! ```
//!
//! The vertical margin is clamped at `(h - 2) / 2` where `h` is the current
//! number of text rows; the raw value is retained so a resize can re-clamp.
//! Unknown fields are ignored.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    #[serde(default = "EditorConfig::default_tab_stop")]
    pub tab_stop: usize,
    #[serde(default = "EditorConfig::default_quit_times")]
    pub quit_times: u32,
    #[serde(default = "EditorConfig::default_message_timeout_secs")]
    pub message_timeout_secs: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_stop: Self::default_tab_stop(),
            quit_times: Self::default_quit_times(),
            message_timeout_secs: Self::default_message_timeout_secs(),
        }
    }
}

impl EditorConfig {
    const fn default_tab_stop() -> usize {
        4
    }
    const fn default_quit_times() -> u32 {
        3
    }
    const fn default_message_timeout_secs() -> u64 {
        5
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct MarginConfig {
    #[serde(default)]
    pub vertical: u16,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ScrollConfig {
    #[serde(default)]
    pub margin: MarginConfig,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub source: Option<PathBuf>,
    pub file: ConfigFile,
    pub effective_vertical_margin: u16,
}

/// Load configuration from an explicit path, or defaults when `None`.
pub fn load_from(path: Option<&Path>) -> Result<Config, ConfigError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file = from_toml_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(target: "config", path = %path.display(), tab_stop = file.editor.tab_stop, "config_loaded");
    Ok(Config {
        source: Some(path.to_path_buf()),
        file,
        effective_vertical_margin: 0,
    })
}

pub fn from_toml_str(content: &str) -> Result<ConfigFile, toml::de::Error> {
    toml::from_str::<ConfigFile>(content)
}

impl Config {
    pub fn tab_stop(&self) -> usize {
        self.file.editor.tab_stop.max(1)
    }

    pub fn quit_times(&self) -> u32 {
        self.file.editor.quit_times
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.file.editor.message_timeout_secs)
    }

    /// Clamp the vertical margin for a viewport with `text_rows` rows.
    /// Returns the effective (possibly clamped) value.
    pub fn apply_text_rows(&mut self, text_rows: u16) -> u16 {
        let raw = self.file.scroll.margin.vertical;
        let (clamped, max) = if text_rows <= 3 {
            (0, 0)
        } else {
            let max = (text_rows - 2) / 2;
            (raw.min(max), max)
        };
        if clamped != raw {
            info!(
                target: "config",
                raw,
                clamped,
                max,
                text_rows,
                "scroll_margin_vertical_clamped"
            );
        }
        self.effective_vertical_margin = clamped;
        clamped
    }

    /// Re-clamp after a resize. Returns `Some(new_margin)` when the effective
    /// value changed, else `None`.
    pub fn recompute_after_resize(&mut self, text_rows: u16) -> Option<u16> {
        let prev = self.effective_vertical_margin;
        let current = self.apply_text_rows(text_rows);
        if current != prev { Some(current) } else { None }
    }
}
