//! Configuration types for helptree.
//!
//! [`Config::load`] reads `~/.config/helptree/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[search]
debounce_ms = 250
settle_ms   = 250

[ui]
tree_pane_width_pct = 30
docs_dir            = "cmd_docs"
theme               = "default"

[keybindings]
toggle_focus = "Tab"
query_focus  = "/"
toggle_view  = "v"
expand_all   = "E"
collapse_all = "C"
toggle_pane  = "t"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/helptree/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search runs.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Wait after a deferred view refresh before re-selecting the current node.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

fn default_debounce_ms() -> u64 { 250 }
fn default_settle_ms() -> u64 { 250 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            settle_ms: default_settle_ms(),
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_tree_pane_width_pct")]
    pub tree_pane_width_pct: u16,
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_tree_pane_width_pct() -> u16 { 30 }
fn default_docs_dir() -> String { "cmd_docs".to_string() }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tree_pane_width_pct: default_tree_pane_width_pct(),
            docs_dir: default_docs_dir(),
            theme: default_theme(),
        }
    }
}

/// `[keybindings]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_toggle_focus")]
    pub toggle_focus: String,
    #[serde(default = "default_query_focus")]
    pub query_focus: String,
    #[serde(default = "default_toggle_view")]
    pub toggle_view: String,
    #[serde(default = "default_expand_all")]
    pub expand_all: String,
    #[serde(default = "default_collapse_all")]
    pub collapse_all: String,
    #[serde(default = "default_toggle_pane")]
    pub toggle_pane: String,
}

fn default_toggle_focus() -> String { "Tab".to_string() }
fn default_query_focus() -> String { "/".to_string() }
fn default_toggle_view() -> String { "v".to_string() }
fn default_expand_all() -> String { "E".to_string() }
fn default_collapse_all() -> String { "C".to_string() }
fn default_toggle_pane() -> String { "t".to_string() }

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            toggle_focus: default_toggle_focus(),
            query_focus: default_query_focus(),
            toggle_view: default_toggle_view(),
            expand_all: default_expand_all(),
            collapse_all: default_collapse_all(),
            toggle_pane: default_toggle_pane(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/helptree/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path())
    }

    /// Same as [`Config::load`] but with an explicit file location.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, DEFAULT_CONFIG.trim_start())?;
            tracing::debug!(path = %path.display(), "wrote default config");
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("helptree")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
