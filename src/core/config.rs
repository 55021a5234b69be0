//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tome/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TomeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Path to the corpus file (TOML or JSON). None = built-in docs.
    pub docs_path: Option<String>,
    /// Section id to open on startup instead of the first section.
    pub start_id: Option<String>,
    /// Syntect theme for fenced code blocks.
    pub code_theme: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub sidebar_width: Option<u16>,
    /// Terminal width below which the sidebar becomes a toggled overlay.
    pub narrow_threshold: Option<u16>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SIDEBAR_WIDTH: u16 = 32;
pub const DEFAULT_NARROW_THRESHOLD: u16 = 80;
pub const DEFAULT_CODE_THEME: &str = "base16-ocean.dark";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub docs_path: Option<PathBuf>,
    pub start_id: Option<String>,
    pub code_theme: String,
    pub sidebar_width: u16,
    pub narrow_threshold: u16,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.tome/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tome").join("config.toml"))
}

/// Load config from `~/.tome/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TomeConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TomeConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TomeConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TomeConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: TomeConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Tome Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# docs_path = "~/docs/manual.toml"   # Corpus file (TOML or JSON); omit for built-in docs
# start_id = "introduction"          # Section to open on startup
# code_theme = "base16-ocean.dark"   # Syntect theme for code blocks

# [ui]
# sidebar_width = 32
# narrow_threshold = 80              # Below this width the sidebar becomes an overlay
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_docs` and `cli_section` come from CLI flags (None = not specified).
pub fn resolve(
    config: &TomeConfig,
    cli_docs: Option<&str>,
    cli_section: Option<&str>,
) -> ResolvedConfig {
    // Corpus path: CLI → env → config → built-in
    let docs_path = cli_docs
        .map(|s| s.to_string())
        .or_else(|| std::env::var("TOME_DOCS").ok())
        .or_else(|| config.general.docs_path.clone())
        .map(expand_home);

    // Start section: CLI → config (env deliberately not consulted — a
    // per-invocation choice belongs on the command line)
    let start_id = cli_section
        .map(|s| s.to_string())
        .or_else(|| config.general.start_id.clone());

    // Code theme: env → config → default
    let code_theme = std::env::var("TOME_THEME")
        .ok()
        .or_else(|| config.general.code_theme.clone())
        .unwrap_or_else(|| DEFAULT_CODE_THEME.to_string());

    ResolvedConfig {
        docs_path,
        start_id,
        code_theme,
        sidebar_width: config.ui.sidebar_width.unwrap_or(DEFAULT_SIDEBAR_WIDTH),
        narrow_threshold: config
            .ui
            .narrow_threshold
            .unwrap_or(DEFAULT_NARROW_THRESHOLD),
    }
}

/// Expand a leading `~/` against the home directory.
fn expand_home(path: String) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
