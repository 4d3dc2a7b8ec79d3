use crate::error::{LinefmtError, Result};
use crate::formatter::validate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Line templates for each display surface
    pub formats: FormatConfig,

    /// Display configuration
    pub display: DisplayConfig,
}

/// Line templates, one per display surface
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FormatConfig {
    /// Directory rows in the browser
    pub browser_dir: String,

    /// Track rows in the browser
    pub browser_track: String,

    /// Status line while playing
    pub status_playing: String,

    /// Status line while paused
    pub status_paused: String,

    /// Status line while stopped
    pub status_stopped: String,

    /// Title line above the browser
    pub title: String,
}

/// Display-related configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Line width used when none is given on the command line
    pub width: usize,

    /// Strip control characters and escape sequences from field values
    pub sanitize: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        FormatConfig {
            browser_dir: "{%n}/".to_string(),
            browser_track: "{-*%:%a - %t}{20%:%l}".to_string(),
            status_playing: " {-*%:%a - %t}{*%:[%o/%l]} ".to_string(),
            status_paused: " {-*%:%a - %t}{*%:[%o/%l]} ".to_string(),
            status_stopped: String::new(),
            title: " {%p}".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            width: 80,
            sanitize: true,
        }
    }
}

impl FormatConfig {
    /// Templates paired with their configuration key.
    pub fn templates(&self) -> [(&'static str, &str); 6] {
        [
            ("browser_dir", self.browser_dir.as_str()),
            ("browser_track", self.browser_track.as_str()),
            ("status_playing", self.status_playing.as_str()),
            ("status_paused", self.status_paused.as_str()),
            ("status_stopped", self.status_stopped.as_str()),
            ("title", self.title.as_str()),
        ]
    }

    /// Template stored under `key`, if the key exists.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.templates()
            .into_iter()
            .find(|(name, _)| *name == key)
            .map(|(_, template)| template)
    }

    /// Check every template, reporting the first broken one by key.
    pub fn validate(&self) -> Result<()> {
        for (key, template) in self.templates() {
            validate(template).map_err(|e| LinefmtError::config_template(key, e))?;
        }
        Ok(())
    }
}

// Configuration loading
impl Config {
    /// Load configuration from file, or use defaults
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::find_config_file() {
            debug!("Loading config from {}", config_path.display());
            Self::load_from_file(&config_path)
        } else {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }

    /// Load configuration from a specific file and validate its templates
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| LinefmtError::config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| LinefmtError::config(format!("Failed to parse config file: {}", e)))?;

        config.formats.validate()?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| LinefmtError::config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                LinefmtError::config(format!("Failed to create config directory: {}", e))
            })?;
        }

        fs::write(path, toml_string)
            .map_err(|e| LinefmtError::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Find config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // 1. Environment variable
        if let Ok(path) = std::env::var("LINEFMT_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("linefmt").join("config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Home directory
        if let Some(home_dir) = dirs::home_dir() {
            let path = home_dir.join(".linefmt.toml");
            if path.exists() {
                return Some(path);
            }
        }

        None
    }

    /// Get default config file path (for creating new config)
    pub fn default_config_path() -> Result<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Ok(config_dir.join("linefmt").join("config.toml"))
        } else {
            Err(LinefmtError::config("Could not determine config directory"))
        }
    }

    /// Generate example config file content
    pub fn example_toml() -> &'static str {
        r#"# linefmt configuration file
#
# All values shown are the defaults - you can override only what you need.
#
# Template syntax:
#   {%a}          field 'a' at its natural width
#   {10:%a}       right-aligned in 10 columns, {-10:%a} left-aligned
#   {30%:%a}      30% of the columns left after text and fixed widths
#   {*%:%a}       equal share of whatever percentage is left unclaimed
#   {{ and }}     literal braces, %% a literal percent sign
# Either all substitutions in a template use percent widths or none do.

[formats]
# Directory rows: p = path, n = name
browser_dir = "{%n}/"

# Track rows: p = path, a = artist, b = album, t = title, n = number, l = length
browser_track = "{-*%:%a - %t}{20%:%l}"

# Status line: track fields plus o = elapsed position
status_playing = " {-*%:%a - %t}{*%:[%o/%l]} "
status_paused = " {-*%:%a - %t}{*%:[%o/%l]} "
status_stopped = ""

# Title line: p = current directory
title = " {%p}"

[display]
# Line width when none is given on the command line
width = 80

# Strip control characters and escape sequences from field values
sanitize = true
"#
    }
}
