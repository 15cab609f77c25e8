use crate::api::client::{DEFAULT_CONTENT_TYPE, DEFAULT_ENDPOINT, DEFAULT_SESSION_PREAMBLE};
use crate::ui::editor::ColorScheme;
use anyhow::Result;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub editor: EditorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Query endpoint receiving the POSTed statements
    pub endpoint: String,

    /// Statement prepended to every query (session setup)
    pub session_preamble: String,

    /// Content type sent with the plain-text body
    pub content_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Language mode handed to the editor widget
    pub mode: String,

    /// Theme used when the page is not in dark mode
    pub light_theme: String,

    /// Theme used when the page carries the `dark` flag
    pub dark_theme: String,

    /// Minimum number of visible editor lines
    pub min_lines: u32,

    /// Maximum number of visible editor lines before scrolling
    pub max_lines: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracing filter directive, e.g. "info" or "sql_editor=debug"
    pub filter: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            session_preamble: DEFAULT_SESSION_PREAMBLE.to_string(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            mode: "ace/mode/sql".to_string(),
            light_theme: "ace/theme/github".to_string(),
            dark_theme: "ace/theme/github_dark".to_string(),
            min_lines: 5,
            max_lines: 20,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: crate::utils::logging::DEFAULT_FILTER.to_string(),
        }
    }
}

impl EditorConfig {
    pub fn theme_for(&self, scheme: ColorScheme) -> &str {
        match scheme {
            ColorScheme::Dark => &self.dark_theme,
            ColorScheme::Light => &self.light_theme,
        }
    }
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.normalize();
        Ok(config)
    }

    /// Swap inverted line bounds instead of handing them to the editor as-is
    fn normalize(&mut self) {
        if self.editor.min_lines > self.editor.max_lines {
            std::mem::swap(&mut self.editor.min_lines, &mut self.editor.max_lines);
        }
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# SQL Editor Configuration File
# Location: ~/.config/sql-editor/config.toml (Linux)
#           ~/Library/Application Support/sql-editor/config.toml (macOS)
#           %APPDATA%\sql-editor\config.toml (Windows)

[api]
# Endpoint receiving the query text via POST
endpoint = "https://umbra.db.in.tum.de/api/query"

# Statement sent ahead of every query
session_preamble = "set search_path = tpchSf1, public;\n"

# Content type of the plain-text request body
content_type = "application/x-www-form-urlencoded; charset=UTF-8"

[editor]
# Editor language mode
mode = "ace/mode/sql"

# Themes for light and dark pages
light_theme = "ace/theme/github"
dark_theme = "ace/theme/github_dark"

# Visible line bounds of the editor
min_lines = 5
max_lines = 20

[logging]
# tracing filter, RUST_LOG takes precedence
filter = "warn"
"#
        .to_string()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Config {
    /// Load config from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            // Create default config if it doesn't exist
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("sql-editor").join("config.toml"))
    }
}
