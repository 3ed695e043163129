//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::router::{Revision, RouterOptions};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub router: RouterConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// UI server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the built client bundle
    #[serde(default = "default_web_root")]
    pub web_root: PathBuf,

    /// Root document inside `web_root`
    #[serde(default = "default_index_file")]
    pub index_file: String,

    /// Id of the element the application mounts into
    #[serde(default = "default_anchor_id")]
    pub anchor_id: String,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_web_root() -> PathBuf {
    PathBuf::from("./www")
}

fn default_index_file() -> String {
    "index.html".to_string()
}

fn default_anchor_id() -> String {
    "app".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            web_root: default_web_root(),
            index_file: default_index_file(),
            anchor_id: default_anchor_id(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Full path of the root document
    pub fn index_path(&self) -> PathBuf {
        self.web_root.join(&self.index_file)
    }
}

/// Route table configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RouterConfig {
    #[serde(default)]
    pub revision: Revision,

    #[serde(default)]
    pub case_sensitive: bool,

    #[serde(default)]
    pub strict_trailing_slash: bool,

    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

fn default_max_redirects() -> usize {
    8
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            revision: Revision::default(),
            case_sensitive: false,
            strict_trailing_slash: false,
            max_redirects: default_max_redirects(),
        }
    }
}

impl RouterConfig {
    pub fn options(&self) -> RouterOptions {
        RouterOptions {
            case_sensitive: self.case_sensitive,
            strict_trailing_slash: self.strict_trailing_slash,
            max_redirects: self.max_redirects,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_from_candidates(&default_paths())
    }

    /// Load the first existing file in `candidates`.
    ///
    /// A file that exists but cannot be read or parsed is an error, the
    /// search does not fall through to the next candidate.
    pub fn load_from_candidates(candidates: &[PathBuf]) -> Result<Self, ConfigError> {
        match candidates.iter().find(|path| path.exists()) {
            Some(path) => Self::load_with_env(path),
            None => Self::from_env(),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        // Server overrides
        if let Some(host) = var("POSTEE_UI_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("POSTEE_UI_PORT") {
            self.server.port = port.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Env {
                    var: "POSTEE_UI_PORT".to_string(),
                    value: port.clone(),
                    error: e.to_string(),
                }
            })?;
        }
        if let Some(web_root) = var("POSTEE_UI_WEB_ROOT") {
            self.server.web_root = PathBuf::from(web_root);
        }

        // Router overrides
        if let Some(revision) = var("POSTEE_UI_REVISION") {
            self.router.revision = revision.parse().map_err(|e| ConfigError::Env {
                var: "POSTEE_UI_REVISION".to_string(),
                value: revision.clone(),
                error: e,
            })?;
        }

        // Logging overrides
        if let Some(level) = var("POSTEE_UI_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("POSTEE_UI_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }
}

/// Config file search order
fn default_paths() -> Vec<PathBuf> {
    [
        dirs::config_dir().map(|p| p.join("postee-ui").join("config.toml")),
        Some(PathBuf::from("/etc/postee-ui/config.toml")),
        Some(PathBuf::from("./config.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value {value:?} for {var}: {error}")]
    Env {
        var: String,
        value: String,
        error: String,
    },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Postee UI Configuration
#
# Environment variables override these settings:
# - POSTEE_UI_HOST
# - POSTEE_UI_PORT
# - POSTEE_UI_WEB_ROOT
# - POSTEE_UI_REVISION
# - POSTEE_UI_LOG_LEVEL
# - POSTEE_UI_LOG_FORMAT

[server]
# Host to bind to
host = "0.0.0.0"

# Port to listen on
port = 8000

# Directory holding the built dashboard bundle
web_root = "./www"

# Root document served for every dashboard path
index_file = "index.html"

# Id of the element the dashboard mounts into
anchor_id = "app"

# Allowed CORS origins for the JSON endpoints
cors_origins = []

[router]
# Route table revision: earlier or later
revision = "later"

# Compare static path segments case-sensitively
case_sensitive = false

# Treat "/login/" and "/login" as different paths
strict_trailing_slash = false

# Maximum redirect hops per navigation
max_redirects = 8

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
