use serde::{Deserialize, Serialize};

/// Main configuration structure for taskrank
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Strategy used when a request does not name one
    #[serde(default = "default_strategy")]
    pub default_strategy: String,

    /// Number of tasks returned by the suggestion operation
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_strategy() -> String {
    "smart_balance".to_string()
}

const fn default_suggestion_limit() -> usize {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_strategy: default_strategy(),
            suggestion_limit: default_suggestion_limit(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to enable permissive CORS
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8000
}

const fn default_enable_cors() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: default_enable_cors(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling JSON log files
    #[serde(default)]
    pub log_dir: Option<String>,

    /// Whether to log to stderr at all
    #[serde(default = "default_enable_stdout")]
    pub enable_stdout: bool,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

const fn default_enable_stdout() -> bool {
    true
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            enable_stdout: default_enable_stdout(),
            rotation: default_rotation(),
        }
    }
}
