//! Runtime configuration.
//!
//! Each field resolves with priority: CLI flag > environment variable (a
//! `.env` file is loaded into the environment first) > TOML file > default.
//! The TOML file is the first that exists of: `--config` / `PLAN_MCP_CONFIG`,
//! `./plan-mcp.toml`, `<config_dir>/plan-mcp/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use serde::Deserialize;

use crate::generation::{gemini, GeminiConfig, GenerationOptions};
use crate::mcp::ServerIdentity;
use crate::PlanMcpError;

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_SERVER_NAME: &str = "plan-mcp";
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

const LOCAL_CONFIG_FILE: &str = "plan-mcp.toml";

/// Configuration flags shared by every command. Each also reads its
/// environment variable.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Path to a TOML config file
    #[arg(long = "config", env = "PLAN_MCP_CONFIG", global = true)]
    pub config_path: Option<PathBuf>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini model identifier
    #[arg(long, env = "GEMINI_MODEL", global = true)]
    pub model: Option<String>,

    /// Generative Language API base URL
    #[arg(long, env = "GEMINI_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Attempts per structured generation call
    #[arg(long, env = "PLAN_MCP_MAX_RETRIES", global = true)]
    pub max_retries: Option<u32>,

    /// HTTP timeout for backend calls, in seconds
    #[arg(long = "timeout", env = "PLAN_MCP_TIMEOUT", global = true)]
    pub timeout_secs: Option<u64>,

    /// Sampling temperature, 0.0 to 1.0
    #[arg(long, env = "PLAN_MCP_TEMPERATURE", global = true)]
    pub temperature: Option<f32>,

    #[arg(long, env = "MCP_SERVER_NAME", global = true, hide = true)]
    pub server_name: Option<String>,

    #[arg(long, env = "MCP_SERVER_VERSION", global = true, hide = true)]
    pub server_version: Option<String>,
}

/// Contents of a TOML config file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub log_level: Option<String>,
    pub max_retries: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub temperature: Option<f32>,
    pub server_name: Option<String>,
    pub server_version: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, PlanMcpError> {
        let contents = std::fs::read_to_string(path).map_err(|source| PlanMcpError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|e| {
            PlanMcpError::Configuration(format!("failed to parse {}: {}", path.display(), e))
        })
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub log_level: String,
    pub max_retries: u32,
    pub timeout: Duration,
    pub temperature: f32,
    pub server_name: String,
    pub server_version: String,
    /// The TOML file that contributed values, if any.
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::merge(&ConfigArgs::default(), FileConfig::default(), None)
    }
}

impl Config {
    /// Resolve from flags/environment and the first config file found.
    pub fn resolve(args: &ConfigArgs) -> Result<Self, PlanMcpError> {
        let (file, source) = match locate_config_file(args.config_path.as_deref())? {
            Some(path) => (FileConfig::load(&path)?, Some(path)),
            None => (FileConfig::default(), None),
        };
        let config = Self::merge(args, file, source);
        config.validate()?;
        Ok(config)
    }

    /// Layer flags/environment over file values over defaults.
    pub fn merge(args: &ConfigArgs, file: FileConfig, source: Option<PathBuf>) -> Self {
        Self {
            api_key: args
                .api_key
                .clone()
                .or(file.api_key)
                .filter(|k| !k.trim().is_empty()),
            model: args
                .model
                .clone()
                .or(file.model)
                .unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string()),
            base_url: args
                .base_url
                .clone()
                .or(file.base_url)
                .unwrap_or_else(|| gemini::DEFAULT_BASE_URL.to_string()),
            log_level: args
                .log_level
                .clone()
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            max_retries: args
                .max_retries
                .or(file.max_retries)
                .unwrap_or(DEFAULT_MAX_RETRIES),
            timeout: Duration::from_secs(
                args.timeout_secs
                    .or(file.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            temperature: args
                .temperature
                .or(file.temperature)
                .unwrap_or(DEFAULT_TEMPERATURE),
            server_name: args
                .server_name
                .clone()
                .or(file.server_name)
                .unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string()),
            server_version: args
                .server_version
                .clone()
                .or(file.server_version)
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            source,
        }
    }

    /// Range checks. A missing API key is not checked here; see
    /// [`require_api_key`](Self::require_api_key).
    pub fn validate(&self) -> Result<(), PlanMcpError> {
        if self.max_retries == 0 {
            return Err(PlanMcpError::Configuration(
                "max_retries must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(PlanMcpError::Configuration(format!(
                "temperature must be within [0, 1], got {}",
                self.temperature
            )));
        }
        if self.timeout.is_zero() {
            return Err(PlanMcpError::Configuration(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn require_api_key(&self) -> Result<&str, PlanMcpError> {
        self.api_key.as_deref().ok_or_else(|| {
            PlanMcpError::Configuration(
                "GEMINI_API_KEY is not set (use --api-key, the environment, .env, or a config file)"
                    .to_string(),
            )
        })
    }

    pub fn gemini_config(&self) -> Result<GeminiConfig, PlanMcpError> {
        let mut config = GeminiConfig::new(self.require_api_key()?);
        config.model = self.model.clone();
        config.base_url = self.base_url.clone();
        config.timeout = self.timeout;
        Ok(config)
    }

    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            temperature: self.temperature,
            max_attempts: self.max_retries,
            max_output_tokens: None,
        }
    }

    pub fn identity(&self) -> ServerIdentity {
        ServerIdentity {
            name: self.server_name.clone(),
            version: self.server_version.clone(),
        }
    }
}

fn locate_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>, PlanMcpError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(PlanMcpError::Configuration(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Ok(Some(local));
    }

    Ok(dirs::config_dir()
        .map(|dir| dir.join("plan-mcp").join("config.toml"))
        .filter(|p| p.is_file()))
}
