use std::fs;
use std::path::{Path, PathBuf};

use directories::UserDirs;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed at load time, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Provider API key; `GEMINI_API_KEY` / `GOOGLE_API_KEY` env vars win
    /// over this value.
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Optional sentence-level rewrite endpoint. Off by default; when off the
    /// route is not mounted at all.
    #[serde(default)]
    pub sentence_rewrite: bool,
}

fn default_model() -> String {
    DEFAULT_MODEL.into()
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    3000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            sentence_rewrite: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            api_key: None,
            model: default_model(),
            gateway: GatewayConfig::default(),
        }
    }
}

impl Config {
    /// Load `~/.easyreply/config.toml`, writing a default one on first run.
    pub fn load_or_init() -> Result<Self, ConfigError> {
        let dir = UserDirs::new()
            .ok_or(ConfigError::NoHome)?
            .home_dir()
            .join(".easyreply");
        Self::load_or_init_at(&dir)
    }

    /// Same as [`Config::load_or_init`] but rooted at an explicit directory.
    pub fn load_or_init_at(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join("config.toml");

        if path.exists() {
            let raw = fs::read_to_string(&path)?;
            let mut config: Config =
                toml::from_str(&raw).map_err(|e| ConfigError::Load(e.to_string()))?;
            config.config_path = path;
            Ok(config)
        } else {
            fs::create_dir_all(dir)?;
            let mut config = Config::default();
            config.config_path = path.clone();
            let raw =
                toml::to_string_pretty(&config).map_err(|e| ConfigError::Load(e.to_string()))?;
            fs::write(&path, raw)?;
            Ok(config)
        }
    }
}
