use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("\nNo configuration file found.\nRun `owncloud-share config` to create one.")]
    NotFound,

    #[error("Cannot find home directory")]
    NoHome,

    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to write config file: {0}")]
    FileWrite(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

/// Credentials and endpoint of the OCS share API, e.g.
/// `https://cloud.example/ocs/v1.php/apps/files_sharing/api/v1/shares`.
/// Only Basic authentication is supported.
#[derive(Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OcsConfig {
    pub share_api: String,
    pub user_name: String,
    pub password: String,
}

impl OcsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.share_api.is_empty() {
            return Err(ConfigError::Validation(
                "Share API URL cannot be empty".to_string(),
            ));
        }

        url::Url::parse(&self.share_api).map_err(|e| {
            ConfigError::Validation(format!("Share API URL must be absolute: {}", e))
        })?;

        if self.user_name.is_empty() {
            return Err(ConfigError::Validation(
                "User name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl fmt::Debug for OcsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OcsConfig")
            .field("share_api", &self.share_api)
            .field("user_name", &self.user_name)
            .field("password", &"****")
            .finish()
    }
}

fn default_streamed_copy() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    60
}

#[derive(Clone, Deserialize, Serialize)]
pub struct Config {
    /// WebDAV root, e.g. `https://cloud.example/remote.php/webdav/`.
    pub dav_url: String,
    pub user_name: String,
    pub password: String,
    pub prefix: Option<String>,
    #[serde(default = "default_streamed_copy")]
    pub use_streamed_copy: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub ocs: Option<OcsConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dav_url: "http://localhost/remote.php/webdav/".to_string(),
            user_name: String::new(),
            password: String::new(),
            prefix: None,
            use_streamed_copy: true,
            timeout_secs: default_timeout_secs(),
            ocs: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("dav_url", &self.dav_url)
            .field("user_name", &self.user_name)
            .field("prefix", &self.prefix)
            .field("use_streamed_copy", &self.use_streamed_copy)
            .field("timeout_secs", &self.timeout_secs)
            .field("ocs", &self.ocs)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        // config file is saved in ~/.owncloud-share folder
        let mut path = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        path.push(".owncloud-share");
        path.push("config.toml");
        Ok(path)
    }

    pub fn from_file() -> Result<Self, ConfigError> {
        Self::load(&Self::default_path()?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound);
        }

        let content = fs::read_to_string(path)?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        self.save(&Self::default_path()?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::FileWrite)?;
        }
        fs::write(path, content).map_err(ConfigError::FileWrite)?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dav_url.is_empty() {
            return Err(ConfigError::Validation(
                "WebDAV URL cannot be empty".to_string(),
            ));
        }

        url::Url::parse(&self.dav_url).map_err(|e| {
            ConfigError::Validation(format!("WebDAV URL must be absolute: {}", e))
        })?;

        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        if let Some(ocs) = &self.ocs {
            ocs.validate()?;
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
