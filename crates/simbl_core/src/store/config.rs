//! Project configuration in `config.yaml`.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::CONFIG_FILE_NAME;

pub const DEFAULT_PREFIX: &str = "task";
/// `logVersion` once task logs live in `log.ndjson`.
pub const LOG_VERSION_CENTRALIZED: u32 = 2;

pub type ConfigResult<T> = Result<T, ConfigError>;

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

/// Contents of `config.yaml`. Unknown keys are carried through a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_version: Option<u32>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            name: None,
            log_version: None,
            extra: BTreeMap::new(),
        }
    }
}

impl ProjectConfig {
    pub fn is_log_centralized(&self) -> bool {
        self.log_version == Some(LOG_VERSION_CENTRALIZED)
    }
}

/// Errors from config persistence.
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Encode(serde_yaml::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "config io error: {err}"),
            Self::Encode(err) => write!(f, "config encode error: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Encode(value)
    }
}

/// Load/save seam for project config.
pub trait ConfigStore {
    /// Returns defaults when nothing usable is stored.
    fn load(&self) -> ConfigResult<ProjectConfig>;
    fn save(&self, config: &ProjectConfig) -> ConfigResult<()>;
}

/// `config.yaml` on disk.
#[derive(Debug, Clone)]
pub struct YamlConfigStore {
    path: PathBuf,
}

impl YamlConfigStore {
    pub fn new(simbl_dir: &Path) -> Self {
        Self {
            path: simbl_dir.join(CONFIG_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> ConfigResult<ProjectConfig> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(ProjectConfig::default());
            }
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(ProjectConfig::default());
        }

        match serde_yaml::from_str::<ProjectConfig>(&raw) {
            Ok(config) => Ok(config),
            Err(_) => {
                warn!("event=config_load module=store status=error reason=invalid_yaml fallback=defaults");
                Ok(ProjectConfig::default())
            }
        }
    }

    fn save(&self, config: &ProjectConfig) -> ConfigResult<()> {
        let encoded = serde_yaml::to_string(config)?;
        fs::write(&self.path, encoded)?;
        Ok(())
    }
}
