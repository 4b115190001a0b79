//! Настройки из TOML. Отсутствующие ключи берутся по умолчанию.

use crate::{error::Result, store::ANONYMOUS_USER};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub store_path: PathBuf,
    pub currency: String,
    pub default_user: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(".data/budgets.json"),
            currency: "KSh".into(),
            default_user: ANONYMOUS_USER.into(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), store = %cfg.store_path.display(), "loaded config");
        Ok(cfg)
    }
}
