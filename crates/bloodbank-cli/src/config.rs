use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use bloodbank_core::query::DEFAULT_CRITICAL_THRESHOLD_ML;
use bloodbank_core::storage::DEFAULT_STARTING_VOLUME_ML;
use bloodbank_core::{CorruptionPolicy, StoreOptions};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BloodBankConfig {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub inventory: InventorySection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StorageSection {
    pub path: Option<String>,
    #[serde(default)]
    pub on_corrupt: OnCorrupt,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InventorySection {
    #[serde(default = "default_starting_volume")]
    pub starting_volume_ml: u64,
    #[serde(default = "default_threshold")]
    pub critical_threshold_ml: u64,
}

impl Default for InventorySection {
    fn default() -> Self {
        Self {
            starting_volume_ml: DEFAULT_STARTING_VOLUME_ML,
            critical_threshold_ml: DEFAULT_CRITICAL_THRESHOLD_ML,
        }
    }
}

fn default_starting_volume() -> u64 {
    DEFAULT_STARTING_VOLUME_ML
}

fn default_threshold() -> u64 {
    DEFAULT_CRITICAL_THRESHOLD_ML
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OnCorrupt {
    #[default]
    Recover,
    Fail,
}

impl BloodBankConfig {
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            starting_volume: self.inventory.starting_volume_ml,
            on_corrupt: match self.storage.on_corrupt {
                OnCorrupt::Recover => CorruptionPolicy::Recover,
                OnCorrupt::Fail => CorruptionPolicy::Fail,
            },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_data_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("data.json"))
}

pub fn read_config(path: &Path) -> anyhow::Result<BloodBankConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("bloodbank"));
        }
    }
    Ok(home_dir()?.join(".config").join("bloodbank"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("bloodbank"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("bloodbank"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
