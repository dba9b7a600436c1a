//! Application context for the Blood Bank CLI.
//!
//! Combines CLI arguments with the loaded configuration and resolves where
//! the data file lives. Precedence: `--data`/`BLOODBANK_DATA`, then the
//! config file, then the XDG default.

use std::path::{Path, PathBuf};

use bloodbank_core::storage::JsonFileBackend;
use bloodbank_core::{DocumentStore, LoadOutcome};

use crate::cli::Cli;
use crate::config::{default_config_path, default_data_path, read_config, BloodBankConfig};
use crate::errors::CliError;
use crate::ui::{badge, Badge, UiContext};

pub type Store = DocumentStore<JsonFileBackend>;

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: BloodBankConfig,
    data_path: PathBuf,
    ui: UiContext,
}

impl<'a> AppContext<'a> {
    /// Load configuration and resolve paths.
    ///
    /// A missing config file is fine when it was not named explicitly.
    pub fn new(cli: &'a Cli) -> anyhow::Result<Self> {
        let config = load_config(cli.config.as_deref())?;
        let data_path = resolve_data_path(cli.data.as_deref(), &config)?;
        Ok(Self {
            cli,
            config,
            data_path,
            ui: UiContext::detect(),
        })
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    pub fn threshold(&self) -> u64 {
        self.config.inventory.critical_threshold_ml
    }

    /// Open the document store, telling the operator if the data file had to
    /// be recovered.
    pub fn open_store(&self) -> anyhow::Result<Store> {
        let backend = JsonFileBackend::new(&self.data_path);
        let store = DocumentStore::open(backend, self.config.store_options())?;
        if let LoadOutcome::Recovered { backup } = store.load_outcome() {
            eprintln!(
                "{}",
                badge(
                    &self.ui,
                    Badge::Warn,
                    &format!(
                        "Data file {} was unreadable and has been reset. Previous contents saved to {}",
                        self.data_path.display(),
                        backup
                    ),
                )
            );
        }
        Ok(store)
    }
}

fn load_config(explicit: Option<&str>) -> anyhow::Result<BloodBankConfig> {
    match explicit {
        Some(path) => {
            let path = Path::new(path);
            if !path.exists() {
                return Err(CliError::not_found(
                    format!("Config file not found: {}", path.display()),
                    "Check --config or BLOODBANK_CONFIG.",
                )
                .into());
            }
            read_config(path)
        }
        None => {
            let path = default_config_path()?;
            if path.exists() {
                read_config(&path)
            } else {
                Ok(BloodBankConfig::default())
            }
        }
    }
}

fn resolve_data_path(flag: Option<&str>, config: &BloodBankConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = flag.filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = config.storage.path.as_deref() {
        return Ok(PathBuf::from(path));
    }
    default_data_path()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageSection;

    #[test]
    fn test_flag_wins_over_config() {
        let config = BloodBankConfig {
            storage: StorageSection {
                path: Some("/from/config.json".to_string()),
                ..StorageSection::default()
            },
            ..BloodBankConfig::default()
        };
        assert_eq!(
            resolve_data_path(Some("/from/flag.json"), &config).unwrap(),
            PathBuf::from("/from/flag.json")
        );
        assert_eq!(
            resolve_data_path(None, &config).unwrap(),
            PathBuf::from("/from/config.json")
        );
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        assert!(load_config(Some("/definitely/not/here/config.toml")).is_err());
    }
}
