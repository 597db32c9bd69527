use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    domain::filter::Interval,
    errors::StoreError,
    ledger::recurring::{ProjectionOptions, DEFAULT_LOOKAHEAD_YEARS, MAX_EXPANSION_ITERATIONS},
};

/// User-tunable engine settings persisted as `config/config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chart bucket width used when a saved filter has none.
    pub default_interval: Interval,
    pub expansion_cap: usize,
    pub lookahead_years: i32,
    /// `tracing` directive applied on top of `RUST_LOG`.
    pub log_directive: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_interval: Interval::Monthly,
            expansion_cap: MAX_EXPANSION_ITERATIONS,
            lookahead_years: DEFAULT_LOOKAHEAD_YEARS,
            log_directive: "fintrack_core=info".into(),
        }
    }
}

impl Config {
    pub fn projection_options(&self) -> ProjectionOptions {
        ProjectionOptions {
            max_iterations: self.expansion_cap,
            lookahead_years: self.lookahead_years,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, StoreError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, StoreError> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    /// Reads the stored config, or the defaults when none was saved yet.
    pub fn load(&self) -> Result<Config, StoreError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        let config = manager.load().expect("load");
        assert_eq!(config, Config::default());
        assert_eq!(config.projection_options(), ProjectionOptions::default());
    }

    #[test]
    fn save_then_load() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        let config = Config {
            default_interval: Interval::Yearly,
            expansion_cap: 50,
            ..Config::default()
        };
        manager.save(&config).expect("save");
        assert!(manager.path().ends_with("config/config.json"));
        assert_eq!(manager.load().expect("load"), config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        fs::write(manager.path(), r#"{"lookahead_years": 3}"#).expect("write");
        let config = manager.load().expect("load");
        assert_eq!(config.lookahead_years, 3);
        assert_eq!(config.expansion_cap, MAX_EXPANSION_ITERATIONS);
    }
}
