//! Configuration file support for the TB Guide tools.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/tbguide/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub quiz: QuizConfig,

    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Quiz behavior configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Delay before auto-advancing to the next question, in seconds
    #[serde(default = "default_advance_delay_seconds")]
    pub advance_delay_seconds: u64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            advance_delay_seconds: default_advance_delay_seconds(),
        }
    }
}

/// Input clamps applied by the caller before the dosage engine.
///
/// The engine itself only rejects non-positive weights; these bounds are the
/// plausibility range the input surface warns about.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_min_weight_kg")]
    pub min_weight_kg: f64,

    #[serde(default = "default_max_weight_kg")]
    pub max_weight_kg: f64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            min_weight_kg: default_min_weight_kg(),
            max_weight_kg: default_max_weight_kg(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME")
            .expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("tbguide")
}

fn default_advance_delay_seconds() -> u64 {
    3
}

fn default_min_weight_kg() -> f64 {
    1.0
}

fn default_max_weight_kg() -> f64 {
    150.0
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.check()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME")
                .expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("tbguide").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    fn check(&self) -> Result<()> {
        if self.limits.min_weight_kg <= 0.0 {
            return Err(Error::Config(format!(
                "limits.min_weight_kg must be positive, got {}",
                self.limits.min_weight_kg
            )));
        }
        if self.limits.max_weight_kg < self.limits.min_weight_kg {
            return Err(Error::Config(format!(
                "limits.max_weight_kg {} is below limits.min_weight_kg {}",
                self.limits.max_weight_kg, self.limits.min_weight_kg
            )));
        }
        Ok(())
    }
}
