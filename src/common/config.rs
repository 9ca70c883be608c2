use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global CloudSweep configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default detection methods for `dup` when none are given
    #[serde(default = "default_methods")]
    pub default_methods: Vec<String>,

    /// Default size tolerance percentage (0-100)
    #[serde(default)]
    pub size_tolerance: f64,

    /// Default deletion strategy
    #[serde(default = "default_strategy")]
    pub delete_strategy: String,

    /// Recurse into subdirectories by default
    #[serde(default)]
    pub recursive: bool,

    /// Only consider image files by default
    #[serde(default)]
    pub image_only: bool,
}

fn default_methods() -> Vec<String> {
    vec!["content".to_string()]
}
fn default_strategy() -> String {
    "all".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_methods: default_methods(),
            size_tolerance: 0.0,
            delete_strategy: default_strategy(),
            recursive: false,
            image_only: false,
        }
    }
}

impl Config {
    /// Get the CloudSweep data directory (~/.cloudsweep)
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".cloudsweep")
    }

    /// Get the config file path. `CLOUDSWEEP_CONFIG` overrides the
    /// default location; tests point it at a scratch file so they never
    /// read the developer's real config.
    pub fn config_path() -> PathBuf {
        match std::env::var_os("CLOUDSWEEP_CONFIG") {
            Some(path) => PathBuf::from(path),
            None => Self::data_dir().join("config.toml"),
        }
    }

    /// Load config from file, or create default if not exists
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        let dir = path.parent().unwrap();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config dir: {}", dir.display()))?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Initialize the CloudSweep data directory
    pub fn init_dirs() -> Result<()> {
        std::fs::create_dir_all(Self::data_dir())
            .with_context(|| format!("Failed to create directory: {}", Self::data_dir().display()))?;
        Ok(())
    }
}
