use crate::core::score::{MAX_WEIGHT, SusceptibilityClass};
use crate::core::table::{Factor, FactorTable};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "hazardscore.toml";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
    table: FactorTable,
}

impl LoadedConfig {
    fn new(config: Config, source: Option<PathBuf>) -> Self {
        let table = if config.factors.is_empty() {
            FactorTable::landslide().clone()
        } else {
            FactorTable::new(config.factors.clone())
        };

        Self {
            config,
            source,
            table,
        }
    }

    /// Factor table in effect: the configured one, or the built-in landslide table.
    pub fn table(&self) -> &FactorTable {
        &self.table
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub factors: Vec<Factor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub default_weight: u8,
    pub json: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_at: Option<SusceptibilityClass>,
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_weight: 3,
            json: false,
            fail_at: None,
            log_level: "warn".to_string(),
        }
    }
}

pub fn load_config(cli_config_path: Option<&Path>, cwd: &Path) -> Result<LoadedConfig> {
    if let Some(path) = cli_config_path {
        if !path.exists() {
            bail!(
                "config file not found at {} (passed with --config)",
                path.display()
            );
        }

        return Ok(LoadedConfig::new(read_config(path)?, Some(path.to_path_buf())));
    }

    let local_path = cwd.join(CONFIG_FILE_NAME);
    if local_path.exists() {
        return Ok(LoadedConfig::new(read_config(&local_path)?, Some(local_path)));
    }

    Ok(LoadedConfig::new(Config::default(), None))
}

pub fn write_default_config(path: &Path, with_table: bool) -> Result<()> {
    if path.exists() {
        bail!(
            "refusing to overwrite existing config file: {}",
            path.display()
        );
    }

    let content = default_config_toml(with_table)?;
    fs::write(path, content).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

/// Serialized defaults. With `with_table` the built-in factors are written out
/// so they can be edited in place.
pub fn default_config_toml(with_table: bool) -> Result<String> {
    let mut config = Config::default();
    if with_table {
        config.factors = FactorTable::landslide().factors().to_vec();
    }
    toml::to_string_pretty(&config).context("failed to serialize default config")
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading config file {}", path.display()))?;
    let config = toml::from_str::<Config>(&content)
        .with_context(|| format!("failed parsing config file {}", path.display()))?;
    validate(&config).with_context(|| format!("invalid config file {}", path.display()))?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.general.default_weight > MAX_WEIGHT {
        bail!(
            "general.default_weight {} exceeds maximum weight {}",
            config.general.default_weight,
            MAX_WEIGHT
        );
    }
    Ok(())
}
