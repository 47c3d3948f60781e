use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub aws: AwsConfig,
    pub report: ReportConfig,
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwsConfig {
    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Metric lookback window in days. Each day becomes one aggregated sample.
    pub lookback_days: u32,
}

/// Utilization thresholds applied uniformly to every compute instance.
///
/// Database classification reuses `cpu_percent` only; there are no
/// per-resource overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    pub cpu_percent: f64,
    pub network_bytes_per_sec: f64,
    pub disk_ops_per_sec: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aws: AwsConfig {
                region: "us-east-1".to_string(),
            },
            report: ReportConfig { lookback_days: 14 },
            thresholds: Thresholds {
                cpu_percent: 40.0,
                network_bytes_per_sec: 1_000_000.0,
                disk_ops_per_sec: 100.0,
            },
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            // Try .costctl.toml in current dir, then ~/.config/costctl/config.toml
            let local = PathBuf::from(".costctl.toml");
            if local.exists() {
                local
            } else {
                dirs::config_dir()
                    .map(|d| d.join("costctl").join("config.toml"))
                    .unwrap_or_else(|| PathBuf::from(".costctl.toml"))
            }
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
            let config: Config = toml::from_str(&content).with_context(|| {
                let mut err = format!("Failed to parse config: {}", config_path.display());
                err.push_str("\n  Common issues:");
                err.push_str("\n    - Invalid TOML syntax");
                err.push_str("\n    - Missing required fields");
                err.push_str("\n    - Incorrect value types");
                err.push_str("\n  Tip: Run 'costctl init' to create a new config file");
                err
            })?;
            Ok(config)
        } else {
            // Use defaults but warn if user explicitly provided a path
            if path.is_some() {
                eprintln!("WARNING: Config file not found: {}", config_path.display());
                eprintln!("   Using default configuration. Run 'costctl init' to create a config file.");
            }
            Ok(Config::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Reject threshold/window values the classifiers cannot work with.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.report.lookback_days == 0 {
            return Err(ConfigError::InvalidValue {
                field: "report.lookback_days".to_string(),
                reason: "must be at least 1 day".to_string(),
            });
        }
        if !self.thresholds.cpu_percent.is_finite() || self.thresholds.cpu_percent <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "thresholds.cpu_percent".to_string(),
                reason: "must be a positive number".to_string(),
            });
        }
        if !self.thresholds.network_bytes_per_sec.is_finite()
            || self.thresholds.network_bytes_per_sec <= 0.0
        {
            return Err(ConfigError::InvalidValue {
                field: "thresholds.network_bytes_per_sec".to_string(),
                reason: "must be a positive number".to_string(),
            });
        }
        if !self.thresholds.disk_ops_per_sec.is_finite() || self.thresholds.disk_ops_per_sec <= 0.0
        {
            return Err(ConfigError::InvalidValue {
                field: "thresholds.disk_ops_per_sec".to_string(),
                reason: "must be a positive number".to_string(),
            });
        }
        Ok(())
    }
}

pub fn init_config(output: &Path) -> Result<()> {
    let config = Config::default();
    config.save(output)?;
    println!("Created config file: {}", output.display());
    Ok(())
}
