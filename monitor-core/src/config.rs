use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::ConfigError;

pub const RANGE_PRESETS: [u32; 3] = [7, 30, 90];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Parameters of the synthetic dataset. Identical values reproduce an
/// identical dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_base_seed")]
    pub base_seed: u32,

    #[serde(default = "default_seed_stride")]
    pub seed_stride: u32,

    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// Last day of the window. Unset means today (UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_range_days")]
    pub default_range_days: u32,

    #[serde(default = "default_range_keyword_limit")]
    pub range_keyword_limit: usize,

    #[serde(default = "default_dashboard_keyword_limit")]
    pub dashboard_keyword_limit: usize,

    #[serde(default = "default_export_prefix")]
    pub export_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_base_seed() -> u32 {
    73
}

fn default_seed_stride() -> u32 {
    31
}

fn default_window_days() -> u32 {
    90
}

fn default_range_days() -> u32 {
    30
}

fn default_range_keyword_limit() -> usize {
    30
}

fn default_dashboard_keyword_limit() -> usize {
    40
}

fn default_export_prefix() -> String {
    "codex-sentiment".to_string()
}

fn default_log_filter() -> String {
    "sentiment_monitor=info,monitor_core=info,metrics_engine=info,insights=info,dashboard_service=info".to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_seed: default_base_seed(),
            seed_stride: default_seed_stride(),
            window_days: default_window_days(),
            end_date: None,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_range_days: default_range_days(),
            range_keyword_limit: default_range_keyword_limit(),
            dashboard_keyword_limit: default_dashboard_keyword_limit(),
            export_prefix: default_export_prefix(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl MonitorConfig {
    /// Loads the config from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                let content =
                    std::fs::read_to_string(path).map_err(|e| ConfigError::InvalidValue {
                        field: "path".to_string(),
                        value: format!("{} ({})", path.display(), e),
                    })?;
                debug!("Loaded configuration from {}", path.display());
                Self::from_toml(&content)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generation.window_days == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "generation.window_days must be at least 1".to_string(),
            });
        }
        if !RANGE_PRESETS.contains(&self.dashboard.default_range_days) {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.default_range_days".to_string(),
                value: self.dashboard.default_range_days.to_string(),
            });
        }
        if self.dashboard.range_keyword_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.range_keyword_limit".to_string(),
                value: "0".to_string(),
            });
        }
        if self.dashboard.dashboard_keyword_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.dashboard_keyword_limit".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}
