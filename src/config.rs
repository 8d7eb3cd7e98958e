use std::fs;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LogConfig {
    /// Path of the activity log the bot appends to.
    #[serde(default = "LogConfig::default_path")]
    pub path: String,
}

impl LogConfig {
    fn default_path() -> String {
        "logs.json".to_string()
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChartConfig {
    /// Buckets per chart while the window is short enough for intra-day bars.
    #[serde(default = "ChartConfig::default_window_buckets")]
    pub window_buckets: usize,
    /// Windows longer than this many days switch to one bucket per day.
    #[serde(default = "ChartConfig::default_daily_threshold_days")]
    pub daily_threshold_days: u32,
}

impl ChartConfig {
    fn default_window_buckets() -> usize {
        24
    }
    fn default_daily_threshold_days() -> u32 {
        5
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            window_buckets: Self::default_window_buckets(),
            daily_threshold_days: Self::default_daily_threshold_days(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct AppConfig {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

impl AppConfig {
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        eprintln!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    eprintln!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
        }
        Self::default()
    }
}
