//! Configuration
//!
//! Loaded from a JSON or YAML file. A missing file is replaced with the
//! defaults so the next run finds an editable copy.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::report::GeoPoint;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "PESTWATCH_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "pestwatch.json";
/// Label given to stored records that carry no category.
pub const DEFAULT_UNKNOWN_CATEGORY: &str = "Desconocida";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub stats: StatsOptions,
    pub map: MapOptions,
    pub submission: SubmissionOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsOptions {
    /// Display name used when a submitter has no name; `{id}` is replaced
    /// with the submitter id.
    pub fallback_user_label: String,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            fallback_user_label: "User ID {id}".to_string(),
        }
    }
}

impl StatsOptions {
    pub fn fallback_name(&self, submitter_id: &str) -> String {
        self.fallback_user_label.replace("{id}", submitter_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    pub default_center: GeoPoint,
    pub default_zoom: u8,
    /// Zoom used when the view is focused on one point.
    pub focus_zoom: u8,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            // Aguaray, Salta
            default_center: GeoPoint::new(-22.5694, -63.7556),
            default_zoom: 10,
            focus_zoom: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionOptions {
    pub category_catalog: Vec<String>,
    pub restrict_to_catalog: bool,
    /// Category for legacy records that arrive without one.
    pub unknown_category_label: String,
}

impl Default for SubmissionOptions {
    fn default() -> Self {
        Self {
            category_catalog: ["Dengue", "Zica", "Leishmaniasis", "Chikungunya"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            restrict_to_catalog: false,
            unknown_category_label: DEFAULT_UNKNOWN_CATEGORY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads `.env` (if any) and takes the path from `PESTWATCH_CONFIG`.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<WatchConfig> {
        if !self.path.exists() {
            let default = WatchConfig::default();
            self.save(&default).await?;
            info!("Wrote default configuration to {}", self.path.display());
            return Ok(default);
        }

        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read config file {}", self.path.display()))?;

        let config = match ConfigFormat::for_path(&self.path) {
            ConfigFormat::Yaml => serde_yaml::from_str(&content).context("Failed to parse YAML config")?,
            ConfigFormat::Json => serde_json::from_str(&content).context("Failed to parse JSON config")?,
        };
        Ok(config)
    }

    pub async fn save(&self, config: &WatchConfig) -> Result<()> {
        let content = match ConfigFormat::for_path(&self.path) {
            ConfigFormat::Yaml => serde_yaml::to_string(config)?,
            ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        };
        fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write config file {}", self.path.display()))?;
        Ok(())
    }
}
