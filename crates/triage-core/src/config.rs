use crate::errors::ConfigError;
use crate::model::Scenario;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_version", rename = "configVersion", alias = "version")]
    pub version: u32,
    #[serde(default = "default_db")]
    pub db: PathBuf,
    #[serde(default)]
    pub defaults: DisplayDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<Scenario>,
    #[serde(default = "default_true")]
    pub include_variants: bool,
}

impl Default for DisplayDefaults {
    fn default() -> Self {
        Self {
            scenario: None,
            include_variants: true,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            db: default_db(),
            defaults: DisplayDefaults::default(),
        }
    }
}

fn default_version() -> u32 {
    SUPPORTED_CONFIG_VERSION
}

fn default_db() -> PathBuf {
    PathBuf::from(".triage/triage.db")
}

fn default_true() -> bool {
    true
}

pub fn load_config(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;

    let mut ignored_keys = std::collections::HashSet::new();
    let deserializer = serde_yaml::Deserializer::from_str(&raw);

    // serde_ignored wrapper to capture unknown fields
    let mut cfg: DashboardConfig = serde_ignored::deserialize(deserializer, |path| {
        ignored_keys.insert(path.to_string());
    })
    .map_err(|e| ConfigError(format!("failed to parse YAML: {}", e)))?;

    // YAML anchors and extension keys are expected noise; anything else is
    // worth a warning.
    let meaningful_unknowns: Vec<_> = ignored_keys
        .iter()
        .filter(|k| !k.starts_with('_') && !k.starts_with("x-"))
        .collect();
    if !meaningful_unknowns.is_empty() {
        tracing::warn!(
            keys = ?meaningful_unknowns,
            "ignored unknown config fields in {}",
            path.display()
        );
    }

    if cfg.version != SUPPORTED_CONFIG_VERSION {
        return Err(ConfigError(format!(
            "unsupported config version {} (supported: {})",
            cfg.version, SUPPORTED_CONFIG_VERSION
        )));
    }

    normalize_paths(&mut cfg, path);
    Ok(cfg)
}

/// Load the config if the file exists, else fall back to defaults. Used for
/// the conventional `triage.yaml` lookup where absence is not an error.
pub fn load_or_default(path: &Path) -> Result<DashboardConfig, ConfigError> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(DashboardConfig::default())
    }
}

// Relative paths in the config resolve against the config file's directory,
// not the process cwd.
fn normalize_paths(cfg: &mut DashboardConfig, config_path: &Path) {
    if cfg.db.is_relative() {
        if let Some(dir) = config_path.parent() {
            cfg.db = dir.join(&cfg.db);
        }
    }
}
