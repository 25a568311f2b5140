// ==========================================
// Substitute Planner - Configuration Manager
// ==========================================
// Small JSON config file in the per-user data directory; the binary
// loads it at startup and writes defaults on first run.
// ==========================================

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application directory name under the platform data dir.
const APP_DIR_NAME: &str = "substitute-planner";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite database file path.
    pub db_path: String,
    /// Human-readable school name, used only for display surfaces.
    pub school_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path().to_string_lossy().into_owned(),
            school_name: "School".to_string(),
        }
    }
}

/// Platform data directory for this application, falling back to the
/// current directory when the platform offers none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

pub fn default_db_path() -> PathBuf {
    default_data_dir().join("planner.db")
}

pub fn default_config_path() -> PathBuf {
    default_data_dir().join("config.json")
}

pub struct ConfigManager;

impl ConfigManager {
    /// Load the config file, creating it with defaults when missing.
    pub fn load_or_init(path: &Path) -> Result<AppConfig> {
        if path.exists() {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            let config: AppConfig = serde_json::from_str(&raw)
                .with_context(|| format!("parsing config file {}", path.display()))?;
            Ok(config)
        } else {
            let config = AppConfig::default();
            Self::save(path, &config)?;
            Ok(config)
        }
    }

    pub fn save(path: &Path, config: &AppConfig) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(config)?;
        fs::write(path, raw)
            .with_context(|| format!("writing config file {}", path.display()))?;
        Ok(())
    }
}
