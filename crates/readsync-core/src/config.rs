//! Config file handling and data directory resolution.

use std::fs;
use std::path::{Path, PathBuf};

use readsync_types::{AppConfig, ConfigError};

/// Filename for the application config inside the data dir.
const CONFIG_FILE: &str = "config.json";
/// Directory name used under the home directory by default.
const DATA_DIR: &str = ".readsync";

/// Resolve the data directory.
///
/// Priority:
/// 1. `READSYNC_DATA_DIR` environment variable (container deployments)
/// 2. `~/.readsync` (default)
pub fn resolve_data_dir() -> Result<PathBuf, ConfigError> {
    let data_dir = if let Ok(custom_dir) = std::env::var("READSYNC_DATA_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = dirs::home_dir()
            .ok_or_else(|| ConfigError::Io { message: "Cannot get home directory".to_string() })?;
        home.join(DATA_DIR)
    };

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir).map_err(|e| ConfigError::Io {
            message: format!("Failed to create data directory: {}", e),
        })?;
    }

    Ok(data_dir)
}

/// Load the application config; a missing file yields the defaults.
pub fn load_config(data_dir: &Path) -> Result<AppConfig, ConfigError> {
    let config_path = data_dir.join(CONFIG_FILE);

    if !config_path.exists() {
        return Ok(AppConfig::new());
    }

    let content = fs::read_to_string(&config_path)
        .map_err(|e| ConfigError::Io { message: format!("Failed to read config file: {}", e) })?;

    serde_json::from_str(&content)
        .map_err(|e| ConfigError::Parse { message: e.to_string() })
}

/// Save the application config atomically.
pub fn save_config(data_dir: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    let config_path = data_dir.join(CONFIG_FILE);
    let temp_path = data_dir.join(format!("{}.tmp", CONFIG_FILE));

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| ConfigError::Parse { message: e.to_string() })?;

    fs::write(&temp_path, content)
        .map_err(|e| ConfigError::Io { message: format!("Failed to write temp config: {}", e) })?;
    fs::rename(&temp_path, &config_path)
        .map_err(|e| ConfigError::Io { message: format!("Failed to save config: {}", e) })
}

/// Update specific fields in the config.
pub fn update_config<F>(data_dir: &Path, updater: F) -> Result<AppConfig, ConfigError>
where
    F: FnOnce(&mut AppConfig),
{
    let mut config = load_config(data_dir)?;
    updater(&mut config);
    save_config(data_dir, &config)?;
    Ok(config)
}
