//! Configuration loading and root folder resolution
//!
//! Bootstrap configuration is intentionally small: where the durable store
//! lives and how verbosely to log. Everything else is static data compiled
//! into the engine.
//!
//! # Root Folder Priority
//!
//! 1. `PWC_ROOT_FOLDER` environment variable
//! 2. `PWC_ROOT` environment variable
//! 3. `root_folder` key of the TOML config file
//! 4. OS-dependent compiled default
//!
//! A missing or unparseable config file is never fatal: the resolver logs a
//! warning and falls through to the next tier.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Primary root folder environment variable
pub const ROOT_FOLDER_ENV: &str = "PWC_ROOT_FOLDER";

/// Alternative root folder environment variable
pub const ROOT_ENV: &str = "PWC_ROOT";

/// Directory name used under the platform config/data directories
pub const APP_DIR_NAME: &str = "pathway-composer";

/// Database file name inside the root folder
pub const DATABASE_FILE_NAME: &str = "pathways.db";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Root folder holding the pathway database (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_folder: Option<PathBuf>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Compiled-in defaults used when nothing else is configured
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl CompiledDefaults {
    /// Defaults for the platform this binary was compiled for
    pub fn for_current_platform() -> Self {
        Self {
            root_folder: default_root_folder(),
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/pathway-composer
        dirs::data_local_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("/var/lib").join(APP_DIR_NAME))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/pathway-composer
        dirs::data_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support").join(APP_DIR_NAME))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\pathway-composer
        dirs::data_local_dir()
            .map(|d| d.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData").join(APP_DIR_NAME))
    } else {
        PathBuf::from("./pathway_composer_data")
    }
}

/// Resolves the root folder for a named module
pub struct RootFolderResolver {
    module_name: String,
    config_file: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            config_file: None,
        }
    }

    /// Use an explicit TOML file instead of searching the platform config dir
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Resolve the root folder. Never fails; falls back to compiled defaults.
    pub fn resolve(&self) -> PathBuf {
        for var in [ROOT_FOLDER_ENV, ROOT_ENV] {
            if let Ok(path) = std::env::var(var) {
                if !path.is_empty() {
                    info!("Root folder: {} (from {})", path, var);
                    return PathBuf::from(path);
                }
            }
        }

        if let Some(config_path) = self.config_file_path() {
            match load_toml_config(&config_path) {
                Ok(config) => {
                    if let Some(root) = config.root_folder {
                        info!("Root folder: {} (from {})", root.display(), config_path.display());
                        return root;
                    }
                }
                Err(e) => warn!("Ignoring config file {}: {}", config_path.display(), e),
            }
        }

        let root = CompiledDefaults::for_current_platform().root_folder;
        debug!("Root folder: {} (compiled default)", root.display());
        root
    }

    /// Config file to consult: explicit override, then `<module>.toml`,
    /// then the shared `config.toml`
    fn config_file_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config_file {
            return Some(path.clone());
        }

        let dir = dirs::config_dir()?.join(APP_DIR_NAME);
        [format!("{}.toml", self.module_name), "config.toml".to_string()]
            .into_iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }
}

/// Creates the root folder and locates files inside it
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }

    /// Create the root folder (and parents) if missing. Idempotent.
    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_folder.exists() {
            std::fs::create_dir_all(&self.root_folder)?;
            info!("Created root folder: {}", self.root_folder.display());
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE_NAME)
    }

    pub fn database_exists(&self) -> bool {
        self.database_path().exists()
    }
}

/// Read and parse a TOML bootstrap config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write a TOML config file atomically (temp file + rename)
pub fn write_toml_config(config: &TomlConfig, target: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut temp_name = target.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    std::fs::write(&temp_path, content)?;
    if let Err(e) = std::fs::rename(&temp_path, target) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e.into());
    }

    debug!("Wrote config file {}", target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(LoggingConfig::default().level, "info");
    }

    #[test]
    fn test_default_root_folder_ends_with_app_dir() {
        let folder = default_root_folder();
        assert!(!folder.as_os_str().is_empty());
        assert!(folder.ends_with(APP_DIR_NAME) || folder.ends_with("pathway_composer_data"));
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
    }
}
