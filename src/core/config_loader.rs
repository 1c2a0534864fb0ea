//! Configuration file loader for publish-packages
//!
//! The config file is created from a bundled template on first run. That run
//! publishes nothing; the operator fills in the file for the next one.

use super::config::ConfigSettings;
use crate::core::error::ReleaseError;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Configuration file name, resolved against the working directory
pub const CONFIG_FILENAME: &str = "config.ini";

/// Template written when no config file exists
pub const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("../../resources/config.ini");

/// Result of loading the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedConfig {
    /// The file existed and was parsed
    Settings(ConfigSettings),
    /// The file was absent; the template was written to this path
    DefaultCreated(PathBuf),
}

impl LoadedConfig {
    /// Settings for this run, `None` when the template was just created
    pub fn settings(&self) -> Option<&ConfigSettings> {
        match self {
            Self::Settings(settings) => Some(settings),
            Self::DefaultCreated(_) => None,
        }
    }
}

/// Configuration file loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from `path`, creating it from the template if absent.
    ///
    /// A freshly created file is not read back in the same run.
    pub async fn load(path: &Path) -> Result<LoadedConfig, ReleaseError> {
        let exists = fs::try_exists(path)
            .await
            .map_err(|source| ReleaseError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;

        if !exists {
            Self::create_default(path).await?;
            log::info!("Created default config file {}", path.display());
            return Ok(LoadedConfig::DefaultCreated(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|source| ReleaseError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;

        let settings = ConfigSettings::parse(&content);
        log::debug!("Loaded config {}: {:?}", path.display(), settings);

        Ok(LoadedConfig::Settings(settings))
    }

    /// Write the bundled template verbatim to `path`
    pub async fn create_default(path: &Path) -> Result<(), ReleaseError> {
        fs::write(path, DEFAULT_CONFIG_TEMPLATE)
            .await
            .map_err(|source| ReleaseError::ConfigCreate {
                path: path.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Verbosity;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_creates_template() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);

        let loaded = ConfigLoader::load(&path).await.unwrap();

        assert_eq!(loaded, LoadedConfig::DefaultCreated(path.clone()));
        assert!(loaded.settings().is_none());
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, DEFAULT_CONFIG_TEMPLATE);
    }

    #[tokio::test]
    async fn test_second_run_reads_template() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);

        let _ = ConfigLoader::load(&path).await.unwrap();
        let loaded = ConfigLoader::load(&path).await.unwrap();
        let settings = loaded.settings().expect("template should load");

        assert!(!settings.has_api_key());
        assert_eq!(settings.source(), "https://api.nuget.org/v3/index.json");
        assert!(settings.skip_duplicate());
        assert!(settings.non_interactive());
        assert_eq!(settings.verbosity(), Verbosity::Normal);
    }

    #[tokio::test]
    async fn test_load_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "ApiKey=abc\nSource=https://feed\nA=1\nA=2\n").unwrap();

        let first = ConfigLoader::load(&path).await.unwrap();
        let second = ConfigLoader::load(&path).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.settings().unwrap().get("A"), Some("1"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unverifiable_path_is_not_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, "keep").unwrap();
        let path = blocker.join(CONFIG_FILENAME);

        let result = ConfigLoader::load(&path).await;

        assert!(matches!(result, Err(ReleaseError::ConfigRead { .. })));
        assert_eq!(std::fs::read_to_string(&blocker).unwrap(), "keep");
    }

    #[tokio::test]
    async fn test_create_default_into_missing_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join(CONFIG_FILENAME);

        let result = ConfigLoader::load(&path).await;
        assert!(matches!(result, Err(ReleaseError::ConfigCreate { .. })));
    }
}
