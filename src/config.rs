//! Application configuration.

use crate::consts::cli_consts::MAX_RANGE_DAYS;
use crate::environment::Environment;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Name of the directory under the user's home holding the config file.
const CONFIG_DIR: &str = ".wind-dashboard";

/// Returns the path of the config file, `~/.wind-dashboard/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home = home::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine the home directory",
        )
    })?;
    Ok(home.join(CONFIG_DIR).join("config.json"))
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the wind data API, if not the local default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Maximum selection span in days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_range_days: Option<u32>,
}

impl Config {
    pub fn new(api_url: Option<String>, max_range_days: Option<u32>) -> Self {
        Config {
            api_url,
            max_range_days,
        }
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the configuration if the file exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Removes the config file. A missing file is not an error.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        match fs::remove_file(path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    /// Overlays values from `other` that are set.
    pub fn merge(&mut self, other: Config) {
        if other.api_url.is_some() {
            self.api_url = other.api_url;
        }
        if other.max_range_days.is_some() {
            self.max_range_days = other.max_range_days;
        }
    }
}

/// Settings after combining command-line flags, environment and the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub environment: Environment,
    pub max_range_days: u32,
}

/// Resolves the API location and range limit.
///
/// The API URL comes from the flag, then `env_api_url`, then the config file,
/// and falls back to the local service.
pub fn resolve_settings(
    config: &Config,
    api_url_flag: Option<&str>,
    env_api_url: Option<&str>,
    max_range_days_flag: Option<u32>,
) -> Result<ResolvedSettings, String> {
    let environment = match api_url_flag
        .or(env_api_url)
        .or(config.api_url.as_deref())
        .filter(|s| !s.trim().is_empty())
    {
        Some(url) => url.parse::<Environment>()?,
        None => Environment::default(),
    };

    let max_range_days = max_range_days_flag
        .or(config.max_range_days)
        .unwrap_or(MAX_RANGE_DAYS);
    if max_range_days == 0 {
        return Err("The maximum range must be at least one day".to_string());
    }

    Ok(ResolvedSettings {
        environment,
        max_range_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    // Loading a saved configuration file should return the same configuration.
    fn test_load_recovers_saved_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config::new(Some("http://localhost:9000/api".to_string()), Some(14));
        config.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config, loaded_config);
    }

    #[test]
    // Saving a configuration should create directories if they don't exist.
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("config.json");

        let config = Config::new(None, Some(7));
        let result = config.save(&path);

        assert!(result.is_ok(), "Failed to save config");
        assert!(
            path.parent().unwrap().exists(),
            "Parent directory does not exist"
        );
    }

    #[test]
    // Loading an invalid JSON file should return an error.
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid_config.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        let result = Config::load_from_file(&path);
        assert!(result.is_err());
    }

    #[test]
    // An empty object is a valid config with nothing set.
    fn test_load_accepts_empty_object() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();

        assert_eq!(Config::load_from_file(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_or_default_and_clear() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());

        Config::new(None, Some(10)).save(&path).unwrap();
        Config::clear(&path).unwrap();
        assert!(!path.exists());
        // Clearing twice is fine.
        Config::clear(&path).unwrap();
    }

    #[test]
    fn test_merge_keeps_unset_values() {
        let mut config = Config::new(Some("http://a/api".to_string()), Some(10));
        config.merge(Config::new(None, Some(20)));
        assert_eq!(config.api_url.as_deref(), Some("http://a/api"));
        assert_eq!(config.max_range_days, Some(20));
    }

    #[test]
    fn test_resolve_settings_precedence() {
        let config = Config::new(Some("http://from-config/api".to_string()), Some(10));

        let resolved = resolve_settings(&config, None, None, None).unwrap();
        assert_eq!(resolved.environment.api_url(), "http://from-config/api");
        assert_eq!(resolved.max_range_days, 10);

        let resolved =
            resolve_settings(&config, None, Some("http://from-env/api"), Some(5)).unwrap();
        assert_eq!(resolved.environment.api_url(), "http://from-env/api");
        assert_eq!(resolved.max_range_days, 5);

        let resolved = resolve_settings(
            &config,
            Some("http://from-flag/api"),
            Some("http://from-env/api"),
            None,
        )
        .unwrap();
        assert_eq!(resolved.environment.api_url(), "http://from-flag/api");
    }

    #[test]
    fn test_resolve_settings_defaults() {
        let resolved = resolve_settings(&Config::default(), None, Some(""), None).unwrap();
        assert_eq!(resolved.environment, Environment::Local);
        assert_eq!(resolved.max_range_days, MAX_RANGE_DAYS);
    }

    #[test]
    fn test_resolve_settings_rejects_bad_values() {
        assert!(resolve_settings(&Config::default(), Some("not a url"), None, None).is_err());
        assert!(resolve_settings(&Config::default(), None, None, Some(0)).is_err());
    }
}
