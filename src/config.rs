use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the remote store API
    pub endpoint: String,
    /// Project identifier sent with every request
    pub project_id: String,
    /// Server API key
    pub api_key: String,
    /// Database identifier holding the four collections
    pub database_id: String,
    /// File bucket for menu item images
    pub bucket_id: String,
    pub categories_collection: String,
    pub customizations_collection: String,
    pub menu_collection: String,
    pub menu_customizations_collection: String,
    /// Directory for temporarily cached image downloads
    pub cache_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost/v1".to_string(),
            project_id: "your-project-id".to_string(),
            api_key: String::new(),
            database_id: "your-database-id".to_string(),
            bucket_id: "images".to_string(),
            categories_collection: "categories".to_string(),
            customizations_collection: "customizations".to_string(),
            menu_collection: "menu".to_string(),
            menu_customizations_collection: "menu_customizations".to_string(),
            cache_dir: std::env::temp_dir().join("menuseed"),
        }
    }
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut config = Self::default();

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            config = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;
        }

        // Apply environment variable overrides
        if let Ok(endpoint) = std::env::var("MENUSEED_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Ok(project_id) = std::env::var("MENUSEED_PROJECT_ID") {
            config.project_id = project_id;
        }
        if let Ok(api_key) = std::env::var("MENUSEED_API_KEY") {
            config.api_key = api_key;
        }
        if let Ok(database_id) = std::env::var("MENUSEED_DATABASE_ID") {
            config.database_id = database_id;
        }
        if let Ok(bucket_id) = std::env::var("MENUSEED_BUCKET_ID") {
            config.bucket_id = bucket_id;
        }
        if let Ok(cache_dir) = std::env::var("MENUSEED_CACHE_DIR") {
            config.cache_dir = PathBuf::from(cache_dir);
        }

        Ok(config)
    }

    /// Default config file path: ~/.config/menuseed/config.yaml
    pub fn default_config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home)
            .join(".config")
            .join("menuseed")
            .join("config.yaml")
    }

    /// Copy of the config with the API key masked, for display.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if !config.api_key.is_empty() {
            config.api_key = "********".to_string();
        }
        config
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.endpoint, "http://localhost/v1");
        assert_eq!(config.categories_collection, "categories");
        assert_eq!(config.menu_customizations_collection, "menu_customizations");
        assert!(config.cache_dir.to_string_lossy().contains("menuseed"));
    }

    #[test]
    fn test_load_no_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.bucket_id, "images");
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "endpoint: https://store.example.com/v1").unwrap();
        writeln!(file, "project_id: fastbite").unwrap();
        writeln!(file, "bucket_id: menu-images").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.endpoint, "https://store.example.com/v1");
        assert_eq!(config.project_id, "fastbite");
        assert_eq!(config.bucket_id, "menu-images");
        // Unset fields keep their defaults
        assert_eq!(config.menu_collection, "menu");
    }

    #[test]
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "database_id: fromfile").unwrap();

        std::env::set_var("MENUSEED_DATABASE_ID", "fromenv");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.database_id, "fromenv");

        std::env::remove_var("MENUSEED_DATABASE_ID");
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_redacted_masks_api_key() {
        let config = Config {
            api_key: "standard_secret_key".to_string(),
            ..Config::default()
        };
        let redacted = config.redacted();
        assert_eq!(redacted.api_key, "********");
        assert_eq!(redacted.endpoint, config.endpoint);
    }
}
