use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Overrides the platform data directory for the persisted shelf.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_endpoint() -> String {
    "https://www.omdbapi.com/".to_string()
}

impl Config {
    pub fn new(api_key: String, endpoint: Option<String>) -> Self {
        Self {
            catalog: CatalogConfig {
                endpoint: endpoint.unwrap_or_else(default_endpoint),
                api_key,
            },
            storage: StorageConfig::default(),
        }
    }

    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.catalog.api_key.is_empty() || self.catalog.api_key == "YOUR_API_KEY" {
            return Err(anyhow::anyhow!("Catalog api_key is not configured"));
        }
        if self.catalog.endpoint.is_empty() {
            return Err(anyhow::anyhow!("Catalog endpoint cannot be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config::new("test_key".to_string(), None);

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.catalog.api_key, "test_key");
        assert_eq!(loaded.catalog.endpoint, "https://www.omdbapi.com/");
        assert!(loaded.storage.data_dir.is_none());
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::new("YOUR_API_KEY".to_string(), None);
        assert!(config.validate().is_err());

        config.catalog.api_key = "real_key".to_string();
        assert!(config.validate().is_ok());

        config.catalog.endpoint = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_endpoint_defaults_when_missing() {
        let toml_str = r#"
            [catalog]
            api_key = "abc123"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.catalog.endpoint, "https://www.omdbapi.com/");
    }
}
