use crate::domain::ports::ConfigProvider;
use crate::utils::error::{IngestError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub store: StoreConfig,
    pub upload: Option<UploadConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub table: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub max_upload_mib: Option<u64>,
    pub show_invalid: Option<usize>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(IngestError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| IngestError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` placeholders with environment values so API keys
    /// stay out of checked-in config files.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        validation::validate_url("store.endpoint", &self.store.endpoint)?;

        if let Some(table) = &self.store.table {
            validation::validate_non_empty_string("store.table", table)?;
        }

        if let Some(mib) = self.upload.as_ref().and_then(|u| u.max_upload_mib) {
            validation::validate_range("upload.max_upload_mib", mib, 1, 1024)?;
        }

        Ok(())
    }

    pub fn show_invalid(&self) -> usize {
        self.upload
            .as_ref()
            .and_then(|u| u.show_invalid)
            .unwrap_or(10)
    }
}

impl ConfigProvider for TomlConfig {
    fn endpoint(&self) -> &str {
        &self.store.endpoint
    }

    fn api_key(&self) -> Option<&str> {
        self.store.api_key.as_deref()
    }

    fn table(&self) -> &str {
        self.store.table.as_deref().unwrap_or("participants")
    }

    fn max_upload_bytes(&self) -> u64 {
        self.upload
            .as_ref()
            .and_then(|u| u.max_upload_mib)
            .unwrap_or(10)
            * 1024
            * 1024
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
