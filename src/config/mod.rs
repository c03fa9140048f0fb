pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "yatri-ingest")]
#[command(about = "Ingest Yatri registration CSV exports into the participant store")]
pub struct CliConfig {
    /// CSV file to ingest
    pub file: String,

    /// Participant store REST endpoint (PostgREST base URL)
    #[arg(long, default_value = "")]
    pub endpoint: String,

    /// API key sent as apikey + bearer token
    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(long, default_value = "participants")]
    pub table: String,

    #[arg(long, default_value = "10")]
    pub max_upload_mib: u64,

    /// Validate only, do not touch the store
    #[arg(long)]
    pub dry_run: bool,

    /// How many invalid rows to print in the report
    #[arg(long, default_value = "10")]
    pub show_invalid: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn table(&self) -> &str {
        &self.table
    }

    fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mib * 1024 * 1024
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_file_extensions("file", &[self.file.clone()], &["csv"])?;
        validation::validate_range("max_upload_mib", self.max_upload_mib, 1, 1024)?;

        if !self.dry_run {
            validation::validate_url("endpoint", &self.endpoint)?;
            validation::validate_non_empty_string("table", &self.table)?;
        }

        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            file: "yatris.csv".to_string(),
            endpoint: "https://example.supabase.co/rest/v1".to_string(),
            api_key: None,
            table: "participants".to_string(),
            max_upload_mib: 10,
            dry_run: false,
            show_invalid: 10,
            verbose: false,
        }
    }

    #[test]
    fn test_valid_cli_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_non_csv_file_rejected() {
        let mut config = base_config();
        config.file = "yatris.xlsx".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_dry_run_does_not_require_endpoint() {
        let mut config = base_config();
        config.endpoint = String::new();
        config.dry_run = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_endpoint_rejected_without_dry_run() {
        let mut config = base_config();
        config.endpoint = String::new();
        assert!(config.validate().is_err());
    }
}
