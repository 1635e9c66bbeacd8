use super::toml_config::{ApiConfig, TomlConfig};
use crate::domain::model::CaseConvention;
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "storefront-api")]
#[command(about = "Storefront backend client with camelCase/snake_case key bridging")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Backend base URL (overrides config and API_URL)")]
    pub base_url: Option<String>,

    #[arg(long, global = true, help = "Request timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Rewrite the keys of a JSON document
    Convert {
        #[arg(long, help = "Target convention: snake or camel")]
        to: CaseConvention,

        #[arg(long, help = "JSON file to read (stdin when omitted)")]
        input: Option<PathBuf>,
    },
    /// Fetch a store by id
    Store { store_id: String },
    /// Search the items of a store
    Items { store_id: String, keyword: String },
    /// List counties
    Counties,
    /// List districts
    Districts,
}

impl CliConfig {
    /// 合併設定檔、環境變數與命令列參數
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => {
                let base_url = std::env::var("API_URL").map_err(|_| ApiError::ConfigError {
                    message: "No backend configured: pass --config, --base-url or set API_URL"
                        .to_string(),
                });
                match (&self.base_url, base_url) {
                    (Some(url), _) => TomlConfig::new(ApiConfig::new(url.clone())),
                    (None, Ok(url)) => TomlConfig::new(ApiConfig::new(url)),
                    (None, Err(e)) => return Err(e),
                }
            }
        };

        if let Some(url) = &self.base_url {
            config.api.base_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.api.timeout_seconds = Some(timeout);
        }

        config.validate()?;
        Ok(config)
    }
}
