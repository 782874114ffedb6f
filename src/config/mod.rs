pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::Credentials;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use toml_config::FileConfig;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_VIEWPORT_ROWS: usize = 20;
pub const MAX_VIEWPORT_ROWS: usize = 500;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, clap::Parser)]
#[command(name = "small-chat")]
#[command(about = "Terminal client for the chat server")]
pub struct CliConfig {
    #[arg(long, help = "Chat server URL [default: http://127.0.0.1:5000]")]
    pub base_url: Option<String>,

    #[arg(long)]
    pub username: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    #[arg(long, help = "Create the account instead of logging in")]
    pub signup: bool,

    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Height of the transcript viewport in rows [default: 20]")]
    pub viewport_rows: Option<usize>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

/// Settings after merging the config file with command line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    pub base_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub signup: bool,
    pub viewport_rows: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: None,
            password: None,
            signup: false,
            viewport_rows: DEFAULT_VIEWPORT_ROWS,
        }
    }
}

impl ChatConfig {
    pub fn from_file_config(file: &FileConfig) -> Self {
        let defaults = Self::default();
        Self {
            base_url: file
                .base_url()
                .map(str::to_string)
                .unwrap_or(defaults.base_url),
            username: file.username().map(str::to_string),
            password: file.password().map(str::to_string),
            signup: false,
            viewport_rows: file.viewport_rows().unwrap_or(defaults.viewport_rows),
        }
    }

    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file_config(&FileConfig::from_file(path)?),
            None => Self::default(),
        };

        if let Some(base_url) = &cli.base_url {
            config.base_url = base_url.clone();
        }
        if cli.username.is_some() {
            config.username = cli.username.clone();
        }
        if cli.password.is_some() {
            config.password = cli.password.clone();
        }
        if let Some(rows) = cli.viewport_rows {
            config.viewport_rows = rows;
        }
        config.signup = cli.signup;

        Ok(config)
    }

    /// Credentials to authenticate with, if a username is configured.
    pub fn credentials(&self) -> Result<Option<Credentials>> {
        let Some(username) = &self.username else {
            return Ok(None);
        };
        let password = validate_required_field("password", &self.password)?;
        Ok(Some(Credentials {
            username: username.clone(),
            password: password.clone(),
        }))
    }
}

impl Validate for ChatConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_range("viewport_rows", self.viewport_rows, 1, MAX_VIEWPORT_ROWS)?;

        if let Some(username) = &self.username {
            validate_non_empty_string("username", username)?;
            validate_required_field("password", &self.password)?;
        } else if self.signup {
            validate_required_field("username", &self.username)?;
        }

        Ok(())
    }
}

impl ConfigProvider for ChatConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn viewport_rows(&self) -> usize {
        self.viewport_rows
    }
}
