use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::errors::{AppError, Result};

pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub github: GithubConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(".")
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Config::builder()
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/default")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/local")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "GithubConfig::default_api_base")]
    pub api_base: String,
    #[serde(default = "GithubConfig::default_user_agent")]
    pub user_agent: String,
    #[serde(default = "GithubConfig::default_per_page")]
    pub per_page: u32,
    #[serde(default = "GithubConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base: Self::default_api_base(),
            user_agent: Self::default_user_agent(),
            per_page: Self::default_per_page(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl GithubConfig {
    fn default_api_base() -> String {
        "https://api.github.com/".to_string()
    }

    fn default_user_agent() -> String {
        "repo-miner".to_string()
    }

    const fn default_per_page() -> u32 {
        100
    }

    const fn default_timeout_secs() -> u64 {
        30
    }

    /// Explicit `github.token` wins, then the conventional `GITHUB_TOKEN` variable.
    pub fn resolved_token(&self) -> Result<String> {
        self.resolve_token_with(|key| std::env::var(key).ok())
    }

    fn resolve_token_with<F>(&self, lookup: F) -> Result<String>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        self.token
            .clone()
            .filter(|token| !token.trim().is_empty())
            .or_else(|| lookup(TOKEN_ENV).filter(|token| !token.trim().is_empty()))
            .ok_or(AppError::MissingCredentials(
                "GITHUB_TOKEN was not found; set it in the environment or a .env file",
            ))
    }

    /// GitHub rejects `per_page` outside 1..=100.
    pub fn page_size(&self) -> u32 {
        self.per_page.clamp(1, 100)
    }
}
