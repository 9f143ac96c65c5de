use std::fmt::Debug;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("configuration error: {0}")]
    InvalidConfig(String),
    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),
    #[error("data source error: {0}")]
    DataSource(#[source] anyhow::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("io error: {0}")]
    Io(#[source] anyhow::Error),
}

impl AppError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn data_source(err: impl Into<anyhow::Error>) -> Self {
        Self::DataSource(err.into())
    }

    pub fn io(err: impl Into<anyhow::Error>) -> Self {
        Self::Io(err.into())
    }

    /// Configuration problems are the caller's to fix; nothing is retried.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::InvalidConfig(_) | Self::MissingCredentials(_)
        )
    }
}
