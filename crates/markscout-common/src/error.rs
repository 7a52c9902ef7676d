use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkscoutError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Security policy violation: {0}")]
    Security(String),
}

pub type Result<T> = std::result::Result<T, MarkscoutError>;
