use thiserror::Error;

/// Top-level error type shared by the RULAC report crates.
#[derive(Error, Debug)]
pub enum RulacError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<config::ConfigError> for RulacError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RulacError>;
