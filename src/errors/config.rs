use std::env::VarError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The variable is set but not readable (e.g. not unicode)
    #[error("Environment variable error: {0}")]
    EnvVarError(#[from] VarError),

    /// The value could not be parsed into the expected type
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The value parsed but is outside what the service accepts
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
