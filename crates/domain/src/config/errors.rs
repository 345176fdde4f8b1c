use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    FileRead { path: String, reason: String },

    #[error("Failed to parse config file {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Invalid nameserver address: {0}")]
    InvalidNameserver(String),

    #[error("Invalid configuration value for {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}
