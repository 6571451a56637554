//! Error types for swmming

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for swmming operations
#[derive(Error, Debug)]
pub enum SwmmingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("{owner} references unknown {kind} '{name}'")]
    UnknownReference {
        owner: String,
        kind: String,
        name: String,
    },

    #[error("Duplicate {kind} name: {name}")]
    DuplicateName { kind: String, name: String },

    #[error("Project has {0} error(s); use --force to assemble anyway")]
    Analysis(usize),

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported project format: {0}")]
    UnsupportedFormat(String),

    #[error("Geospatial input error: {0}")]
    Geo(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for swmming operations
pub type Result<T> = std::result::Result<T, SwmmingError>;

impl SwmmingError {
    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid value error for a named field
    pub fn invalid_value(field: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Create an unknown reference error
    pub fn unknown_reference(
        owner: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::UnknownReference {
            owner: owner.into(),
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create a geospatial input error
    pub fn geo(msg: impl Into<String>) -> Self {
        Self::Geo(msg.into())
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}
