//! Error types for relnotes

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using RelnotesError
pub type Result<T> = std::result::Result<T, RelnotesError>;

/// Boxed error returned by user-supplied callbacks
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Code attached to errors raised when a preset or config cannot be resolved
pub const MODULE_NOT_FOUND: &str = "MODULE_NOT_FOUND";

/// Main error type for relnotes operations
#[derive(Debug, Error)]
pub enum RelnotesError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// Repository URL errors
    #[error(transparent)]
    Host(#[from] HostError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Named preset cannot be resolved
    #[error("Preset: \"{0}\" does not exist")]
    PresetNotFound(String),

    /// Custom config cannot be resolved
    #[error("Config: \"{0}\" does not exist")]
    ConfigNotFound(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// A configured regular expression does not compile
    #[error("Invalid pattern in {field}: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Identifying code for errors that callers match on
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::PresetNotFound(_) | Self::ConfigNotFound(_) => Some(MODULE_NOT_FOUND),
            _ => None,
        }
    }
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// A commit transform callback failed; the message is the callback's own
    #[error("{0}")]
    Transform(#[source] BoxError),

    /// Failed to render the document
    #[error("Failed to render release notes: {0}")]
    RenderFailed(String),
}

/// Repository URL resolution errors
#[derive(Debug, Error)]
pub enum HostError {
    /// URL could not be understood
    #[error("Unsupported repository URL: {0}")]
    UnsupportedUrl(String),

    /// URL has no owner/repository path
    #[error("Repository URL has no owner/name path: {0}")]
    MissingPath(String),
}

impl RelnotesError {
    /// Identifying code, if the underlying error carries one
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Config(e) => e.code(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_not_found_code() {
        let err: RelnotesError = ConfigError::PresetNotFound("unknown-preset".to_string()).into();
        assert_eq!(err.code(), Some(MODULE_NOT_FOUND));
        assert!(err.to_string().contains("Preset: \"unknown-preset\" does not exist"));
    }

    #[test]
    fn test_only_missing_modules_carry_a_code() {
        let err: RelnotesError = ConfigError::ConfigNotFound("./missing.yaml".to_string()).into();
        assert_eq!(err.code(), Some(MODULE_NOT_FOUND));

        let err: RelnotesError = ConfigError::InvalidValue {
            field: "writer_opts.hash_length".to_string(),
            message: "must be positive".to_string(),
        }
        .into();
        assert_eq!(err.code(), None);
    }

    #[test]
    fn test_transform_error_keeps_message() {
        let source: BoxError = "Test error".into();
        let err: RelnotesError = ChangelogError::Transform(source).into();
        assert_eq!(err.to_string(), "Test error");
        assert_eq!(err.code(), None);
    }
}
