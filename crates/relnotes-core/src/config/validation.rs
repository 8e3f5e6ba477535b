//! Configuration validation

use regex::Regex;
use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::{ParserOverrides, PluginConfig, WriterOverrides};

/// Validate plugin configuration
pub fn validate_config(config: &PluginConfig) -> Result<()> {
    debug!("validating configuration");
    validate_parser(&config.parser_opts)?;
    validate_writer(&config.writer_opts)?;
    validate_segments(config)?;
    debug!("configuration validation passed");
    Ok(())
}

/// Compile a configured pattern, naming the field on failure
pub fn compile_pattern(field: &str, pattern: &str) -> std::result::Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        field: field.to_string(),
        source,
    })
}

fn validate_parser(parser: &ParserOverrides) -> Result<()> {
    let patterns = [
        ("parser_opts.header_pattern", &parser.header_pattern),
        ("parser_opts.breaking_header_pattern", &parser.breaking_header_pattern),
        ("parser_opts.revert_pattern", &parser.revert_pattern),
        ("parser_opts.merge_pattern", &parser.merge_pattern),
    ];
    for (field, pattern) in patterns {
        if let Some(pattern) = pattern {
            compile_pattern(field, pattern)?;
        }
    }

    if let Some(prefixes) = &parser.issue_prefixes {
        if prefixes.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "parser_opts.issue_prefixes".to_string(),
                message: "prefixes cannot be empty".to_string(),
            }
            .into());
        }
    }

    Ok(())
}

fn validate_writer(writer: &WriterOverrides) -> Result<()> {
    if writer.group_by.as_deref().is_some_and(str::is_empty) {
        return Err(ConfigError::InvalidValue {
            field: "writer_opts.group_by".to_string(),
            message: "group_by cannot be empty".to_string(),
        }
        .into());
    }

    if let Some(keys) = &writer.commits_sort {
        if keys.iter().any(|k| k.is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "writer_opts.commits_sort".to_string(),
                message: "sort keys cannot be empty".to_string(),
            }
            .into());
        }
    }

    if writer.hash_length == Some(0) {
        return Err(ConfigError::InvalidValue {
            field: "writer_opts.hash_length".to_string(),
            message: "must be greater than zero".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_segments(config: &PluginConfig) -> Result<()> {
    for (field, value) in [("issue", &config.issue), ("commit", &config.commit)] {
        if value.as_deref().is_some_and(|v| v.trim_matches('/').is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: "path segment cannot be empty".to_string(),
            }
            .into());
        }
    }
    Ok(())
}
