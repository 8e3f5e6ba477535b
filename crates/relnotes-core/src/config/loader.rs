//! Configuration loading

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::{PluginConfig, PresetOverrides};
use super::validation::validate_config;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Yaml,
    Json,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::Toml,
            Some("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = Format::of(path);
    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

    let value = match format {
        Format::Toml => toml::from_str(&content).map_err(ConfigError::TomlError)?,
        Format::Yaml => serde_yaml::from_str(&content).map_err(ConfigError::YamlError)?,
        Format::Json => serde_json::from_str(&content).map_err(ConfigError::JsonError)?,
    };
    debug!(path = %path.display(), ?format, "parsed configuration file");
    Ok(value)
}

/// Load plugin configuration from a file
pub fn load_config(path: &Path) -> Result<PluginConfig> {
    info!(path = %path.display(), "loading config");
    let config: PluginConfig = parse_file(path)?;

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Load a custom preset file holding `parser_opts` and `writer_opts`
pub fn load_preset_file(path: &Path) -> Result<PresetOverrides> {
    info!(path = %path.display(), "loading custom preset");
    parse_file(path)
}

/// Find configuration file in directory or parent directories.
///
/// At each directory level the search checks:
///   1. `<dir>/<name>`          (e.g. `relnotes.toml`)
///   2. `<dir>/.github/<name>`  (e.g. `.github/relnotes.toml`)
///
/// The first match wins. Parents are walked until the filesystem root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.exists() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }

            let github_path = current.join(".github").join(name);
            if github_path.exists() {
                info!(path = %github_path.display(), "found config file in .github/");
                return Some(github_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration from directory (searching parent directories)
pub fn load_config_from_dir(dir: &Path) -> Result<(PluginConfig, PathBuf)> {
    let config_path = find_config(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;

    let config = load_config(&config_path)?;
    Ok((config, config_path))
}

/// Load configuration or use defaults when no file exists.
///
/// A file that exists but fails to parse or validate is still an error.
pub fn load_config_or_default(dir: &Path) -> Result<(PluginConfig, Option<PathBuf>)> {
    match find_config(dir) {
        Some(path) => Ok((load_config(&path)?, Some(path))),
        None => {
            warn!(dir = %dir.display(), "no config found, using defaults");
            Ok((PluginConfig::default(), None))
        }
    }
}

/// Resolve a header/footer value: the contents of the named file when it
/// exists relative to `cwd`, otherwise the value itself.
pub fn read_text_or_literal(value: &str, cwd: &Path) -> Result<String> {
    let candidate = cwd.join(value);
    if !value.contains('\n') && candidate.is_file() {
        debug!(path = %candidate.display(), "reading text from file");
        return Ok(std::fs::read_to_string(&candidate).map_err(ConfigError::Io)?);
    }
    Ok(value.to_string())
}
