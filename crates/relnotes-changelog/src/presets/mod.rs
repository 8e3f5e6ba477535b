//! Built-in presets
//!
//! A preset is a complete [`ChangelogConfig`]: the commit grammar and the
//! grouping and rendering rules that go with it.

mod angular;
mod conventionalcommits;
mod eslint;
mod jshint;

use relnotes_core::config::{ChangelogConfig, PresetConfig};
use relnotes_core::ConfigError;
use tracing::debug;

/// Package-style prefix accepted in front of preset names
pub const PRESET_PREFIX: &str = "conventional-changelog-";

/// A named built-in preset
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    /// Lookup name
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    build: fn() -> ChangelogConfig,
}

impl Preset {
    /// Resolve the preset, applying `preset_config` when given
    pub fn config(&self, preset_config: Option<&PresetConfig>) -> ChangelogConfig {
        let mut config = (self.build)();
        if let Some(types) = preset_config.and_then(|p| p.types.clone()) {
            debug!(preset = self.name, count = types.len(), "replacing preset types");
            config.writer_opts.types = types;
        }
        config
    }
}

/// Registry of built-in presets
#[derive(Debug, Clone)]
pub struct PresetRegistry {
    presets: Vec<Preset>,
}

impl PresetRegistry {
    /// Create a registry with every built-in preset
    pub fn new() -> Self {
        Self {
            presets: vec![
                Preset {
                    name: "angular",
                    description: "Angular commit convention (default)",
                    build: angular::config,
                },
                Preset {
                    name: "conventionalcommits",
                    description: "Conventional Commits 1.0 with `!` breaking headers",
                    build: conventionalcommits::config,
                },
                Preset {
                    name: "eslint",
                    description: "ESLint `Tag: message` convention",
                    build: eslint::config,
                },
                Preset {
                    name: "jshint",
                    description: "JSHint `[[TYPE]] message` convention",
                    build: jshint::config,
                },
            ],
        }
    }

    /// Look up a preset by name (case-insensitive, optional package prefix)
    pub fn get(&self, name: &str) -> Option<&Preset> {
        let name = normalize_name(name);
        self.presets.iter().find(|p| p.name == name)
    }

    /// Look up a preset, failing with a not-found error
    pub fn resolve(&self, name: &str) -> Result<&Preset, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::PresetNotFound(name.to_string()))
    }

    /// All presets in registration order
    pub fn all(&self) -> &[Preset] {
        &self.presets
    }

    /// Names of all presets
    pub fn names(&self) -> Vec<&'static str> {
        self.presets.iter().map(|p| p.name).collect()
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase a preset name and drop the package prefix
pub fn normalize_name(name: &str) -> String {
    let name = name.trim().to_lowercase();
    match name.strip_prefix(PRESET_PREFIX) {
        Some(rest) => rest.to_string(),
        None => name,
    }
}
