//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "relnotes.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "relnotes.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".relnotes.yaml";

/// Alternative configuration file name (TOML)
pub const ALT_CONFIG_TOML: &str = ".relnotes.toml";

/// Name of the preset used when none is configured
pub const DEFAULT_PRESET: &str = "angular";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ALT_CONFIG_FILE,
        ALT_CONFIG_TOML,
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# relnotes configuration

# Built-in preset: angular, conventionalcommits, eslint or jshint
preset: angular

# Or a custom preset file holding parser_opts / writer_opts
# config: ./release-preset.yaml

link_compare: true
link_references: true

# Override path segments resolved from the repository URL
# issue: issues
# commit: commit

# Text or file placed around the generated notes
# header: ./NOTES_HEADER.md
# footer: "Thanks to all contributors!"

parser_opts:
  note_keywords:
    - BREAKING CHANGE
    - BREAKING-CHANGE

writer_opts:
  commits_sort:
    - scope
    - subject
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PluginConfig;

    #[test]
    fn test_template_parses() {
        let config: PluginConfig = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.preset.as_deref(), Some(DEFAULT_PRESET));
        assert_eq!(config.link_compare, Some(true));
        assert_eq!(
            config.writer_opts.commits_sort,
            Some(vec!["scope".to_string(), "subject".to_string()])
        );
    }
}
