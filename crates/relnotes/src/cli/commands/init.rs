//! Init command

use std::path::PathBuf;

use clap::Args;
use console::style;
use dialoguer::{Confirm, Select};
use tracing::info;

use relnotes_core::config::{PluginConfig, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_YAML};

use crate::cli::{output, Cli};

/// Write a starter relnotes configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Use defaults without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, "executing init command");
        let cwd = std::env::current_dir()?;
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_YAML));

        if config_path.exists() && !self.force {
            if self.yes {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                println!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        let format = if self.yes {
            "yaml"
        } else {
            let formats = ["yaml", "toml"];
            let selection = Select::new()
                .with_prompt("Configuration format")
                .items(&formats)
                .default(0)
                .interact()?;
            formats[selection]
        };

        let config_path = target_path(config_path, format);
        std::fs::write(&config_path, render_template(format)?)?;

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                output::path_style().apply_to(config_path.display())
            ));
            println!();
            println!("Next steps:");
            println!(
                "  1. Edit {} to pick a preset and link settings",
                config_path.display()
            );
            println!(
                "  2. Run {} to list the built-in presets",
                style("relnotes presets").cyan()
            );
            println!(
                "  3. Run {} to render your first notes",
                style("relnotes generate --release-version 1.0.0 --commits commits.json").cyan()
            );
        }

        Ok(())
    }
}

/// Swap a `.yaml` extension for `.toml` when TOML was chosen
fn target_path(path: PathBuf, format: &str) -> PathBuf {
    if format == "toml" && path.extension().is_some_and(|e| e == "yaml") {
        path.with_extension("toml")
    } else {
        path
    }
}

fn render_template(format: &str) -> anyhow::Result<String> {
    if format == "toml" {
        let config: PluginConfig = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE)?;
        Ok(toml::to_string_pretty(&config)?)
    } else {
        Ok(DEFAULT_CONFIG_TEMPLATE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relnotes_core::config::DEFAULT_PRESET;

    #[test]
    fn test_target_path_follows_format() {
        let path = PathBuf::from("relnotes.yaml");
        assert_eq!(target_path(path.clone(), "toml"), PathBuf::from("relnotes.toml"));
        assert_eq!(target_path(path.clone(), "yaml"), path);
        assert_eq!(
            target_path(PathBuf::from("notes.cfg"), "toml"),
            PathBuf::from("notes.cfg")
        );
    }

    #[test]
    fn test_toml_template_keeps_settings() {
        let rendered = render_template("toml").unwrap();
        let config: PluginConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(config.preset.as_deref(), Some(DEFAULT_PRESET));
        assert_eq!(config.link_references, Some(true));
    }

    #[test]
    fn test_yaml_template_is_verbatim() {
        assert_eq!(render_template("yaml").unwrap(), DEFAULT_CONFIG_TEMPLATE);
    }
}
