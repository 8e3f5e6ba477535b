//! Presets command

use clap::Args;
use serde::Serialize;
use tracing::info;

use relnotes_changelog::PresetRegistry;
use relnotes_core::config::DEFAULT_PRESET;
use relnotes_core::RelnotesError;

use crate::cli::{output, Cli, OutputFormat};

/// List built-in presets
#[derive(Debug, Args)]
pub struct PresetsCommand {
    /// Print the resolved configuration of one preset
    #[arg(long, value_name = "NAME")]
    pub show: Option<String>,
}

#[derive(Debug, Serialize)]
struct PresetInfo {
    name: &'static str,
    description: &'static str,
    default: bool,
}

impl PresetsCommand {
    /// Execute the presets command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(show = ?self.show, "executing presets command");
        let registry = PresetRegistry::new();

        if let Some(name) = &self.show {
            let config = registry
                .resolve(name)
                .map_err(RelnotesError::from)?
                .config(None);
            let rendered = match cli.format {
                OutputFormat::Json => serde_json::to_string_pretty(&config)?,
                OutputFormat::Text => serde_yaml::to_string(&config)?,
            };
            println!("{}", rendered.trim_end());
            return Ok(());
        }

        let presets = preset_list(&registry);
        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&presets)?),
            OutputFormat::Text => {
                println!("{}", output::heading("Presets"));
                for preset in &presets {
                    println!(
                        "{}",
                        output::preset_row(preset.name, preset.description, preset.default)
                    );
                }
            }
        }

        Ok(())
    }
}

fn preset_list(registry: &PresetRegistry) -> Vec<PresetInfo> {
    registry
        .all()
        .iter()
        .map(|p| PresetInfo {
            name: p.name,
            description: p.description,
            default: p.name == DEFAULT_PRESET,
        })
        .collect()
}
