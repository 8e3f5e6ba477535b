//! Generate command

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use tracing::{debug, info};

use relnotes_changelog::{
    link_context, ChangelogFormatter, FormatterRegistry, ReleaseNotesGenerator,
};
use relnotes_core::config::{load_config_or_default, PluginConfig};
use relnotes_core::{RawCommit, ReleaseInfo};

use crate::cli::{output, Cli, OutputFormat};

/// Generate release notes from a list of commits
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// JSON file holding `[{"hash", "message"}]`; `-` reads stdin
    #[arg(long, value_name = "FILE", default_value = "-")]
    pub commits: String,

    /// Version being released
    #[arg(long = "release-version", value_name = "VERSION")]
    pub release_version: String,

    /// Tag (or commit) of the last release
    #[arg(long, value_name = "TAG")]
    pub previous_tag: Option<String>,

    /// Tag (or commit) of this release
    #[arg(long, value_name = "TAG")]
    pub current_tag: Option<String>,

    /// Remote URL of the repository
    #[arg(long, value_name = "URL", env = "RELNOTES_REPOSITORY_URL")]
    pub repository_url: Option<String>,

    /// Built-in preset
    #[arg(long)]
    pub preset: Option<String>,

    /// Built-in preset name or custom preset file
    #[arg(long)]
    pub config: Option<String>,

    /// Host used in links (overrides the repository URL's host)
    #[arg(long)]
    pub host: Option<String>,

    /// Issue path segment
    #[arg(long)]
    pub issue: Option<String>,

    /// Commit path segment
    #[arg(long)]
    pub commit: Option<String>,

    /// Do not link the version heading to a comparison
    #[arg(long)]
    pub no_link_compare: bool,

    /// Render commit hashes and issues without links
    #[arg(long)]
    pub no_link_references: bool,

    /// Header text or file
    #[arg(long)]
    pub header: Option<String>,

    /// Footer text or file
    #[arg(long)]
    pub footer: Option<String>,

    /// Release title shown after the version
    #[arg(long)]
    pub title: Option<String>,

    /// Release date (defaults to today)
    #[arg(long, value_name = "YYYY-MM-DD", conflicts_with = "no_date")]
    pub date: Option<String>,

    /// Leave the date out of the heading
    #[arg(long)]
    pub no_date: bool,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl GenerateCommand {
    /// Execute the generate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(version = %self.release_version, commits = %self.commits, "executing generate command");
        let cwd = std::env::current_dir()?;

        let (mut plugin, config_path) = load_config_or_default(&cwd)?;
        if let Some(path) = &config_path {
            if cli.verbose && !cli.quiet {
                output::info(&format!(
                    "Using configuration {}",
                    output::path_style().apply_to(path.display())
                ));
            }
        }
        plugin.merge(self.overrides());

        let generator = ReleaseNotesGenerator::from_plugin_config(&plugin, &cwd)?;
        let formatter = self.select_formatter(
            cli.format,
            &FormatterRegistry::new(generator.writer_options()),
        );
        debug!(formatter = formatter.name(), "formatter selected");
        let generator = generator.with_shared_formatter(formatter);

        let commits = read_commits(&self.commits, &cwd)?;
        debug!(count = commits.len(), "commits loaded");

        let context = link_context(&plugin, &self.release_info());
        let document = generator.build(&context, &commits)?;
        let notes = generator.format(&document)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &notes)
                    .with_context(|| format!("writing {}", path.display()))?;
                if !cli.quiet {
                    output::success(&format!(
                        "Release notes for {} written to {} ({} commits in {} sections)",
                        output::version_style().apply_to(&self.release_version),
                        output::path_style().apply_to(path.display()),
                        document.commit_count(),
                        document.sections.len()
                    ));
                }
            }
            None => print!("{}", notes),
        }

        Ok(())
    }

    /// `--format json` wins; otherwise the output file's extension decides
    fn select_formatter(
        &self,
        format: OutputFormat,
        registry: &FormatterRegistry,
    ) -> Arc<dyn ChangelogFormatter> {
        match (format, &self.output) {
            (OutputFormat::Json, _) => registry
                .get("json")
                .unwrap_or_else(|| registry.default_formatter()),
            (OutputFormat::Text, Some(path)) => registry.for_path(path),
            (OutputFormat::Text, None) => registry.default_formatter(),
        }
    }

    /// Plugin config holding the values given on the command line
    fn overrides(&self) -> PluginConfig {
        PluginConfig {
            preset: self.preset.clone(),
            config: self.config.clone(),
            host: self.host.clone(),
            issue: self.issue.clone(),
            commit: self.commit.clone(),
            link_compare: self.no_link_compare.then_some(false),
            link_references: self.no_link_references.then_some(false),
            header: self.header.clone(),
            footer: self.footer.clone(),
            ..Default::default()
        }
    }

    fn release_info(&self) -> ReleaseInfo {
        let date = if self.no_date {
            None
        } else {
            Some(
                self.date
                    .clone()
                    .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string()),
            )
        };

        ReleaseInfo {
            version: self.release_version.clone(),
            previous_tag: self.previous_tag.clone(),
            current_tag: self.current_tag.clone(),
            repository_url: self.repository_url.clone(),
            title: self.title.clone(),
            date,
        }
    }
}

/// Read commits from a JSON file, or stdin for `-`
fn read_commits(source: &str, cwd: &Path) -> anyhow::Result<Vec<RawCommit>> {
    let content = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading commits from stdin")?;
        buf
    } else {
        let path = cwd.join(source);
        std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?
    };

    serde_json::from_str(&content).context("commits must be a JSON array of {hash, message}")
}
