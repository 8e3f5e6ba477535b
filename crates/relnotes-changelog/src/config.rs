//! Resolving plugin configuration into changelog options and link context

use std::path::Path;

use relnotes_core::config::{load_preset_file, read_text_or_literal, ChangelogConfig, PluginConfig};
use relnotes_core::{
    resolve_repository_url, ConfigError, LinkContext, ReleaseInfo, Result,
};
use tracing::{debug, info, warn};

use crate::presets::{PresetRegistry, Preset};

const DEFAULT_PRESET: &str = relnotes_core::config::DEFAULT_PRESET;

/// Resolve the parser and writer options for one generation call.
///
/// `preset` wins over `config`; with neither the default preset is used.
/// Explicit `parser_opts` and `writer_opts` then override field by field,
/// and `header`/`footer` are read from files under `cwd` when they name one.
pub fn load_changelog_config(plugin: &PluginConfig, cwd: &Path) -> Result<ChangelogConfig> {
    let registry = PresetRegistry::new();
    let preset_config = plugin.preset_config.as_ref();

    let mut config = if let Some(name) = &plugin.preset {
        let preset = registry.resolve(name)?;
        info!(preset = preset.name, "using preset");
        preset.config(preset_config)
    } else if let Some(config) = &plugin.config {
        load_custom_config(&registry, config, plugin, cwd)?
    } else {
        debug!(preset = DEFAULT_PRESET, "no preset configured, using default");
        default_preset(&registry)?.config(preset_config)
    };

    config.parser_opts.apply(&plugin.parser_opts);
    config.writer_opts.apply(&plugin.writer_opts);

    if let Some(header) = &plugin.header {
        config.writer_opts.header = Some(read_text_or_literal(header, cwd)?);
    }
    if let Some(footer) = &plugin.footer {
        config.writer_opts.footer = Some(read_text_or_literal(footer, cwd)?);
    }

    Ok(config)
}

fn default_preset(registry: &PresetRegistry) -> Result<&Preset> {
    Ok(registry.resolve(DEFAULT_PRESET)?)
}

fn load_custom_config(
    registry: &PresetRegistry,
    value: &str,
    plugin: &PluginConfig,
    cwd: &Path,
) -> Result<ChangelogConfig> {
    if let Some(preset) = registry.get(value) {
        info!(preset = preset.name, "config names a built-in preset");
        return Ok(preset.config(plugin.preset_config.as_ref()));
    }

    let path = cwd.join(value);
    if !path.is_file() {
        return Err(ConfigError::ConfigNotFound(value.to_string()).into());
    }

    let mut config = load_preset_file(&path)?.resolve();
    if let Some(types) = plugin.preset_config.as_ref().and_then(|p| p.types.clone()) {
        config.writer_opts.types = types;
    }
    Ok(config)
}

/// Build the link context for a release.
///
/// Host, owner and repository come from the repository URL; `host`,
/// `issue` and `commit` in the plugin config override what the URL gives.
/// A URL that cannot be resolved is used verbatim as the link base.
pub fn link_context(plugin: &PluginConfig, release: &ReleaseInfo) -> LinkContext {
    let mut ctx = LinkContext::new(&release.version);
    ctx.title = release.title.clone();
    ctx.date = release.date.clone();
    ctx.previous_tag = release.previous_tag.clone();
    ctx.current_tag = release.current_tag.clone();

    if let Some(url) = release.repository_url.as_deref().filter(|u| !u.trim().is_empty()) {
        match resolve_repository_url(url) {
            Ok(info) => {
                ctx.issue = info.issue_segment().to_string();
                ctx.commit = info.commit_segment().to_string();
                ctx = ctx.with_repository(info.host, info.owner, info.repository);
            }
            Err(e) => {
                warn!(url, error = %e, "cannot resolve repository url, using it as link base");
                ctx.repo_url = Some(url.to_string());
            }
        }
    }

    if let Some(host) = &plugin.host {
        ctx.host = Some(host.clone());
    }
    if let Some(issue) = &plugin.issue {
        ctx.issue = issue.clone();
    }
    if let Some(commit) = &plugin.commit {
        ctx.commit = commit.clone();
    }
    if let Some(enabled) = plugin.link_compare {
        ctx.link_compare = enabled;
    }
    if let Some(enabled) = plugin.link_references {
        ctx.link_references = enabled;
    }

    debug!(
        version = %ctx.version,
        host = ?ctx.host,
        owner = ?ctx.owner,
        repository = ?ctx.repository,
        previous_tag = ?ctx.previous_tag,
        current_tag = ?ctx.current_tag,
        "link context"
    );
    ctx
}
