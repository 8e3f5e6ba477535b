//! Release notes generation

use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;

use relnotes_core::config::{ChangelogConfig, GroupSort, PluginConfig, WriterOptions};
use relnotes_core::{ChangelogError, LinkContext, RawCommit, ReleaseInfo, Result};
use tracing::{debug, info, instrument, trace};

use crate::config::{link_context, load_changelog_config};
use crate::filter::filter_reverted;
use crate::formatter::{ChangelogFormatter, MarkdownFormatter};
use crate::parser::{parse_commits, CommitParser, ConventionalParser};
use crate::transform::{CommitTransform, StandardTransform};
use crate::types::{NoteEntry, ParsedCommit, ReleaseDocument, Section};

/// Release notes generator: parse, filter reverts, transform, group, render
pub struct ReleaseNotesGenerator {
    parser: Box<dyn CommitParser>,
    formatter: Arc<dyn ChangelogFormatter>,
    standard: StandardTransform,
    transform: Option<Box<dyn CommitTransform>>,
    writer: WriterOptions,
}

impl ReleaseNotesGenerator {
    /// Create a generator for resolved options.
    ///
    /// Fails if any parser pattern does not compile.
    pub fn new(config: &ChangelogConfig) -> Result<Self> {
        Ok(Self {
            parser: Box::new(ConventionalParser::new(&config.parser_opts)?),
            formatter: Arc::new(MarkdownFormatter::new(&config.writer_opts)),
            standard: StandardTransform::new(&config.writer_opts),
            transform: None,
            writer: config.writer_opts.clone(),
        })
    }

    /// Create a generator from plugin configuration, resolving presets and
    /// files relative to `cwd`
    pub fn from_plugin_config(plugin: &PluginConfig, cwd: &Path) -> Result<Self> {
        let config = load_changelog_config(plugin, cwd)?;
        Self::new(&config)
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Use a custom formatter
    pub fn with_formatter<F: ChangelogFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Use a formatter taken from a registry
    pub fn with_shared_formatter(mut self, formatter: Arc<dyn ChangelogFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Run a transform on every commit after the built-in one
    pub fn with_transform<T: CommitTransform + 'static>(mut self, transform: T) -> Self {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Writer options in effect
    pub fn writer_options(&self) -> &WriterOptions {
        &self.writer
    }

    /// Parse, filter and group commits into a document
    #[instrument(skip(self, context, commits), fields(version = %context.version, commit_count = commits.len()))]
    pub fn build(&self, context: &LinkContext, commits: &[RawCommit]) -> Result<ReleaseDocument> {
        info!(version = %context.version, commit_count = commits.len(), "generating release notes");

        let parsed: Vec<ParsedCommit> = parse_commits(self.parser.as_ref(), commits).collect();
        let kept = filter_reverted(parsed);

        let mut doc = ReleaseDocument::new(context.clone());
        let mut sections: Vec<Section> = Vec::new();
        for commit in kept {
            let Some(commit) = self.apply_transforms(commit, context)? else {
                continue;
            };
            let Some(title) = self.section_title(&commit) else {
                trace!(hash = %commit.hash, header = %commit.header, "commit not grouped");
                continue;
            };

            // Note groups follow input order, not the sorted sections.
            for note in &commit.notes {
                doc.add_note(
                    &note.title,
                    NoteEntry {
                        text: note.text.clone(),
                        scope: commit.scope.clone(),
                        hash: commit.hash.clone(),
                    },
                );
            }

            match sections.iter_mut().find(|s| s.title == title) {
                Some(section) => section.add_commit(commit),
                None => {
                    let mut section = Section::new(title);
                    section.add_commit(commit);
                    sections.push(section);
                }
            }
        }

        self.sort_sections(&mut sections);
        for section in &mut sections {
            self.sort_commits(&mut section.commits);
        }

        for section in sections {
            doc.add_section(section);
        }
        doc.header = self.writer.header.clone();
        doc.footer = self.writer.footer.clone();

        debug!(
            section_count = doc.sections.len(),
            commit_count = doc.commit_count(),
            note_groups = doc.note_groups.len(),
            "release notes grouped"
        );
        Ok(doc)
    }

    /// Render a document with the configured formatter
    pub fn format(&self, doc: &ReleaseDocument) -> Result<String> {
        self.formatter.format(doc)
    }

    /// Build and render in one step
    #[instrument(skip(self, context, commits), fields(commit_count = commits.len()))]
    pub fn generate(&self, context: &LinkContext, commits: &[RawCommit]) -> Result<String> {
        let doc = self.build(context, commits)?;
        let output = self.format(&doc)?;
        debug!(output_len = output.len(), "release notes formatted");
        Ok(output)
    }

    fn apply_transforms(
        &self,
        commit: ParsedCommit,
        context: &LinkContext,
    ) -> Result<Option<ParsedCommit>> {
        let Some(commit) = self
            .standard
            .transform(commit, context)
            .map_err(ChangelogError::Transform)?
        else {
            return Ok(None);
        };

        match &self.transform {
            Some(transform) => Ok(transform
                .transform(commit, context)
                .map_err(ChangelogError::Transform)?),
            None => Ok(Some(commit)),
        }
    }

    /// Section a commit belongs to, or `None` when it is left out
    fn section_title(&self, commit: &ParsedCommit) -> Option<String> {
        let writer = &self.writer;
        let Some(value) = commit.field(&writer.group_by) else {
            return writer.untyped_section.clone();
        };
        let revealed = writer.reveal_hidden_with_notes && commit.has_notes();

        match writer.type_section(value) {
            Some(mapping) if !mapping.hidden || revealed => Some(mapping.section.clone()),
            Some(_) => None,
            None if writer.unmapped_as_sections => Some(value.to_string()),
            None => writer
                .other_section
                .clone()
                .or_else(|| revealed.then(|| value.to_string())),
        }
    }

    fn sort_sections(&self, sections: &mut [Section]) {
        match self.writer.commit_groups_sort {
            GroupSort::Title => sections.sort_by(|a, b| a.title.cmp(&b.title)),
            GroupSort::Declaration => {
                let rank = |title: &str| {
                    self.writer
                        .types
                        .iter()
                        .position(|t| t.section == title)
                        .unwrap_or(usize::MAX)
                };
                sections.sort_by(|a, b| {
                    rank(&a.title)
                        .cmp(&rank(&b.title))
                        .then_with(|| a.title.cmp(&b.title))
                });
            }
        }
    }

    fn sort_commits(&self, commits: &mut [ParsedCommit]) {
        let keys = &self.writer.commits_sort;
        if keys.is_empty() {
            return;
        }
        commits.sort_by(|a, b| {
            keys.iter()
                .map(|key| a.field(key).cmp(&b.field(key)))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        });
    }
}

/// Generate release notes for a release in one call.
///
/// Configuration is resolved (and can fail) before any commit is parsed.
pub fn generate_notes(
    plugin: &PluginConfig,
    release: &ReleaseInfo,
    commits: &[RawCommit],
    cwd: &Path,
) -> Result<String> {
    let generator = ReleaseNotesGenerator::from_plugin_config(plugin, cwd)?;
    let context = link_context(plugin, release);
    generator.generate(&context, commits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relnotes_core::config::{PresetConfig, TypeSection};
    use relnotes_core::{BoxError, ConfigError, RelnotesError, MODULE_NOT_FOUND};
    use tempfile::TempDir;

    const REPOSITORY_URL: &str = "https://github.com/owner/repo";

    fn release() -> ReleaseInfo {
        ReleaseInfo::new("2.0.0")
            .with_tags("v1.0.0", "v2.0.0")
            .with_repository_url(REPOSITORY_URL)
    }

    fn commit(hash: &str, message: &str) -> RawCommit {
        RawCommit::new(hash, message)
    }

    fn notes(plugin: PluginConfig, commits: &[RawCommit]) -> String {
        let temp = TempDir::new().unwrap();
        generate_notes(&plugin, &release(), commits, temp.path()).unwrap()
    }

    fn default_commits() -> Vec<RawCommit> {
        vec![
            commit("111", "fix(scope1): First fix"),
            commit("222", "feat(scope2): Second feature"),
        ]
    }

    #[test]
    fn test_short_hash_label_keeps_full_hash_in_link() {
        let hash = "1234567890abcdef1234567890abcdef12345678";
        let output = notes(PluginConfig::default(), &[commit(hash, "fix: First fix")]);

        assert!(output.contains(&format!(
            "* First fix ([1234567](https://github.com/owner/repo/commit/{}))",
            hash
        )));
    }

    #[test]
    fn test_type_prefix_does_not_close_issues() {
        let output = notes(
            PluginConfig::default(),
            &[commit("111", "fix: crash reported in #12")],
        );

        assert!(output.contains("* crash reported in #12 ([111](https://github.com/owner/repo/commit/111))\n"));
        assert!(!output.contains("closes"));
    }

    #[test]
    fn test_notes_follow_input_order() {
        let commits = vec![
            commit("111", "feat(api): New endpoint\n\nBREAKING CHANGE: old endpoint removed"),
            commit("222", "fix(core): Crash\n\nBREAKING CHANGE: config format changed"),
        ];
        let output = notes(PluginConfig::default(), &commits);

        let fixes = output.find("### Bug Fixes").unwrap();
        let features = output.find("### Features").unwrap();
        assert!(fixes < features);

        let first = output.find("* **api:** old endpoint removed").unwrap();
        let second = output.find("* **core:** config format changed").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_angular_by_default() {
        let output = notes(PluginConfig::default(), &default_commits());

        assert!(output.contains("(https://github.com/owner/repo/compare/v1.0.0...v2.0.0)"));
        assert!(output.contains("### Bug Fixes"));
        assert!(output.contains("* **scope1:** First fix ([111](https://github.com/owner/repo/commit/111))"));
        assert!(output.contains("### Features"));
        assert!(output.contains("* **scope2:** Second feature ([222](https://github.com/owner/repo/commit/222))"));
    }

    #[test]
    fn test_angular_full_output() {
        let output = notes(PluginConfig::default(), &default_commits());
        assert_eq!(
            output,
            "# [2.0.0](https://github.com/owner/repo/compare/v1.0.0...v2.0.0)\n\n\
             ### Bug Fixes\n\n\
             * **scope1:** First fix ([111](https://github.com/owner/repo/commit/111))\n\n\
             ### Features\n\n\
             * **scope2:** Second feature ([222](https://github.com/owner/repo/commit/222))\n"
        );
    }

    #[test]
    fn test_git_heads_as_tags() {
        let release = ReleaseInfo::new("2.0.0")
            .with_tags("abc", "def")
            .with_repository_url(REPOSITORY_URL);
        let temp = TempDir::new().unwrap();
        let output =
            generate_notes(&PluginConfig::default(), &release, &default_commits(), temp.path()).unwrap();
        assert!(output.contains("(https://github.com/owner/repo/compare/abc...def)"));
    }

    #[test]
    fn test_invalid_message_absent() {
        let mut commits = default_commits();
        commits.push(commit("333", "Feature => Invalid message"));
        let output = notes(PluginConfig::default(), &commits);

        assert!(!output.contains("Invalid message"));
        assert!(!output.contains("333"));
    }

    #[test]
    fn test_empty_messages_skipped() {
        let commits = vec![
            commit("111", "fix(scope1): First fix"),
            commit("222", ""),
            commit("333", "  "),
            commit("444", "feat(scope2): Second feature"),
        ];
        let output = notes(PluginConfig::default(), &commits);

        assert!(!output.contains("222"));
        assert!(!output.contains("333"));
        assert!(output.contains("[444]"));
    }

    #[test]
    fn test_reverted_commits_absent() {
        let commits = vec![
            commit("111", "fix(scope1): First fix"),
            commit("222", "feat(scope2): Second feature"),
            commit("333", "revert: feat(scope2): Second feature\n\nThis reverts commit 222."),
        ];
        let output = notes(PluginConfig::default(), &commits);

        assert!(!output.contains("Second feature"));
        assert!(!output.contains("### Reverts"));
        assert!(output.contains("First fix"));
    }

    #[test]
    fn test_output_is_idempotent() {
        let first = notes(PluginConfig::default(), &default_commits());
        let second = notes(PluginConfig::default(), &default_commits());
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_preset_fails_before_parsing() {
        let temp = TempDir::new().unwrap();
        let err = generate_notes(
            &PluginConfig::with_preset("unknown-preset"),
            &release(),
            &default_commits(),
            temp.path(),
        )
        .unwrap_err();

        assert_eq!(err.code(), Some(MODULE_NOT_FOUND));
        assert!(matches!(err, RelnotesError::Config(ConfigError::PresetNotFound(_))));
    }

    #[test]
    fn test_eslint_preset() {
        let commits = vec![
            commit("111", "Fix: First fix (fixes #123)"),
            commit("222", "Update: Second feature (fixes #456)"),
        ];
        let output = notes(PluginConfig::with_preset("eslint"), &commits);

        assert!(output.contains("(https://github.com/owner/repo/compare/v1.0.0...v2.0.0)"));
        assert!(output.contains("### Fix"));
        assert!(output.contains(
            "* First fix (fixes #123) ([111](https://github.com/owner/repo/commit/111)), \
             closes [#123](https://github.com/owner/repo/issues/123)"
        ));
        assert!(output.contains("### Update"));
        assert!(output.contains(
            "* Second feature (fixes #456) ([222](https://github.com/owner/repo/commit/222)), \
             closes [#456](https://github.com/owner/repo/issues/456)"
        ));
    }

    #[test]
    fn test_custom_grammar_and_prefixes() {
        let mut plugin = PluginConfig::with_preset("eslint");
        plugin.parser_opts.header_pattern = Some(r"^%%(?<tag>.*?)%% (?<message>.*)$".to_string());
        plugin.parser_opts.header_correspondence = Some(vec!["tag".to_string(), "message".to_string()]);
        plugin.parser_opts.reference_actions = Some(vec!["keyword".to_string()]);
        plugin.parser_opts.issue_prefixes = Some(vec!["#".to_string(), "JIRA-".to_string()]);

        let commits = vec![
            commit("111", "%%Fix%% First fix (keyword #123)"),
            commit("222", "%%Update%% Second feature (keyword JIRA-456)"),
        ];
        let output = notes(plugin, &commits);

        assert!(output.contains("### Fix"));
        assert!(output.contains(
            "* First fix (keyword #123) ([111](https://github.com/owner/repo/commit/111)), \
             closes [#123](https://github.com/owner/repo/issues/123)"
        ));
        assert!(output.contains(
            "* Second feature (keyword JIRA-456) ([222](https://github.com/owner/repo/commit/222)), \
             closes [#456](https://github.com/owner/repo/issues/456)"
        ));
    }

    #[test]
    fn test_commits_sort_override() {
        let mut plugin = PluginConfig::with_preset("angular");
        plugin.parser_opts.header_pattern =
            Some(r"^(?<type>\w*)\((?<scope>.*)\): (?<subject>.*)$".to_string());
        plugin.writer_opts.commits_sort = Some(vec!["subject".to_string(), "scope".to_string()]);

        let commits = vec![
            commit("111", "fix(scope1): 2 First fix (fixes #123)"),
            commit("222", "fix(scope2): 1 Second fix (fixes #456)"),
        ];
        let output = notes(plugin, &commits);

        let second = output.find("* **scope2:** 1 Second fix").unwrap();
        let first = output.find("* **scope1:** 2 First fix").unwrap();
        assert!(second < first);
    }

    #[test]
    fn test_preset_config_hides_types() {
        let mut plugin = PluginConfig::with_preset("conventionalcommits");
        plugin.preset_config = Some(PresetConfig {
            types: Some(vec![
                TypeSection::hidden("fix", "Bug Fixes"),
                TypeSection::new("test", "Test !!"),
            ]),
        });
        let commits = vec![commit("111", "fix: First fix"), commit("222", "test: Change test")];
        let output = notes(plugin, &commits);

        assert!(!output.contains("### Bug Fixes"));
        assert!(!output.contains("First fix"));
        assert!(output.contains("### Test !!"));
        assert!(output.contains("* Change test ([222](https://github.com/owner/repo/commit/222))"));
    }

    #[test]
    fn test_link_compare_disabled() {
        let plugin = PluginConfig {
            link_compare: Some(false),
            ..Default::default()
        };
        let output = notes(plugin, &default_commits());
        assert!(output.starts_with("# 2.0.0\n"));
        assert!(!output.contains("/compare/"));
    }

    #[test]
    fn test_link_references_disabled() {
        let plugin = PluginConfig {
            link_references: Some(false),
            ..Default::default()
        };
        let commits = vec![commit("111", "fix(scope1): First fix\n\nCloses #10")];
        let output = notes(plugin, &commits);
        assert!(output.contains("* **scope1:** First fix 111, closes #10"));
    }

    #[test]
    fn test_custom_host_and_segments() {
        let plugin = PluginConfig {
            host: Some("http://my-host:90".to_string()),
            issue: Some("issue".to_string()),
            commit: Some("commits".to_string()),
            ..Default::default()
        };
        let commits = vec![commit("111", "fix(scope1): First fix\n\nresolves #10")];
        let output = notes(plugin, &commits);

        assert!(output.contains("([111](http://my-host:90/owner/repo/commits/111))"));
        assert!(output.contains("closes [#10](http://my-host:90/owner/repo/issue/10)"));
    }

    #[test]
    fn test_breaking_change_notes() {
        let commits = vec![
            commit("111", "feat(api): New endpoint\n\nBREAKING CHANGE: old endpoint removed"),
            commit("222", "chore(deps): Bump everything\n\nBREAKING CHANGE: node 18 required"),
            commit("333", "chore: Tidy"),
        ];
        let output = notes(PluginConfig::default(), &commits);

        assert!(output.contains("### BREAKING CHANGES"));
        assert!(output.contains("* **api:** old endpoint removed"));
        assert!(output.contains("* **deps:** node 18 required"));
        assert!(output.contains("### Chores"));
        assert!(!output.contains("Tidy"));
    }

    #[test]
    fn test_transform_error_propagates() {
        let generator = ReleaseNotesGenerator::new(&ChangelogConfig::default())
            .unwrap()
            .with_transform(
                |_: ParsedCommit, _: &LinkContext| -> std::result::Result<Option<ParsedCommit>, BoxError> {
                    Err("Test error".into())
                },
            );
        let ctx = LinkContext::new("2.0.0");

        let err = generator.generate(&ctx, &default_commits()).unwrap_err();
        assert_eq!(err.to_string(), "Test error");
        assert!(matches!(err, RelnotesError::Changelog(ChangelogError::Transform(_))));
    }

    #[test]
    fn test_transform_can_drop_and_rewrite() {
        let generator = ReleaseNotesGenerator::new(&ChangelogConfig::default())
            .unwrap()
            .with_transform(
                |mut c: ParsedCommit, _: &LinkContext| -> std::result::Result<Option<ParsedCommit>, BoxError> {
                    if c.commit_type.as_deref() == Some("fix") {
                        return Ok(None);
                    }
                    c.subject = c.subject.map(|s| s.to_uppercase());
                    Ok(Some(c))
                },
            );
        let output = generator
            .generate(&LinkContext::new("2.0.0"), &default_commits())
            .unwrap();

        assert!(!output.contains("First fix"));
        assert!(output.contains("SECOND FEATURE"));
    }

    #[test]
    fn test_header_and_footer() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("testHeader.md"), "### Test Header\n").unwrap();
        let plugin = PluginConfig {
            header: Some("./testHeader.md".to_string()),
            footer: Some("### Test Footer".to_string()),
            ..Default::default()
        };

        let output = generate_notes(&plugin, &release(), &default_commits(), temp.path()).unwrap();
        assert!(output.starts_with("### Test Header\n"));
        assert!(output.trim_end().ends_with("### Test Footer"));
    }

    #[test]
    fn test_untyped_and_other_sections() {
        let mut config = ChangelogConfig::default();
        config.writer_opts.untyped_section = Some("Other Changes".to_string());
        config.writer_opts.other_section = Some("Miscellaneous".to_string());
        let generator = ReleaseNotesGenerator::new(&config).unwrap();

        let commits = vec![
            commit("111", "Update README"),
            commit("222", "wip: something"),
            commit("333", "feat: thing"),
        ];
        let doc = generator.build(&LinkContext::new("1.0.0"), &commits).unwrap();
        let titles: Vec<_> = doc.sections.iter().map(|s| s.title.as_str()).collect();

        assert_eq!(titles, vec!["Features", "Miscellaneous", "Other Changes"]);
        assert_eq!(doc.commit_count(), 3);
    }

    #[test]
    fn test_declaration_order() {
        let generator = ReleaseNotesGenerator::new(&ChangelogConfig::default()).unwrap();
        let commits = vec![
            commit("1", "perf: faster"),
            commit("2", "fix: bug"),
            commit("3", "feat: thing"),
        ];
        let doc = generator.build(&LinkContext::new("1.0.0"), &commits).unwrap();
        let titles: Vec<_> = doc.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Features", "Bug Fixes", "Performance Improvements"]);
    }

    #[test]
    fn test_every_commit_in_one_section() {
        let generator = ReleaseNotesGenerator::new(&ChangelogConfig::default()).unwrap();
        let commits = vec![
            commit("1", "feat: a"),
            commit("2", "feat: b"),
            commit("3", "fix: c"),
        ];
        let doc = generator.build(&LinkContext::new("1.0.0"), &commits).unwrap();

        let mut hashes: Vec<_> = doc
            .sections
            .iter()
            .flat_map(|s| s.commits.iter().map(|c| c.hash.as_str()))
            .collect();
        hashes.sort();
        assert_eq!(hashes, vec!["1", "2", "3"]);
    }
}
