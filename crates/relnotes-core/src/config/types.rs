//! Configuration types

use serde::{Deserialize, Serialize};

/// Copy every listed field that is set in `$src` onto `$dst`
macro_rules! take_set {
    ($dst:expr, $src:expr; $($field:ident),* $(,)?) => {
        $(if $src.$field.is_some() { $dst.$field = $src.$field; })*
    };
}

/// Replace every listed field of `$dst` with the override from `$src`
macro_rules! apply_set {
    ($dst:expr, $src:expr; $($field:ident),* $(,)?) => {
        $(if let Some(value) = &$src.$field { $dst.$field = value.clone(); })*
    };
}

/// Like `apply_set!`, for fields that are optional on `$dst`
macro_rules! apply_set_opt {
    ($dst:expr, $src:expr; $($field:ident),* $(,)?) => {
        $(if let Some(value) = &$src.$field { $dst.$field = Some(value.clone()); })*
    };
}

/// Plugin configuration: everything a caller can set for one generation call.
///
/// Values here are overrides. Unset fields fall back to the loaded preset or
/// custom config, which in turn fall back to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Named built-in preset (e.g. `angular`, `eslint`)
    pub preset: Option<String>,

    /// Built-in preset name or path to a custom preset file
    pub config: Option<String>,

    /// Parser option overrides
    #[serde(alias = "parserOpts")]
    pub parser_opts: ParserOverrides,

    /// Writer option overrides
    #[serde(alias = "writerOpts")]
    pub writer_opts: WriterOverrides,

    /// Host override (e.g. `http://my-host:90`)
    pub host: Option<String>,

    /// Issue path segment override
    pub issue: Option<String>,

    /// Commit path segment override
    pub commit: Option<String>,

    /// Whether to render a compare link
    #[serde(alias = "linkCompare")]
    pub link_compare: Option<bool>,

    /// Whether to render commit and reference links
    #[serde(alias = "linkReferences")]
    pub link_references: Option<bool>,

    /// Header text or path to a file holding it
    pub header: Option<String>,

    /// Footer text or path to a file holding it
    pub footer: Option<String>,

    /// Options handed to the preset itself
    #[serde(alias = "presetConfig")]
    pub preset_config: Option<PresetConfig>,
}

impl PluginConfig {
    /// Create a config selecting a named preset
    pub fn with_preset(preset: impl Into<String>) -> Self {
        Self {
            preset: Some(preset.into()),
            ..Default::default()
        }
    }

    /// Layer `other` on top of `self`; fields set in `other` win
    pub fn merge(&mut self, other: PluginConfig) {
        take_set!(self, other;
            preset,
            config,
            host,
            issue,
            commit,
            link_compare,
            link_references,
            header,
            footer,
            preset_config
        );
        self.parser_opts.merge(other.parser_opts);
        self.writer_opts.merge(other.writer_opts);
    }
}

/// Options handed to a preset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetConfig {
    /// Replacement for the preset's type to section mapping
    pub types: Option<Vec<TypeSection>>,
}

/// Commit message grammar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Pattern matched against the header line
    pub header_pattern: String,

    /// Field names for unnamed header captures, by position
    pub header_correspondence: Vec<String>,

    /// Pattern recognizing a `type!:` style breaking header
    pub breaking_header_pattern: Option<String>,

    /// Keywords that mark a reference as an action (e.g. `closes`)
    pub reference_actions: Vec<String>,

    /// Prefixes that introduce an issue identifier (e.g. `#`)
    pub issue_prefixes: Vec<String>,

    /// Whether issue prefixes are matched case-sensitively
    pub issue_prefixes_case_sensitive: bool,

    /// Keywords opening a note paragraph
    pub note_keywords: Vec<String>,

    /// Pattern matched against the whole message to detect reverts
    pub revert_pattern: Option<String>,

    /// Field names for revert captures
    pub revert_correspondence: Vec<String>,

    /// Pattern matched against the first line to detect merge commits
    pub merge_pattern: Option<String>,

    /// Field names for merge captures
    pub merge_correspondence: Vec<String>,

    /// Lines starting with this character are dropped
    pub comment_char: Option<char>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            header_pattern: r"^(\w*)(?:\((.*)\))?: (.*)$".to_string(),
            header_correspondence: strings(&["type", "scope", "subject"]),
            breaking_header_pattern: None,
            reference_actions: strings(&[
                "close", "closes", "closed", "fix", "fixes", "fixed", "resolve", "resolves",
                "resolved",
            ]),
            issue_prefixes: strings(&["#"]),
            issue_prefixes_case_sensitive: false,
            note_keywords: strings(&["BREAKING CHANGE"]),
            revert_pattern: Some(
                r#"^(?:Revert|revert:)\s"?([\s\S]+?)"?\s*This reverts commit (\w*)\."#.to_string(),
            ),
            revert_correspondence: strings(&["header", "hash"]),
            merge_pattern: None,
            merge_correspondence: Vec::new(),
            comment_char: None,
        }
    }
}

impl ParserOptions {
    /// Apply overrides field by field
    pub fn apply(&mut self, overrides: &ParserOverrides) {
        apply_set!(self, overrides;
            header_pattern,
            header_correspondence,
            reference_actions,
            issue_prefixes,
            issue_prefixes_case_sensitive,
            note_keywords,
            revert_correspondence,
            merge_correspondence
        );
        apply_set_opt!(self, overrides; breaking_header_pattern, revert_pattern, merge_pattern, comment_char);
    }

    /// Options with overrides applied
    pub fn with_overrides(mut self, overrides: &ParserOverrides) -> Self {
        self.apply(overrides);
        self
    }
}

/// Partial parser options; every set field replaces the base value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOverrides {
    #[serde(alias = "headerPattern")]
    pub header_pattern: Option<String>,
    #[serde(alias = "headerCorrespondence")]
    pub header_correspondence: Option<Vec<String>>,
    #[serde(alias = "breakingHeaderPattern")]
    pub breaking_header_pattern: Option<String>,
    #[serde(alias = "referenceActions")]
    pub reference_actions: Option<Vec<String>>,
    #[serde(alias = "issuePrefixes")]
    pub issue_prefixes: Option<Vec<String>>,
    #[serde(alias = "issuePrefixesCaseSensitive")]
    pub issue_prefixes_case_sensitive: Option<bool>,
    #[serde(alias = "noteKeywords")]
    pub note_keywords: Option<Vec<String>>,
    #[serde(alias = "revertPattern")]
    pub revert_pattern: Option<String>,
    #[serde(alias = "revertCorrespondence")]
    pub revert_correspondence: Option<Vec<String>>,
    #[serde(alias = "mergePattern")]
    pub merge_pattern: Option<String>,
    #[serde(alias = "mergeCorrespondence")]
    pub merge_correspondence: Option<Vec<String>>,
    #[serde(alias = "commentChar")]
    pub comment_char: Option<char>,
}

impl ParserOverrides {
    /// Layer `other` on top of `self`
    pub fn merge(&mut self, other: ParserOverrides) {
        take_set!(self, other;
            header_pattern,
            header_correspondence,
            breaking_header_pattern,
            reference_actions,
            issue_prefixes,
            issue_prefixes_case_sensitive,
            note_keywords,
            revert_pattern,
            revert_correspondence,
            merge_pattern,
            merge_correspondence,
            comment_char
        );
    }
}

/// Mapping from a commit type to its section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSection {
    /// Value of the grouping field (e.g. `feat`)
    #[serde(rename = "type")]
    pub commit_type: String,

    /// Section title (e.g. `Features`)
    pub section: String,

    /// Whether commits of this type are left out
    #[serde(default)]
    pub hidden: bool,
}

impl TypeSection {
    /// Visible section
    pub fn new(commit_type: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            commit_type: commit_type.into(),
            section: section.into(),
            hidden: false,
        }
    }

    /// Hidden section
    pub fn hidden(commit_type: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            hidden: true,
            ..Self::new(commit_type, section)
        }
    }
}

/// How commit groups are ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupSort {
    /// Order of the `types` mapping; unmapped titles follow alphabetically
    #[default]
    Declaration,
    /// Alphabetical by section title
    Title,
}

/// Grouping, sorting and rendering options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    /// Field whose value selects the section
    pub group_by: String,

    /// Field rendered as the commit line text
    pub subject_field: String,

    /// Ordered type to section mapping
    pub types: Vec<TypeSection>,

    /// Section for types missing from `types`; `None` hides them
    pub other_section: Option<String>,

    /// Give each type missing from `types` a section titled by its own value
    pub unmapped_as_sections: bool,

    /// Section for commits without a grouping value; `None` drops them
    pub untyped_section: Option<String>,

    /// Show commits of hidden types when they carry notes
    pub reveal_hidden_with_notes: bool,

    /// Replace every note title with this one
    pub note_title: Option<String>,

    /// Section ordering
    pub commit_groups_sort: GroupSort,

    /// Field names to sort commits by; empty keeps input order
    pub commits_sort: Vec<String>,

    /// Truncate rendered hashes to this many characters
    pub hash_length: Option<usize>,

    /// Render a `*` scope as no scope
    pub hide_wildcard_scope: bool,

    /// Text placed before the document
    pub header: Option<String>,

    /// Text placed after the document
    pub footer: Option<String>,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            group_by: "type".to_string(),
            subject_field: "subject".to_string(),
            types: standard_types(),
            other_section: None,
            unmapped_as_sections: false,
            untyped_section: None,
            reveal_hidden_with_notes: false,
            note_title: None,
            commit_groups_sort: GroupSort::Declaration,
            commits_sort: Vec::new(),
            hash_length: None,
            hide_wildcard_scope: false,
            header: None,
            footer: None,
        }
    }
}

impl WriterOptions {
    /// Apply overrides field by field
    pub fn apply(&mut self, overrides: &WriterOverrides) {
        apply_set!(self, overrides;
            group_by,
            subject_field,
            types,
            unmapped_as_sections,
            reveal_hidden_with_notes,
            commit_groups_sort,
            commits_sort,
            hide_wildcard_scope
        );
        apply_set_opt!(self, overrides; other_section, untyped_section, note_title, hash_length, header, footer);
    }

    /// Options with overrides applied
    pub fn with_overrides(mut self, overrides: &WriterOverrides) -> Self {
        self.apply(overrides);
        self
    }

    /// Look up the mapping for a type
    pub fn type_section(&self, commit_type: &str) -> Option<&TypeSection> {
        self.types.iter().find(|t| t.commit_type == commit_type)
    }
}

/// Partial writer options; every set field replaces the base value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterOverrides {
    #[serde(alias = "groupBy")]
    pub group_by: Option<String>,
    #[serde(alias = "subjectField")]
    pub subject_field: Option<String>,
    pub types: Option<Vec<TypeSection>>,
    #[serde(alias = "otherSection")]
    pub other_section: Option<String>,
    #[serde(alias = "unmappedAsSections")]
    pub unmapped_as_sections: Option<bool>,
    #[serde(alias = "untypedSection")]
    pub untyped_section: Option<String>,
    #[serde(alias = "revealHiddenWithNotes")]
    pub reveal_hidden_with_notes: Option<bool>,
    #[serde(alias = "noteTitle")]
    pub note_title: Option<String>,
    #[serde(alias = "commitGroupsSort")]
    pub commit_groups_sort: Option<GroupSort>,
    #[serde(alias = "commitsSort")]
    pub commits_sort: Option<Vec<String>>,
    #[serde(alias = "hashLength")]
    pub hash_length: Option<usize>,
    #[serde(alias = "hideWildcardScope")]
    pub hide_wildcard_scope: Option<bool>,
    pub header: Option<String>,
    pub footer: Option<String>,
}

impl WriterOverrides {
    /// Layer `other` on top of `self`
    pub fn merge(&mut self, other: WriterOverrides) {
        take_set!(self, other;
            group_by,
            subject_field,
            types,
            other_section,
            unmapped_as_sections,
            untyped_section,
            reveal_hidden_with_notes,
            note_title,
            commit_groups_sort,
            commits_sort,
            hash_length,
            hide_wildcard_scope,
            header,
            footer
        );
    }
}

/// Parser and writer options resolved for one generation call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Commit grammar
    #[serde(alias = "parserOpts")]
    pub parser_opts: ParserOptions,

    /// Grouping and rendering
    #[serde(alias = "writerOpts")]
    pub writer_opts: WriterOptions,
}

/// Contents of a custom preset file: partial options over the built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetOverrides {
    /// Parser option overrides
    #[serde(alias = "parserOpts")]
    pub parser_opts: ParserOverrides,

    /// Writer option overrides
    #[serde(alias = "writerOpts")]
    pub writer_opts: WriterOverrides,
}

impl PresetOverrides {
    /// Resolve against the built-in defaults
    pub fn resolve(&self) -> ChangelogConfig {
        ChangelogConfig {
            parser_opts: ParserOptions::default().with_overrides(&self.parser_opts),
            writer_opts: WriterOptions::default().with_overrides(&self.writer_opts),
        }
    }
}

/// The conventional type to section mapping
pub fn standard_types() -> Vec<TypeSection> {
    vec![
        TypeSection::new("feat", "Features"),
        TypeSection::new("fix", "Bug Fixes"),
        TypeSection::new("perf", "Performance Improvements"),
        TypeSection::new("revert", "Reverts"),
        TypeSection::hidden("docs", "Documentation"),
        TypeSection::hidden("style", "Styles"),
        TypeSection::hidden("refactor", "Code Refactoring"),
        TypeSection::hidden("test", "Tests"),
        TypeSection::hidden("build", "Build System"),
        TypeSection::hidden("ci", "Continuous Integration"),
        TypeSection::hidden("chore", "Chores"),
    ]
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_overrides_apply_field_by_field() {
        let overrides = ParserOverrides {
            header_pattern: Some(r"^##(?<tag>.*?)## (?<shortDesc>.*)$".to_string()),
            header_correspondence: Some(vec!["tag".to_string(), "shortDesc".to_string()]),
            ..Default::default()
        };
        let options = ParserOptions::default().with_overrides(&overrides);

        assert_eq!(options.header_pattern, r"^##(?<tag>.*?)## (?<shortDesc>.*)$");
        assert_eq!(options.header_correspondence, vec!["tag", "shortDesc"]);
        assert_eq!(options.note_keywords, ParserOptions::default().note_keywords);
    }

    #[test]
    fn test_writer_overrides_apply_field_by_field() {
        let overrides = WriterOverrides {
            commit_groups_sort: Some(GroupSort::Title),
            commits_sort: Some(vec!["scope".to_string(), "subject".to_string()]),
            ..Default::default()
        };
        let options = WriterOptions::default().with_overrides(&overrides);

        assert_eq!(options.commit_groups_sort, GroupSort::Title);
        assert_eq!(options.commits_sort, vec!["scope", "subject"]);
        assert_eq!(options.types, standard_types());
    }

    #[test]
    fn test_plugin_config_merge_prefers_later_values() {
        let mut base = PluginConfig::with_preset("angular");
        base.link_compare = Some(true);
        base.header = Some("base".to_string());

        let mut top = PluginConfig::default();
        top.link_compare = Some(false);
        top.writer_opts.commits_sort = Some(vec!["subject".to_string()]);

        base.merge(top);
        assert_eq!(base.preset.as_deref(), Some("angular"));
        assert_eq!(base.link_compare, Some(false));
        assert_eq!(base.header.as_deref(), Some("base"));
        assert_eq!(base.writer_opts.commits_sort, Some(vec!["subject".to_string()]));
    }

    #[test]
    fn test_plugin_config_accepts_camel_case_keys() {
        let json = r#"{"parserOpts": {"headerPattern": "^(\\w*): (.*)$", "headerCorrespondence": ["tag", "message"]},
                       "writerOpts": {"commitsSort": ["subject", "scope"]}, "linkCompare": false}"#;
        let config: PluginConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.parser_opts.header_pattern.as_deref(), Some(r"^(\w*): (.*)$"));
        assert_eq!(config.writer_opts.commits_sort, Some(vec!["subject".to_string(), "scope".to_string()]));
        assert_eq!(config.link_compare, Some(false));
    }

    #[test]
    fn test_type_section_lookup() {
        let options = WriterOptions::default();
        assert_eq!(options.type_section("fix").unwrap().section, "Bug Fixes");
        assert!(options.type_section("chore").unwrap().hidden);
        assert!(options.type_section("unknown").is_none());
    }
}
