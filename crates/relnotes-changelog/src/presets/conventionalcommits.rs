//! Conventional Commits preset

use relnotes_core::config::{
    ChangelogConfig, ParserOptions, TypeSection, WriterOptions,
};

pub(super) fn config() -> ChangelogConfig {
    ChangelogConfig {
        parser_opts: ParserOptions {
            header_pattern: r"^(\w*)(?:\((.*)\))?!?: (.*)$".to_string(),
            breaking_header_pattern: Some(r"^(\w*)(?:\((.*)\))?!: (.*)$".to_string()),
            note_keywords: vec!["BREAKING CHANGE".to_string(), "BREAKING-CHANGE".to_string()],
            revert_pattern: Some(
                r#"(?i)^(?:Revert|revert:)\s"?([\s\S]+?)"?\s*This reverts commit (\w*)\."#.to_string(),
            ),
            ..Default::default()
        },
        writer_opts: WriterOptions {
            types: types(),
            reveal_hidden_with_notes: true,
            note_title: Some("BREAKING CHANGES".to_string()),
            commits_sort: vec!["scope".to_string(), "subject".to_string()],
            hash_length: Some(7),
            hide_wildcard_scope: true,
            ..Default::default()
        },
    }
}

fn types() -> Vec<TypeSection> {
    vec![
        TypeSection::new("feat", "Features"),
        TypeSection::new("feature", "Features"),
        TypeSection::new("fix", "Bug Fixes"),
        TypeSection::new("perf", "Performance Improvements"),
        TypeSection::new("revert", "Reverts"),
        TypeSection::hidden("docs", "Documentation"),
        TypeSection::hidden("style", "Styles"),
        TypeSection::hidden("chore", "Miscellaneous Chores"),
        TypeSection::hidden("refactor", "Code Refactoring"),
        TypeSection::hidden("test", "Tests"),
        TypeSection::hidden("build", "Build System"),
        TypeSection::hidden("ci", "Continuous Integration"),
    ]
}
