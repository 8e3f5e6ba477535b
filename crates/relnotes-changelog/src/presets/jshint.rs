//! JSHint preset: `[[TYPE]] description` headers

use relnotes_core::config::{ChangelogConfig, GroupSort, ParserOptions, TypeSection, WriterOptions};

pub(super) fn config() -> ChangelogConfig {
    ChangelogConfig {
        parser_opts: ParserOptions {
            header_pattern: r"^\[\[(.*)\]\] (.*)$".to_string(),
            header_correspondence: vec!["type".to_string(), "shortDesc".to_string()],
            note_keywords: vec!["BREAKING CHANGE".to_string()],
            ..Default::default()
        },
        writer_opts: WriterOptions {
            subject_field: "shortDesc".to_string(),
            types: vec![
                TypeSection::new("FIX", "Bug Fixes"),
                TypeSection::new("NEW", "New Features"),
                TypeSection::new("BREAKING", "Breaking Changes"),
            ],
            commit_groups_sort: GroupSort::Title,
            commits_sort: vec!["type".to_string(), "shortDesc".to_string()],
            hash_length: Some(7),
            ..Default::default()
        },
    }
}
