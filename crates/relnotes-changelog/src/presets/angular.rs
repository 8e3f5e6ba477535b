//! Angular preset

use relnotes_core::config::{ChangelogConfig, GroupSort, ParserOptions, WriterOptions};

pub(super) fn config() -> ChangelogConfig {
    ChangelogConfig {
        parser_opts: ParserOptions::default(),
        writer_opts: WriterOptions {
            reveal_hidden_with_notes: true,
            note_title: Some("BREAKING CHANGES".to_string()),
            commit_groups_sort: GroupSort::Title,
            commits_sort: vec!["scope".to_string(), "subject".to_string()],
            hash_length: Some(7),
            hide_wildcard_scope: true,
            ..Default::default()
        },
    }
}
