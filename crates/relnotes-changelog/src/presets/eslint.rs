//! ESLint preset: `Tag: message` headers, one section per tag

use relnotes_core::config::{ChangelogConfig, GroupSort, ParserOptions, WriterOptions};

pub(super) fn config() -> ChangelogConfig {
    ChangelogConfig {
        parser_opts: ParserOptions {
            header_pattern: r"^(\w*):\s*(.*)$".to_string(),
            header_correspondence: vec!["tag".to_string(), "message".to_string()],
            ..Default::default()
        },
        writer_opts: WriterOptions {
            group_by: "tag".to_string(),
            subject_field: "message".to_string(),
            types: Vec::new(),
            unmapped_as_sections: true,
            commit_groups_sort: GroupSort::Title,
            commits_sort: vec!["tag".to_string(), "message".to_string()],
            hash_length: Some(7),
            ..Default::default()
        },
    }
}
