//! Pattern-driven commit message parser
//!
//! The grammar comes entirely from [`ParserOptions`]: header, breaking
//! header, revert and merge patterns, note keywords and issue prefixes. The
//! default options parse Angular-style `type(scope): subject` headers.

use std::collections::BTreeMap;

use regex::{Captures, Regex};
use tracing::trace;

use relnotes_core::config::{compile_pattern, ParserOptions};
use relnotes_core::{ConfigError, RawCommit};

use super::references::ReferenceMatcher;
use super::CommitParser;
use crate::types::{Note, ParsedCommit, Revert};

/// A compiled pattern and the field name of each capture group
#[derive(Debug, Clone)]
struct FieldPattern {
    regex: Regex,
    names: Vec<Option<String>>,
}

impl FieldPattern {
    fn new(field: &str, pattern: &str, correspondence: &[String]) -> Result<Self, ConfigError> {
        let regex = compile_pattern(field, pattern)?;
        let names = regex
            .capture_names()
            .enumerate()
            .skip(1)
            .map(|(i, name)| {
                name.map(str::to_string)
                    .or_else(|| correspondence.get(i - 1).cloned())
            })
            .collect();
        Ok(Self { regex, names })
    }

    fn optional(
        field: &str,
        pattern: Option<&str>,
        correspondence: &[String],
    ) -> Result<Option<Self>, ConfigError> {
        pattern
            .filter(|p| !p.is_empty())
            .map(|p| Self::new(field, p, correspondence))
            .transpose()
    }

    fn fields(&self, caps: &Captures<'_>) -> BTreeMap<String, String> {
        self.names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| {
                let name = name.as_ref()?;
                let value = caps.get(i + 1)?;
                Some((name.clone(), value.as_str().to_string()))
            })
            .collect()
    }

    fn extract(&self, text: &str) -> Option<BTreeMap<String, String>> {
        self.regex.captures(text).map(|caps| self.fields(&caps))
    }
}

/// Parser for commit messages with a configurable grammar
#[derive(Debug, Clone)]
pub struct ConventionalParser {
    header: FieldPattern,
    breaking_header: Option<FieldPattern>,
    revert: Option<FieldPattern>,
    merge: Option<FieldPattern>,
    references: ReferenceMatcher,
    note_keywords: Vec<String>,
    comment_char: Option<char>,
}

impl ConventionalParser {
    /// Compile a parser from options.
    ///
    /// Fails with [`ConfigError::InvalidPattern`] when any pattern does not
    /// compile; no commit is looked at before that.
    pub fn new(options: &ParserOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            header: FieldPattern::new(
                "parser_opts.header_pattern",
                &options.header_pattern,
                &options.header_correspondence,
            )?,
            breaking_header: FieldPattern::optional(
                "parser_opts.breaking_header_pattern",
                options.breaking_header_pattern.as_deref(),
                &options.header_correspondence,
            )?,
            revert: FieldPattern::optional(
                "parser_opts.revert_pattern",
                options.revert_pattern.as_deref(),
                &options.revert_correspondence,
            )?,
            merge: FieldPattern::optional(
                "parser_opts.merge_pattern",
                options.merge_pattern.as_deref(),
                &options.merge_correspondence,
            )?,
            references: ReferenceMatcher::new(options)?,
            note_keywords: options
                .note_keywords
                .iter()
                .filter(|k| !k.is_empty())
                .cloned()
                .collect(),
            comment_char: options.comment_char,
        })
    }

    /// Compile a parser from the default options
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::new(&ParserOptions::default())
    }

    fn note_start<'a>(&self, line: &'a str) -> Option<(&str, &'a str)> {
        let trimmed = line.trim_start_matches(|c: char| c.is_whitespace() || c == '*');
        self.note_keywords.iter().find_map(|keyword| {
            let rest = trimmed.strip_prefix(keyword.as_str())?;
            let text = rest.trim_start().strip_prefix(':')?;
            Some((keyword.as_str(), text.trim()))
        })
    }

    /// Split body lines into plain paragraphs and notes
    fn split_notes(&self, lines: &[&str]) -> (Vec<String>, Vec<Note>) {
        let mut paragraphs = Vec::new();
        let mut notes: Vec<Note> = Vec::new();

        for paragraph in lines.split(|l| l.trim().is_empty()) {
            if paragraph.is_empty() {
                continue;
            }
            let mut plain = Vec::new();
            let mut current: Option<Note> = None;

            for line in paragraph {
                if let Some((title, text)) = self.note_start(line) {
                    notes.extend(current.take());
                    current = Some(Note {
                        title: title.to_string(),
                        text: text.to_string(),
                    });
                } else if let Some(note) = current.as_mut() {
                    if !note.text.is_empty() {
                        note.text.push('\n');
                    }
                    note.text.push_str(line.trim_end());
                } else {
                    plain.push(*line);
                }
            }

            notes.extend(current);
            if !plain.is_empty() {
                paragraphs.push(plain.join("\n"));
            }
        }

        (paragraphs, notes)
    }
}

impl CommitParser for ConventionalParser {
    fn parse(&self, commit: &RawCommit) -> ParsedCommit {
        let lines: Vec<&str> = commit
            .message
            .lines()
            .filter(|line| match self.comment_char {
                Some(c) => !line.starts_with(c),
                None => true,
            })
            .collect();

        let mut start = lines.iter().position(|l| !l.trim().is_empty()).unwrap_or(lines.len());
        let mut header = lines.get(start).map(|l| l.trim()).unwrap_or_default();

        let merge = self.merge.as_ref().and_then(|m| m.extract(header));
        if merge.is_some() {
            trace!(hash = %commit.hash, "merge header detected");
            let rest = lines.get(start + 1..).unwrap_or_default();
            if let Some(next) = rest.iter().position(|l| !l.trim().is_empty()) {
                start += 1 + next;
                header = lines[start].trim();
            }
        }

        let mut parsed = ParsedCommit::unparsed(&commit.hash, header);
        parsed.merge = merge;

        if let Some(fields) = self.header.extract(header) {
            parsed.commit_type = fields.get("type").cloned();
            parsed.scope = fields.get("scope").cloned();
            parsed.subject = fields.get("subject").cloned();
            parsed.fields = fields;
        } else {
            trace!(hash = %commit.hash, header, "header does not match");
        }

        let body_lines = lines.get(start + 1..).unwrap_or_default();
        let (paragraphs, mut notes) = self.split_notes(body_lines);

        if let Some(breaking) = &self.breaking_header {
            if let Some(fields) = breaking.extract(header) {
                if notes.is_empty() {
                    let text = fields
                        .get("subject")
                        .or_else(|| parsed.subject.as_ref())
                        .cloned()
                        .unwrap_or_else(|| header.to_string());
                    let title = self
                        .note_keywords
                        .first()
                        .cloned()
                        .unwrap_or_else(|| "BREAKING CHANGE".to_string());
                    notes.push(Note { title, text });
                }
                if parsed.fields.is_empty() {
                    parsed.commit_type = fields.get("type").cloned();
                    parsed.scope = fields.get("scope").cloned();
                    parsed.subject = fields.get("subject").cloned();
                    parsed.fields = fields;
                }
            }
        }

        parsed.body = Some(paragraphs.join("\n\n")).filter(|b| !b.is_empty());
        parsed.notes = notes;
        parsed.references = self
            .references
            .scan(std::iter::once(header).chain(body_lines.iter().copied()));

        if let Some(revert) = &self.revert {
            let text = lines[start.min(lines.len())..].join("\n");
            parsed.revert = revert.extract(&text).map(|fields| Revert { fields });
        }

        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relnotes_core::config::ParserOverrides;

    fn parse(message: &str) -> ParsedCommit {
        ConventionalParser::with_defaults()
            .unwrap()
            .parse(&RawCommit::new("111", message))
    }

    fn parse_with(overrides: ParserOverrides, message: &str) -> ParsedCommit {
        let options = ParserOptions::default().with_overrides(&overrides);
        ConventionalParser::new(&options)
            .unwrap()
            .parse(&RawCommit::new("111", message))
    }

    #[test]
    fn test_parse_with_scope() {
        let parsed = parse("fix(scope1): First fix");
        assert_eq!(parsed.header, "fix(scope1): First fix");
        assert_eq!(parsed.commit_type.as_deref(), Some("fix"));
        assert_eq!(parsed.scope.as_deref(), Some("scope1"));
        assert_eq!(parsed.subject.as_deref(), Some("First fix"));
        assert!(parsed.body.is_none());
    }

    #[test]
    fn test_parse_without_scope() {
        let parsed = parse("feat: add new feature");
        assert_eq!(parsed.commit_type.as_deref(), Some("feat"));
        assert!(parsed.scope.is_none());
        assert_eq!(parsed.fields.get("subject").map(String::as_str), Some("add new feature"));
    }

    #[test]
    fn test_invalid_header_keeps_commit() {
        let parsed = parse("Update README");
        assert_eq!(parsed.header, "Update README");
        assert!(parsed.commit_type.is_none());
        assert!(parsed.fields.is_empty());
    }

    #[test]
    fn test_body_and_notes() {
        let parsed = parse(
            "feat(api): new endpoint\n\nSome description.\n\nBREAKING CHANGE: old endpoint removed\nuse /v2 instead",
        );
        assert_eq!(parsed.body.as_deref(), Some("Some description."));
        assert_eq!(parsed.notes.len(), 1);
        assert_eq!(parsed.notes[0].title, "BREAKING CHANGE");
        assert_eq!(parsed.notes[0].text, "old endpoint removed\nuse /v2 instead");
    }

    #[test]
    fn test_note_after_footer_line() {
        let parsed = parse("fix: thing\n\nCloses #10\nBREAKING CHANGE: gone");
        assert_eq!(parsed.body.as_deref(), Some("Closes #10"));
        assert_eq!(parsed.notes[0].text, "gone");
        assert_eq!(parsed.references[0].issue, "10");
    }

    #[test]
    fn test_references_in_header_and_body() {
        let parsed = parse("fix(scope1): First fix (fixes #123)\n\nrefs #5");
        let issues: Vec<_> = parsed.references.iter().map(|r| r.issue.as_str()).collect();
        assert_eq!(issues, vec!["123", "5"]);
        assert_eq!(parsed.references[0].action.as_deref(), Some("fixes"));
        assert!(parsed.references[1].action.is_none());
    }

    #[test]
    fn test_revert() {
        let parsed = parse("revert: feat(scope): broken\n\nThis reverts commit abc123.");
        let revert = parsed.revert.unwrap();
        assert_eq!(revert.header(), Some("feat(scope): broken"));
        assert_eq!(revert.hash(), Some("abc123"));
    }

    #[test]
    fn test_git_style_revert() {
        let parsed = parse("Revert \"feat: broken\"\n\nThis reverts commit abc123.");
        assert_eq!(parsed.revert.unwrap().header(), Some("feat: broken"));
    }

    #[test]
    fn test_named_groups_win_over_correspondence() {
        let parsed = parse_with(
            ParserOverrides {
                header_pattern: Some(r"^##(?<tag>.*?)## (?<shortDesc>.*)$".to_string()),
                header_correspondence: Some(vec!["first".to_string(), "second".to_string()]),
                ..Default::default()
            },
            "##Fix## Tidy things up",
        );
        assert_eq!(parsed.fields.get("tag").map(String::as_str), Some("Fix"));
        assert_eq!(parsed.fields.get("shortDesc").map(String::as_str), Some("Tidy things up"));
        assert!(parsed.commit_type.is_none());
    }

    #[test]
    fn test_breaking_header_adds_note() {
        let parsed = parse_with(
            ParserOverrides {
                header_pattern: Some(r"^(\w*)(?:\((.*)\))?!?: (.*)$".to_string()),
                breaking_header_pattern: Some(r"^(\w*)(?:\((.*)\))?!: (.*)$".to_string()),
                ..Default::default()
            },
            "feat(core)!: drop node 12",
        );
        assert_eq!(parsed.commit_type.as_deref(), Some("feat"));
        assert_eq!(parsed.notes.len(), 1);
        assert_eq!(parsed.notes[0].text, "drop node 12");
    }

    #[test]
    fn test_merge_header_is_skipped() {
        let parsed = parse_with(
            ParserOverrides {
                merge_pattern: Some(r"^Merge pull request #(\d+) from (.*)$".to_string()),
                merge_correspondence: Some(vec!["id".to_string(), "source".to_string()]),
                ..Default::default()
            },
            "Merge pull request #7 from octo/feature\n\nfeat: merged feature",
        );
        assert_eq!(parsed.header, "feat: merged feature");
        assert_eq!(parsed.commit_type.as_deref(), Some("feat"));
        assert_eq!(parsed.merge.unwrap().get("id").map(String::as_str), Some("7"));
    }

    #[test]
    fn test_comment_lines_dropped() {
        let parsed = parse_with(
            ParserOverrides {
                comment_char: Some('#'),
                ..Default::default()
            },
            "# leading comment\nfix: real header\n# trailing comment",
        );
        assert_eq!(parsed.header, "fix: real header");
        assert!(parsed.body.is_none());
    }

    #[test]
    fn test_only_comments_under_permissive_merge_pattern() {
        let parsed = parse_with(
            ParserOverrides {
                comment_char: Some('#'),
                merge_pattern: Some(r"^(?:Merge (.*))?$".to_string()),
                ..Default::default()
            },
            "# only a comment",
        );
        assert_eq!(parsed.header, "");
        assert!(parsed.commit_type.is_none());
        assert!(parsed.body.is_none());
    }

    #[test]
    fn test_invalid_pattern_fails() {
        let options = ParserOptions {
            header_pattern: "(".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            ConventionalParser::new(&options),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }
}
