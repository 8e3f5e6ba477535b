//! Issue reference extraction
//!
//! A line is split at every action keyword followed by whitespace; each token
//! found after a keyword and before the next one is attributed to that
//! keyword. Tokens that appear before the first keyword carry no action, so a
//! `fix:` type prefix never counts as one.

use regex::{Regex, RegexBuilder};

use relnotes_core::config::ParserOptions;
use relnotes_core::ConfigError;

use crate::types::Reference;

/// Finds issue references in commit text
#[derive(Debug, Clone)]
pub struct ReferenceMatcher {
    actions: Option<Regex>,
    issues: Option<Regex>,
}

impl ReferenceMatcher {
    /// Build a matcher from parser options
    pub fn new(options: &ParserOptions) -> Result<Self, ConfigError> {
        let actions = alternation(&options.reference_actions)
            .map(|alt| {
                RegexBuilder::new(&format!(r"\b({})\s+", alt))
                    .case_insensitive(true)
                    .build()
            })
            .transpose()
            .map_err(|source| invalid("parser_opts.reference_actions", source))?;

        let issues = alternation(&options.issue_prefixes)
            .map(|alt| {
                RegexBuilder::new(&format!(r"(?:([\w./-]*?))?({})([\w-]*\d+)", alt))
                    .case_insensitive(!options.issue_prefixes_case_sensitive)
                    .build()
            })
            .transpose()
            .map_err(|source| invalid("parser_opts.issue_prefixes", source))?;

        Ok(Self { actions, issues })
    }

    /// Collect every reference on one line
    pub fn scan_line(&self, line: &str, out: &mut Vec<Reference>) {
        let Some(issues) = &self.issues else {
            return;
        };

        for (action, sentence) in self.sentences(line) {
            for caps in issues.captures_iter(sentence) {
                let Some(issue) = caps.get(3) else { continue };
                let (owner, repository) = caps
                    .get(1)
                    .map(|m| split_repository(m.as_str()))
                    .unwrap_or((None, None));

                out.push(Reference {
                    action: action.map(str::to_string),
                    owner,
                    repository,
                    issue: issue.as_str().to_string(),
                    prefix: caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default(),
                    raw: caps.get(0).map(|m| m.as_str().to_string()).unwrap_or_default(),
                });
            }
        }
    }

    /// Collect references across several lines
    pub fn scan<'a>(&self, lines: impl IntoIterator<Item = &'a str>) -> Vec<Reference> {
        let mut out = Vec::new();
        for line in lines {
            self.scan_line(line, &mut out);
        }
        out
    }

    fn sentences<'a>(&self, line: &'a str) -> Vec<(Option<&'a str>, &'a str)> {
        let Some(actions) = &self.actions else {
            return vec![(None, line)];
        };

        // (keyword, start of keyword, end of trailing whitespace)
        let keywords: Vec<_> = actions
            .captures_iter(line)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some((caps.get(1)?.as_str(), whole.start(), whole.end()))
            })
            .collect();
        let mut out = Vec::with_capacity(keywords.len() + 1);
        let first = keywords.first().map(|k| k.1).unwrap_or(line.len());
        out.push((None, &line[..first]));

        for (i, &(keyword, _, end_of_keyword)) in keywords.iter().enumerate() {
            let end = keywords.get(i + 1).map(|k| k.1).unwrap_or(line.len());
            out.push((Some(keyword), &line[end_of_keyword..end]));
        }
        out
    }
}

fn alternation(values: &[String]) -> Option<String> {
    let mut values: Vec<&str> = values.iter().map(String::as_str).filter(|v| !v.is_empty()).collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by_key(|v| std::cmp::Reverse(v.len()));
    Some(values.into_iter().map(regex::escape).collect::<Vec<_>>().join("|"))
}

fn split_repository(value: &str) -> (Option<String>, Option<String>) {
    if value.is_empty() {
        return (None, None);
    }
    match value.rsplit_once('/') {
        Some((owner, repo)) => (
            Some(owner.to_string()).filter(|o| !o.is_empty()),
            Some(repo.to_string()).filter(|r| !r.is_empty()),
        ),
        None => (None, Some(value.to_string())),
    }
}

fn invalid(field: &str, source: regex::Error) -> ConfigError {
    ConfigError::InvalidPattern {
        field: field.to_string(),
        source,
    }
}
