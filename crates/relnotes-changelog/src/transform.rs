//! Per-commit transforms applied before grouping

use relnotes_core::config::WriterOptions;
use relnotes_core::{BoxError, LinkContext};

use crate::types::ParsedCommit;

/// A step that may rewrite or drop a commit before it is grouped.
///
/// Returning `Ok(None)` drops the commit. An error aborts generation and its
/// message is reported unchanged.
pub trait CommitTransform: Send + Sync {
    /// Transform one commit
    fn transform(
        &self,
        commit: ParsedCommit,
        context: &LinkContext,
    ) -> Result<Option<ParsedCommit>, BoxError>;
}

impl<F> CommitTransform for F
where
    F: Fn(ParsedCommit, &LinkContext) -> Result<Option<ParsedCommit>, BoxError> + Send + Sync,
{
    fn transform(
        &self,
        commit: ParsedCommit,
        context: &LinkContext,
    ) -> Result<Option<ParsedCommit>, BoxError> {
        self(commit, context)
    }
}

/// Built-in transform driven by writer options: renames note titles, hides
/// wildcard scopes and sets the short hash shown in place of the full one.
#[derive(Debug, Clone, Default)]
pub struct StandardTransform {
    note_title: Option<String>,
    hide_wildcard_scope: bool,
    hash_length: Option<usize>,
}

impl StandardTransform {
    /// Create the transform for a set of writer options
    pub fn new(options: &WriterOptions) -> Self {
        Self {
            note_title: options.note_title.clone(),
            hide_wildcard_scope: options.hide_wildcard_scope,
            hash_length: options.hash_length,
        }
    }
}

impl CommitTransform for StandardTransform {
    fn transform(
        &self,
        mut commit: ParsedCommit,
        _context: &LinkContext,
    ) -> Result<Option<ParsedCommit>, BoxError> {
        if let Some(title) = &self.note_title {
            for note in &mut commit.notes {
                note.title.clone_from(title);
            }
        }

        if self.hide_wildcard_scope && commit.scope.as_deref() == Some("*") {
            commit.scope = None;
            commit.fields.remove("scope");
        }

        if let Some(length) = self.hash_length {
            if let Some((cut, _)) = commit.hash.char_indices().nth(length) {
                commit.short_hash = Some(commit.hash[..cut].to_string());
            }
        }

        Ok(Some(commit))
    }
}
