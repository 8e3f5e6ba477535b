//! Commit parsing

mod conventional;
mod references;

pub use conventional::ConventionalParser;
pub use references::ReferenceMatcher;

use relnotes_core::RawCommit;
use tracing::trace;

use crate::types::ParsedCommit;

/// Trait for commit parsers
pub trait CommitParser: Send + Sync {
    /// Parse one commit. Never fails: a message the grammar does not match
    /// yields a commit with no fields.
    fn parse(&self, commit: &RawCommit) -> ParsedCommit;
}

/// Lazy iterator of parsed commits; blank messages are skipped.
///
/// Cloning the iterator restarts parsing from the clone's position.
#[derive(Debug)]
pub struct ParsedCommits<'a, P: ?Sized, I> {
    parser: &'a P,
    inner: I,
}

impl<'a, P: ?Sized, I: Clone> Clone for ParsedCommits<'a, P, I> {
    fn clone(&self) -> Self {
        Self {
            parser: self.parser,
            inner: self.inner.clone(),
        }
    }
}

impl<'a, P, I> Iterator for ParsedCommits<'a, P, I>
where
    P: CommitParser + ?Sized,
    I: Iterator<Item = &'a RawCommit>,
{
    type Item = ParsedCommit;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let commit = self.inner.next()?;
            if commit.is_blank() {
                trace!(hash = %commit.hash, "skipping empty commit message");
                continue;
            }
            return Some(self.parser.parse(commit));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// Parse commits lazily in input order
pub fn parse_commits<'a, P, I>(parser: &'a P, commits: I) -> ParsedCommits<'a, P, I::IntoIter>
where
    P: CommitParser + ?Sized,
    I: IntoIterator<Item = &'a RawCommit>,
{
    ParsedCommits {
        parser,
        inner: commits.into_iter(),
    }
}
