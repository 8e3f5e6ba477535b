//! Shared types for release notes generation

use serde::{Deserialize, Serialize};

use crate::hosts::{DEFAULT_COMMIT_SEGMENT, DEFAULT_ISSUE_SEGMENT};

/// A commit as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommit {
    /// Commit hash
    pub hash: String,
    /// Full commit message (header and body)
    pub message: String,
}

impl RawCommit {
    /// Create a new raw commit
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
        }
    }

    /// Whether the message carries any text at all
    pub fn is_blank(&self) -> bool {
        self.message.trim().is_empty()
    }
}

/// The release being described, as known to the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    /// Version being released
    pub version: String,
    /// Tag (or head) of the last release
    pub previous_tag: Option<String>,
    /// Tag (or head) of this release
    pub current_tag: Option<String>,
    /// Remote URL of the repository
    pub repository_url: Option<String>,
    /// Optional release title
    pub title: Option<String>,
    /// Release date, already formatted
    pub date: Option<String>,
}

impl ReleaseInfo {
    /// Create release info for a version
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Default::default()
        }
    }

    /// Set the previous and current tags
    pub fn with_tags(mut self, previous: impl Into<String>, current: impl Into<String>) -> Self {
        self.previous_tag = Some(previous.into());
        self.current_tag = Some(current.into());
        self
    }

    /// Set the repository URL
    pub fn with_repository_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = Some(url.into());
        self
    }
}

/// Values used to build links and the version heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkContext {
    /// Version being released
    pub version: String,
    /// Optional release title
    pub title: Option<String>,
    /// Release date, already formatted
    pub date: Option<String>,
    /// Host with or without scheme (e.g. `https://github.com`)
    pub host: Option<String>,
    /// Repository owner
    pub owner: Option<String>,
    /// Repository name
    pub repository: Option<String>,
    /// Full repository URL, used when host/owner/repository are not known
    pub repo_url: Option<String>,
    /// Tag or head of the previous release
    pub previous_tag: Option<String>,
    /// Tag or head of this release
    pub current_tag: Option<String>,
    /// Whether a compare link is wanted
    pub link_compare: bool,
    /// Whether commits and references are rendered as links
    pub link_references: bool,
    /// Path segment for issues (e.g. `issues`)
    pub issue: String,
    /// Path segment for commits (e.g. `commit`)
    pub commit: String,
}

impl LinkContext {
    /// Create a context for a version with no repository information
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            title: None,
            date: None,
            host: None,
            owner: None,
            repository: None,
            repo_url: None,
            previous_tag: None,
            current_tag: None,
            link_compare: true,
            link_references: true,
            issue: DEFAULT_ISSUE_SEGMENT.to_string(),
            commit: DEFAULT_COMMIT_SEGMENT.to_string(),
        }
    }

    /// Set host, owner and repository
    pub fn with_repository(
        mut self,
        host: impl Into<String>,
        owner: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        self.host = Some(host.into());
        self.owner = Some(owner.into());
        self.repository = Some(repository.into());
        self
    }

    /// Set the previous and current tags
    pub fn with_tags(mut self, previous: impl Into<String>, current: impl Into<String>) -> Self {
        self.previous_tag = Some(previous.into());
        self.current_tag = Some(current.into());
        self
    }

    /// Set the issue and commit path segments
    pub fn with_segments(mut self, issue: impl Into<String>, commit: impl Into<String>) -> Self {
        self.issue = issue.into();
        self.commit = commit.into();
        self
    }

    /// Set the release date
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Enable or disable the compare link
    pub fn with_link_compare(mut self, enabled: bool) -> Self {
        self.link_compare = enabled;
        self
    }

    /// Enable or disable commit and reference links
    pub fn with_link_references(mut self, enabled: bool) -> Self {
        self.link_references = enabled;
        self
    }

    /// Host with a scheme (`https://` is assumed when none is given)
    pub fn host_url(&self) -> Option<String> {
        non_empty(&self.host).map(|host| {
            let host = host.trim_end_matches('/');
            if host.contains("://") {
                host.to_string()
            } else {
                format!("https://{}", host)
            }
        })
    }

    /// Base URL of the repository, if it can be built
    pub fn base_url(&self) -> Option<String> {
        let Some(repository) = non_empty(&self.repository) else {
            return non_empty(&self.repo_url).map(|u| u.trim_end_matches('/').to_string());
        };

        let mut parts = Vec::new();
        if let Some(host) = self.host_url() {
            parts.push(host);
        }
        if let Some(owner) = non_empty(&self.owner) {
            parts.push(owner.to_string());
        }
        parts.push(repository.to_string());
        Some(parts.join("/"))
    }

    /// Whether a compare link is rendered: both tags set and linking enabled
    pub fn has_compare_link(&self) -> bool {
        self.link_compare
            && non_empty(&self.previous_tag).is_some()
            && non_empty(&self.current_tag).is_some()
            && self.base_url().is_some()
    }

    /// Compare URL between the two tags
    pub fn compare_url(&self) -> Option<String> {
        if !self.has_compare_link() {
            return None;
        }
        let base = self.base_url()?;
        Some(format!(
            "{}/compare/{}...{}",
            base,
            self.previous_tag.as_deref().unwrap_or_default(),
            self.current_tag.as_deref().unwrap_or_default()
        ))
    }

    /// URL of a single commit
    pub fn commit_url(&self, hash: &str) -> Option<String> {
        self.base_url()
            .map(|base| format!("{}/{}/{}", base, self.commit, hash))
    }

    /// URL of a single issue
    pub fn issue_url(&self, issue: &str) -> Option<String> {
        self.base_url()
            .map(|base| format!("{}/{}/{}", base, self.issue, issue))
    }

    /// Whether the version is a patch release (semver patch component set)
    pub fn is_patch(&self) -> bool {
        semver::Version::parse(self.version.trim_start_matches('v'))
            .map(|v| v.patch != 0)
            .unwrap_or(false)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
