//! Known git hosts and repository URL resolution

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::HostError;

/// Issue path segment used when the host is not recognized
pub const DEFAULT_ISSUE_SEGMENT: &str = "issues";

/// Commit path segment used when the host is not recognized
pub const DEFAULT_COMMIT_SEGMENT: &str = "commit";

/// Git hosting service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostKind {
    /// github.com
    GitHub,
    /// gitlab.com
    GitLab,
    /// bitbucket.org
    Bitbucket,
    /// Anything else
    Other,
}

impl HostKind {
    /// Detect the host kind from a hostname
    pub fn from_hostname(hostname: &str) -> Self {
        match hostname.to_lowercase().as_str() {
            "github.com" => Self::GitHub,
            "gitlab.com" => Self::GitLab,
            "bitbucket.org" => Self::Bitbucket,
            _ => Self::Other,
        }
    }

    /// Path segment for issue links
    pub fn issue_segment(&self) -> &'static str {
        match self {
            Self::Bitbucket => "issue",
            _ => DEFAULT_ISSUE_SEGMENT,
        }
    }

    /// Path segment for commit links
    pub fn commit_segment(&self) -> &'static str {
        match self {
            Self::Bitbucket => "commits",
            _ => DEFAULT_COMMIT_SEGMENT,
        }
    }
}

/// Repository coordinates resolved from a remote URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    /// Host including scheme and port (e.g. `https://github.com`)
    pub host: String,
    /// Repository owner (may contain `/` for nested groups)
    pub owner: String,
    /// Repository name without `.git`
    pub repository: String,
    /// Detected hosting service
    pub kind: HostKind,
}

impl RepositoryInfo {
    /// Issue path segment for this host
    pub fn issue_segment(&self) -> &'static str {
        self.kind.issue_segment()
    }

    /// Commit path segment for this host
    pub fn commit_segment(&self) -> &'static str {
        self.kind.commit_segment()
    }
}

/// Resolve a repository URL into host, owner and name.
///
/// Accepts `http(s)://`, `git+http(s)://`, `ssh://`, `git+ssh://` and
/// scp-like `[user@]host:owner/repo.git` forms. Non-http schemes are
/// rendered as `https://` without their port.
pub fn resolve_repository_url(raw: &str) -> Result<RepositoryInfo, HostError> {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix("git+").unwrap_or(trimmed);

    let (host, path) = if stripped.contains("://") {
        let url = Url::parse(stripped).map_err(|_| HostError::UnsupportedUrl(raw.to_string()))?;
        let hostname = url
            .host_str()
            .ok_or_else(|| HostError::UnsupportedUrl(raw.to_string()))?;

        let host = match url.scheme() {
            scheme @ ("http" | "https") => match url.port() {
                Some(port) => format!("{}://{}:{}", scheme, hostname, port),
                None => format!("{}://{}", scheme, hostname),
            },
            _ => format!("https://{}", hostname),
        };
        (host, url.path().to_string())
    } else {
        let (authority, path) = stripped
            .split_once(':')
            .ok_or_else(|| HostError::UnsupportedUrl(raw.to_string()))?;
        let hostname = authority.rsplit('@').next().unwrap_or(authority);
        if hostname.is_empty() {
            return Err(HostError::UnsupportedUrl(raw.to_string()));
        }
        (format!("https://{}", hostname), path.to_string())
    };

    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    let (owner, repository) = path
        .rsplit_once('/')
        .filter(|(owner, name)| !owner.is_empty() && !name.is_empty())
        .ok_or_else(|| HostError::MissingPath(raw.to_string()))?;

    let hostname = host
        .split_once("://")
        .map(|(_, rest)| rest.split(':').next().unwrap_or(rest))
        .unwrap_or(&host);
    let kind = HostKind::from_hostname(hostname);

    debug!(url = raw, host = %host, owner, repository, ?kind, "resolved repository url");

    Ok(RepositoryInfo {
        host,
        owner: owner.to_string(),
        repository: repository.to_string(),
        kind,
    })
}
