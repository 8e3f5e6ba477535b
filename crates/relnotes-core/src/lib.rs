//! relnotes core - shared types, configuration and errors
//!
//! This crate holds what the release notes pipeline consumes from its
//! surroundings: plugin configuration and its layering, the link context,
//! repository URL resolution and the error types.

pub mod config;
pub mod error;
pub mod hosts;
pub mod types;

pub use error::{
    BoxError, ChangelogError, ConfigError, HostError, RelnotesError, Result, MODULE_NOT_FOUND,
};
pub use hosts::{resolve_repository_url, HostKind, RepositoryInfo};
pub use types::{LinkContext, RawCommit, ReleaseInfo};
