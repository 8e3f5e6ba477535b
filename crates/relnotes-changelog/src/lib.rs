//! relnotes changelog - commit parsing and release notes rendering
//!
//! The pipeline runs in three steps: commit messages are parsed against a
//! configurable grammar, commits reverted within the same set are dropped,
//! and the rest are grouped, sorted and rendered as markdown.

pub mod config;
pub mod filter;
pub mod formatter;
pub mod generator;
pub mod parser;
pub mod presets;
pub mod transform;
pub mod types;

pub use config::{link_context, load_changelog_config};
pub use filter::filter_reverted;
pub use formatter::{ChangelogFormatter, FormatterRegistry, JsonFormatter, MarkdownFormatter};
pub use generator::{generate_notes, ReleaseNotesGenerator};
pub use parser::{parse_commits, CommitParser, ConventionalParser};
pub use presets::{Preset, PresetRegistry};
pub use transform::{CommitTransform, StandardTransform};
pub use types::{Note, ParsedCommit, Reference, ReleaseDocument, Revert, Section};
