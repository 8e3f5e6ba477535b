//! Release notes formatters

mod json;
mod markdown;
mod registry;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use registry::FormatterRegistry;

use relnotes_core::Result;

use crate::types::ReleaseDocument;

/// Trait for release notes formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Render a grouped document
    fn format(&self, doc: &ReleaseDocument) -> Result<String>;

    /// Name used to select this formatter
    fn name(&self) -> &'static str;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;
}
