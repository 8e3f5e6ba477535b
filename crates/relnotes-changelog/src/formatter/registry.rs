//! Formatter lookup by name or output file extension

use std::path::Path;
use std::sync::Arc;

use relnotes_core::config::WriterOptions;

use super::{ChangelogFormatter, JsonFormatter, MarkdownFormatter};

/// The built-in release notes formatters
pub struct FormatterRegistry {
    formatters: Vec<Arc<dyn ChangelogFormatter>>,
}

impl FormatterRegistry {
    /// Markdown (first, the default) and JSON, configured from `options`
    pub fn new(options: &WriterOptions) -> Self {
        Self {
            formatters: vec![
                Arc::new(MarkdownFormatter::new(options)),
                Arc::new(JsonFormatter),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ChangelogFormatter>> {
        self.formatters.iter().find(|f| f.name() == name).cloned()
    }

    pub fn by_extension(&self, extension: &str) -> Option<Arc<dyn ChangelogFormatter>> {
        self.formatters
            .iter()
            .find(|f| f.extension().eq_ignore_ascii_case(extension))
            .cloned()
    }

    /// Formatter matching the extension of `path`, falling back to markdown
    pub fn for_path(&self, path: &Path) -> Arc<dyn ChangelogFormatter> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| self.by_extension(e))
            .unwrap_or_else(|| self.default_formatter())
    }

    pub fn default_formatter(&self) -> Arc<dyn ChangelogFormatter> {
        Arc::clone(&self.formatters[0])
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.formatters.iter().map(|f| f.name()).collect()
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new(&WriterOptions::default())
    }
}
