//! JSON formatter

use relnotes_core::{ChangelogError, Result};

use super::ChangelogFormatter;
use crate::types::ReleaseDocument;

/// Renders the grouped document as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl ChangelogFormatter for JsonFormatter {
    fn format(&self, doc: &ReleaseDocument) -> Result<String> {
        serde_json::to_string_pretty(doc)
            .map_err(|e| ChangelogError::RenderFailed(e.to_string()).into())
    }

    fn name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
