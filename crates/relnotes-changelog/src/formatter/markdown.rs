//! Markdown release notes formatter

use relnotes_core::config::WriterOptions;
use relnotes_core::{LinkContext, Result};
use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::types::{ParsedCommit, Reference, ReleaseDocument};

/// Markdown release notes formatter
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    /// Field rendered as the commit text
    pub subject_field: String,
}

impl MarkdownFormatter {
    /// Create a formatter for a set of writer options
    pub fn new(options: &WriterOptions) -> Self {
        Self {
            subject_field: options.subject_field.clone(),
        }
    }

    fn heading(&self, ctx: &LinkContext) -> String {
        let level = if ctx.is_patch() { "##" } else { "#" };
        let mut line = match ctx.compare_url() {
            Some(url) => format!("{} [{}]({})", level, ctx.version, url),
            None => format!("{} {}", level, ctx.version),
        };
        if let Some(title) = ctx.title.as_deref().filter(|t| !t.is_empty()) {
            line.push_str(&format!(" \"{}\"", title));
        }
        if let Some(date) = ctx.date.as_deref().filter(|d| !d.is_empty()) {
            line.push_str(&format!(" ({})", date));
        }
        line
    }

    fn commit_line(&self, commit: &ParsedCommit, ctx: &LinkContext) -> String {
        let mut line = String::from("*");
        if let Some(scope) = commit.field("scope") {
            line.push_str(&format!(" **{}:**", scope));
        }

        let subject = commit
            .field(&self.subject_field)
            .unwrap_or(commit.header.as_str());
        line.push(' ');
        line.push_str(subject);

        match ctx.commit_url(&commit.hash).filter(|_| ctx.link_references) {
            Some(url) => line.push_str(&format!(" ([{}]({}))", commit.display_hash(), url)),
            None => line.push_str(&format!(" {}", commit.display_hash())),
        }

        let references: Vec<String> = commit
            .actionable_references()
            .map(|r| reference_link(r, ctx))
            .collect();
        if !references.is_empty() {
            line.push_str(", closes ");
            line.push_str(&references.join(", "));
        }

        line
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new(&WriterOptions::default())
    }
}

fn reference_link(reference: &Reference, ctx: &LinkContext) -> String {
    let label = match (&reference.owner, &reference.repository) {
        (Some(owner), Some(repo)) => format!("{}/{}#{}", owner, repo, reference.issue),
        (None, Some(repo)) => format!("{}#{}", repo, reference.issue),
        _ => format!("#{}", reference.issue),
    };

    if !ctx.link_references {
        return label;
    }

    let url = match &reference.repository {
        Some(repo) => ctx.host_url().map(|root| {
            let owner = reference
                .owner
                .as_deref()
                .or(ctx.owner.as_deref())
                .unwrap_or_default();
            format!("{}/{}/{}/{}/{}", root, owner, repo, ctx.issue, reference.issue)
        }),
        None => ctx.issue_url(&reference.issue),
    };

    match url {
        Some(url) => format!("[{}]({})", label, url),
        None => label,
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, doc), fields(version = %doc.context.version, section_count = doc.sections.len()))]
    fn format(&self, doc: &ReleaseDocument) -> Result<String> {
        let ctx = &doc.context;
        let mut blocks: Vec<String> = Vec::new();

        if let Some(header) = doc.header.as_deref().filter(|h| !h.trim().is_empty()) {
            blocks.push(header.trim_end_matches('\n').to_string());
        }

        blocks.push(self.heading(ctx));

        for section in doc.sections.iter().filter(|s| !s.is_empty()) {
            let lines: Vec<String> = section
                .commits
                .iter()
                .map(|c| self.commit_line(c, ctx))
                .collect();
            blocks.push(format!("### {}\n\n{}", section.title, lines.join("\n")));
        }

        for group in &doc.note_groups {
            let lines: Vec<String> = group
                .notes
                .iter()
                .map(|note| {
                    let text = note.text.replace('\n', "\n  ");
                    match note.scope.as_deref().filter(|s| !s.is_empty()) {
                        Some(scope) => format!("* **{}:** {}", scope, text),
                        None => format!("* {}", text),
                    }
                })
                .collect();
            blocks.push(format!("### {}\n\n{}", group.title, lines.join("\n")));
        }

        if let Some(footer) = doc.footer.as_deref().filter(|f| !f.trim().is_empty()) {
            blocks.push(footer.trim_end_matches('\n').to_string());
        }

        let mut output = blocks.join("\n\n");
        output.push('\n');

        debug!(output_len = output.len(), "markdown release notes formatted");
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "markdown"
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}
