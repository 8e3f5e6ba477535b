//! Changelog types

use std::collections::BTreeMap;

use relnotes_core::LinkContext;
use serde::{Deserialize, Serialize};

/// A commit after its message has been parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommit {
    /// Original commit hash
    pub hash: String,
    /// Abbreviated hash shown instead of `hash` in rendered text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_hash: Option<String>,
    /// First line of the message
    pub header: String,
    /// Body paragraphs that are not notes
    pub body: Option<String>,
    /// Commit type (feat, fix, etc.)
    #[serde(rename = "type")]
    pub commit_type: Option<String>,
    /// Scope (optional, in parentheses)
    pub scope: Option<String>,
    /// Header text after type and scope
    pub subject: Option<String>,
    /// Every header capture by field name
    pub fields: BTreeMap<String, String>,
    /// Issue references found in header and body
    pub references: Vec<Reference>,
    /// Notes such as breaking changes
    pub notes: Vec<Note>,
    /// What this commit reverts, if it is a revert
    pub revert: Option<Revert>,
    /// Merge-pattern captures, if this is a merge commit
    pub merge: Option<BTreeMap<String, String>>,
}

impl ParsedCommit {
    /// A commit whose header matched nothing
    pub fn unparsed(hash: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            short_hash: None,
            header: header.into(),
            body: None,
            commit_type: None,
            scope: None,
            subject: None,
            fields: BTreeMap::new(),
            references: Vec::new(),
            notes: Vec::new(),
            revert: None,
            merge: None,
        }
    }

    /// Look up a field by name.
    ///
    /// `type`, `scope` and `subject` read the typed fields, `hash` and
    /// `header` the commit itself; anything else comes from header captures.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "type" => self.commit_type.as_deref(),
            "scope" => self.scope.as_deref(),
            "subject" => self.subject.as_deref(),
            "hash" => Some(self.hash.as_str()),
            "shortHash" | "short_hash" => Some(self.display_hash()),
            "header" => Some(self.header.as_str()),
            other => self.fields.get(other).map(String::as_str),
        }
        .filter(|value| !value.is_empty())
    }

    /// Hash as shown to readers: the short form when one was set
    pub fn display_hash(&self) -> &str {
        self.short_hash.as_deref().unwrap_or(&self.hash)
    }

    /// Whether the commit carries at least one note
    pub fn has_notes(&self) -> bool {
        !self.notes.is_empty()
    }

    /// References that name an action (e.g. `closes #12`)
    pub fn actionable_references(&self) -> impl Iterator<Item = &Reference> {
        self.references.iter().filter(|r| r.action.is_some())
    }
}

/// A mention of an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Action keyword preceding the issue, as written
    pub action: Option<String>,
    /// Owner of the repository the issue lives in
    pub owner: Option<String>,
    /// Repository the issue lives in
    pub repository: Option<String>,
    /// Issue identifier without prefix
    pub issue: String,
    /// Prefix that introduced the issue (e.g. `#`)
    pub prefix: String,
    /// Matched text
    pub raw: String,
}

/// A note block such as `BREAKING CHANGE: ...`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Keyword that opened the note
    pub title: String,
    /// Note text
    pub text: String,
}

/// Revert information extracted from a revert commit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revert {
    /// Captures by field name (`header`, `hash` by default)
    pub fields: BTreeMap<String, String>,
}

impl Revert {
    /// Header of the reverted commit
    pub fn header(&self) -> Option<&str> {
        self.fields.get("header").map(String::as_str)
    }

    /// Hash of the reverted commit
    pub fn hash(&self) -> Option<&str> {
        self.fields.get("hash").map(String::as_str)
    }
}

/// A section in the release notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section title
    pub title: String,
    /// Commits in this section
    pub commits: Vec<ParsedCommit>,
}

impl Section {
    /// Create a new section
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            commits: Vec::new(),
        }
    }

    /// Add a commit to the section
    pub fn add_commit(&mut self, commit: ParsedCommit) {
        self.commits.push(commit);
    }

    /// Check if section is empty
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// A note as rendered, with the scope and hash of its commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEntry {
    /// Note text
    pub text: String,
    /// Scope of the commit carrying the note
    pub scope: Option<String>,
    /// Hash of the commit carrying the note
    pub hash: String,
}

/// Notes sharing a title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteGroup {
    /// Note title
    pub title: String,
    /// Notes in first-seen order
    pub notes: Vec<NoteEntry>,
}

/// A fully grouped release, ready to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDocument {
    /// Version and link information
    pub context: LinkContext,
    /// Sections in render order
    pub sections: Vec<Section>,
    /// Note groups in first-seen order
    pub note_groups: Vec<NoteGroup>,
    /// Text placed before the document
    pub header: Option<String>,
    /// Text placed after the document
    pub footer: Option<String>,
}

impl ReleaseDocument {
    /// Create an empty document for a context
    pub fn new(context: LinkContext) -> Self {
        Self {
            context,
            sections: Vec::new(),
            note_groups: Vec::new(),
            header: None,
            footer: None,
        }
    }

    /// Add a section, skipping empty ones
    pub fn add_section(&mut self, section: Section) {
        if !section.is_empty() {
            self.sections.push(section);
        }
    }

    /// Add a note under its title, keeping first-seen order of titles
    pub fn add_note(&mut self, title: &str, entry: NoteEntry) {
        match self.note_groups.iter_mut().find(|g| g.title == title) {
            Some(group) => group.notes.push(entry),
            None => self.note_groups.push(NoteGroup {
                title: title.to_string(),
                notes: vec![entry],
            }),
        }
    }

    /// Number of commits across all sections
    pub fn commit_count(&self) -> usize {
        self.sections.iter().map(|s| s.commits.len()).sum()
    }

    /// Check if the document has any content
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.note_groups.is_empty()
    }
}
