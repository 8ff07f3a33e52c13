//! Document-level types.

use super::Block;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document assembled from generated text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, creation time)
    pub metadata: Metadata,

    /// Identification fields rendered above the body
    pub front_matter: FrontMatter,

    /// Body blocks in source order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(front_matter: FrontMatter) -> Self {
        Self {
            metadata: Metadata::for_front_matter(&front_matter),
            front_matter,
            blocks: Vec::new(),
        }
    }

    /// Create a document from already parsed blocks.
    pub fn with_blocks(front_matter: FrontMatter, blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            ..Self::new(front_matter)
        }
    }

    /// Add a block to the document.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Check if the document has no body blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of table blocks.
    pub fn table_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_table()).count()
    }

    /// Number of heading blocks.
    pub fn heading_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_heading()).count()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        let mut parts = self.front_matter.lines();
        parts.extend(self.blocks.iter().map(Block::plain_text));
        parts.join("\n\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(FrontMatter::default())
    }
}

/// Caller-supplied identification fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    /// School or institution name, first line of the title block
    pub institution: String,

    /// Document title shown under the institution
    pub title: Option<String>,

    /// Subject line (e.g. "Mata Pelajaran: Biologi")
    pub subject: String,

    /// Further metadata lines (class/level, curriculum, ...)
    pub extra_lines: Vec<String>,
}

impl FrontMatter {
    /// Create front matter with institution and subject.
    pub fn new(institution: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            institution: institution.into(),
            subject: subject.into(),
            ..Default::default()
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a metadata line.
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.extra_lines.push(line.into());
        self
    }

    /// Parse front matter from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::FrontMatter(e.to_string()))
    }

    /// Title block lines: institution, then the title if any. Empty fields are skipped.
    pub fn title_lines(&self) -> Vec<String> {
        std::iter::once(self.institution.as_str())
            .chain(self.title.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    /// Metadata lines: subject, then extra lines. Empty fields are skipped.
    pub fn metadata_lines(&self) -> Vec<String> {
        std::iter::once(self.subject.as_str())
            .chain(self.extra_lines.iter().map(String::as_str))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    /// All non-empty lines in render order.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = self.title_lines();
        lines.extend(self.metadata_lines());
        lines
    }

    /// Check whether every field is blank.
    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Producing application
    pub generator: String,

    /// Creation date
    pub created: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Derive metadata from front matter, stamped with the current time.
    pub fn for_front_matter(front_matter: &FrontMatter) -> Self {
        let title = front_matter
            .title
            .clone()
            .or_else(|| Some(front_matter.institution.clone()))
            .filter(|t| !t.trim().is_empty());
        let subject = Some(front_matter.subject.clone()).filter(|s| !s.trim().is_empty());

        Self {
            title,
            subject,
            generator: format!("soaldoc {}", env!("CARGO_PKG_VERSION")),
            created: Some(Utc::now()),
        }
    }

    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        if let Some(ref title) = self.title {
            lines.push(format!("title: \"{}\"", escape_yaml(title)));
        }
        if let Some(ref subject) = self.subject {
            lines.push(format!("subject: \"{}\"", escape_yaml(subject)));
        }
        if let Some(ref created) = self.created {
            lines.push(format!("created: {}", created.to_rfc3339()));
        }
        lines.push(format!("generator: \"{}\"", escape_yaml(&self.generator)));

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
