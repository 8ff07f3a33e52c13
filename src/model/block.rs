//! Block-level types.

use super::Table;
use serde::{Deserialize, Serialize};

/// One structural unit of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A section title
    Heading {
        /// Number of `#` markers on the source line (1-6)
        level: u8,
        /// Heading text without markers
        text: String,
    },

    /// A line of prose
    Paragraph {
        /// Paragraph text
        text: String,
        /// Whether the source line was wrapped in a bold marker
        emphasized: bool,
    },

    /// A reconstructed table
    Table(Table),
}

impl Block {
    /// Create a heading block.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        Block::Heading {
            level: level.clamp(1, 6),
            text: text.into(),
        }
    }

    /// Create a plain paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph {
            text: text.into(),
            emphasized: false,
        }
    }

    /// Create an emphasized paragraph block.
    pub fn emphasized(text: impl Into<String>) -> Self {
        Block::Paragraph {
            text: text.into(),
            emphasized: true,
        }
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }

    /// Check if this is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Get the table if this block is one.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Block::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { text, .. } | Block::Paragraph { text, .. } => text.clone(),
            Block::Table(t) => t.plain_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_clamped() {
        assert_eq!(
            Block::heading("Bab", 9),
            Block::Heading {
                level: 6,
                text: "Bab".into()
            }
        );
        assert!(Block::heading("Bab", 0).is_heading());
    }

    #[test]
    fn test_serde_tag() {
        let json = serde_json::to_string(&Block::emphasized("Catatan")).unwrap();
        assert!(json.contains("\"type\":\"paragraph\""));
        assert!(json.contains("\"emphasized\":true"));
    }
}
