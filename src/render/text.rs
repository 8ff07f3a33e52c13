//! Plain text rendering.

use crate::error::Result;
use crate::model::{Block, Document};

use super::RenderOptions;

const DIVIDER_WIDTH: usize = 40;

/// Convert a document to plain text.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut parts = doc.front_matter.lines();

    if options.include_divider && !parts.is_empty() {
        parts.push("-".repeat(DIVIDER_WIDTH));
    }

    for block in &doc.blocks {
        parts.push(block.plain_text());
        if options.table_spacing && matches!(block, Block::Table(_)) {
            parts.push(String::new());
        }
    }

    Ok(parts.join("\n\n").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FrontMatter, Table};

    #[test]
    fn test_to_text() {
        let table = Table::from_rows(vec![
            vec!["A".to_string(), "B".to_string()],
            vec!["1".to_string(), "2".to_string()],
        ])
        .unwrap();
        let doc = Document::with_blocks(
            FrontMatter::new("SMP 3", "IPS"),
            vec![Block::heading("SOAL", 3), Block::Table(table)],
        );

        let text = to_text(&doc, &RenderOptions::new().with_table_spacing(false)).unwrap();
        let divider = "-".repeat(DIVIDER_WIDTH);
        assert_eq!(
            text,
            format!("SMP 3\n\nIPS\n\n{}\n\nSOAL\n\nA\tB\n1\t2", divider)
        );
    }
}
