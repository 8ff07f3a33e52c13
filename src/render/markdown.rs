//! Markdown rendering.
//!
//! Produces clean Markdown from a parsed document: separator rows are
//! regenerated after each table header and headings share one level.

use crate::error::Result;
use crate::model::{Block, Document, Table};

use super::RenderOptions;

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let mut output = String::new();

        if self.options.include_frontmatter {
            output.push_str(&doc.metadata.to_yaml_frontmatter());
        }

        self.render_front_matter(&mut output, doc);

        for block in &doc.blocks {
            self.render_block(&mut output, block);
        }

        Ok(output.trim().to_string())
    }

    fn render_front_matter(&self, output: &mut String, doc: &Document) {
        let mut title_lines = doc.front_matter.title_lines().into_iter();
        if let Some(first) = title_lines.next() {
            output.push_str(&format!("# {}\n\n", first));
        }
        for line in title_lines {
            output.push_str(&format!("**{}**\n\n", line));
        }

        for line in doc.front_matter.metadata_lines() {
            output.push_str(&line);
            output.push_str("\n\n");
        }

        if self.options.include_divider && !doc.front_matter.is_empty() {
            output.push_str("---\n\n");
        }
    }

    fn render_block(&self, output: &mut String, block: &Block) {
        match block {
            Block::Heading { text, .. } => {
                let prefix = "#".repeat(self.options.heading_level as usize);
                let line = format!("{} {}", prefix, text);
                output.push_str(line.trim_end());
                output.push_str("\n\n");
            }
            Block::Paragraph { text, emphasized } => {
                if *emphasized {
                    output.push_str(&format!("**{}**\n\n", text));
                } else {
                    output.push_str(text);
                    output.push_str("\n\n");
                }
            }
            Block::Table(table) => self.render_table(output, table),
        }
    }

    fn render_table(&self, output: &mut String, table: &Table) {
        if table.column_count() == 0 {
            return;
        }

        for (i, row) in table.rows.iter().enumerate() {
            let bold = self.options.bold_table_header && i < table.header_rows as usize;
            output.push('|');
            for cell in row {
                if bold {
                    output.push_str(&format!(" **{}** |", cell));
                } else {
                    output.push_str(&format!(" {} |", cell));
                }
            }
            output.push('\n');

            // Separator spans the full width so ragged rows stay inside the table.
            if i + 1 == table.header_rows as usize || (i == 0 && table.header_rows == 0) {
                output.push('|');
                for _ in 0..table.column_count() {
                    output.push_str(" --- |");
                }
                output.push('\n');
            }
        }

        if self.options.table_spacing {
            output.push('\n');
        }
    }
}
