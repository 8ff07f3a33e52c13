//! Single-pass parser turning a generated body into blocks.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Block;

use super::accumulator::TableAccumulator;
use super::line::{classify, LineKind};
use super::normalize::normalize;
use super::options::{ErrorMode, ParseOptions};

/// Counters collected while parsing a body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Input lines seen
    pub line_count: usize,
    /// Heading blocks emitted
    pub heading_count: usize,
    /// Paragraph blocks emitted
    pub paragraph_count: usize,
    /// Table blocks emitted
    pub table_count: usize,
    /// Table rows accepted into emitted or skipped tables
    pub table_row_count: usize,
    /// Separator rows discarded
    pub separator_count: usize,
    /// Tables dropped because they failed to materialize
    pub skipped_tables: usize,
}

/// Line-oriented body parser.
///
/// Owns its accumulator, so independent parsers never share state.
#[derive(Debug)]
pub struct BodyParser {
    options: ParseOptions,
    accumulator: TableAccumulator,
    blocks: Vec<Block>,
    stats: ParseStats,
}

impl BodyParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            accumulator: TableAccumulator::with_max_columns(options.max_columns),
            options,
            blocks: Vec::new(),
            stats: ParseStats::default(),
        }
    }

    /// Parse a whole body and return its blocks.
    ///
    /// In lenient mode this never fails.
    pub fn parse(mut self, body: &str) -> Result<(Vec<Block>, ParseStats)> {
        let text = if self.options.normalize_unicode {
            normalize(body)
        } else {
            body.to_string()
        };

        for line in text.split('\n') {
            self.feed_line(line)?;
        }
        self.finish()
    }

    /// Feed one line.
    pub fn feed_line(&mut self, line: &str) -> Result<()> {
        self.stats.line_count += 1;
        let kind = classify(line);

        if kind.ends_table() {
            self.flush_table()?;
        }

        match kind {
            LineKind::Separator => self.stats.separator_count += 1,
            LineKind::TableRow(cells) => {
                if !cells.is_empty() {
                    self.stats.table_row_count += 1;
                }
                self.accumulator.push_row(cells);
            }
            LineKind::Heading { level, text } => {
                self.stats.heading_count += 1;
                self.blocks.push(Block::Heading { level, text });
            }
            LineKind::Paragraph { text, emphasized } => {
                self.stats.paragraph_count += 1;
                self.blocks.push(Block::Paragraph { text, emphasized });
            }
            LineKind::Blank => {}
        }

        Ok(())
    }

    /// Flush any trailing table and return the result.
    pub fn finish(mut self) -> Result<(Vec<Block>, ParseStats)> {
        self.flush_table()?;
        log::debug!(
            "Parsed {} lines into {} blocks ({} tables, {} skipped)",
            self.stats.line_count,
            self.blocks.len(),
            self.stats.table_count,
            self.stats.skipped_tables
        );
        Ok((self.blocks, self.stats))
    }

    /// Blocks emitted so far.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Statistics collected so far.
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    fn flush_table(&mut self) -> Result<()> {
        let pending = self.accumulator.pending_rows();
        match self.accumulator.flush() {
            Ok(Some(table)) => {
                log::debug!(
                    "Flushed table: {} rows x {} columns",
                    table.row_count(),
                    table.column_count()
                );
                self.stats.table_count += 1;
                self.blocks.push(Block::Table(table));
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => match self.options.error_mode {
                ErrorMode::Strict => Err(Error::Table(e)),
                ErrorMode::Lenient => {
                    log::warn!("Skipping table of {} rows: {}", pending, e);
                    self.stats.skipped_tables += 1;
                    Ok(())
                }
            },
        }
    }
}

impl Default for BodyParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a body with the given options.
pub fn parse_with_options(body: &str, options: ParseOptions) -> Result<(Vec<Block>, ParseStats)> {
    BodyParser::with_options(options).parse(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;
    use crate::model::Table;

    fn parse(body: &str) -> Vec<Block> {
        BodyParser::new().parse(body).unwrap().0
    }

    fn table(rows: &[&[&str]]) -> Block {
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        Block::Table(Table::from_rows(rows).unwrap())
    }

    #[test]
    fn test_blueprint_scenario() {
        let body = "### KISI-KISI\n\
                    | No | TP | Level |\n\
                    | --- | --- | --- |\n\
                    | 1 | Memahami X | L2 |\n\
                    \n\
                    Naskah soal berikut ini.";
        assert_eq!(
            parse(body),
            vec![
                Block::heading("KISI-KISI", 3),
                table(&[&["No", "TP", "Level"], &["1", "Memahami X", "L2"]]),
                Block::paragraph("Naskah soal berikut ini."),
            ]
        );
    }

    #[test]
    fn test_table_flushed_at_end_of_input() {
        let blocks = parse("Intro\n| A | B |\n| 1 | 2 |");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1], table(&[&["A", "B"], &["1", "2"]]));
    }

    #[test]
    fn test_separator_does_not_break_run() {
        let blocks = parse("| A |\n|---|\n| B |\n|:-:|\n| C |");
        assert_eq!(blocks, vec![table(&[&["A"], &["B"], &["C"]])]);
    }

    #[test]
    fn test_blank_line_splits_tables() {
        let blocks = parse("| A |\n\n| B |");
        assert_eq!(blocks, vec![table(&[&["A"]]), table(&[&["B"]])]);
    }

    #[test]
    fn test_heading_flushes_table_first() {
        let blocks = parse("| A | B |\n## KUNCI JAWABAN");
        assert_eq!(
            blocks,
            vec![table(&[&["A", "B"]]), Block::heading("KUNCI JAWABAN", 2)]
        );
    }

    #[test]
    fn test_ragged_rows() {
        let blocks = parse("| A | B | C |\n| X |");
        let t = blocks[0].as_table().unwrap();
        assert_eq!(t.column_count(), 3);
        assert_eq!(t.cell(1, 0), Some("X"));
        assert_eq!(t.cell(1, 1), None);
        assert_eq!(t.cell(1, 2), None);
    }

    #[test]
    fn test_crlf_input() {
        let blocks = parse("**Petunjuk**\r\n| 1 | A |\r\n");
        assert_eq!(
            blocks,
            vec![Block::emphasized("Petunjuk"), table(&[&["1", "A"]])]
        );
    }

    #[test]
    fn test_lenient_skips_bad_table() {
        let options = ParseOptions::new().with_max_columns(2);
        let (blocks, stats) = parse_with_options(
            "| a | b | c |\nSetelah tabel\n| d | e |",
            options,
        )
        .unwrap();
        assert_eq!(
            blocks,
            vec![Block::paragraph("Setelah tabel"), table(&[&["d", "e"]])]
        );
        assert_eq!(stats.skipped_tables, 1);
        assert_eq!(stats.table_count, 1);
    }

    #[test]
    fn test_strict_reports_bad_table() {
        let options = ParseOptions::new().strict().with_max_columns(2);
        let result = parse_with_options("| a | b | c |", options);
        assert!(matches!(
            result,
            Err(Error::Table(TableError::TooManyColumns { found: 3, limit: 2 }))
        ));
    }

    #[test]
    fn test_stats() {
        let (_, stats) = BodyParser::new()
            .parse("# H\n| a |\n|---|\n| b |\n\ntext")
            .unwrap();
        assert_eq!(stats.line_count, 6);
        assert_eq!(stats.heading_count, 1);
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.table_count, 1);
        assert_eq!(stats.table_row_count, 2);
        assert_eq!(stats.separator_count, 1);
    }

    #[test]
    fn test_feed_line_incrementally() {
        let mut parser = BodyParser::new();
        parser.feed_line("| a | b |").unwrap();
        assert!(parser.blocks().is_empty());
        parser.feed_line("").unwrap();
        assert_eq!(parser.blocks().len(), 1);
        let (blocks, _) = parser.finish().unwrap();
        assert_eq!(blocks.len(), 1);
    }
}
