//! Line classification for generated Markdown-ish text.
//!
//! Each line is classified on its own, without context, in this priority
//! order: blank, separator row, table row, heading, paragraph.

/// Characters allowed in a table separator row (`|---|:---:|`).
const SEPARATOR_CHARS: [char; 4] = ['|', '-', ':', ' '];

/// Bold marker pair.
const BOLD_MARKER: &str = "**";

/// Heading marker.
const HEADING_MARKER: char = '#';

/// The category of a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Empty after trimming
    Blank,

    /// A Markdown header divider; carries no data
    Separator,

    /// A pipe-delimited row with its non-empty cells
    TableRow(Vec<String>),

    /// A `#`-prefixed title
    Heading {
        /// Number of leading markers, clamped to 1-6
        level: u8,
        /// Text without markers
        text: String,
    },

    /// Any other text
    Paragraph {
        /// Line text, bold markers removed when emphasized
        text: String,
        /// Whether the line started with a bold marker
        emphasized: bool,
    },
}

impl LineKind {
    /// Whether this line ends a pending table run.
    ///
    /// Separators and rows without cells neither extend nor end a run.
    pub fn ends_table(&self) -> bool {
        !matches!(self, LineKind::Separator | LineKind::TableRow(_))
    }
}

/// Classify one line of text.
pub fn classify(line: &str) -> LineKind {
    let line = line.trim();

    if line.is_empty() {
        return LineKind::Blank;
    }

    if is_separator(line) {
        return LineKind::Separator;
    }

    if line.contains('|') {
        return LineKind::TableRow(split_cells(line));
    }

    if line.starts_with(HEADING_MARKER) {
        let level = line.chars().take_while(|&c| c == HEADING_MARKER).count();
        let text = line.trim_start_matches(HEADING_MARKER).trim();
        return LineKind::Heading {
            level: level.clamp(1, 6) as u8,
            text: text.to_string(),
        };
    }

    if line.starts_with(BOLD_MARKER) {
        let text = line.replace(BOLD_MARKER, "");
        return LineKind::Paragraph {
            text: text.trim().to_string(),
            emphasized: true,
        };
    }

    LineKind::Paragraph {
        text: line.to_string(),
        emphasized: false,
    }
}

/// Check whether a non-empty line is a separator row.
///
/// A whitespace-only line is never a separator.
pub fn is_separator(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.chars().all(|c| SEPARATOR_CHARS.contains(&c))
}

/// Split a row on `|`, trimming cells and dropping empty fragments.
///
/// Empty cells cannot be represented: `| A ||  | B |` yields `["A", "B"]`.
pub fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> LineKind {
        LineKind::TableRow(values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn test_separator_rows() {
        assert_eq!(classify("|---|---|"), LineKind::Separator);
        assert_eq!(classify("| :--- | :---: | ---: |"), LineKind::Separator);
        assert_eq!(classify("  ---  "), LineKind::Separator);
        assert!(!is_separator("   "));
        assert!(!is_separator("|--x--|"));
    }

    #[test]
    fn test_blank_beats_separator() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("     "), LineKind::Blank);
        assert_eq!(classify("\t\r"), LineKind::Blank);
    }

    #[test]
    fn test_table_row() {
        assert_eq!(
            classify("| No | TP | Level |"),
            cells(&["No", "TP", "Level"])
        );
        assert_eq!(classify("a | b"), cells(&["a", "b"]));
    }

    #[test]
    fn test_empty_cells_dropped() {
        assert_eq!(classify("| A ||  | B |"), cells(&["A", "B"]));
    }

    #[test]
    fn test_row_without_cells() {
        let kind = classify("|\t|");
        assert_eq!(kind, LineKind::TableRow(Vec::new()));
        assert!(!kind.ends_table());
    }

    #[test]
    fn test_pipe_wins_over_heading() {
        assert_eq!(classify("### A | B"), cells(&["### A", "B"]));
    }

    #[test]
    fn test_heading() {
        assert_eq!(
            classify("### KARTU SOAL"),
            LineKind::Heading {
                level: 3,
                text: "KARTU SOAL".into()
            }
        );
        assert_eq!(
            classify("#Judul"),
            LineKind::Heading {
                level: 1,
                text: "Judul".into()
            }
        );
        assert_eq!(
            classify("######## Dalam"),
            LineKind::Heading {
                level: 6,
                text: "Dalam".into()
            }
        );
        // Marker-only lines still end a table run and keep their block.
        assert_eq!(
            classify("###"),
            LineKind::Heading {
                level: 3,
                text: String::new()
            }
        );
    }

    #[test]
    fn test_emphasized_paragraph() {
        assert_eq!(
            classify("**Catatan penting**"),
            LineKind::Paragraph {
                text: "Catatan penting".into(),
                emphasized: true
            }
        );
        assert_eq!(
            classify("**Skor:** 10"),
            LineKind::Paragraph {
                text: "Skor: 10".into(),
                emphasized: true
            }
        );
        assert_eq!(
            classify("****"),
            LineKind::Paragraph {
                text: String::new(),
                emphasized: true
            }
        );
    }

    #[test]
    fn test_plain_paragraph_keeps_markers() {
        assert_eq!(
            classify("  Jawaban **benar** adalah B  "),
            LineKind::Paragraph {
                text: "Jawaban **benar** adalah B".into(),
                emphasized: false
            }
        );
    }

    #[test]
    fn test_classification_is_stable() {
        let lines = ["| 1 | X |", "|---|", "### H", "**B**", "text", ""];
        for line in lines {
            assert_eq!(classify(line), classify(line));
        }
    }
}
