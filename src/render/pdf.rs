//! PDF rendering with built-in Helvetica fonts.
//!
//! Layout is a simple top-down flow: wrapped lines for text blocks and an
//! equal-width grid for tables, breaking to a new page when the cursor
//! reaches the bottom margin. Text width is estimated from an average glyph
//! width because built-in fonts carry no metrics here.

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};

use std::ops::Range;

use crate::error::Result;
use crate::model::{Block, Document, Table};

use super::RenderOptions;

/// Millimetres per typographic point.
const MM_PER_PT: f32 = 0.3528;

/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;

/// Line height as a multiple of the font size.
const LINE_HEIGHT_EM: f32 = 1.4;

const MARGIN_MM: f32 = 20.0;
const CELL_PADDING_MM: f32 = 1.5;
const LAYER_NAME: &str = "Layer 1";

/// Convert a document to PDF bytes.
pub fn to_pdf(doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
    PdfRenderer::new(options.clone()).render(doc)
}

/// PDF renderer.
///
/// Text is set in the built-in Helvetica fonts, which only cover
/// WinAnsiEncoding (Latin-1 plus a few typographic marks). Other characters,
/// such as `≥`, `√` or `π`, are dropped by the PDF writer; the renderer
/// logs a warning with their count.
pub struct PdfRenderer {
    options: RenderOptions,
}

impl PdfRenderer {
    /// Create a new PDF renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to PDF.
    pub fn render(&self, doc: &Document) -> Result<Vec<u8>> {
        let title = doc.metadata.title.clone().unwrap_or_default();
        let mut page = PageFlow::new(&title, &self.options)?;
        let size = self.options.font_size;

        for line in doc.front_matter.title_lines() {
            page.text_block(&line, size + 5.0, true, true);
        }
        for line in doc.front_matter.metadata_lines() {
            page.text_block(&line, size, false, false);
        }
        if self.options.include_divider && !doc.front_matter.is_empty() {
            page.divider();
        }

        let heading_size = size + f32::from(7 - self.options.heading_level.clamp(1, 6));
        for block in &doc.blocks {
            match block {
                Block::Heading { text, .. } => {
                    page.gap(line_height_mm(size) * 0.5);
                    page.text_block(text, heading_size, true, false);
                }
                Block::Paragraph { text, emphasized } => {
                    page.text_block(text, size, *emphasized, false);
                }
                Block::Table(table) => {
                    page.table(table, size, self.options.bold_table_header);
                    if self.options.table_spacing {
                        page.gap(line_height_mm(size));
                    }
                }
            }
        }

        page.finish()
    }
}

fn line_height_mm(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_EM * MM_PER_PT
}

fn glyph_width_mm(font_size: f32) -> f32 {
    font_size * AVG_GLYPH_EM * MM_PER_PT
}

/// How many characters fit in `width_mm` at `font_size`.
fn chars_per_line(width_mm: f32, font_size: f32) -> usize {
    ((width_mm / glyph_width_mm(font_size)).floor() as usize).max(1)
}

/// Whether `c` exists in WinAnsiEncoding, the only encoding built-in
/// fonts support.
fn is_win_ansi(c: char) -> bool {
    matches!(c, '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}')
        || matches!(
            c,
            '€' | '‚' | 'ƒ' | '„' | '…' | '†' | '‡' | 'ˆ' | '‰' | 'Š' | '‹' | 'Œ' | 'Ž' | '‘'
                | '’' | '“' | '”' | '•' | '–' | '—' | '˜' | '™' | 'š' | '›' | 'œ' | 'ž' | 'Ÿ'
        )
}

/// Count the characters built-in fonts cannot show. Whitespace is ignored
/// because wrapping replaces it.
fn unencodable_chars(text: &str) -> usize {
    text.chars()
        .filter(|&c| !c.is_whitespace() && !is_win_ansi(c))
        .count()
}

/// Greedy word wrap by character count. Words longer than a line are split.
pub(crate) fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > max_chars && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Top-down layout cursor over a growing list of pages.
struct PageFlow {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    width: f32,
    height: f32,
    y: f32,
    pages: usize,
    unencodable: usize,
}

impl PageFlow {
    fn new(title: &str, options: &RenderOptions) -> Result<Self> {
        let (width, height) = options.page_size.dimensions_mm();
        let (doc, page, layer) = PdfDocument::new(title, Mm(width), Mm(height), LAYER_NAME);
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            width,
            height,
            y: height - MARGIN_MM,
            pages: 1,
            unencodable: 0,
        })
    }

    fn content_width(&self) -> f32 {
        self.width - 2.0 * MARGIN_MM
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(self.width), Mm(self.height), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = self.height - MARGIN_MM;
        self.pages += 1;
    }

    /// Start a new page unless `needed` millimetres fit below the cursor.
    fn ensure_space(&mut self, needed: f32) {
        let at_top = self.y >= self.height - MARGIN_MM;
        if self.y - needed < MARGIN_MM && !at_top {
            self.new_page();
        }
    }

    fn gap(&mut self, amount: f32) {
        self.y -= amount;
        if self.y < MARGIN_MM {
            self.new_page();
        }
    }

    fn font(&self, bold: bool) -> &IndirectFontRef {
        if bold {
            &self.bold
        } else {
            &self.regular
        }
    }

    fn text_block(&mut self, text: &str, size: f32, bold: bool, centered: bool) {
        self.count_unencodable(text);
        let line_height = line_height_mm(size);
        let max_chars = chars_per_line(self.content_width(), size);

        for line in wrap_text(text, max_chars) {
            self.ensure_space(line_height);
            self.y -= line_height;
            let x = if centered {
                let estimated = line.chars().count() as f32 * glyph_width_mm(size);
                ((self.width - estimated) / 2.0).max(MARGIN_MM)
            } else {
                MARGIN_MM
            };
            self.layer
                .use_text(line, size, Mm(x), Mm(self.y), self.font(bold));
        }
    }

    fn divider(&mut self) {
        self.gap(3.0);
        self.horizontal(MARGIN_MM, self.width - MARGIN_MM, self.y);
        self.gap(3.0);
    }

    fn horizontal(&self, x1: f32, x2: f32, y: f32) {
        self.stroke(&[(x1, y), (x2, y)], false);
    }

    fn stroke(&self, points: &[(f32, f32)], closed: bool) {
        let line = Line {
            points: points
                .iter()
                .map(|&(x, y)| (Point::new(Mm(x), Mm(y)), false))
                .collect(),
            is_closed: closed,
        };
        self.layer.add_line(line);
    }

    fn table(&mut self, table: &Table, size: f32, bold_header: bool) {
        let columns = table.column_count().max(1);
        let col_width = self.content_width() / columns as f32;
        let max_chars = chars_per_line(col_width - 2.0 * CELL_PADDING_MM, size);
        let per_page = self.lines_per_page(size);

        for (index, row) in table.rows.iter().enumerate() {
            let bold = bold_header && index < table.header_rows as usize;
            for cell in row {
                self.count_unencodable(cell);
            }
            let wrapped: Vec<Vec<String>> =
                row.iter().map(|cell| wrap_text(cell, max_chars)).collect();
            let line_count = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);

            // A row taller than a page continues on the next one.
            let mut start = 0;
            while start < line_count {
                let end = (start + per_page).min(line_count);
                self.row_segment(&wrapped, start..end, col_width, size, bold);
                start = end;
            }
        }
    }

    /// Wrapped lines that fit in one row on an empty page.
    fn lines_per_page(&self, size: f32) -> usize {
        let usable = self.height - 2.0 * MARGIN_MM - 2.0 * CELL_PADDING_MM;
        ((usable / line_height_mm(size)).floor() as usize).max(1)
    }

    /// Draw lines `range` of every cell in a row as one band of boxes.
    fn row_segment(
        &mut self,
        wrapped: &[Vec<String>],
        range: Range<usize>,
        col_width: f32,
        size: f32,
        bold: bool,
    ) {
        let line_height = line_height_mm(size);
        let segment_height = range.len() as f32 * line_height + 2.0 * CELL_PADDING_MM;

        self.ensure_space(segment_height);
        let top = self.y;
        let bottom = top - segment_height;

        // Only the row's own cells are drawn; missing trailing cells stay blank.
        for (col, lines) in wrapped.iter().enumerate() {
            let left = MARGIN_MM + col as f32 * col_width;
            let right = left + col_width;
            self.stroke(
                &[(left, top), (right, top), (right, bottom), (left, bottom)],
                true,
            );

            let mut text_y = top - CELL_PADDING_MM;
            for line in lines.iter().skip(range.start).take(range.len()) {
                text_y -= line_height;
                self.layer.use_text(
                    line.clone(),
                    size,
                    Mm(left + CELL_PADDING_MM),
                    Mm(text_y + line_height * 0.25),
                    self.font(bold),
                );
            }
        }

        self.y = bottom;
    }

    fn count_unencodable(&mut self, text: &str) {
        self.unencodable += unencodable_chars(text);
    }

    fn finish(self) -> Result<Vec<u8>> {
        if self.unencodable > 0 {
            log::warn!(
                "{} characters cannot be encoded with built-in PDF fonts and were dropped",
                self.unencodable
            );
        }
        log::debug!("Rendered PDF with {} pages", self.pages);
        Ok(self.doc.save_to_bytes()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FrontMatter;

    #[test]
    fn test_wrap_text() {
        assert_eq!(
            wrap_text("satu dua tiga empat", 9),
            vec!["satu dua", "tiga", "empat"]
        );
        assert_eq!(wrap_text("", 10), Vec::<String>::new());
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap_text("a abcdef", 3), vec!["a", "abc", "def"]);
    }

    #[test]
    fn test_chars_per_line_never_zero() {
        assert_eq!(chars_per_line(0.0, 11.0), 1);
        assert!(chars_per_line(170.0, 11.0) > 50);
    }

    #[test]
    fn test_render_pdf_header() {
        let rows = vec![
            vec!["No".to_string(), "Soal".to_string(), "Kunci".to_string()],
            vec!["1".to_string()],
        ];
        let doc = Document::with_blocks(
            FrontMatter::new("SMA Negeri 1", "Kimia"),
            vec![
                Block::heading("KARTU SOAL", 3),
                Block::Table(Table::from_rows(rows).unwrap()),
                Block::paragraph("Selesai."),
            ],
        );
        let bytes = to_pdf(&doc, &RenderOptions::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_render_pdf_many_pages() {
        let mut doc = Document::default();
        for i in 0..300 {
            doc.add_block(Block::paragraph(format!("Baris nomor {}", i)));
        }
        let bytes = to_pdf(&doc, &RenderOptions::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_tall_row_stays_inside_margins() {
        let cell = "kata ".repeat(4_000);
        let table = Table::from_rows(vec![vec![cell], vec!["akhir".to_string()]]).unwrap();

        let mut page = PageFlow::new("t", &RenderOptions::default()).unwrap();
        page.text_block("Pendahuluan", 11.0, false, false);
        page.table(&table, 11.0, false);

        assert!(page.pages > 1);
        assert!(page.y >= MARGIN_MM, "cursor at {} mm", page.y);
        assert!(page.finish().unwrap().starts_with(b"%PDF-"));
    }

    #[test]
    fn test_lines_per_page_fits_usable_height() {
        let page = PageFlow::new("t", &RenderOptions::default()).unwrap();
        let lines = page.lines_per_page(11.0);
        let height = lines as f32 * line_height_mm(11.0) + 2.0 * CELL_PADDING_MM;
        assert!(height <= page.height - 2.0 * MARGIN_MM);
    }

    #[test]
    fn test_unencodable_chars() {
        assert_eq!(unencodable_chars("x \u{2265} \u{221A}\u{03C0}"), 3);
        assert_eq!(unencodable_chars("Caf\u{E9} \u{2013} \u{201C}ok\u{201D}"), 0);
        assert_eq!(unencodable_chars("a\tb\u{2003}c"), 0);

        let mut page = PageFlow::new("t", &RenderOptions::default()).unwrap();
        page.text_block("x \u{2265} 5", 11.0, false, false);
        assert_eq!(page.unencodable, 1);
    }
}
