//! # soaldoc
//!
//! Converter from LLM-generated exam text to structured documents.
//!
//! A generated body mixes Markdown headings, bold lines, prose and
//! pipe-delimited tables. This library classifies the body line by line,
//! gathers consecutive table rows into real tables, and assembles the
//! resulting blocks under caller-supplied front matter.
//!
//! ## Quick Start
//!
//! ```no_run
//! use soaldoc::{convert, FrontMatter, OutputFormat};
//!
//! fn main() -> soaldoc::Result<()> {
//!     let body = "### KISI-KISI\n| No | Indikator |\n|---|---|\n| 1 | Sel |";
//!     let front_matter = FrontMatter::new("SMA Negeri 1", "Biologi Kelas X");
//!
//!     let bytes = convert(body, &front_matter, OutputFormat::Docx)?;
//!     std::fs::write("kisi-kisi.docx", bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Streaming classifier**: one pass, one pending table at a time
//! - **Ragged tables**: rows keep their own cell counts
//! - **Multiple output formats**: DOCX, PDF, Markdown, plain text, JSON
//! - **Parallel batches**: Uses Rayon for many bodies at once

pub mod convert;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{
    ConvertJob, ConvertOptions, ConvertResult, DocumentWriter, OutputFormat, WriterRegistry,
};
pub use error::{Error, Result, TableError};
pub use model::{Block, Document, FrontMatter, Metadata, Table};
pub use parser::{BodyParser, ErrorMode, ParseOptions, ParseStats};
pub use render::{JsonFormat, PageSize, RenderOptions};

/// Parse a generated body into blocks.
///
/// Parsing is lenient: a run of rows that cannot become a table is
/// dropped with a warning and never fails the call.
///
/// # Example
///
/// ```
/// use soaldoc::{parse_body, Block};
///
/// let blocks = parse_body("**Petunjuk**\n| A | B |");
/// assert_eq!(blocks.len(), 2);
/// assert!(matches!(blocks[0], Block::Paragraph { emphasized: true, .. }));
/// ```
pub fn parse_body(body: &str) -> Vec<Block> {
    match BodyParser::new().parse(body) {
        Ok((blocks, _)) => blocks,
        Err(e) => {
            log::warn!("Lenient parse failed: {}", e);
            Vec::new()
        }
    }
}

/// Parse a body and place its blocks under the given front matter.
pub fn build_document(body: &str, front_matter: &FrontMatter) -> Document {
    Document::with_blocks(front_matter.clone(), parse_body(body))
}

/// Convert a body with front matter to serialized output.
///
/// # Arguments
///
/// * `body` - Generated text body
/// * `front_matter` - Identification lines placed above the body
/// * `format` - Output format
///
/// # Example
///
/// ```no_run
/// use soaldoc::{convert, FrontMatter, OutputFormat};
///
/// let fm = FrontMatter::new("SMP 2", "IPA").with_title("Soal Ulangan");
/// let pdf = convert("Jawablah dengan benar.", &fm, OutputFormat::Pdf).unwrap();
/// std::fs::write("soal.pdf", pdf).unwrap();
/// ```
pub fn convert(body: &str, front_matter: &FrontMatter, format: OutputFormat) -> Result<Vec<u8>> {
    let registry = WriterRegistry::with_defaults();
    let options = ConvertOptions::new().with_format(format);
    registry
        .convert(body, front_matter, &options)
        .map(|result| result.bytes)
}

/// Convert many bodies in parallel with the default writers.
///
/// Results keep the order of `jobs`.
pub fn convert_batch(jobs: &[ConvertJob], format: OutputFormat) -> Vec<Result<Vec<u8>>> {
    let registry = WriterRegistry::with_defaults();
    let options = ConvertOptions::new().with_format(format);
    registry
        .convert_batch(jobs, &options)
        .into_iter()
        .map(|result| result.map(|r| r.bytes))
        .collect()
}

/// Builder for parsing and converting generated bodies.
///
/// # Example
///
/// ```no_run
/// use soaldoc::{FrontMatter, PageSize, Soaldoc};
///
/// let fm = FrontMatter::new("SMA Negeri 1", "Kimia");
/// let docx = Soaldoc::new()
///     .with_heading_level(2)
///     .with_page_size(PageSize::Letter)
///     .parse("### KUNCI JAWABAN\n| 1 | A |", &fm)?
///     .to_docx()?;
/// # Ok::<(), soaldoc::Error>(())
/// ```
pub struct Soaldoc {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Soaldoc {
    /// Create a new Soaldoc builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Fail on tables that cannot be materialized instead of skipping them.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Skip tables that cannot be materialized.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Set the widest table accepted.
    pub fn with_max_columns(mut self, limit: usize) -> Self {
        self.parse_options = self.parse_options.with_max_columns(limit);
        self
    }

    /// Enable or disable Unicode cleanup of the body.
    pub fn with_normalization(mut self, enabled: bool) -> Self {
        self.parse_options = self.parse_options.with_normalization(enabled);
        self
    }

    /// Set the heading level used for every heading line.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.render_options = self.render_options.with_heading_level(level);
        self
    }

    /// Set the page size for paginated output.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.render_options = self.render_options.with_page_size(size);
        self
    }

    /// Enable YAML frontmatter in Markdown output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Parse a body and return a result wrapper.
    pub fn parse(self, body: &str, front_matter: &FrontMatter) -> Result<SoaldocResult> {
        let (blocks, stats) = BodyParser::with_options(self.parse_options).parse(body)?;
        Ok(SoaldocResult {
            document: Document::with_blocks(front_matter.clone(), blocks),
            stats,
            render_options: self.render_options,
        })
    }
}

impl Default for Soaldoc {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a generated body.
pub struct SoaldocResult {
    /// The assembled document
    pub document: Document,
    /// Statistics gathered while parsing
    pub stats: ParseStats,
    /// Render options to use
    render_options: RenderOptions,
}

impl SoaldocResult {
    /// Convert to DOCX bytes.
    pub fn to_docx(&self) -> Result<Vec<u8>> {
        render::to_docx(&self.document, &self.render_options)
    }

    /// Convert to PDF bytes.
    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        render::to_pdf(&self.document, &self.render_options)
    }

    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
