//! Output writers and the registry that dispatches to them.
//!
//! Each output format is a [`DocumentWriter`]. A [`WriterRegistry`] maps
//! file extensions and writer names to writers and runs the whole
//! body → document → bytes pipeline.
//!
//! # Example
//!
//! ```no_run
//! use soaldoc::convert::{ConvertOptions, OutputFormat, WriterRegistry};
//! use soaldoc::FrontMatter;
//!
//! fn main() -> soaldoc::Result<()> {
//!     let registry = WriterRegistry::with_defaults();
//!     let front_matter = FrontMatter::new("SMA Negeri 1", "Biologi");
//!     let options = ConvertOptions::new().with_format(OutputFormat::Docx);
//!
//!     let result = registry.convert("### SOAL\n| No | Soal |", &front_matter, &options)?;
//!     std::fs::write("soal.docx", &result.bytes)?;
//!     Ok(())
//! }
//! ```

mod writers;

pub use writers::{DocxWriter, JsonWriter, MarkdownWriter, PdfWriter, TextWriter};

use crate::error::{Error, Result};
use crate::model::{Document, FrontMatter};
use crate::parser::{parse_with_options, ParseOptions, ParseStats};
use crate::render::RenderOptions;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

/// Options for a full conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Parsing options
    pub parse: ParseOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Output format
    pub output_format: OutputFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Word-processor document
    #[default]
    Docx,

    /// Portable Document Format
    Pdf,

    /// Markdown
    Markdown,

    /// Plain text
    Text,

    /// JSON structure
    Json,
}

impl OutputFormat {
    /// All formats, in registration order.
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Docx,
        OutputFormat::Pdf,
        OutputFormat::Markdown,
        OutputFormat::Text,
        OutputFormat::Json,
    ];

    /// Name of the writer for this format.
    pub fn writer_name(&self) -> &'static str {
        match self {
            OutputFormat::Docx => "docx",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }

    /// Preferred file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Docx => "docx",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Markdown => "md",
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }

    /// Find the format for a file extension or writer name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "docx" => Some(OutputFormat::Docx),
            "pdf" => Some(OutputFormat::Pdf),
            "md" | "markdown" => Some(OutputFormat::Markdown),
            "txt" | "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Result of a conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Serialized document
    pub bytes: Vec<u8>,

    /// MIME type of the output
    pub mime_type: &'static str,

    /// Parse statistics for the body
    pub stats: ParseStats,
}

impl ConvertResult {
    /// Create a new conversion result.
    pub fn new(bytes: Vec<u8>, mime_type: &'static str, stats: ParseStats) -> Self {
        Self {
            bytes,
            mime_type,
            stats,
        }
    }

    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.bytes.len()
    }
}

/// One unit of work for [`WriterRegistry::convert_batch`].
#[derive(Debug, Clone)]
pub struct ConvertJob {
    /// Generated text body
    pub body: String,

    /// Front matter for this document
    pub front_matter: FrontMatter,
}

impl ConvertJob {
    /// Create a new job.
    pub fn new(body: impl Into<String>, front_matter: FrontMatter) -> Self {
        Self {
            body: body.into(),
            front_matter,
        }
    }
}

/// Trait for document writers.
///
/// Implement this trait to add a new output format.
pub trait DocumentWriter: Send + Sync {
    /// Get the supported file extensions for this writer.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["docx"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this writer.
    fn name(&self) -> &str;

    /// MIME type of the produced bytes.
    fn mime_type(&self) -> &'static str;

    /// Serialize a document.
    fn write(&self, doc: &Document, options: &RenderOptions) -> Result<Vec<u8>>;

    /// Check if this writer supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for document writers.
///
/// The registry maps file extensions and names to writers.
pub struct WriterRegistry {
    writers: HashMap<String, Arc<dyn DocumentWriter>>,
    by_name: HashMap<String, Arc<dyn DocumentWriter>>,
}

impl WriterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            writers: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with every built-in writer.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DocxWriter::new()));
        registry.register(Arc::new(PdfWriter::new()));
        registry.register(Arc::new(MarkdownWriter::new()));
        registry.register(Arc::new(TextWriter::new()));
        registry.register(Arc::new(JsonWriter::new()));
        registry
    }

    /// Register a writer.
    ///
    /// The writer will be registered for all its supported extensions.
    pub fn register(&mut self, writer: Arc<dyn DocumentWriter>) {
        for ext in writer.supported_extensions() {
            self.writers.insert(ext.to_lowercase(), writer.clone());
        }
        self.by_name.insert(writer.name().to_lowercase(), writer);
    }

    /// Get a writer by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentWriter>> {
        self.writers.get(&ext.to_lowercase()).cloned()
    }

    /// Get a writer by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentWriter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Get the writer for an output format.
    pub fn get_for_format(&self, format: OutputFormat) -> Result<Arc<dyn DocumentWriter>> {
        self.get_by_name(format.writer_name())
            .ok_or_else(|| Error::UnsupportedFormat(format.writer_name().to_string()))
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.writers.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.writers.keys().map(|s| s.as_str()).collect()
    }

    /// Serialize an already built document.
    pub fn write(&self, doc: &Document, options: &ConvertOptions) -> Result<Vec<u8>> {
        let writer = self.get_for_format(options.output_format)?;
        writer.write(doc, &options.render)
    }

    /// Parse a body, assemble it with front matter and serialize it.
    pub fn convert(
        &self,
        body: &str,
        front_matter: &FrontMatter,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let writer = self.get_for_format(options.output_format)?;
        let (blocks, stats) = parse_with_options(body, options.parse.clone())?;
        let doc = Document::with_blocks(front_matter.clone(), blocks);

        let bytes = writer.write(&doc, &options.render)?;
        log::debug!(
            "Wrote {} bytes of {} ({} blocks)",
            bytes.len(),
            writer.name(),
            doc.blocks.len()
        );
        Ok(ConvertResult::new(bytes, writer.mime_type(), stats))
    }

    /// Convert many bodies in parallel. Results keep the order of `jobs`.
    pub fn convert_batch(
        &self,
        jobs: &[ConvertJob],
        options: &ConvertOptions,
    ) -> Vec<Result<ConvertResult>> {
        jobs.par_iter()
            .map(|job| self.convert(&job.body, &job.front_matter, options))
            .collect()
    }
}

impl Default for WriterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
