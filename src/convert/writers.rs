//! Built-in writers for each output format.

use crate::error::Result;
use crate::model::Document;
use crate::render::{to_docx, to_json, to_markdown, to_pdf, to_text, RenderOptions};

use super::DocumentWriter;

/// DOCX writer.
#[derive(Debug, Clone, Default)]
pub struct DocxWriter {
    _private: (),
}

impl DocxWriter {
    /// Create a new DOCX writer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentWriter for DocxWriter {
    fn supported_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn mime_type(&self) -> &'static str {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    }

    fn write(&self, doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
        to_docx(doc, options)
    }
}

/// PDF writer.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    _private: (),
}

impl PdfWriter {
    /// Create a new PDF writer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentWriter for PdfWriter {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn mime_type(&self) -> &'static str {
        "application/pdf"
    }

    fn write(&self, doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
        to_pdf(doc, options)
    }
}

/// Markdown writer.
#[derive(Debug, Clone, Default)]
pub struct MarkdownWriter {
    _private: (),
}

impl MarkdownWriter {
    /// Create a new Markdown writer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentWriter for MarkdownWriter {
    fn supported_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn name(&self) -> &str {
        "markdown"
    }

    fn mime_type(&self) -> &'static str {
        "text/markdown"
    }

    fn write(&self, doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
        Ok(to_markdown(doc, options)?.into_bytes())
    }
}

/// Plain text writer.
#[derive(Debug, Clone, Default)]
pub struct TextWriter {
    _private: (),
}

impl TextWriter {
    /// Create a new plain text writer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentWriter for TextWriter {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn mime_type(&self) -> &'static str {
        "text/plain"
    }

    fn write(&self, doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
        Ok(to_text(doc, options)?.into_bytes())
    }
}

/// JSON writer.
#[derive(Debug, Clone, Default)]
pub struct JsonWriter {
    _private: (),
}

impl JsonWriter {
    /// Create a new JSON writer.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentWriter for JsonWriter {
    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn name(&self) -> &str {
        "json"
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }

    fn write(&self, doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
        Ok(to_json(doc, options.json_format)?.into_bytes())
    }
}
