//! Rendering module for serializing documents to output formats.

mod docx;
mod json;
mod markdown;
mod options;
mod pdf;
mod text;

pub use docx::{to_docx, DocxRenderer};
pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::{PageSize, RenderOptions};
pub use pdf::{to_pdf, PdfRenderer};
pub use text::to_text;
