//! Integration tests for the convert module.

use std::sync::Arc;
use soaldoc::convert::{
    ConvertJob, ConvertOptions, DocumentWriter, DocxWriter, OutputFormat, WriterRegistry,
};
use soaldoc::error::Result;
use soaldoc::{Document, Error, FrontMatter, ParseOptions, RenderOptions};

/// Mock writer for testing.
struct MockWriter {
    extensions: Vec<&'static str>,
    name: &'static str,
}

impl MockWriter {
    fn new(extensions: Vec<&'static str>, name: &'static str) -> Self {
        Self { extensions, name }
    }
}

impl DocumentWriter for MockWriter {
    fn supported_extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn name(&self) -> &str {
        self.name
    }

    fn mime_type(&self) -> &'static str {
        "application/x-mock"
    }

    fn write(&self, doc: &Document, _options: &RenderOptions) -> Result<Vec<u8>> {
        Ok(format!("{} blocks by {}", doc.blocks.len(), self.name).into_bytes())
    }
}

const BODY: &str = "### KISI-KISI\n\
                    | No | TP | Level |\n\
                    | --- | --- | --- |\n\
                    | 1 | Memahami X | L2 |\n\
                    \n\
                    Naskah soal berikut ini.";

#[test]
fn test_convert_options_builder() {
    let options = ConvertOptions::new()
        .with_parse_options(ParseOptions::new().with_max_columns(4))
        .with_render_options(RenderOptions::new().with_heading_level(1))
        .with_format(OutputFormat::Json);

    assert_eq!(options.parse.max_columns, Some(4));
    assert_eq!(options.render.heading_level, 1);
    assert_eq!(options.output_format, OutputFormat::Json);
}

#[test]
fn test_writer_registry_new() {
    let registry = WriterRegistry::new();

    // Empty registry should support nothing
    assert!(!registry.supports("docx"));
    assert!(!registry.supports("pdf"));
}

#[test]
fn test_writer_registry_with_defaults() {
    let registry = WriterRegistry::with_defaults();

    for ext in ["docx", "pdf", "md", "markdown", "txt", "text", "json"] {
        assert!(registry.supports(ext), "missing {}", ext);
    }
    assert!(registry.supports("DOCX")); // Case insensitive
    assert!(!registry.supports("odt"));
}

#[test]
fn test_writer_registry_register() {
    let mut registry = WriterRegistry::new();
    registry.register(Arc::new(MockWriter::new(vec!["odt", "fodt"], "odf")));

    assert!(registry.supports("odt"));
    assert!(registry.supports("fodt"));
    assert!(registry.supports("ODT")); // Case insensitive
    assert!(registry.get_by_name("ODF").is_some());
}

#[test]
fn test_writer_registry_get_by_extension() {
    let registry = WriterRegistry::with_defaults();

    let writer = registry.get_by_extension("md");
    assert!(writer.is_some());
    assert_eq!(writer.unwrap().name(), "markdown");

    assert!(registry.get_by_extension("odt").is_none());
}

#[test]
fn test_registered_writer_replaces_default() {
    let mut registry = WriterRegistry::with_defaults();
    registry.register(Arc::new(MockWriter::new(vec!["docx"], "docx")));

    let options = ConvertOptions::new().with_format(OutputFormat::Docx);
    let result = registry
        .convert(BODY, &FrontMatter::default(), &options)
        .unwrap();

    assert_eq!(result.bytes, b"3 blocks by docx");
    assert_eq!(result.mime_type, "application/x-mock");
}

#[test]
fn test_supported_extensions() {
    let registry = WriterRegistry::with_defaults();
    let extensions = registry.supported_extensions();

    assert!(extensions.contains(&"docx"));
    assert!(extensions.contains(&"json"));
    assert_eq!(extensions.len(), 7);
}

#[test]
fn test_docx_writer_metadata() {
    let writer = DocxWriter::new();

    assert_eq!(writer.supported_extensions(), &["docx"]);
    assert!(writer.supports_extension("DOCX"));
    assert!(!writer.supports_extension("doc"));
    assert_eq!(
        writer.mime_type(),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
}

#[test]
fn test_convert_every_format() {
    let registry = WriterRegistry::with_defaults();
    let front_matter = FrontMatter::new("SMA Negeri 1", "Biologi").with_line("Kelas X");

    for format in OutputFormat::ALL {
        let options = ConvertOptions::new().with_format(format);
        let result = registry.convert(BODY, &front_matter, &options).unwrap();

        assert!(!result.bytes.is_empty(), "{:?} produced nothing", format);
        assert_eq!(result.stats.table_count, 1);
        assert_eq!(result.stats.separator_count, 1);
        assert_eq!(result.stats.heading_count, 1);
    }
}

#[test]
fn test_convert_stats_json_output() {
    let registry = WriterRegistry::with_defaults();
    let options = ConvertOptions::new().with_format(OutputFormat::Json);
    let result = registry
        .convert(BODY, &FrontMatter::new("SMA 1", "IPA"), &options)
        .unwrap();

    let doc: Document = serde_json::from_slice(&result.bytes).unwrap();
    assert_eq!(doc.blocks.len(), 3);
    assert_eq!(doc.front_matter.institution, "SMA 1");
    assert_eq!(doc.metadata.title.as_deref(), Some("SMA 1"));
}

#[test]
fn test_convert_strict_error() {
    let registry = WriterRegistry::with_defaults();
    let options = ConvertOptions::new()
        .with_parse_options(ParseOptions::new().strict().with_max_columns(2))
        .with_format(OutputFormat::Text);

    let result = registry.convert(BODY, &FrontMatter::default(), &options);
    assert!(matches!(result, Err(Error::Table(_))));
}

#[test]
fn test_top_level_convert_never_fails_on_tables() {
    let body = "| a | b | c | d | e | f | g | h |\n|\t|\nSelesai";
    for format in OutputFormat::ALL {
        assert!(soaldoc::convert(body, &FrontMatter::default(), format).is_ok());
    }
}

#[test]
fn test_convert_batch() {
    let jobs: Vec<ConvertJob> = ["SMA 1", "SMA 2", "SMA 3"]
        .iter()
        .map(|inst| ConvertJob::new(BODY, FrontMatter::new(*inst, "Biologi")))
        .collect();

    let results = soaldoc::convert_batch(&jobs, OutputFormat::Text);
    assert_eq!(results.len(), 3);
    for (job, result) in jobs.iter().zip(results) {
        let text = String::from_utf8(result.unwrap()).unwrap();
        assert!(text.starts_with(&job.front_matter.institution));
    }
}

#[test]
fn test_convert_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kisi-kisi.docx");

    let bytes = soaldoc::convert(BODY, &FrontMatter::new("SMA 1", "IPA"), OutputFormat::Docx).unwrap();
    std::fs::write(&path, &bytes).unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    assert!(archive.by_name("word/document.xml").is_ok());
}
