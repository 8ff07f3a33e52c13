//! DOCX (Office Open XML) rendering.
//!
//! Writes a minimal WordprocessingML package: content types, package
//! relationships, `word/document.xml`, `word/styles.xml` and core
//! properties. Tables use a fixed grid of `column_count` columns; rows
//! shorter than the grid end early and declare the gap with `w:gridAfter`.

use std::borrow::Cow;
use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};
use crate::model::{Block, Document, Metadata, Table};
use crate::parser::is_xml_illegal;

use super::RenderOptions;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Page margin on every side, in twips (1 inch).
const MARGIN_TWIPS: u32 = 1440;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

/// Convert a document to DOCX bytes.
pub fn to_docx(doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
    DocxRenderer::new(options.clone()).render(doc)
}

/// DOCX renderer.
pub struct DocxRenderer {
    options: RenderOptions,
}

impl DocxRenderer {
    /// Create a new DOCX renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to a DOCX package.
    pub fn render(&self, doc: &Document) -> Result<Vec<u8>> {
        let document_xml = self.document_xml(doc)?;
        let styles_xml = self.styles_xml();
        let core_xml = core_properties_xml(&doc.metadata)?;

        let parts: [(&str, &[u8]); 6] = [
            ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
            ("_rels/.rels", PACKAGE_RELS.as_bytes()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes()),
            ("word/document.xml", document_xml.as_slice()),
            ("word/styles.xml", styles_xml.as_bytes()),
            ("docProps/core.xml", core_xml.as_slice()),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let file_options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, data) in parts {
            zip.start_file(name, file_options)?;
            zip.write_all(data)?;
        }

        Ok(zip.finish()?.into_inner())
    }

    fn document_xml(&self, doc: &Document) -> Result<Vec<u8>> {
        let mut xml = XmlOut::new()?;
        xml.start("w:document", &[("xmlns:w", W_NS)])?;
        xml.start("w:body", &[])?;

        for line in doc.front_matter.title_lines() {
            xml.paragraph(
                &line,
                &ParaStyle {
                    style_id: Some("Title"),
                    ..Default::default()
                },
            )?;
        }
        for line in doc.front_matter.metadata_lines() {
            xml.paragraph(&line, &ParaStyle::default())?;
        }
        if self.options.include_divider && !doc.front_matter.is_empty() {
            xml.paragraph(
                "",
                &ParaStyle {
                    bottom_border: true,
                    ..Default::default()
                },
            )?;
        }

        let heading_style = format!("Heading{}", self.options.heading_level);
        for block in &doc.blocks {
            match block {
                Block::Heading { text, .. } => xml.paragraph(
                    text,
                    &ParaStyle {
                        style_id: Some(heading_style.as_str()),
                        ..Default::default()
                    },
                )?,
                Block::Paragraph { text, emphasized } => xml.paragraph(
                    text,
                    &ParaStyle {
                        bold: *emphasized,
                        ..Default::default()
                    },
                )?,
                Block::Table(table) => {
                    self.write_table(&mut xml, table)?;
                    if self.options.table_spacing {
                        xml.empty("w:p", &[])?;
                    }
                }
            }
        }

        self.write_section(&mut xml)?;
        xml.end("w:body")?;
        xml.end("w:document")?;
        Ok(xml.finish())
    }

    fn usable_width_twips(&self) -> u32 {
        let (width, _) = self.options.page_size.dimensions_twips();
        width.saturating_sub(2 * MARGIN_TWIPS)
    }

    fn write_table(&self, xml: &mut XmlOut, table: &Table) -> Result<()> {
        let columns = table.column_count().max(1);
        let col_width = (self.usable_width_twips() / columns as u32).to_string();

        xml.start("w:tbl", &[])?;
        xml.start("w:tblPr", &[])?;
        xml.empty("w:tblStyle", &[("w:val", "TableGrid")])?;
        xml.empty("w:tblW", &[("w:w", "5000"), ("w:type", "pct")])?;
        xml.empty("w:tblLayout", &[("w:type", "fixed")])?;
        xml.end("w:tblPr")?;

        xml.start("w:tblGrid", &[])?;
        for _ in 0..columns {
            xml.empty("w:gridCol", &[("w:w", col_width.as_str())])?;
        }
        xml.end("w:tblGrid")?;

        for (index, row) in table.rows.iter().enumerate() {
            let is_header = index < table.header_rows as usize;
            let missing = columns.saturating_sub(row.len());

            xml.start("w:tr", &[])?;
            if missing > 0 || is_header {
                xml.start("w:trPr", &[])?;
                if missing > 0 {
                    xml.empty("w:gridAfter", &[("w:val", missing.to_string().as_str())])?;
                }
                if is_header {
                    xml.empty("w:tblHeader", &[])?;
                }
                xml.end("w:trPr")?;
            }

            // Cells past the row's own length are not written.
            for cell in row {
                xml.start("w:tc", &[])?;
                xml.start("w:tcPr", &[])?;
                xml.empty("w:tcW", &[("w:w", col_width.as_str()), ("w:type", "dxa")])?;
                xml.end("w:tcPr")?;
                xml.paragraph(
                    cell,
                    &ParaStyle {
                        bold: is_header && self.options.bold_table_header,
                        ..Default::default()
                    },
                )?;
                xml.end("w:tc")?;
            }
            xml.end("w:tr")?;
        }

        xml.end("w:tbl")
    }

    fn write_section(&self, xml: &mut XmlOut) -> Result<()> {
        let (width, height) = self.options.page_size.dimensions_twips();
        let margin = MARGIN_TWIPS.to_string();

        xml.start("w:sectPr", &[])?;
        xml.empty(
            "w:pgSz",
            &[("w:w", width.to_string().as_str()), ("w:h", height.to_string().as_str())],
        )?;
        xml.empty(
            "w:pgMar",
            &[
                ("w:top", margin.as_str()),
                ("w:right", margin.as_str()),
                ("w:bottom", margin.as_str()),
                ("w:left", margin.as_str()),
                ("w:header", "720"),
                ("w:footer", "720"),
                ("w:gutter", "0"),
            ],
        )?;
        xml.end("w:sectPr")
    }

    fn styles_xml(&self) -> String {
        let level = self.options.heading_level.clamp(1, 6);
        let body_size = half_points(self.options.font_size);
        let heading_size = half_points(self.options.font_size + f32::from(7 - level));
        let title_size = half_points(self.options.font_size + 5.0);

        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{ns}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="{body_size}"/><w:szCs w:val="{body_size}"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="120"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:jc w:val="center"/></w:pPr><w:rPr><w:b/><w:sz w:val="{title_size}"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading{level}"><w:name w:val="heading {level}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="{outline}"/></w:pPr><w:rPr><w:b/><w:sz w:val="{heading_size}"/></w:rPr></w:style><w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/><w:tblPr><w:tblBorders><w:top w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:left w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:bottom w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:right w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:insideH w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:insideV w:val="single" w:sz="4" w:space="0" w:color="auto"/></w:tblBorders></w:tblPr></w:style></w:styles>"#,
            ns = W_NS,
            body_size = body_size,
            title_size = title_size,
            heading_size = heading_size,
            level = level,
            outline = level - 1,
        )
    }
}

/// Convert points to the half-point unit used by `w:sz`.
fn half_points(points: f32) -> u32 {
    (points * 2.0).round() as u32
}

fn core_properties_xml(metadata: &Metadata) -> Result<Vec<u8>> {
    let mut xml = XmlOut::new()?;
    xml.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    if let Some(ref title) = metadata.title {
        xml.text_element("dc:title", title, &[])?;
    }
    if let Some(ref subject) = metadata.subject {
        xml.text_element("dc:subject", subject, &[])?;
    }
    xml.text_element("dc:creator", &metadata.generator, &[])?;
    if let Some(ref created) = metadata.created {
        let stamp = created.format("%Y-%m-%dT%H:%M:%SZ").to_string();
        xml.text_element("dcterms:created", stamp.as_str(), &[("xsi:type", "dcterms:W3CDTF")])?;
    }
    xml.end("cp:coreProperties")?;
    Ok(xml.finish())
}

/// Paragraph formatting for a single-run paragraph.
#[derive(Debug, Default)]
struct ParaStyle<'a> {
    style_id: Option<&'a str>,
    bold: bool,
    bottom_border: bool,
}

fn xml_error(err: impl std::fmt::Display) -> Error {
    Error::Xml(err.to_string())
}

/// Thin wrapper over a quick-xml writer with an XML declaration.
struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn new() -> Result<Self> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(xml_error)?;
        Ok(Self { writer })
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_error)
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_error)
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer
            .write_event(Event::Empty(elem))
            .map_err(xml_error)
    }

    /// Write escaped text. Characters XML 1.0 cannot carry are dropped.
    fn text(&mut self, text: &str) -> Result<()> {
        let text: Cow<'_, str> = if text.chars().any(is_xml_illegal) {
            Cow::Owned(text.chars().filter(|&c| !is_xml_illegal(c)).collect())
        } else {
            Cow::Borrowed(text)
        };
        self.writer
            .write_event(Event::Text(BytesText::new(&text)))
            .map_err(xml_error)
    }

    fn text_element(&mut self, name: &str, text: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    fn paragraph(&mut self, text: &str, style: &ParaStyle<'_>) -> Result<()> {
        self.start("w:p", &[])?;

        if style.style_id.is_some() || style.bottom_border {
            self.start("w:pPr", &[])?;
            if let Some(id) = style.style_id {
                self.empty("w:pStyle", &[("w:val", id)])?;
            }
            if style.bottom_border {
                self.start("w:pBdr", &[])?;
                self.empty(
                    "w:bottom",
                    &[
                        ("w:val", "single"),
                        ("w:sz", "6"),
                        ("w:space", "1"),
                        ("w:color", "auto"),
                    ],
                )?;
                self.end("w:pBdr")?;
            }
            self.end("w:pPr")?;
        }

        if !text.is_empty() {
            self.start("w:r", &[])?;
            if style.bold {
                self.start("w:rPr", &[])?;
                self.empty("w:b", &[])?;
                self.end("w:rPr")?;
            }
            self.text_element("w:t", text, &[("xml:space", "preserve")])?;
            self.end("w:r")?;
        }

        self.end("w:p")
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}
