//! Rendering options and configuration.

use super::JsonFormat;

/// Options for rendering a document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Level every heading is rendered at (1-6)
    pub heading_level: u8,

    /// Render the first table row in bold
    pub bold_table_header: bool,

    /// Draw a divider between the front matter and the body
    pub include_divider: bool,

    /// Leave an empty line after each table
    pub table_spacing: bool,

    /// Include YAML frontmatter with metadata (Markdown only)
    pub include_frontmatter: bool,

    /// Page size for paged formats
    pub page_size: PageSize,

    /// Body font size in points
    pub font_size: f32,

    /// JSON layout
    pub json_format: JsonFormat,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading level.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 6);
        self
    }

    /// Enable or disable bold table headers.
    pub fn with_bold_table_header(mut self, bold: bool) -> Self {
        self.bold_table_header = bold;
        self
    }

    /// Enable or disable the front matter divider.
    pub fn with_divider(mut self, include: bool) -> Self {
        self.include_divider = include;
        self
    }

    /// Enable or disable spacing after tables.
    pub fn with_table_spacing(mut self, spacing: bool) -> Self {
        self.table_spacing = spacing;
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    /// Set the body font size in points.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size.clamp(6.0, 36.0);
        self
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            heading_level: 3,
            bold_table_header: true,
            include_divider: true,
            table_spacing: true,
            include_frontmatter: false,
            page_size: PageSize::A4,
            font_size: 11.0,
            json_format: JsonFormat::Pretty,
        }
    }
}

/// Page size for DOCX and PDF output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    /// 210 x 297 mm
    #[default]
    A4,
    /// 8.5 x 11 inches
    Letter,
}

impl PageSize {
    /// Width and height in millimetres.
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }

    /// Width and height in twentieths of a point.
    pub fn dimensions_twips(&self) -> (u32, u32) {
        match self {
            PageSize::A4 => (11906, 16838),
            PageSize::Letter => (12240, 15840),
        }
    }

    /// Parse a page size name.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            other => Err(format!("Unknown page size: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_heading_level(9)
            .with_divider(false)
            .with_page_size(PageSize::Letter)
            .with_font_size(2.0);

        assert_eq!(options.heading_level, 6);
        assert!(!options.include_divider);
        assert_eq!(options.page_size, PageSize::Letter);
        assert_eq!(options.font_size, 6.0);
    }

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.heading_level, 3);
        assert!(options.bold_table_header);
        assert!(options.table_spacing);
        assert_eq!(options.page_size, PageSize::A4);
    }

    #[test]
    fn test_page_size_parse() {
        assert_eq!(PageSize::parse("A4"), Ok(PageSize::A4));
        assert_eq!(PageSize::parse(" letter "), Ok(PageSize::Letter));
        assert!(PageSize::parse("legal").is_err());
    }
}
