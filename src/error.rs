//! Error types for soaldoc library.

use std::io;
use thiserror::Error;

/// Result type alias for soaldoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or serializing a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A table could not be materialized (strict mode only).
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Error while packaging the DOCX archive.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error while writing XML parts.
    #[error("XML error: {0}")]
    Xml(String),

    /// Error while producing PDF output.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Front matter could not be read.
    #[error("Invalid front matter: {0}")]
    FrontMatter(String),

    /// No writer is registered for the requested format.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

/// Reasons a run of accumulated rows cannot become a table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// No rows were accumulated.
    #[error("table has no rows")]
    Empty,

    /// Every accumulated row is empty.
    #[error("table has no columns")]
    NoColumns,

    /// A row exceeds the configured column limit.
    #[error("table has {found} columns, limit is {limit}")]
    TooManyColumns {
        /// Widest row found
        found: usize,
        /// Configured limit
        limit: usize,
    },
}

impl From<printpdf::Error> for Error {
    fn from(err: printpdf::Error) -> Self {
        Error::Pdf(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedFormat("odt".into());
        assert_eq!(err.to_string(), "Unsupported output format: odt");

        let err = Error::Table(TableError::TooManyColumns { found: 9, limit: 4 });
        assert_eq!(
            err.to_string(),
            "Table error: table has 9 columns, limit is 4"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_table_error_conversion() {
        let err: Error = TableError::NoColumns.into();
        assert!(matches!(err, Error::Table(TableError::NoColumns)));
    }
}
