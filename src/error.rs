//! Error types for the sheetpeek library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sheetpeek operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad class of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The path does not resolve to a file.
    FileNotFound,
    /// The file exists but could not be read.
    Io,
    /// The file is not a readable workbook.
    Parse,
    /// The workbook loaded but the summary could not be produced.
    Render,
}

/// Errors that can occur while loading or summarizing a workbook.
#[derive(Error, Debug)]
pub enum Error {
    /// The input path does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format could not be determined.
    #[error("Unknown file format: not a spreadsheet")]
    UnknownFormat,

    /// The file format is recognized but not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The workbook is password protected.
    #[error("Workbook is encrypted")]
    Encrypted,

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Invalid or malformed data in the workbook.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A required workbook part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// The workbook declares no worksheets.
    #[error("Workbook contains no sheets")]
    NoSheets,

    /// Error during text encoding conversion.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error while producing output.
    #[error("Render error: {0}")]
    Render(String),
}

impl Error {
    /// Map an I/O error on `path`, turning `NotFound` into [`Error::FileNotFound`].
    pub fn from_io(err: io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Error::FileNotFound(path.into())
        } else {
            Error::Io(err)
        }
    }

    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::FileNotFound(_) => ErrorCategory::FileNotFound,
            Error::Io(_) => ErrorCategory::Io,
            Error::Render(_) => ErrorCategory::Render,
            Error::UnknownFormat
            | Error::UnsupportedFormat(_)
            | Error::Encrypted
            | Error::ZipArchive(_)
            | Error::XmlParse(_)
            | Error::InvalidData(_)
            | Error::MissingComponent(_)
            | Error::NoSheets
            | Error::Encoding(_) => ErrorCategory::Parse,
        }
    }

    /// Whether the file was present but is not a valid workbook.
    pub fn is_parse_error(&self) -> bool {
        self.category() == ErrorCategory::Parse
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            other => Error::ZipArchive(other.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat;
        assert_eq!(err.to_string(), "Unknown file format: not a spreadsheet");

        let err = Error::UnsupportedFormat("legacy .xls".to_string());
        assert_eq!(err.to_string(), "Unsupported format: legacy .xls");

        let err = Error::FileNotFound(PathBuf::from("ipo-data.xlsx"));
        assert_eq!(err.to_string(), "File not found: ipo-data.xlsx");
    }

    #[test]
    fn test_from_io_not_found() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = Error::from_io(io_err, "missing.xlsx");
        assert!(matches!(err, Error::FileNotFound(_)));
        assert_eq!(err.category(), ErrorCategory::FileNotFound);
    }

    #[test]
    fn test_from_io_other() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from_io(io_err, "locked.xlsx");
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.category(), ErrorCategory::Io);
    }

    #[test]
    fn test_parse_category() {
        assert!(Error::UnknownFormat.is_parse_error());
        assert!(Error::XmlParse("bad".into()).is_parse_error());
        assert!(Error::NoSheets.is_parse_error());
        assert!(!Error::Render("x".into()).is_parse_error());
    }
}
