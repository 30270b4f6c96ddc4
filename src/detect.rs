//! Format detection for spreadsheet files.

use crate::container::decode_xml_bytes;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Compound File Binary magic, used by legacy .xls and by encrypted workbooks.
const CFB_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Content type for the XLSX workbook part.
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";

/// Content type for the macro-enabled XLSM workbook part.
const XLSM_CONTENT_TYPE: &str = "application/vnd.ms-excel.sheet.macroEnabled.main+xml";

/// Content type for the XLTX template workbook part.
const XLTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.template.main+xml";

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";

const PPTX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";

/// Detected spreadsheet format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Excel workbook (.xlsx)
    Xlsx,
    /// Macro-enabled Excel workbook (.xlsm)
    Xlsm,
    /// Excel template (.xltx)
    Xltx,
}

impl FormatType {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Xlsx => "xlsx",
            FormatType::Xlsm => "xlsm",
            FormatType::Xltx => "xltx",
        }
    }

    /// Returns a human-readable name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            FormatType::Xlsx => "Excel Workbook",
            FormatType::Xlsm => "Excel Macro-Enabled Workbook",
            FormatType::Xltx => "Excel Template",
        }
    }
}

impl std::fmt::Display for FormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the format type from a file path.
///
/// # Example
///
/// ```no_run
/// use sheetpeek::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("ipo-data.xlsx")?;
/// println!("Detected format: {}", format);
/// # Ok::<(), sheetpeek::Error>(())
/// ```
pub fn detect_format_from_path(path: impl AsRef<Path>) -> Result<FormatType> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::from_io(e, path))?;
    let mut reader = BufReader::new(file);

    let mut head = [0u8; 8];
    let n = read_prefix(&mut reader, &mut head)?;
    check_magic(&head[..n])?;

    reader.seek(SeekFrom::Start(0))?;
    detect_format_from_reader(reader)
}

/// Detect the format type from a byte slice.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<FormatType> {
    check_magic(data)?;
    detect_format_from_reader(std::io::Cursor::new(data))
}

/// Detect the format type from a reader over a ZIP archive.
pub fn detect_format_from_reader<R: Read + Seek>(reader: R) -> Result<FormatType> {
    let mut archive = zip::ZipArchive::new(reader)?;

    if !archive.file_names().any(|n| n == "[Content_Types].xml") {
        return detect_by_folder_structure(&archive);
    }

    let content_types = {
        let mut file = archive.by_name("[Content_Types].xml")?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        decode_xml_bytes(&bytes)?
    };

    if content_types.contains(XLSX_CONTENT_TYPE) {
        Ok(FormatType::Xlsx)
    } else if content_types.contains(XLSM_CONTENT_TYPE) {
        Ok(FormatType::Xlsm)
    } else if content_types.contains(XLTX_CONTENT_TYPE) {
        Ok(FormatType::Xltx)
    } else if content_types.contains(DOCX_CONTENT_TYPE) {
        Err(Error::UnsupportedFormat("Word document".to_string()))
    } else if content_types.contains(PPTX_CONTENT_TYPE) {
        Err(Error::UnsupportedFormat("PowerPoint presentation".to_string()))
    } else {
        detect_by_folder_structure(&archive)
    }
}

/// Fallback detection by checking folder structure.
fn detect_by_folder_structure<R: Read + Seek>(archive: &zip::ZipArchive<R>) -> Result<FormatType> {
    if archive.file_names().any(|n| n == "xl/workbook.xml") {
        Ok(FormatType::Xlsx)
    } else {
        Err(Error::UnknownFormat)
    }
}

/// Reject anything that is not a ZIP archive, naming OLE files explicitly.
fn check_magic(data: &[u8]) -> Result<()> {
    if is_zip_file(data) {
        Ok(())
    } else if data.len() >= CFB_MAGIC.len() && data[..CFB_MAGIC.len()] == CFB_MAGIC {
        // An encrypted .xlsx is wrapped in the same container as a legacy .xls.
        Err(Error::UnsupportedFormat(
            "legacy .xls or encrypted workbook".to_string(),
        ))
    } else {
        Err(Error::UnknownFormat)
    }
}

fn read_prefix<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}
