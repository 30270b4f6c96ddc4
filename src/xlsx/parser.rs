//! XLSX workbook reader implementation.

use crate::container::{OoxmlPackage, Relationships, OFFICE_DOCUMENT_REL};
use crate::error::{Error, Result};
use crate::model::{parse_cell_ref, parse_iso_datetime, CellValue, Grid};
use log::{debug, warn};
use std::path::Path;

use super::shared_strings::SharedStrings;
use super::styles::Styles;

const SHARED_STRINGS_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings";
const STYLES_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

/// Sheet entry from workbook.xml.
#[derive(Debug, Clone)]
pub struct SheetInfo {
    /// Display name of the sheet tab
    pub name: String,
    /// `sheetId` attribute
    pub sheet_id: String,
    /// Relationship ID pointing at the worksheet part
    pub rel_id: String,
    /// Whether the sheet is hidden (`state="hidden"` or `"veryHidden"`)
    pub hidden: bool,
}

/// Which sheet of a workbook to read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetSelector {
    /// The first sheet in workbook order.
    #[default]
    First,
    /// Zero-based position in workbook order.
    Index(usize),
    /// Sheet tab name.
    Name(String),
}

/// Reader for XLSX (Excel) workbooks.
///
/// Opening a reader parses the workbook-level parts (sheet list, shared
/// strings, styles); worksheets are parsed on demand.
pub struct WorkbookReader {
    package: OoxmlPackage,
    workbook_path: String,
    relationships: Relationships,
    shared_strings: SharedStrings,
    styles: Styles,
    sheets: Vec<SheetInfo>,
    date1904: bool,
}

impl WorkbookReader {
    /// Open an XLSX file for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let package = OoxmlPackage::open(path)?;
        Self::from_package(package)
    }

    /// Create a reader from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let package = OoxmlPackage::from_bytes(data)?;
        Self::from_package(package)
    }

    /// Create a reader from an opened package.
    pub fn from_package(package: OoxmlPackage) -> Result<Self> {
        let workbook_path = locate_workbook(&package)?;
        debug!("workbook part: {}", workbook_path);

        let relationships = package.read_relationships(&workbook_path)?;
        let workbook_xml = package.read_xml(&workbook_path)?;
        let (sheets, date1904) = parse_workbook(&workbook_xml)?;
        debug!("{} sheet(s) declared, date1904={}", sheets.len(), date1904);

        let shared_strings = match part_path(
            &package,
            &relationships,
            &workbook_path,
            SHARED_STRINGS_REL,
            "xl/sharedStrings.xml",
        ) {
            Some(path) => SharedStrings::parse(&package.read_xml(&path)?)?,
            None => SharedStrings::default(),
        };

        let styles = match part_path(
            &package,
            &relationships,
            &workbook_path,
            STYLES_REL,
            "xl/styles.xml",
        ) {
            Some(path) => Styles::parse(&package.read_xml(&path)?),
            None => Styles::default(),
        };

        Ok(Self {
            package,
            workbook_path,
            relationships,
            shared_strings,
            styles,
            sheets,
            date1904,
        })
    }

    /// Get the number of sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Get sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Sheet entries in workbook order.
    pub fn sheets(&self) -> &[SheetInfo] {
        &self.sheets
    }

    /// Whether serial dates count from 1904 instead of 1900.
    pub fn uses_1904_dates(&self) -> bool {
        self.date1904
    }

    /// Resolve a selector to a zero-based sheet index.
    pub fn select(&self, selector: &SheetSelector) -> Result<usize> {
        if self.sheets.is_empty() {
            return Err(Error::NoSheets);
        }
        match selector {
            SheetSelector::First => Ok(0),
            SheetSelector::Index(i) if *i < self.sheets.len() => Ok(*i),
            SheetSelector::Index(i) => Err(Error::MissingComponent(format!(
                "sheet index {} (workbook has {})",
                i,
                self.sheets.len()
            ))),
            SheetSelector::Name(name) => self
                .sheets
                .iter()
                .position(|s| &s.name == name)
                .ok_or_else(|| Error::MissingComponent(format!("sheet '{}'", name))),
        }
    }

    /// Read the first sheet's cells.
    pub fn read_first_sheet(&self) -> Result<Grid> {
        self.read_sheet(self.select(&SheetSelector::First)?)
    }

    /// Read the cells of the sheet at zero-based `index`.
    pub fn read_sheet(&self, index: usize) -> Result<Grid> {
        let sheet = self
            .sheets
            .get(index)
            .ok_or_else(|| Error::MissingComponent(format!("sheet index {}", index)))?;

        let target = self
            .relationships
            .get(&sheet.rel_id)
            .map(|rel| rel.target.as_str())
            .ok_or_else(|| {
                Error::MissingComponent(format!(
                    "relationship {} for sheet '{}'",
                    sheet.rel_id, sheet.name
                ))
            })?;
        let sheet_path = OoxmlPackage::resolve_path(&self.workbook_path, target);
        debug!("reading sheet '{}' from {}", sheet.name, sheet_path);

        let xml = self.package.read_xml(&sheet_path)?;
        let grid = self.parse_sheet(&xml)?;
        debug!("sheet '{}': {} non-empty rows", sheet.name, grid.row_count());
        Ok(grid)
    }

    /// Parse worksheet XML into a grid of typed cells.
    fn parse_sheet(&self, xml: &str) -> Result<Grid> {
        let mut grid = Grid::new();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut next_row: u32 = 0;
        let mut row: u32 = 0;
        let mut next_col: u32 = 0;
        let mut cell: Option<PendingCell> = None;
        let mut in_value = false;
        let mut phonetic_depth = 0u32;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"row" => {
                        row = row_index(e).unwrap_or(next_row);
                        next_row = row + 1;
                        next_col = 0;
                    }
                    b"c" => {
                        let pending = PendingCell::from_element(e, row, next_col);
                        next_col = pending.col + 1;
                        cell = Some(pending);
                    }
                    b"v" if cell.is_some() => in_value = true,
                    b"rPh" => phonetic_depth += 1,
                    b"t" if cell.is_some() && phonetic_depth == 0 => in_value = true,
                    _ => {}
                },
                Ok(quick_xml::events::Event::Empty(ref e)) => match e.local_name().as_ref() {
                    b"row" => {
                        row = row_index(e).unwrap_or(next_row);
                        next_row = row + 1;
                        next_col = 0;
                    }
                    b"c" => {
                        // A cell with no value still advances the column.
                        let pending = PendingCell::from_element(e, row, next_col);
                        next_col = pending.col + 1;
                    }
                    _ => {}
                },
                Ok(quick_xml::events::Event::Text(ref e)) if in_value => {
                    if let Some(pending) = cell.as_mut() {
                        let text = e.unescape().map_err(|err| Error::XmlParse(err.to_string()))?;
                        pending.raw.push_str(&text);
                    }
                }
                Ok(quick_xml::events::Event::End(ref e)) => match e.local_name().as_ref() {
                    b"c" => {
                        if let Some(pending) = cell.take() {
                            let value = self.resolve_cell_value(&pending);
                            grid.set(pending.row, pending.col, value);
                        }
                        in_value = false;
                    }
                    b"v" | b"t" => in_value = false,
                    b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                    _ => {}
                },
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(grid)
    }

    /// Resolve a cell's raw text based on its type and style.
    fn resolve_cell_value(&self, cell: &PendingCell) -> CellValue {
        let raw = cell.raw.as_str();
        match cell.cell_type.as_deref() {
            Some("s") => match raw.trim().parse::<usize>() {
                Ok(idx) => match self.shared_strings.get(idx) {
                    Some(s) => CellValue::String(s.to_string()),
                    None => {
                        warn!(
                            "shared string index {} out of range ({} strings)",
                            idx,
                            self.shared_strings.len()
                        );
                        CellValue::Empty
                    }
                },
                Err(_) => CellValue::String(raw.to_string()),
            },
            Some("b") => CellValue::Bool(matches!(raw.trim(), "1" | "true" | "TRUE")),
            Some("e") => CellValue::Error(raw.to_string()),
            Some("str") | Some("inlineStr") => CellValue::String(raw.to_string()),
            Some("d") => match parse_iso_datetime(raw) {
                Some(dt) => CellValue::DateTime(dt),
                None => CellValue::String(raw.to_string()),
            },
            _ => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return CellValue::Empty;
                }
                match trimmed.parse::<f64>() {
                    Ok(n) if cell.style.is_some_and(|s| self.styles.is_date_style(s)) => {
                        CellValue::from_date_serial(n, self.date1904)
                    }
                    Ok(n) => CellValue::Number(n),
                    Err(_) => {
                        warn!("non-numeric value {:?} in a numeric cell", trimmed);
                        CellValue::String(raw.to_string())
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for WorkbookReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkbookReader")
            .field("workbook_path", &self.workbook_path)
            .field("sheets", &self.sheet_names())
            .field("shared_strings", &self.shared_strings.len())
            .finish()
    }
}

/// A `<c>` element being read.
#[derive(Debug)]
struct PendingCell {
    row: u32,
    col: u32,
    cell_type: Option<String>,
    style: Option<usize>,
    raw: String,
}

impl PendingCell {
    fn from_element(e: &quick_xml::events::BytesStart<'_>, row: u32, next_col: u32) -> Self {
        let mut cell = Self {
            row,
            col: next_col,
            cell_type: None,
            style: None,
            raw: String::new(),
        };
        for attr in e.attributes().flatten() {
            let value = String::from_utf8_lossy(&attr.value);
            match attr.key.as_ref() {
                b"r" => {
                    if let Some((r, c)) = parse_cell_ref(&value) {
                        cell.row = r;
                        cell.col = c;
                    }
                }
                b"t" => cell.cell_type = Some(value.to_string()),
                b"s" => cell.style = value.parse().ok(),
                _ => {}
            }
        }
        cell
    }
}

fn row_index(e: &quick_xml::events::BytesStart<'_>) -> Option<u32> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"r")
        .and_then(|attr| String::from_utf8_lossy(&attr.value).parse::<u32>().ok())
        .filter(|r| *r > 0)
        .map(|r| r - 1)
}

/// Find the workbook part through the package relationships.
fn locate_workbook(package: &OoxmlPackage) -> Result<String> {
    let rels = package.read_package_relationships()?;
    let path = rels
        .first_of_type(OFFICE_DOCUMENT_REL)
        .map(|rel| OoxmlPackage::resolve_path("", &rel.target))
        .unwrap_or_else(|| "xl/workbook.xml".to_string());

    if package.exists(&path) {
        Ok(path)
    } else {
        Err(Error::MissingComponent(path))
    }
}

/// Path of an optional workbook-level part, by relationship or
/// conventional location. `None` when the package does not contain it.
fn part_path(
    package: &OoxmlPackage,
    rels: &Relationships,
    workbook_path: &str,
    rel_type: &str,
    fallback: &str,
) -> Option<String> {
    let path = rels
        .first_of_type(rel_type)
        .map(|rel| OoxmlPackage::resolve_path(workbook_path, &rel.target))
        .unwrap_or_else(|| fallback.to_string());
    package.exists(&path).then_some(path)
}

/// Parse workbook.xml for the sheet list and the date system.
fn parse_workbook(xml: &str) -> Result<(Vec<SheetInfo>, bool)> {
    let mut sheets = Vec::new();
    let mut date1904 = false;

    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Empty(e)) | Ok(quick_xml::events::Event::Start(e)) => {
                match e.local_name().as_ref() {
                    b"sheet" => {
                        let mut info = SheetInfo {
                            name: String::new(),
                            sheet_id: String::new(),
                            rel_id: String::new(),
                            hidden: false,
                        };
                        for attr in e.attributes().flatten() {
                            let value = attr
                                .unescape_value()
                                .map(|v| v.into_owned())
                                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
                            match attr.key.as_ref() {
                                b"name" => info.name = value,
                                b"sheetId" => info.sheet_id = value,
                                b"state" => info.hidden = value != "visible",
                                // r:id, whatever the relationships prefix is bound to
                                key if key.ends_with(b":id") => info.rel_id = value,
                                _ => {}
                            }
                        }
                        if !info.name.is_empty() {
                            sheets.push(info);
                        }
                    }
                    b"workbookPr" => {
                        date1904 = e.attributes().flatten().any(|attr| {
                            attr.key.as_ref() == b"date1904"
                                && matches!(attr.value.as_ref(), b"1" | b"true")
                        });
                    }
                    _ => {}
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok((sheets, date1904))
}
