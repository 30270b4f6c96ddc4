//! XLSX styles parsing for number formats.

use std::collections::HashMap;

/// Number format information parsed from `xl/styles.xml`.
#[derive(Debug, Default)]
pub struct Styles {
    /// Custom number formats: numFmtId -> formatCode
    num_fmts: HashMap<u32, String>,
    /// Cell formats: style index (`c@s`) -> numFmtId
    cell_xfs: Vec<u32>,
}

impl Styles {
    /// Parse styles from `xl/styles.xml` content.
    ///
    /// Malformed XML yields whatever was read before the error; dates in such
    /// workbooks then surface as plain numbers.
    pub fn parse(xml: &str) -> Self {
        let mut styles = Self::default();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut in_num_fmts = false;
        let mut in_cell_xfs = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"numFmts" => in_num_fmts = true,
                    b"cellXfs" => in_cell_xfs = true,
                    b"xf" if in_cell_xfs => styles.cell_xfs.push(num_fmt_id_of(e)),
                    b"numFmt" if in_num_fmts => styles.add_num_fmt(e),
                    _ => {}
                },
                Ok(quick_xml::events::Event::Empty(ref e)) => match e.local_name().as_ref() {
                    b"numFmt" if in_num_fmts => styles.add_num_fmt(e),
                    b"xf" if in_cell_xfs => styles.cell_xfs.push(num_fmt_id_of(e)),
                    _ => {}
                },
                Ok(quick_xml::events::Event::End(ref e)) => match e.local_name().as_ref() {
                    b"numFmts" => in_num_fmts = false,
                    b"cellXfs" => in_cell_xfs = false,
                    _ => {}
                },
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => {
                    log::warn!("styles.xml is malformed, ignoring the rest: {}", e);
                    break;
                }
                _ => {}
            }
            buf.clear();
        }

        styles
    }

    fn add_num_fmt(&mut self, e: &quick_xml::events::BytesStart<'_>) {
        let mut num_fmt_id: Option<u32> = None;
        let mut format_code = String::new();
        for attr in e.attributes().flatten() {
            match attr.key.as_ref() {
                b"numFmtId" => num_fmt_id = String::from_utf8_lossy(&attr.value).parse().ok(),
                b"formatCode" => {
                    format_code = attr
                        .unescape_value()
                        .map(|v| v.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
                }
                _ => {}
            }
        }
        if let Some(id) = num_fmt_id {
            self.num_fmts.insert(id, format_code);
        }
    }

    /// Get the numFmtId for a cell style index.
    pub fn num_fmt_id(&self, style_index: usize) -> Option<u32> {
        self.cell_xfs.get(style_index).copied()
    }

    /// Whether cells with style index `style_index` hold dates.
    pub fn is_date_style(&self, style_index: usize) -> bool {
        self.num_fmt_id(style_index)
            .is_some_and(|id| self.is_date_format(id))
    }

    /// Check if a numFmtId represents a date or time format.
    pub fn is_date_format(&self, num_fmt_id: u32) -> bool {
        // A custom code takes precedence over the built-in meaning of its id.
        if let Some(format_code) = self.num_fmts.get(&num_fmt_id) {
            return is_date_format_code(format_code);
        }

        // Built-in date/time formats: 14-22, 45-47, and the CJK date
        // formats 27-36 and 50-58.
        matches!(num_fmt_id, 14..=22 | 27..=36 | 45..=47 | 50..=58)
    }
}

fn num_fmt_id_of(e: &quick_xml::events::BytesStart<'_>) -> u32 {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"numFmtId")
        .and_then(|attr| String::from_utf8_lossy(&attr.value).parse().ok())
        .unwrap_or(0)
}

/// Check if a format code string represents a date or time format.
///
/// Looks for d, m, y, h or s tokens outside quoted literals, bracketed
/// sections (`[Red]`, `[$-409]`, elapsed `[h]`) and escaped characters.
fn is_date_format_code(format_code: &str) -> bool {
    let mut chars = format_code.chars();
    let mut in_quote = false;
    let mut in_bracket = false;

    while let Some(c) = chars.next() {
        if in_quote {
            if c == '"' {
                in_quote = false;
            }
            continue;
        }
        if in_bracket {
            if c == ']' {
                in_bracket = false;
            }
            continue;
        }
        match c {
            '"' => in_quote = true,
            '[' => in_bracket = true,
            // Escaped literal, padding or fill character: skip the next char.
            '\\' | '_' | '*' => {
                chars.next();
            }
            _ => {
                if matches!(c.to_ascii_lowercase(), 'd' | 'm' | 'y' | 'h' | 's') {
                    return true;
                }
            }
        }
    }

    false
}
