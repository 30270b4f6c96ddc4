//! Python-style literals for column labels.

use crate::model::ColumnLabel;

/// Render labels as a list literal, e.g. `['ID', 'Date', 2021]`.
pub fn labels_repr(labels: &[ColumnLabel]) -> String {
    let items: Vec<String> = labels.iter().map(label_repr).collect();
    format!("[{}]", items.join(", "))
}

/// A single label: text is quoted, numbers and booleans are bare.
pub fn label_repr(label: &ColumnLabel) -> String {
    match label {
        ColumnLabel::Text(s) => quote(s),
        other => other.to_string(),
    }
}

/// Quote a string the way Python's `repr` does.
///
/// Single quotes unless the text contains `'` and no `"`.
fn quote(s: &str) -> String {
    let delimiter = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(delimiter);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> ColumnLabel {
        ColumnLabel::Text(s.to_string())
    }

    #[test]
    fn test_labels_repr() {
        let labels = vec![text("ID"), text("Date"), text("Amount")];
        assert_eq!(labels_repr(&labels), "['ID', 'Date', 'Amount']");
        assert_eq!(labels_repr(&[]), "[]");
    }

    #[test]
    fn test_non_text_labels() {
        let labels = vec![
            ColumnLabel::Int(2021),
            ColumnLabel::Float(2.5),
            ColumnLabel::Bool(false),
            text("Unnamed: 3"),
        ];
        assert_eq!(labels_repr(&labels), "[2021, 2.5, False, 'Unnamed: 3']");
    }

    #[test]
    fn test_quoting() {
        assert_eq!(label_repr(&text("Investor's")), "\"Investor's\"");
        assert_eq!(label_repr(&text("a'b\"c")), "'a\\'b\"c'");
        assert_eq!(label_repr(&text("C:\\path")), "'C:\\\\path'");
        assert_eq!(label_repr(&text("two\nlines")), "'two\\nlines'");
        assert_eq!(label_repr(&text("bell\u{7}")), "'bell\\x07'");
        assert_eq!(label_repr(&text("東京")), "'東京'");
    }
}
