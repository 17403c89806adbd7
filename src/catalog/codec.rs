// SPDX-License-Identifier: PMPL-1.0-or-later

//! Delimited text codec for message catalogs
//!
//! Each row holds two fields, key and message. Fields are separated by a
//! comma and rows by `\n`. A field containing the delimiter, a quote, the
//! backslash escape or a line break is wrapped in double quotes, with `"`
//! and `\` escaped by a backslash.

/// One decoded catalog row: `(key, message)`.
pub type Row = (String, String);

const DELIMITER: char = ',';
const QUOTE: char = '"';
const ESCAPE: char = '\\';
const ROW_SEPARATOR: char = '\n';

/// Decode catalog text into rows.
///
/// Blank lines come back as `("", "")` rows; callers building a catalog
/// skip rows with an empty key. A row with a single field decodes with an
/// empty message and fields past the second are ignored.
pub fn decode(text: &str) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if quoted {
            match c {
                ESCAPE => {
                    if let Some(next) = chars.next() {
                        field.push(next);
                    }
                }
                // Spreadsheets write a literal quote as `""`
                QUOTE if chars.peek() == Some(&QUOTE) => {
                    chars.next();
                    field.push(QUOTE);
                }
                QUOTE => quoted = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            QUOTE => quoted = true,
            DELIMITER => record.push(std::mem::take(&mut field)),
            ROW_SEPARATOR => {
                record.push(std::mem::take(&mut field));
                rows.push(into_row(std::mem::take(&mut record)));
            }
            '\r' if chars.peek() == Some(&ROW_SEPARATOR) => {}
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        rows.push(into_row(record));
    }

    rows
}

fn into_row(record: Vec<String>) -> Row {
    let mut fields = record.into_iter();
    let key = fields.next().unwrap_or_default();
    let message = fields.next().unwrap_or_default();
    (key, message)
}

/// Encode rows as catalog text. Rows are joined by `\n` with no trailing
/// separator.
pub fn encode<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::new();
    for (index, (key, message)) in rows.into_iter().enumerate() {
        if index > 0 {
            out.push(ROW_SEPARATOR);
        }
        encode_field(key, &mut out);
        out.push(DELIMITER);
        encode_field(message, &mut out);
    }
    out
}

fn encode_field(value: &str, out: &mut String) {
    if !needs_quoting(value) {
        out.push_str(value);
        return;
    }

    out.push(QUOTE);
    for c in value.chars() {
        if c == QUOTE || c == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out.push(QUOTE);
}

fn needs_quoting(value: &str) -> bool {
    value
        .chars()
        .any(|c| matches!(c, DELIMITER | QUOTE | ESCAPE | ROW_SEPARATOR | '\r'))
}

/// Replace `&`, `<`, `>`, `"` and `'` with their HTML entities.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
