//! Parser for the published sheet export.
//!
//! The export is plain comma-separated text with a header row. The sheet is
//! hand-maintained, so the parser is deliberately forgiving: malformed input
//! produces a best-effort row, never an error.
//!
//! Known limitation: lines are split on `\n` before quote scanning, so a
//! quoted field containing a literal newline breaks its row in two. The
//! published sheet does not contain such fields; changing this would change
//! observable row counts for inputs that do.

use std::collections::BTreeMap;

/// One data row, keyed by header name exactly as published.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    columns: BTreeMap<String, String>,
}

impl RawRow {
    /// Builds a row directly from header/cell pairs. Useful for fixtures.
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut columns = BTreeMap::new();
        for (header, cell) in pairs {
            columns
                .entry((*header).to_string())
                .or_insert_with(|| (*cell).to_string());
        }
        Self { columns }
    }

    /// Returns the cell under `header`, or `""` when the column is absent.
    #[must_use]
    pub fn get(&self, header: &str) -> &str {
        self.columns.get(header).map_or("", String::as_str)
    }

    /// Probes an ordered list of candidate headers and returns the first
    /// non-empty cell. Header names drift between Thai and English in the
    /// source sheet, so every logical field is looked up this way.
    #[must_use]
    pub fn first_of<S: AsRef<str>>(&self, candidates: &[S]) -> &str {
        candidates
            .iter()
            .map(|candidate| self.get(candidate.as_ref()))
            .find(|cell| !cell.is_empty())
            .unwrap_or("")
    }
}

/// Parses a raw CSV export into rows.
///
/// The first line is the header. Blank lines are skipped, rows shorter than
/// the header are padded with empty cells, surplus cells are dropped, and a
/// duplicated header name keeps its first column. An export with fewer than
/// two lines yields no rows.
#[must_use]
pub fn parse_csv(text: &str) -> Vec<RawRow> {
    let mut lines = text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));

    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers = split_line(header_line);

    let mut rows = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let cells = split_line(line);
        let mut columns = BTreeMap::new();
        for (index, header) in headers.iter().enumerate() {
            let cell = cells.get(index).cloned().unwrap_or_default();
            columns.entry(header.clone()).or_insert(cell);
        }
        rows.push(RawRow { columns });
    }

    rows
}

/// Splits one line on commas outside quotes.
///
/// A single left-to-right scan tracks an in-quotes flag: `"` toggles it and
/// a `,` outside quotes ends the current field.
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' if !in_quotes => {
                fields.push(clean_field(&current));
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(clean_field(&current));

    fields
}

/// Trims surrounding whitespace and strips a single pair of wrapping quotes.
fn clean_field(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(trimmed)
        .to_string()
}
