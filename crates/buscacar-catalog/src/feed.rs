//! Line and field handling for the delimited listing export.
//!
//! The export is comma-separated with `"`-quoted spans. It is not strict CSV:
//! quotes only toggle whether a comma separates fields, and are dropped from
//! the output rather than unescaped.

use std::sync::LazyLock;

use regex::Regex;

/// Positional columns per row: year, city, photo URL, mileage, listing link,
/// store, price, title.
pub(crate) const FIELD_COUNT: usize = 8;

/// The exporter sometimes prefixes its own origin onto an absolute external
/// link, e.g. `https://www.comprecar.com.brhttps://loja.com.br/anuncio/1`.
static DUPLICATED_ORIGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^/]+?(https?://)").expect("valid regex"));

/// Yields `(line_number, line)` for every data row.
///
/// Blank lines are ignored, `\r` line endings are stripped, and the first
/// non-blank line is treated as the header and discarded whatever it holds.
/// Line numbers are 1-based positions in `raw`.
pub(crate) fn data_lines(raw: &str) -> impl Iterator<Item = (usize, &str)> {
    raw.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .skip(1)
        .map(|(idx, line)| (idx + 1, line))
}

/// Splits one row on commas that are not inside a quoted span.
///
/// Every field is trimmed. Quote characters never appear in the output.
pub(crate) fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_owned());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_owned());

    fields
}

/// Strips one duplicated-origin prefix from a listing link, if present.
pub(crate) fn canonical_link(link: &str) -> String {
    DUPLICATED_ORIGIN_RE.replace(link, "$1").into_owned()
}
