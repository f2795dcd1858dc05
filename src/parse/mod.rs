// src/parse/mod.rs
mod table;

pub use table::Table;

use tracing::{debug, instrument, trace};

const BOM: char = '\u{feff}';

/// Whitespace-only, counting a byte-order mark as whitespace.
fn is_blank(line: &str) -> bool {
    line.chars().all(|c| c.is_whitespace() || c == BOM)
}

/// Parse raw CSV text into a [`Table`].
///
/// - A leading byte-order mark is ignored.
/// - Lines end at `\n` or `\r\n`; blank and whitespace-only lines are dropped.
/// - Commas split fields unless they sit inside double quotes.
/// - `""` inside a quoted field is a literal quote.
/// - An unterminated quote is closed at the end of its line; quote state
///   never leaks into the next line.
///
/// Never fails: malformed input is scanned best-effort.
#[instrument(level = "debug", skip_all, fields(bytes = raw.len()))]
pub fn parse(raw: &str) -> Table {
    let text = raw.strip_prefix(BOM).unwrap_or(raw);
    let rows: Vec<Vec<String>> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !is_blank(line))
        .map(parse_line)
        .collect();

    debug!(rows = rows.len(), "parsed csv");
    Table::new(rows)
}

/// Split a single line into cells.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cells.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    if in_quotes {
        trace!(line, "unterminated quote closed at end of line");
    }
    cells.push(field);
    cells
}
