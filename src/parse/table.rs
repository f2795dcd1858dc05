use serde::{Deserialize, Serialize};

/// A parsed CSV document.
///
/// Row 0 is the header row; every later row is a data row. Rows keep the
/// exact number of cells found on their line, so a data row may be shorter
/// or longer than the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows, header included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The header row, if the table has any rows at all.
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// All rows after the header.
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Cell lookup that tolerates ragged rows.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Serialize back to comma-separated text, one line per row.
    ///
    /// Cells holding `,` or `"` are quoted with doubled inner quotes. A row
    /// whose line would be blank is quoted too, otherwise the parser would
    /// drop it. Rows with zero cells come out as blank lines and are lost on
    /// re-parse, as are cells containing line breaks.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let blank = row.len() == 1 && super::is_blank(&row[0]);
            let line: Vec<String> = row
                .iter()
                .map(|cell| {
                    if blank || cell.contains(',') || cell.contains('"') {
                        format!("\"{}\"", cell.replace('"', "\"\""))
                    } else {
                        cell.clone()
                    }
                })
                .collect();
            out.push_str(&line.join(","));
            out.push('\n');
        }
        out
    }
}
