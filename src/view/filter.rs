use crate::parse::Table;

/// Rows of `table` matching `query`, header always kept.
///
/// A data row matches when any of its cells contains `query`, ignoring case.
/// A blank query returns the table unchanged.
pub fn filter_rows(table: &Table, query: &str) -> Table {
    if query.trim().is_empty() {
        return table.clone();
    }
    let needle = query.to_lowercase();
    let rows = table
        .rows()
        .iter()
        .enumerate()
        .filter(|(i, row)| *i == 0 || row.iter().any(|c| c.to_lowercase().contains(&needle)))
        .map(|(_, row)| row.clone())
        .collect();
    Table::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn sample() -> Table {
        parse("Name,Answer\nAlice,Yes\nBob,No\nCarol,yes please\n")
    }

    #[test]
    fn test_blank_query_is_identity() {
        let table = sample();
        assert_eq!(filter_rows(&table, ""), table);
        assert_eq!(filter_rows(&table, "  \t"), table);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let out = filter_rows(&sample(), "YES");
        let names: Vec<&str> = out.rows().iter().map(|r| r[0].as_str()).collect();
        assert_eq!(names, vec!["Name", "Alice", "Carol"]);
    }

    #[test]
    fn test_header_kept_even_without_matches() {
        let out = filter_rows(&sample(), "zzz");
        assert_eq!(out.len(), 1);
        assert_eq!(out.header(), sample().header());
    }

    #[test]
    fn test_query_not_trimmed() {
        // only blank queries are special; surrounding spaces are part of the needle
        let out = filter_rows(&sample(), " please");
        assert_eq!(out.len(), 2);
    }
}
