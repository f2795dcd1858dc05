// src/stats/mod.rs
mod types;

pub use types::{Category, ColumnDistribution};

use std::collections::HashMap;
use tracing::{debug, instrument, trace};

use crate::config::AggregateConfig;
use crate::parse::Table;

/// Distributions for every multiple-choice column, using the default
/// heuristics (skip column 0, keep columns with 2..=10 distinct answers).
pub fn aggregate(table: &Table) -> Vec<ColumnDistribution> {
    aggregate_with(table, &AggregateConfig::default())
}

/// Classify each header-addressed column and count its answers.
///
/// Columns are visited in header order starting after the identifier
/// columns. Cells past the end of the header are never looked at. Tables
/// without at least one data row produce nothing.
#[instrument(level = "debug", skip_all, fields(rows = table.len()))]
pub fn aggregate_with(table: &Table, cfg: &AggregateConfig) -> Vec<ColumnDistribution> {
    let Some(headers) = table.header() else {
        return Vec::new();
    };
    if table.data_rows().is_empty() {
        return Vec::new();
    }

    let out: Vec<ColumnDistribution> = headers
        .iter()
        .enumerate()
        .skip(cfg.identifier_columns)
        .filter_map(|(idx, question)| distribution_for(table, idx, question, cfg))
        .collect();

    debug!(
        columns = headers.len(),
        categorical = out.len(),
        "aggregated columns"
    );
    out
}

fn distribution_for(
    table: &Table,
    idx: usize,
    question: &str,
    cfg: &AggregateConfig,
) -> Option<ColumnDistribution> {
    // (label, count) in first-seen order, plus an index into it
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();

    for row in table.data_rows() {
        let Some(cell) = row.get(idx).map(String::as_str) else {
            continue;
        };
        if cell.is_empty() {
            continue;
        }
        match slot.get(cell) {
            Some(&i) => counts[i].1 += 1,
            None => {
                slot.insert(cell, counts.len());
                counts.push((cell, 1));
            }
        }
    }

    if counts.is_empty() || !cfg.is_categorical(counts.len()) {
        trace!(idx, question, distinct = counts.len(), "column not categorical");
        return None;
    }

    let total: usize = counts.iter().map(|(_, n)| n).sum();
    let categories = counts
        .into_iter()
        .map(|(label, count)| Category {
            label: label.to_string(),
            count,
            percentage: percentage(count, total),
        })
        .collect();

    Some(ColumnDistribution {
        column_index: idx,
        question: question.to_string(),
        categories,
    })
}

/// Nearest-integer share of `count` in `total`, halves rounded up.
fn percentage(count: usize, total: usize) -> u32 {
    ((count as f64 / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,sheetstats::stats=trace")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    /// Table with a timestamp column followed by `column`.
    fn single_column(column: &[&str]) -> Table {
        let mut rows = vec![vec!["Timestamp".to_string(), "Question".to_string()]];
        for (i, v) in column.iter().enumerate() {
            rows.push(vec![format!("t{i}"), v.to_string()]);
        }
        Table::new(rows)
    }

    #[test]
    fn test_yes_no_distribution_in_first_seen_order() {
        let dists = aggregate(&single_column(&["Yes", "No", "Yes", "Yes"]));
        assert_eq!(dists.len(), 1);
        let d = &dists[0];
        assert_eq!(d.column_index, 1);
        assert_eq!(d.question, "Question");
        assert_eq!(
            d.categories,
            vec![
                Category {
                    label: "Yes".into(),
                    count: 3,
                    percentage: 75
                },
                Category {
                    label: "No".into(),
                    count: 1,
                    percentage: 25
                },
            ]
        );
        assert_eq!(d.total_responses(), 4);
    }

    #[test]
    fn test_empty_cells_excluded_from_denominator() {
        let dists = aggregate(&single_column(&["A", "", "B", "A"]));
        let d = &dists[0];
        assert_eq!(d.total_responses(), 3);
        assert_eq!(d.category("A").map(|c| (c.count, c.percentage)), Some((2, 67)));
        assert_eq!(d.category("B").map(|c| (c.count, c.percentage)), Some((1, 33)));
    }

    #[test]
    fn test_distinct_value_bounds() {
        let eleven: Vec<String> = (0..11).map(|i| format!("v{i}")).collect();
        let refs: Vec<&str> = eleven.iter().map(String::as_str).collect();
        assert!(aggregate(&single_column(&refs)).is_empty());

        let ten = &refs[..10];
        assert_eq!(aggregate(&single_column(ten))[0].categories.len(), 10);

        assert!(aggregate(&single_column(&["same", "same", "same"])).is_empty());
        assert_eq!(aggregate(&single_column(&["a", "b"]))[0].categories.len(), 2);
    }

    #[test]
    fn test_all_empty_column_skipped() {
        assert!(aggregate(&single_column(&["", "", ""])).is_empty());
    }

    #[test]
    fn test_header_only_or_empty_table() {
        assert!(aggregate(&parse("Timestamp,Q1,Q2")).is_empty());
        assert!(aggregate(&Table::default()).is_empty());
    }

    #[test]
    fn test_column_zero_never_reported() {
        // column 0 is categorical by content but still skipped
        let table = parse("Kind,Q\nx,1\ny,2\nx,1");
        let dists = aggregate(&table);
        assert!(dists.iter().all(|d| d.column_index != 0));
        assert_eq!(dists.len(), 1);
    }

    #[test]
    fn test_case_sensitive_and_untrimmed() {
        let dists = aggregate(&single_column(&["yes", "Yes", " Yes"]));
        assert_eq!(dists[0].categories.len(), 3);
    }

    #[test]
    fn test_ragged_rows_and_extra_columns() {
        init_test_logging();
        let table = parse("ts,Q1,Q2\n1,a\n2,b,x,EXTRA\n3,a,y,OTHER\n4");
        let dists = aggregate(&table);
        assert_eq!(dists.len(), 2);
        assert_eq!(dists[0].column_index, 1);
        assert_eq!(dists[0].total_responses(), 3);
        assert_eq!(dists[1].column_index, 2);
        assert_eq!(dists[1].total_responses(), 2);
        // cells beyond the header are never classified
        assert!(dists.iter().all(|d| d.column_index < 3));
    }

    #[test]
    fn test_percentages_not_forced_to_100() {
        let dists = aggregate(&single_column(&["a", "b", "c"]));
        let sum: u32 = dists[0].categories.iter().map(|c| c.percentage).sum();
        assert_eq!(sum, 99);

        // 1/8 = 12.5% rounds up
        let mut col = vec!["x"];
        col.extend(std::iter::repeat("y").take(7));
        let d = &aggregate(&single_column(&col))[0];
        assert_eq!(d.category("x").map(|c| c.percentage), Some(13));
        assert_eq!(d.category("y").map(|c| c.percentage), Some(88));
    }

    #[test]
    fn test_output_follows_header_order() {
        init_test_logging();
        let table = parse(
            "ts,Free text,Colour,Constant,Size\n\
             1,alpha,Red,k,S\n\
             2,beta,Blue,k,M\n\
             3,gamma,Red,k,S\n\
             4,delta,Green,k,L\n\
             5,epsilon,Red,k,M\n\
             6,zeta,Blue,k,S\n\
             7,eta,Red,k,S\n\
             8,theta,Red,k,S\n\
             9,iota,Red,k,S\n\
             10,kappa,Red,k,S\n\
             11,lambda,Red,k,S",
        );
        let dists = aggregate(&table);
        let indices: Vec<usize> = dists.iter().map(|d| d.column_index).collect();
        assert_eq!(indices, vec![2, 4]);
        let labels: Vec<&str> = dists[0].categories.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Red", "Blue", "Green"]);
    }

    #[test]
    fn test_numeric_labels_keep_first_seen_order() {
        let dists = aggregate(&single_column(&["10", "2", "1", "2"]));
        let labels: Vec<&str> = dists[0].categories.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["10", "2", "1"]);
    }

    #[test]
    fn test_unanswered_column_skipped_even_with_zero_minimum() {
        let cfg = AggregateConfig {
            min_distinct: 0,
            ..AggregateConfig::default()
        };
        let dists = aggregate_with(&parse("ts,Q,R\n1,,a\n2,,b"), &cfg);
        assert_eq!(dists.len(), 1);
        assert_eq!(dists[0].column_index, 2);
        assert!(dists.iter().all(|d| d.categories.iter().all(|c| c.count >= 1)));
    }

    #[test]
    fn test_custom_thresholds() {
        let cfg = AggregateConfig {
            identifier_columns: 0,
            min_distinct: 1,
            max_distinct: 2,
        };
        let table = parse("A,B\nx,1\nx,2\nx,3");
        let dists = aggregate_with(&table, &cfg);
        assert_eq!(dists.len(), 1);
        assert_eq!(dists[0].column_index, 0);
        assert_eq!(dists[0].categories[0].percentage, 100);
    }
}
