use prettytable::{format, Cell, Row, Table as Grid};
use std::fmt::Write as _;

use super::palette::color_for;
use crate::parse::Table;
use crate::stats::ColumnDistribution;

const BAR_WIDTH: usize = 40;

pub const NO_DATA: &str = "No data to display. Please load a CSV file.";
pub const NO_CHARTS: &str = "No multiple-choice questions detected in the data.\n\
    Charts are automatically generated for questions with 2-10 unique response options.";

/// How a single distribution is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ChartView {
    /// Horizontal bars, one per answer.
    #[default]
    Bar,
    /// Share legend: a colour swatch and `label: pct%` per answer.
    Pie,
    /// Response / Count / Percentage table.
    Data,
}

fn grid() -> Grid {
    let mut grid = Grid::new();
    grid.set_format(*format::consts::FORMAT_BOX_CHARS);
    grid
}

/// Full table as a boxed grid, header row first.
pub fn render_table(table: &Table) -> String {
    let Some(header) = table.header() else {
        return format!("{NO_DATA}\n");
    };
    let mut g = grid();
    g.set_titles(Row::new(header.iter().map(|h| Cell::new(h)).collect()));
    for row in table.data_rows() {
        g.add_row(Row::new(row.iter().map(|c| Cell::new(c)).collect()));
    }
    g.to_string()
}

/// One question: title, response total, then the chosen view.
pub fn render_distribution(dist: &ColumnDistribution, view: ChartView, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", dist.question);
    let _ = writeln!(out, "{} responses", dist.total_responses());
    match view {
        ChartView::Bar => out.push_str(&bars(dist, color)),
        ChartView::Pie => out.push_str(&pie(dist, color)),
        ChartView::Data => out.push_str(&data_grid(dist)),
    }
    out
}

/// Every distribution in order, or the empty-state message.
pub fn render_charts(dists: &[ColumnDistribution], view: ChartView, color: bool) -> String {
    if dists.is_empty() {
        return format!("{NO_CHARTS}\n");
    }
    dists
        .iter()
        .map(|d| render_distribution(d, view, color))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bars(dist: &ColumnDistribution, color: bool) -> String {
    let label_width = dist
        .categories
        .iter()
        .map(|c| c.label.chars().count())
        .max()
        .unwrap_or(0);
    let max_count = dist.categories.iter().map(|c| c.count).max().unwrap_or(1);

    let mut out = String::new();
    for (pos, cat) in dist.categories.iter().enumerate() {
        let len = ((cat.count * BAR_WIDTH + max_count / 2) / max_count).max(1);
        let bar = "█".repeat(len);
        let bar = if color {
            paint(&bar, color_for(pos))
        } else {
            bar
        };
        let _ = writeln!(
            out,
            "{:<width$} │{} {} ({}%)",
            cat.label,
            bar,
            cat.count,
            cat.percentage,
            width = label_width
        );
    }
    out
}

fn pie(dist: &ColumnDistribution, color: bool) -> String {
    let mut out = String::new();
    for (pos, cat) in dist.categories.iter().enumerate() {
        let swatch = if color {
            paint("●", color_for(pos))
        } else {
            "●".to_string()
        };
        let _ = writeln!(out, "{swatch} {}: {}%", cat.label, cat.percentage);
    }
    out
}

fn data_grid(dist: &ColumnDistribution) -> String {
    let mut g = grid();
    g.set_titles(Row::new(vec![
        Cell::new("Response"),
        Cell::new("Count").style_spec("r"),
        Cell::new("Percentage").style_spec("r"),
    ]));
    for cat in &dist.categories {
        g.add_row(Row::new(vec![
            Cell::new(&cat.label),
            Cell::new(&cat.count.to_string()).style_spec("r"),
            Cell::new(&format!("{}%", cat.percentage)).style_spec("r"),
        ]));
    }
    g.to_string()
}

/// Wrap `text` in a 24-bit ANSI foreground colour taken from a `#rrggbb` hex.
fn paint(text: &str, hex: &str) -> String {
    match hex_rgb(hex) {
        Some((r, g, b)) => format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m"),
        None => text.to_string(),
    }
}

fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let h = hex.strip_prefix('#')?;
    if h.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(h.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
