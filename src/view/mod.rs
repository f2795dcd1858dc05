// src/view/mod.rs
pub mod filter;
pub mod palette;
pub mod render;

pub use filter::filter_rows;
pub use palette::{color_for, PALETTE};
pub use render::{render_charts, render_distribution, render_table, ChartView};
