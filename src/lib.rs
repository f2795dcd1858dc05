pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod parse;
pub mod stats;
pub mod view;

pub use config::{AggregateConfig, FetchConfig, Settings};
pub use dashboard::Dashboard;
pub use error::LoadError;
pub use parse::{parse, Table};
pub use stats::{aggregate, aggregate_with, Category, ColumnDistribution};
