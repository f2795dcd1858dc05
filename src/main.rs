use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sheetstats::{
    fetch,
    view::{filter_rows, render_charts, render_table, ChartView},
    Dashboard, Settings,
};
use std::{io::IsTerminal, path::PathBuf};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Section {
    Table,
    Charts,
    All,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Summarise form responses from a published Google Sheet CSV"
)]
struct Args {
    /// CSV URL, or a local path when --file is given
    source: String,
    /// Treat SOURCE as a local file path
    #[arg(long)]
    file: bool,
    /// Only show table rows containing this text (case-insensitive)
    #[arg(long)]
    filter: Option<String>,
    #[arg(long, value_enum, default_value = "all")]
    view: Section,
    /// How each question is drawn
    #[arg(long, value_enum, default_value = "bar")]
    chart: ChartView,
    /// Print the dashboard as JSON instead of text
    #[arg(long)]
    json: bool,
    /// YAML settings file
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    min_distinct: Option<usize>,
    #[arg(long)]
    max_distinct: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // ─── 2) settings ─────────────────────────────────────────────────
    let mut settings = match &args.config {
        Some(path) => Settings::from_yaml_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(n) = args.min_distinct {
        settings.aggregate.min_distinct = n;
    }
    if let Some(n) = args.max_distinct {
        settings.aggregate.max_distinct = n;
    }
    settings.validate()?;

    // ─── 3) load ─────────────────────────────────────────────────────
    let loaded = if args.file {
        fetch::read_csv_file(&args.source)
            .await
            .and_then(|text| Dashboard::from_csv(&text, &settings.aggregate))
    } else {
        let client = fetch::build_client(&settings.fetch)?;
        Dashboard::load(&client, &args.source, &settings).await
    };
    let dashboard = match loaded {
        Ok(d) => d,
        Err(e) => {
            error!(error = %e, "load failed");
            eprintln!("{}", e.user_message());
            return Err(e).context("loading dashboard");
        }
    };
    info!(
        responses = dashboard.responses(),
        charts = dashboard.distributions.len(),
        "data loaded"
    );

    // ─── 4) render ───────────────────────────────────────────────────
    if args.json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    if matches!(args.view, Section::Table | Section::All) {
        let shown = match &args.filter {
            Some(q) => filter_rows(&dashboard.table, q),
            None => dashboard.table.clone(),
        };
        print!("{}", render_table(&shown));
    }
    if args.view == Section::All {
        println!();
    }
    if matches!(args.view, Section::Charts | Section::All) {
        let color = std::io::stdout().is_terminal();
        print!("{}", render_charts(&dashboard.distributions, args.chart, color));
    }

    Ok(())
}

