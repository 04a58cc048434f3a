//! northwind-etl — run the warehouse load
//!
//! # Usage
//!
//! ```bash
//! # Run with ./northwind-etl.toml or the built-in defaults
//! northwind-etl
//!
//! # Point at other stores
//! northwind-etl --source-url sqlite://nw.sqlite --destination-url postgres://...
//!
//! # Show the projections without touching any store
//! northwind-etl --dry-run
//! ```

use anyhow::Result;
use clap::{Parser, ValueEnum};
use colored::*;
use northwind_etl::config::EtlConfigBuilder;
use northwind_etl::pipeline::run_with_log;
use northwind_etl::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "northwind-etl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Load the Northwind star schema into the warehouse", long_about = None)]
#[command(after_help = "EXAMPLES:
    northwind-etl
    northwind-etl --config etl.toml --format json
    northwind-etl --dry-run")]
struct Cli {
    /// Config file (default: ./northwind-etl.toml, then the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Source database URL
    #[arg(long, env = "NORTHWIND_SOURCE_URL")]
    source_url: Option<String>,

    /// Warehouse database URL
    #[arg(long, env = "NORTHWIND_DESTINATION_URL")]
    destination_url: Option<String>,

    /// Run log file
    #[arg(long, env = "NORTHWIND_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Don't connect, just show the projections and load order
    #[arg(short, long)]
    dry_run: bool,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = execute(&cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn execute(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;

    if cli.dry_run {
        show_projections();
        return Ok(());
    }

    // JSON owns stdout
    let log = match cli.format {
        OutputFormat::Json => RunLog::quiet(&config.log.file),
        OutputFormat::Table => RunLog::new(&config.log.file),
    };
    let report = run_with_log(&config, &log).await?;
    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print_report(&report),
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<EtlConfig> {
    let mut builder = EtlConfigBuilder::from_config(EtlConfig::load(cli.config.as_deref())?);
    if let Some(url) = &cli.source_url {
        builder = builder.source(url);
    }
    if let Some(url) = &cli.destination_url {
        builder = builder.destination(url);
    }
    if let Some(path) = &cli.log_file {
        builder = builder.log_file(path);
    }
    Ok(builder.build()?)
}

fn show_projections() {
    for (i, projection) in LOAD_ORDER.iter().enumerate() {
        let kind = match projection.kind {
            TableKind::Dimension => "dimension",
            TableKind::Fact => "fact",
        };
        println!(
            "\n{} {} {}",
            format!("{}.", i + 1).dimmed(),
            projection.target.cyan().bold(),
            format!("({})", kind).dimmed()
        );
        println!("{}", projection.sql.trim().white());
    }
    println!("\n{}", "No stores touched.".yellow());
}

fn print_report(report: &RunReport) {
    let width = report
        .extracted
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0);

    println!();
    println!(
        "{:width$} │ {:>9} │ {}",
        "table".white().bold(),
        "extracted".white().bold(),
        "load".white().bold(),
        width = width
    );
    println!("{}", format!("{}─┼─{}─┼─{}", "─".repeat(width), "─".repeat(9), "─".repeat(24)).dimmed());

    for (name, rows) in &report.extracted {
        let outcome = match report.load.outcome(name) {
            Some(TableOutcome::Appended { rows }) => format!("✓ {} appended", rows).green(),
            Some(TableOutcome::Failed { .. }) => "✗ failed".red(),
            Some(TableOutcome::Skipped) | None => "- skipped".dimmed(),
        };
        println!("{:width$} │ {:>9} │ {}", name, rows, outcome, width = width);
    }

    println!();
    match report.load.failed() {
        Some((table, error)) => {
            println!("{} {}: {}", "Load stopped at".yellow(), table.cyan(), error);
        }
        None => println!(
            "{} {} row(s) loaded",
            "✓".green(),
            report.load.total_rows().to_string().cyan()
        ),
    }
}
