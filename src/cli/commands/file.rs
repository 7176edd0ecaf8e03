//! `shq file` command - inspect a CSV file

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::helpers::truncate_str;
use crate::cli::output::{effective_format, print_csv, print_json, print_yaml, status};
use crate::cli::table::render;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::data::{ColumnSummary, DataTable, DEFAULT_TREND_LIMIT};
use crate::stats::fixed;

#[derive(Subcommand, Debug)]
pub enum FileCommands {
    /// List columns with a quick summary of the numeric ones
    Columns(ColumnsArgs),

    /// Show rows, optionally filtered by a search term
    Rows(RowsArgs),

    /// Show the first rows of a column as a trend
    Trend(TrendArgs),
}

#[derive(clap::Args, Debug)]
pub struct ColumnsArgs {
    /// CSV file with a header row
    pub file: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct RowsArgs {
    /// CSV file with a header row
    pub file: PathBuf,

    /// Keep rows where any cell contains this text (case-insensitive)
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Page to show (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page
    #[arg(long, default_value_t = 10)]
    pub per_page: usize,
}

#[derive(clap::Args, Debug)]
pub struct TrendArgs {
    /// CSV file with a header row
    pub file: PathBuf,

    /// Column to plot (default: first column with numeric data)
    #[arg(long, short = 'c')]
    pub column: Option<String>,

    /// Number of rows to include
    #[arg(long, short = 'n', default_value_t = DEFAULT_TREND_LIMIT)]
    pub limit: usize,
}

pub fn run(cmd: FileCommands, global: &GlobalOpts, config: &Config) -> Result<()> {
    match cmd {
        FileCommands::Columns(args) => run_columns(args, global, config),
        FileCommands::Rows(args) => run_rows(args, global, config),
        FileCommands::Trend(args) => run_trend(args, global, config),
    }
}

/// Column listing entry
#[derive(Debug, Serialize)]
struct ColumnInfo {
    name: String,
    numeric: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ColumnSummary>,
}

fn run_columns(args: ColumnsArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let table = DataTable::from_csv_path(&args.file).into_diagnostic()?;
    let summaries = table.column_summaries();

    let columns: Vec<ColumnInfo> = table
        .headers()
        .iter()
        .map(|name| {
            let summary = summaries.iter().find(|s| &s.column == name).cloned();
            ColumnInfo {
                name: name.clone(),
                numeric: summary.is_some(),
                summary,
            }
        })
        .collect();

    status(
        global,
        format!(
            "{} {} rows, {} columns ({} numeric)",
            style("✓").green(),
            table.len(),
            columns.len(),
            summaries.len()
        ),
    );

    let headers = ["column", "numeric", "mean", "median", "min", "max", "count"];
    let rows = columns.iter().map(|c| {
        let mut row = vec![c.name.clone(), if c.numeric { "yes" } else { "no" }.to_string()];
        match c.summary {
            Some(ref s) => {
                row.extend(s.display_values());
                row.push(s.count.to_string());
            }
            None => row.resize(headers.len(), "-".to_string()),
        }
        row
    });

    match effective_format(global.output_format(config)) {
        OutputFormat::Json => print_json(&columns),
        OutputFormat::Yaml => print_yaml(&columns),
        OutputFormat::Csv => print_csv(headers, rows),
        _ => {
            println!("{}", render(headers, rows));
            Ok(())
        }
    }
}

fn run_rows(args: RowsArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    if args.page == 0 || args.per_page == 0 {
        miette::bail!("--page and --per-page must be at least 1");
    }

    let table = DataTable::from_csv_path(&args.file).into_diagnostic()?;
    let matched = table.search(args.search.as_deref().unwrap_or(""));

    let total_pages = matched.len().div_ceil(args.per_page).max(1);
    let page: Vec<Vec<String>> = matched
        .iter()
        .skip((args.page - 1) * args.per_page)
        .take(args.per_page)
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();

    status(
        global,
        format!(
            "{} row(s) matched, page {} of {}",
            style(matched.len()).cyan(),
            args.page,
            total_pages
        ),
    );

    let format = effective_format(global.output_format(config));
    match format {
        OutputFormat::Json | OutputFormat::Yaml => {
            let records: Vec<serde_json::Map<String, serde_json::Value>> = page
                .iter()
                .map(|row| {
                    table
                        .headers()
                        .iter()
                        .cloned()
                        .zip(row.iter().cloned().map(serde_json::Value::String))
                        .collect()
                })
                .collect();
            if format == OutputFormat::Json {
                print_json(&records)
            } else {
                print_yaml(&records)
            }
        }
        OutputFormat::Csv => print_csv(table.headers(), page),
        _ => {
            if page.is_empty() {
                println!("No rows found.");
            } else {
                let rows = page
                    .iter()
                    .map(|row| row.iter().map(|c| truncate_str(c, 30)).collect::<Vec<_>>());
                println!("{}", render(table.headers().iter().cloned(), rows));
            }
            Ok(())
        }
    }
}

fn run_trend(args: TrendArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let table = DataTable::from_csv_path(&args.file).into_diagnostic()?;

    let column = match args.column {
        Some(c) => c,
        None => table
            .default_column()
            .map(String::from)
            .ok_or_else(|| miette::miette!("{} has no columns", args.file.display()))?,
    };

    let points = table.trend(&column, args.limit).into_diagnostic()?;

    status(
        global,
        format!(
            "{} Trend of {} over {} row(s)",
            style("✓").green(),
            style(&column).cyan(),
            points.len()
        ),
    );

    match effective_format(global.output_format(config)) {
        OutputFormat::Json => print_json(&points),
        OutputFormat::Yaml => print_yaml(&points),
        OutputFormat::Csv => print_csv(
            ["label", "value"],
            points.iter().map(|p| [p.label.clone(), p.value.to_string()]),
        ),
        _ => {
            let rows = points
                .iter()
                .map(|p| [truncate_str(&p.label, 20), fixed(p.value, 2)]);
            println!("{}", render(["label", column.as_str()], rows));
            Ok(())
        }
    }
}
