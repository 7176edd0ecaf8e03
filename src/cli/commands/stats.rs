//! `shq stats` command - descriptive statistics for one CSV column

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::{effective_format, print_csv, print_json, print_yaml, status};
use crate::cli::table::{render, render_pairs};
use crate::cli::viz::render_histogram;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::data::{DataError, DataTable};
use crate::stats::{
    assess_normality, describe, histogram, DescriptiveStats, FormattedNormality, FormattedStats,
    HistogramBin,
};

#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    /// CSV file with a header row
    pub file: PathBuf,

    /// Column to analyze (default: first column with numeric data)
    #[arg(long, short = 'c')]
    pub column: Option<String>,

    /// Include the 20-bin histogram
    #[arg(long, short = 'H')]
    pub histogram: bool,

    /// List the observations outside the 1.5 x IQR fences
    #[arg(long)]
    pub outliers: bool,
}

/// Everything `shq stats` reports, in machine-readable form
#[derive(Debug, Serialize)]
struct StatsReport {
    file: String,
    column: String,
    stats: FormattedStats,
    normality: FormattedNormality,
    #[serde(skip_serializing_if = "Option::is_none")]
    histogram: Option<Vec<HistogramBin>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outlier_values: Option<Vec<f64>>,
}

pub fn run(args: StatsArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let table = DataTable::from_csv_path(&args.file).into_diagnostic()?;

    let column = match args.column {
        Some(c) => c,
        None => table
            .default_column()
            .map(String::from)
            .ok_or_else(|| miette::miette!("{} has no columns", args.file.display()))?,
    };

    let sample = table.extract_sample(&column).into_diagnostic()?;
    if sample.is_empty() {
        return Err(DataError::NoNumericValues(column)).into_diagnostic();
    }

    let described = describe(&sample).into_diagnostic()?;
    let normality = assess_normality(&sample).into_diagnostic()?;
    let bins = if args.histogram {
        Some(histogram(&sample).into_diagnostic()?)
    } else {
        None
    };
    let outlier_values = args.outliers.then(|| outliers_of(&described, &sample));

    status(
        global,
        format!(
            "{} Analyzed {} values from column {}",
            style("✓").green(),
            described.n,
            style(&column).cyan()
        ),
    );

    let report = StatsReport {
        file: args.file.display().to_string(),
        column,
        stats: FormattedStats::from(&described),
        normality: FormattedNormality::from(&normality),
        histogram: bins,
        outlier_values,
    };

    match effective_format(global.output_format(config)) {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Yaml => print_yaml(&report),
        OutputFormat::Csv => {
            let mut rows: Vec<[String; 2]> = report
                .stats
                .rows()
                .into_iter()
                .map(|(label, value)| [label.to_string(), value])
                .collect();
            rows.push(["skewness".to_string(), report.normality.skewness.clone()]);
            rows.push(["kurtosis".to_string(), report.normality.kurtosis.clone()]);
            rows.push(["jb".to_string(), report.normality.jb_stat.clone()]);
            rows.push([
                "looks normal".to_string(),
                report.normality.is_normal.to_string(),
            ]);
            print_csv(["statistic", "value"], rows)
        }
        _ => {
            print_report(&report, &described, config);
            Ok(())
        }
    }
}

fn outliers_of(described: &DescriptiveStats, sample: &[f64]) -> Vec<f64> {
    sample
        .iter()
        .copied()
        .filter(|&x| described.is_outlier(x))
        .collect()
}

fn print_report(report: &StatsReport, described: &DescriptiveStats, config: &Config) {
    println!(
        "{} {} [{}]",
        style("Column").bold(),
        style(&report.column).cyan(),
        style(&report.file).dim()
    );
    println!("{}", render_pairs(report.stats.rows()));

    println!();
    let verdict = if report.normality.is_normal {
        style("looks normal").green()
    } else {
        style("does not look normal").yellow()
    };
    println!("{}: {}", style("Normality").bold(), verdict);
    println!(
        "{}",
        render_pairs([
            ("skewness", report.normality.skewness.clone()),
            ("excess kurtosis", report.normality.kurtosis.clone()),
            ("JB statistic", report.normality.jb_stat.clone()),
        ])
    );

    if let Some(ref bins) = report.histogram {
        println!();
        println!("{}", style("Histogram").bold());
        println!(
            "{}",
            render_histogram(
                bins,
                config.histogram_width(),
                Some(described.outlier_fences())
            )
        );
    }

    if let Some(ref values) = report.outlier_values {
        println!();
        let (lower, upper) = described.outlier_fences();
        println!(
            "{} ({}) outside [{:.2}, {:.2}]",
            style("Outliers").bold(),
            values.len(),
            lower,
            upper
        );
        if !values.is_empty() {
            println!(
                "{}",
                render(["value"], values.iter().map(|v| [v.to_string()]))
            );
        }
    }
}
