//! Top-level argument definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::calc::CalcCommands;
use crate::cli::commands::defect::DefectCommands;
use crate::cli::commands::file::FileCommands;
use crate::cli::commands::stats::StatsArgs;
use crate::core::Config;

#[derive(Parser, Debug)]
#[command(
    name = "shq",
    version,
    about = "Six Sigma quality tools: statistics, capability calculators and a defect log",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every subcommand
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Output format (default: from config, else auto)
    #[arg(long, short = 'f', global = true, env = "SHQ_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Defect log file (default: from config, else ./defects.yaml)
    #[arg(long, global = true, env = "SHQ_DEFECTS")]
    pub defect_log: Option<PathBuf>,

    /// Suppress status messages
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl GlobalOpts {
    /// Flag/env value, then config, then `auto`
    pub fn output_format(&self, config: &Config) -> OutputFormat {
        self.format
            .or_else(|| {
                config
                    .format
                    .as_deref()
                    .and_then(|f| OutputFormat::from_str(f, true).ok())
            })
            .unwrap_or_default()
    }

    /// Flag/env value, then config, then `defects.yaml`
    pub fn defects_path(&self, config: &Config) -> PathBuf {
        self.defect_log.clone().unwrap_or_else(|| config.defects_path())
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Descriptive statistics and normality screen for one CSV column
    Stats(StatsArgs),

    /// Inspect a CSV file (columns, rows, trend)
    #[command(subcommand)]
    File(FileCommands),

    /// Six Sigma calculators (DPMO, process capability)
    #[command(subcommand)]
    Calc(CalcCommands),

    /// Defect log
    #[command(subcommand)]
    Defect(DefectCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Auto,
    /// Human-readable tables
    Table,
    Json,
    Yaml,
    Csv,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_output_format_precedence() {
        let config = Config {
            format: Some("yaml".to_string()),
            ..Default::default()
        };
        let mut global = GlobalOpts::default();
        assert_eq!(global.output_format(&Config::default()), OutputFormat::Auto);
        assert_eq!(global.output_format(&config), OutputFormat::Yaml);

        global.format = Some(OutputFormat::Json);
        assert_eq!(global.output_format(&config), OutputFormat::Json);
    }

    #[test]
    fn test_unknown_config_format_falls_back() {
        let config = Config {
            format: Some("xml".to_string()),
            ..Default::default()
        };
        assert_eq!(
            GlobalOpts::default().output_format(&config),
            OutputFormat::Auto
        );
    }
}
