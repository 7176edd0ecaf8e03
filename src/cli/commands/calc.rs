//! `shq calc` command - Six Sigma calculators

use clap::Subcommand;
use console::style;
use miette::Result;
use serde::Serialize;

use crate::cli::output::{effective_format, print_csv, print_json, print_yaml};
use crate::cli::table::render_pairs;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::stats::{
    calculate_dpmo, calculate_process_capability, CapabilityInputs, DpmoInputs,
    FormattedCapability, FormattedDpmo,
};

/// Cpk at or above this is considered capable
const CPK_CAPABLE: f64 = 1.33;

/// Cpk at or above this (but below [`CPK_CAPABLE`]) is marginal
const CPK_MARGINAL: f64 = 1.0;

#[derive(Subcommand, Debug)]
pub enum CalcCommands {
    /// Defects per million opportunities, yield and sigma level
    Dpmo(DpmoArgs),

    /// Process capability indices (Cp, Cpk, Cpu, Cpl, Pp)
    Capability(CapabilityArgs),
}

#[derive(clap::Args, Debug)]
#[command(allow_negative_numbers = true)]
pub struct DpmoArgs {
    /// Number of defects observed
    #[arg(long, short = 'd')]
    pub defects: f64,

    /// Defect opportunities per unit
    #[arg(long, short = 'o')]
    pub opportunities: f64,

    /// Number of units inspected
    #[arg(long, short = 'u')]
    pub units: f64,
}

#[derive(clap::Args, Debug)]
#[command(allow_negative_numbers = true)]
pub struct CapabilityArgs {
    /// Process mean
    #[arg(long)]
    pub mean: f64,

    /// Process standard deviation
    #[arg(long)]
    pub std_dev: f64,

    /// Lower specification limit
    #[arg(long)]
    pub lsl: f64,

    /// Upper specification limit
    #[arg(long)]
    pub usl: f64,

    /// Target value (recorded only; not used by the indices)
    #[arg(long)]
    pub target: Option<f64>,
}

pub fn run(cmd: CalcCommands, global: &GlobalOpts, config: &Config) -> Result<()> {
    match cmd {
        CalcCommands::Dpmo(args) => run_dpmo(args, global, config),
        CalcCommands::Capability(args) => run_capability(args, global, config),
    }
}

fn run_dpmo(args: DpmoArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let result = calculate_dpmo(&DpmoInputs {
        defects: args.defects,
        opportunities: args.opportunities,
        units: args.units,
    });
    let formatted = FormattedDpmo::from(&result);

    match effective_format(global.output_format(config)) {
        OutputFormat::Json => print_json(&formatted),
        OutputFormat::Yaml => print_yaml(&formatted),
        OutputFormat::Csv => print_csv(
            ["dpmo", "dpu", "yield", "sigma_level"],
            [[
                &formatted.dpmo,
                &formatted.dpu,
                &formatted.process_yield,
                &formatted.sigma_level,
            ]],
        ),
        _ => {
            println!(
                "{}",
                render_pairs([
                    ("DPMO", formatted.dpmo.clone()),
                    ("DPU", formatted.dpu.clone()),
                    ("Yield %", formatted.process_yield.clone()),
                    ("Sigma level", formatted.sigma_level.clone()),
                ])
            );
            Ok(())
        }
    }
}

/// Capability result as reported, with the inputs echoed back
#[derive(Debug, Serialize)]
struct CapabilityReport {
    mean: f64,
    std_dev: f64,
    lsl: f64,
    usl: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<f64>,
    #[serde(flatten)]
    indices: FormattedCapability,
}

fn run_capability(args: CapabilityArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let inputs = CapabilityInputs {
        mean: args.mean,
        std_dev: args.std_dev,
        lsl: args.lsl,
        usl: args.usl,
        target: args.target,
    };
    let result = calculate_process_capability(&inputs);
    let report = CapabilityReport {
        mean: inputs.mean,
        std_dev: inputs.std_dev,
        lsl: inputs.lsl,
        usl: inputs.usl,
        target: inputs.target,
        indices: FormattedCapability::from(&result),
    };

    match effective_format(global.output_format(config)) {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Yaml => print_yaml(&report),
        OutputFormat::Csv => {
            let i = &report.indices;
            print_csv(
                ["cp", "cpk", "cpu", "cpl", "pp"],
                [[&i.cp, &i.cpk, &i.cpu, &i.cpl, &i.pp]],
            )
        }
        _ => {
            let i = &report.indices;
            println!(
                "{}",
                render_pairs([
                    ("Cp", i.cp.clone()),
                    ("Cpk", i.cpk.clone()),
                    ("Cpu", i.cpu.clone()),
                    ("Cpl", i.cpl.clone()),
                    ("Pp", i.pp.clone()),
                ])
            );
            println!("{}: {}", style("Verdict").bold(), capability_verdict(result.cpk));
            Ok(())
        }
    }
}

fn capability_verdict(cpk: f64) -> console::StyledObject<&'static str> {
    if cpk.is_nan() {
        style("undefined").dim()
    } else if cpk >= CPK_CAPABLE {
        style("capable").green()
    } else if cpk >= CPK_MARGINAL {
        style("marginal").yellow()
    } else {
        style("not capable").red()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_verdict_thresholds() {
        console::set_colors_enabled(false);
        assert_eq!(capability_verdict(1.5).to_string(), "capable");
        assert_eq!(capability_verdict(1.33).to_string(), "capable");
        assert_eq!(capability_verdict(1.0).to_string(), "marginal");
        assert_eq!(capability_verdict(0.8).to_string(), "not capable");
        assert_eq!(capability_verdict(f64::NAN).to_string(), "undefined");
        assert_eq!(capability_verdict(f64::INFINITY).to_string(), "capable");
    }
}
