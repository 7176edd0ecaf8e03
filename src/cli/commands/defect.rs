//! `shq defect` command - Defect log management

use chrono::NaiveDate;
use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::Path;

use crate::cli::filters::{SeverityFilter, StatusFilter};
use crate::cli::helpers::{read_refs_from_stdin, truncate_str};
use crate::cli::output::{effective_format, print_csv, print_json, print_yaml, status};
use crate::cli::table::{render, render_pairs};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, DefectFilter, DefectLog};
use crate::entities::{Defect, DefectCategory, DefectDraft, DefectSeverity, DefectStatus};
use crate::stats::fixed;

#[derive(Subcommand, Debug)]
pub enum DefectCommands {
    /// Record a new defect
    New(NewArgs),

    /// List defects with filtering
    List(ListArgs),

    /// Show a defect's details
    Show(ShowArgs),

    /// Change fields of an existing defect
    Edit(EditArgs),

    /// Delete one or more defects
    Delete(DeleteArgs),

    /// Counts by status and severity, plus a 6M Pareto ranking
    Summary,
}

/// Defect fields shared by `new` and `edit`
#[derive(clap::Args, Debug, Default)]
pub struct DefectFields {
    /// Date observed (YYYY-MM-DD; default: today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Process or line where the defect was found
    #[arg(long, short = 'p')]
    pub process: Option<String>,

    /// What was observed
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// critical, major, minor or observation
    #[arg(long, short = 'S')]
    pub severity: Option<DefectSeverity>,

    /// open, analysis, correction, verification or closed
    #[arg(long, short = 's')]
    pub status: Option<DefectStatus>,

    /// Person responsible for follow-up
    #[arg(long, short = 'a')]
    pub assigned_to: Option<String>,

    /// 6M category: material, machine, method, manpower, measurement, environment
    #[arg(long, short = 'c')]
    pub category: Option<DefectCategory>,

    /// Root cause, once known
    #[arg(long)]
    pub root_cause: Option<String>,

    /// Corrective action taken
    #[arg(long)]
    pub action: Option<String>,
}

impl DefectFields {
    fn into_draft(self) -> DefectDraft {
        DefectDraft {
            date: self.date,
            process: self.process,
            description: self.description,
            severity: self.severity,
            status: self.status,
            assigned_to: self.assigned_to,
            category: self.category,
            root_cause: self.root_cause,
            action: self.action,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    #[command(flatten)]
    pub fields: DefectFields,

    /// Prompt for each field
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by status
    #[arg(long, short = 's', default_value = "active")]
    pub status: StatusFilter,

    /// Filter by severity
    #[arg(long, short = 'S', default_value = "all")]
    pub severity: SeverityFilter,

    /// Filter by 6M category
    #[arg(long, short = 'c')]
    pub category: Option<DefectCategory>,

    /// Filter by process (case-insensitive exact match)
    #[arg(long, short = 'p')]
    pub process: Option<String>,

    /// Search the free-text fields
    #[arg(long)]
    pub search: Option<String>,

    /// Show at most this many defects
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Print only the number of matching defects
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Defect reference (DEF@N, full ID or unique ID prefix)
    pub reference: String,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Defect reference (DEF@N, full ID or unique ID prefix)
    pub reference: String,

    #[command(flatten)]
    pub fields: DefectFields,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Defect references; read from stdin when omitted
    pub references: Vec<String>,
}

pub fn run(cmd: DefectCommands, global: &GlobalOpts, config: &Config) -> Result<()> {
    let path = global.defects_path(config);
    match cmd {
        DefectCommands::New(args) => run_new(args, &path, global, config),
        DefectCommands::List(args) => run_list(args, &path, global, config),
        DefectCommands::Show(args) => run_show(args, &path, global, config),
        DefectCommands::Edit(args) => run_edit(args, &path, global, config),
        DefectCommands::Delete(args) => run_delete(args, &path, global),
        DefectCommands::Summary => run_summary(&path, global, config),
    }
}

/// A defect together with its short ID, as listed
#[derive(Debug, Serialize)]
struct ListedDefect<'a> {
    short_id: String,
    #[serde(flatten)]
    defect: &'a Defect,
}

fn run_new(args: NewArgs, path: &Path, global: &GlobalOpts, config: &Config) -> Result<()> {
    let mut log = DefectLog::load(path)?;

    let mut draft = if args.interactive {
        prompt_draft(args.fields)?
    } else {
        args.fields.into_draft()
    };
    if draft.assigned_to.is_none() {
        draft.assigned_to = config.default_assignee.clone();
    }

    let defect = log.create(draft).clone();
    let short_id = DefectLog::short_id(log.len() - 1);
    log.save(path)?;

    match effective_format(global.output_format(config)) {
        OutputFormat::Json => print_json(&ListedDefect {
            short_id,
            defect: &defect,
        })?,
        OutputFormat::Yaml => print_yaml(&ListedDefect {
            short_id,
            defect: &defect,
        })?,
        _ => {
            println!(
                "{} Created defect {}",
                style("✓").green(),
                style(&short_id).cyan()
            );
            println!("   {}", style(defect.id.to_string()).dim());
            if !defect.description.is_empty() {
                println!("   {}", style(&defect.description).yellow());
            }
        }
    }

    Ok(())
}

/// Fill in whatever the flags left unset, one prompt per field
fn prompt_draft(fields: DefectFields) -> Result<DefectDraft> {
    let theme = ColorfulTheme::default();
    let mut draft = fields.into_draft();

    if draft.process.is_none() {
        let process: String = Input::with_theme(&theme)
            .with_prompt("Process")
            .interact_text()
            .into_diagnostic()?;
        draft.process = Some(process);
    }

    if draft.description.is_none() {
        let description: String = Input::with_theme(&theme)
            .with_prompt("Description")
            .interact_text()
            .into_diagnostic()?;
        draft.description = Some(description);
    }

    if draft.severity.is_none() {
        let mut items = vec!["(unrated)".to_string()];
        items.extend(DefectSeverity::all().iter().map(|s| s.to_string()));
        let selection = Select::with_theme(&theme)
            .with_prompt("Severity")
            .items(&items)
            .default(0)
            .interact()
            .into_diagnostic()?;
        draft.severity = selection
            .checked_sub(1)
            .map(|i| DefectSeverity::all()[i]);
    }

    if draft.category.is_none() {
        let mut items = vec!["(uncategorized)".to_string()];
        items.extend(DefectCategory::all().iter().map(|c| c.to_string()));
        let selection = Select::with_theme(&theme)
            .with_prompt("Category (6M)")
            .items(&items)
            .default(0)
            .interact()
            .into_diagnostic()?;
        draft.category = selection
            .checked_sub(1)
            .map(|i| DefectCategory::all()[i]);
    }

    if draft.assigned_to.is_none() {
        let assignee: String = Input::with_theme(&theme)
            .with_prompt("Assigned to (optional)")
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;
        if !assignee.is_empty() {
            draft.assigned_to = Some(assignee);
        }
    }

    Ok(draft)
}

fn run_list(args: ListArgs, path: &Path, global: &GlobalOpts, config: &Config) -> Result<()> {
    let log = DefectLog::load(path)?;

    let filter = DefectFilter {
        statuses: args.status.statuses(),
        severities: args.severity.severities(),
        category: args.category,
        process: args.process,
        search: args.search,
    };

    let mut matched: Vec<(usize, &Defect)> = log.filter(&filter).collect();
    if let Some(limit) = args.limit {
        matched.truncate(limit);
    }

    if args.count {
        println!("{}", matched.len());
        return Ok(());
    }

    let format = effective_format(global.output_format(config));

    if matched.is_empty() && format == OutputFormat::Table {
        println!("No defects found.");
        return Ok(());
    }

    match format {
        OutputFormat::Json | OutputFormat::Yaml => {
            let listed: Vec<ListedDefect> = matched
                .iter()
                .map(|&(idx, defect)| ListedDefect {
                    short_id: DefectLog::short_id(idx),
                    defect,
                })
                .collect();
            if format == OutputFormat::Json {
                print_json(&listed)
            } else {
                print_yaml(&listed)
            }
        }
        OutputFormat::Csv => print_csv(
            [
                "short_id",
                "id",
                "date",
                "process",
                "severity",
                "status",
                "category",
                "assigned_to",
                "description",
            ],
            matched.iter().map(|(idx, d)| {
                [
                    DefectLog::short_id(*idx),
                    d.id.to_string(),
                    d.date.to_string(),
                    d.process.clone(),
                    option_label(d.severity),
                    d.status.to_string(),
                    option_label(d.category),
                    d.assigned_to.clone(),
                    d.description.clone(),
                ]
            }),
        ),
        _ => {
            let rows = matched.iter().map(|(idx, d)| {
                [
                    DefectLog::short_id(*idx),
                    d.date.to_string(),
                    truncate_str(&d.process, 16),
                    option_label(d.severity),
                    d.status.to_string(),
                    option_label(d.category),
                    truncate_str(&d.assigned_to, 14),
                    truncate_str(&d.description, 36),
                ]
            });
            println!(
                "{}",
                render(
                    [
                        "SHORT", "DATE", "PROCESS", "SEVERITY", "STATUS", "CATEGORY", "ASSIGNED",
                        "DESCRIPTION",
                    ],
                    rows,
                )
            );
            status(
                global,
                format!(
                    "{} defect(s) found. Use {} to reference by short ID.",
                    style(matched.len()).cyan(),
                    style("DEF@N").cyan()
                ),
            );
            Ok(())
        }
    }
}

fn run_show(args: ShowArgs, path: &Path, global: &GlobalOpts, config: &Config) -> Result<()> {
    let log = DefectLog::load(path)?;
    let idx = log.resolve(&args.reference)?;
    let defect = log
        .iter()
        .nth(idx)
        .ok_or_else(|| miette::miette!("No defect found matching '{}'", args.reference))?;
    let short_id = DefectLog::short_id(idx);

    match effective_format(global.output_format(config)) {
        OutputFormat::Json => print_json(&ListedDefect { short_id, defect }),
        OutputFormat::Yaml => print_yaml(&ListedDefect { short_id, defect }),
        _ => {
            print_defect(&short_id, defect);
            Ok(())
        }
    }
}

fn print_defect(short_id: &str, defect: &Defect) {
    println!("{}", style("─".repeat(60)).dim());
    println!(
        "{}: {} ({})",
        style("ID").bold(),
        style(defect.id.to_string()).cyan(),
        style(short_id).cyan()
    );
    println!("{}: {}", style("Date").bold(), defect.date);
    println!("{}: {}", style("Process").bold(), style(&defect.process).yellow());
    println!("{}: {}", style("Status").bold(), defect.status);
    println!(
        "{}: {}",
        style("Severity").bold(),
        severity_label(defect.severity)
    );
    println!(
        "{}: {}",
        style("Category").bold(),
        option_label(defect.category)
    );
    if !defect.assigned_to.is_empty() {
        println!("{}: {}", style("Assigned to").bold(), defect.assigned_to);
    }
    println!("{}", style("─".repeat(60)).dim());

    if !defect.description.is_empty() {
        println!();
        println!("{}", style("Description:").bold());
        println!("{}", defect.description);
    }
    if !defect.root_cause.is_empty() {
        println!();
        println!("{}", style("Root cause:").bold());
        println!("{}", defect.root_cause);
    }
    if !defect.action.is_empty() {
        println!();
        println!("{}", style("Action:").bold());
        println!("{}", defect.action);
    }
}

fn run_edit(args: EditArgs, path: &Path, global: &GlobalOpts, config: &Config) -> Result<()> {
    let draft = args.fields.into_draft();
    if draft.is_empty() {
        miette::bail!("Nothing to change: pass at least one field to update");
    }

    let mut log = DefectLog::load(path)?;
    let idx = log.resolve(&args.reference)?;
    let short_id = DefectLog::short_id(idx);
    let defect = log.update(&short_id, draft)?.clone();
    log.save(path)?;

    match effective_format(global.output_format(config)) {
        OutputFormat::Json => print_json(&ListedDefect {
            short_id,
            defect: &defect,
        }),
        OutputFormat::Yaml => print_yaml(&ListedDefect {
            short_id,
            defect: &defect,
        }),
        _ => {
            println!(
                "{} Updated defect {}",
                style("✓").green(),
                style(&short_id).cyan()
            );
            Ok(())
        }
    }
}

fn run_delete(args: DeleteArgs, path: &Path, global: &GlobalOpts) -> Result<()> {
    let references = if args.references.is_empty() {
        read_refs_from_stdin().unwrap_or_default()
    } else {
        args.references
    };
    if references.is_empty() {
        miette::bail!("No defect references given");
    }

    let mut log = DefectLog::load(path)?;

    // Pin every reference to a full ID first; positions shift as defects are removed
    let mut ids = Vec::with_capacity(references.len());
    for reference in &references {
        let id = log.get(reference)?.id.to_string();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    for id in &ids {
        log.delete(id)?;
        status(global, format!("{} Deleted {}", style("✓").green(), style(id).cyan()));
    }
    log.save(path)?;

    Ok(())
}

fn run_summary(path: &Path, global: &GlobalOpts, config: &Config) -> Result<()> {
    let log = DefectLog::load(path)?;
    let summary = log.summary();

    match effective_format(global.output_format(config)) {
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Yaml => print_yaml(&summary),
        OutputFormat::Csv => print_csv(
            ["category", "count", "percent", "cumulative_percent"],
            summary.pareto.iter().map(|p| {
                [
                    p.category.clone(),
                    p.count.to_string(),
                    fixed(p.percent, 2),
                    fixed(p.cumulative_percent, 2),
                ]
            }),
        ),
        _ => {
            println!(
                "{}: {} ({} open)",
                style("Defects").bold(),
                summary.total,
                style(summary.open_count()).yellow()
            );
            if summary.total == 0 {
                return Ok(());
            }

            println!();
            println!(
                "{}",
                render_pairs(
                    summary
                        .by_status
                        .iter()
                        .map(|(s, n)| (s.to_string(), n.to_string()))
                )
            );

            println!();
            let mut by_severity: Vec<(String, String)> = summary
                .by_severity
                .iter()
                .map(|(s, n)| (s.to_string(), n.to_string()))
                .collect();
            by_severity.push(("unrated".to_string(), summary.unrated.to_string()));
            println!("{}", render_pairs(by_severity));

            println!();
            println!("{}", style("Pareto (6M)").bold());
            println!(
                "{}",
                render(
                    ["CATEGORY", "COUNT", "%", "CUMULATIVE %"],
                    summary.pareto.iter().map(|p| {
                        [
                            p.category.clone(),
                            p.count.to_string(),
                            fixed(p.percent, 1),
                            fixed(p.cumulative_percent, 1),
                        ]
                    }),
                )
            );
            Ok(())
        }
    }
}

fn option_label<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn severity_label(severity: Option<DefectSeverity>) -> console::StyledObject<String> {
    let label = option_label(severity);
    match severity {
        Some(DefectSeverity::Critical) => style(label).red().bold(),
        Some(DefectSeverity::Major) => style(label).yellow(),
        _ => style(label),
    }
}
