use clap::{CommandFactory, Parser};
use miette::Result;
use shq::cli::{Cli, Commands};
use shq::core::Config;

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    if cli.global.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let config = Config::load();
    let global = &cli.global;

    match cli.command {
        Commands::Stats(args) => shq::cli::commands::stats::run(args, global, &config),
        Commands::File(cmd) => shq::cli::commands::file::run(cmd, global, &config),
        Commands::Calc(cmd) => shq::cli::commands::calc::run(cmd, global, &config),
        Commands::Defect(cmd) => shq::cli::commands::defect::run(cmd, global, &config),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "shq", &mut std::io::stdout());
            Ok(())
        }
    }
}
