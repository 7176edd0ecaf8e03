//! Output formatting utilities

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::io;

use crate::cli::{GlobalOpts, OutputFormat};

/// Determine the effective output format: `auto` means tables
pub fn effective_format(format: OutputFormat) -> OutputFormat {
    match format {
        OutputFormat::Auto => OutputFormat::Table,
        other => other,
    }
}

/// Print a status line to stderr unless `--quiet` is set
pub fn status(global: &GlobalOpts, message: impl std::fmt::Display) {
    if !global.quiet {
        eprintln!("{}", message);
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{}", json);
    Ok(())
}

pub fn print_yaml<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let yaml = serde_yml::to_string(value).into_diagnostic()?;
    print!("{}", yaml);
    Ok(())
}

/// Write a header plus rows as CSV to stdout
pub fn print_csv<H, R, C>(headers: H, rows: impl IntoIterator<Item = R>) -> Result<()>
where
    H: IntoIterator,
    H::Item: AsRef<[u8]>,
    R: IntoIterator<Item = C>,
    C: AsRef<[u8]>,
{
    let mut wtr = csv::Writer::from_writer(io::stdout());
    wtr.write_record(headers).into_diagnostic()?;
    for row in rows {
        wtr.write_record(row).into_diagnostic()?;
    }
    wtr.flush().into_diagnostic()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_means_table() {
        assert_eq!(effective_format(OutputFormat::Auto), OutputFormat::Table);
        assert_eq!(effective_format(OutputFormat::Json), OutputFormat::Json);
    }
}
