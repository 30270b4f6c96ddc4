//! sheetpeek CLI - quick look at an Excel workbook
//!
//! Prints the shape, column labels and first rows of a workbook's first sheet.

use clap::Parser;
use colored::*;
use std::path::PathBuf;

/// Print the shape, columns and first rows of an Excel workbook
#[derive(Parser)]
#[command(
    name = "sheetpeek",
    version,
    about = "Inspect the first sheet of an Excel workbook",
    long_about = "sheetpeek - quick look at an Excel workbook.\n\n\
                  Loads the first sheet, treating its first non-blank row as the header, \
                  and prints the sheet's shape, its column labels and its first 10 rows."
)]
struct Cli {
    /// Workbook to inspect
    #[arg(default_value = "ipo-data.xlsx")]
    input: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    log::debug!("inspecting {}", cli.input.display());
    sheetpeek::inspect(&cli.input)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_input() {
        let cli = Cli::parse_from(["sheetpeek"]);
        assert_eq!(cli.input, PathBuf::from("ipo-data.xlsx"));

        let cli = Cli::parse_from(["sheetpeek", "deals.xlsx"]);
        assert_eq!(cli.input, PathBuf::from("deals.xlsx"));
    }
}
