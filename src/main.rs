use clap::{Parser, Subcommand};
use reportgen::cli;
use reportgen::error::ReportResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reportgen")]
#[command(about = "CSV in, styled Excel report out. Pivot tables, charts, summary stats.")]
#[command(long_about = "Reportgen - CSV to styled Excel reports

COMMANDS:
  inspect  - Load a CSV and show the detected schema
  generate - Build the full .xlsx report (pivots, charts, statistics)
  stats    - Print summary statistics to the terminal
  sample   - Write the bundled sample sales dataset
  watch    - Regenerate the report whenever the CSV changes

EXAMPLES:
  reportgen sample demo.csv                 # Create demo data
  reportgen inspect demo.csv                # Check detected column types
  reportgen generate demo.csv report.xlsx   # Build the report
  reportgen stats demo.csv --json           # Statistics as JSON

Docs: https://github.com/royalbit/reportgen")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Load a CSV file and show its detected schema.

Column types are inferred from content, once, at load time:
  Numeric - every cell parses as a number
  Date    - every cell parses as a calendar date (YYYY-MM-DD or MM/DD/YYYY)
  Text    - everything else (including columns with empty cells)

Also lists which pivot rules apply to the schema. No file is written;
the exit status is the load outcome.")]
    /// Load a CSV and show the detected schema
    Inspect {
        /// Path to CSV file (header row required)
        file: PathBuf,
    },

    #[command(long_about = "Generate the full Excel report from a CSV file.

The report has exactly two sheets:
  Raw Data - every source row under a styled header, columns auto-fit
  Analysis - one titled block per applicable pivot, each with an embedded
             column chart, followed by the summary statistics

PIVOT RULES (applied when the schema matches):
  Sales by Category - needs Category (text) and Sales (numeric)
  Monthly Sales     - needs Date (date) and Sales (numeric)

The output file is replaced atomically: a failed run never corrupts a
previously generated report at the same path.")]
    /// Generate a styled Excel report from a CSV file
    Generate {
        /// Path to CSV file (header row required)
        input: PathBuf,

        /// Output Excel file path (.xlsx)
        output: PathBuf,

        /// Show verbose pipeline steps
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Print summary statistics for a CSV file.

Emits the record count, then mean, median, sample standard deviation
(N-1 denominator), min and max for every numeric column.

EXAMPLES:
  reportgen stats sales.csv
  reportgen stats sales.csv --json   # machine-readable output")]
    /// Print summary statistics for a CSV file
    Stats {
        /// Path to CSV file (header row required)
        file: PathBuf,

        /// Emit statistics as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Write the bundled sample sales dataset
    Sample {
        /// Where to write the sample CSV
        #[arg(default_value = "sample_sales_data.csv")]
        path: PathBuf,
    },

    #[command(long_about = "Watch a CSV file and regenerate the report on changes.

Monitors the CSV's directory and rebuilds the full report whenever the
file is saved (200ms debounce; editors that replace files on save are
handled). Every rebuild is a complete pipeline run from scratch.

A failed rebuild (e.g. a half-saved CSV) is reported and watching
continues; fix the file and save again.

Press Ctrl+C to stop watching.")]
    /// Watch a CSV file and regenerate the report on changes
    Watch {
        /// Path to CSV file to watch
        input: PathBuf,

        /// Output Excel file path (.xlsx)
        output: PathBuf,

        /// Show verbose pipeline steps
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> ReportResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { file } => cli::inspect(file),

        Commands::Generate {
            input,
            output,
            verbose,
        } => cli::generate(input, output, verbose),

        Commands::Stats { file, json } => cli::stats(file, json),

        Commands::Sample { path } => cli::sample(path),

        Commands::Watch {
            input,
            output,
            verbose,
        } => cli::watch(input, output, verbose),
    }
}
