use crate::core::{build_aggregates, summarize};
use crate::error::{ReportError, ReportResult};
use crate::excel::ReportExporter;
use crate::loader;
use crate::types::SummaryStat;
use colored::Colorize;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

/// Sample sales dataset written by the `sample` command.
const SAMPLE_CSV: &str = "\
Date,Category,Product,Sales,Units
2023-01-01,Electronics,TV,1500,5
2023-01-01,Furniture,Sofa,1200,3
2023-01-02,Electronics,Phone,800,10
2023-01-02,Furniture,Table,400,8
2023-01-03,Electronics,Laptop,2000,4
2023-01-04,Furniture,Chair,300,12
2023-01-05,Electronics,Tablet,600,7
2023-01-06,Furniture,Cabinet,750,2
2023-02-01,Electronics,TV,1600,6
2023-02-02,Furniture,Sofa,1250,4
2023-02-03,Electronics,Phone,850,9
2023-02-04,Electronics,Laptop,2100,5
";

/// Format a number for display, removing unnecessary decimal places
fn format_number(n: f64) -> String {
    // Round to 6 decimal places for display (sufficient for report statistics)
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Execute the inspect command - load a CSV and show its detected schema
pub fn inspect(file: PathBuf) -> ReportResult<()> {
    println!("{}", "🔍 Reportgen - Inspecting CSV".bold().green());
    println!("   File: {}\n", file.display());

    let table = loader::load_csv(&file)?;

    println!(
        "   {} columns, {} rows\n",
        table.column_count(),
        table.row_count()
    );
    println!("{}", "📋 Detected Schema:".bold().cyan());
    for column in table.columns() {
        println!(
            "   {} ({})",
            column.name.bright_blue(),
            column.column_type().as_str().cyan()
        );
    }

    let aggregates = build_aggregates(&table);
    println!();
    if aggregates.is_empty() {
        println!(
            "{}",
            "⚠️  No pivot rules apply to this schema (report will carry raw data and statistics only)"
                .yellow()
        );
    } else {
        println!("{}", "📊 Applicable Pivots:".bold().cyan());
        for aggregate in &aggregates {
            println!(
                "   {} ({} groups)",
                aggregate.label.bright_blue(),
                aggregate.table.row_count()
            );
        }
    }

    println!();
    println!("{}", "✅ CSV loaded successfully".bold().green());
    Ok(())
}

/// Execute the generate command - run the full pipeline and write the report
pub fn generate(input: PathBuf, output: PathBuf, verbose: bool) -> ReportResult<()> {
    println!("{}", "📊 Reportgen - Generating report".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    generate_once(&input, &output, verbose)?;

    println!("{}", "✅ Report Complete!".bold().green());
    println!("   Excel file: {}\n", output.display());
    Ok(())
}

/// Load, aggregate, summarize and export. Shared by generate and watch.
fn generate_once(input: &Path, output: &Path, verbose: bool) -> ReportResult<()> {
    if verbose {
        println!("{}", "📖 Loading CSV...".cyan());
    }

    let table = loader::load_csv(input)?;

    if verbose {
        println!(
            "   {} columns, {} rows",
            table.column_count(),
            table.row_count()
        );
    }

    if verbose {
        println!("{}", "🧮 Computing pivots and statistics...".cyan());
    }

    let aggregates = build_aggregates(&table);
    let stats = summarize(&table);

    if verbose {
        for aggregate in &aggregates {
            println!(
                "   📊 {} ({} groups)",
                aggregate.label.bright_blue(),
                aggregate.table.row_count()
            );
        }
        println!("   📐 {} statistic entries", stats.len());
    }

    if verbose {
        println!("{}", "💾 Writing workbook...".cyan());
    }

    let exporter = ReportExporter::new(table, aggregates, stats);
    exporter.export(output)?;

    Ok(())
}

/// Execute the stats command - print the summary statistics
pub fn stats(file: PathBuf, json: bool) -> ReportResult<()> {
    let table = loader::load_csv(&file)?;
    let stats = summarize(&table);

    if json {
        let entries: Vec<&SummaryStat> = stats
            .iter()
            .filter(|s| !matches!(s, SummaryStat::Separator))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("{}", "📈 Reportgen - Summary Statistics".bold().green());
    println!("   File: {}\n", file.display());

    for stat in &stats {
        match stat {
            SummaryStat::Count { label, value } => {
                println!("   {}: {}", label.bright_blue(), value.to_string().bold());
            }
            SummaryStat::Metric { label, value } => {
                println!(
                    "   {}: {}",
                    label.bright_blue(),
                    format_number(*value).bold()
                );
            }
            SummaryStat::Separator => println!(),
        }
    }

    Ok(())
}

/// Execute the sample command - write the bundled demo dataset
pub fn sample(path: PathBuf) -> ReportResult<()> {
    fs::write(&path, SAMPLE_CSV)?;

    println!("{}", "✅ Sample data written".bold().green());
    println!("   File: {}", path.display());
    println!(
        "   Try: {}",
        format!("reportgen generate {} report.xlsx", path.display()).cyan()
    );
    Ok(())
}

/// Execute the watch command - regenerate the report whenever the CSV changes
pub fn watch(input: PathBuf, output: PathBuf, verbose: bool) -> ReportResult<()> {
    println!("{}", "👁️  Reportgen - Watch Mode".bold().green());
    println!("   Watching: {}", input.display());
    println!("   Report:   {}", output.display());
    println!("   Press {} to stop\n", "Ctrl+C".bold().yellow());

    if !input.exists() {
        return Err(ReportError::Load(format!(
            "File not found: {}",
            input.display()
        )));
    }

    // Get canonical path and parent directory
    let canonical_path = input.canonicalize().map_err(ReportError::Io)?;
    let parent_dir = canonical_path
        .parent()
        .ok_or_else(|| ReportError::Load("Cannot determine parent directory".to_string()))?;

    // Create channel for file system events
    let (tx, rx) = channel();

    // Create a debouncer to avoid rapid-fire events during file saves
    let mut debouncer = new_debouncer(Duration::from_millis(200), tx)
        .map_err(|e| ReportError::Load(format!("Failed to create file watcher: {}", e)))?;

    // Watch the parent directory (editors replace files rather than rewrite them)
    debouncer
        .watcher()
        .watch(parent_dir, RecursiveMode::NonRecursive)
        .map_err(|e| ReportError::Load(format!("Failed to watch directory: {}", e)))?;

    if verbose {
        println!(
            "   {} {}",
            "Watching directory:".cyan(),
            parent_dir.display()
        );
    }

    // Run initial generation
    println!("{}", "🔄 Initial run...".cyan());
    run_watch_generate(&input, &output, verbose);
    println!();

    // Watch loop
    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|event| {
                    if event.kind != DebouncedEventKind::Any {
                        return false;
                    }
                    if let Ok(event_canonical) = event.path.canonicalize() {
                        if event_canonical == canonical_path {
                            return true;
                        }
                    }
                    if let Some(filename) = event.path.file_name() {
                        if let Some(our_filename) = canonical_path.file_name() {
                            if filename == our_filename {
                                return true;
                            }
                        }
                    }
                    false
                });

                if relevant {
                    println!("{}", "🔄 Change detected, regenerating...".cyan());
                    run_watch_generate(&input, &output, verbose);
                    println!();
                }
            }
            Ok(Err(e)) => {
                println!("{}", format!("⚠️  Watch error: {:?}", e).yellow());
            }
            Err(_) => {
                // Channel closed, stop watching
                break;
            }
        }
    }

    Ok(())
}

/// One watch-triggered regeneration. Failures are reported, not fatal; the
/// watcher keeps running so the user can fix the CSV and save again.
fn run_watch_generate(input: &Path, output: &Path, verbose: bool) {
    match generate_once(input, output, verbose) {
        Ok(()) => {
            println!("{}", "✅ Report regenerated".bold().green());
        }
        Err(e) => {
            println!("{}", format!("❌ Generation failed: {}", e).bold().red());
        }
    }
}
