use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use kraken_overview::compression::OutputTarget;
use kraken_overview::error::{Error, Result};
use kraken_overview::{aggregate_reports, report_file_name};

/// Summarise kraken reports as read counts and percentages for Bacteria,
/// Archaea, Viruses and unclassified reads, one row per report.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// kraken-report output file(s), read as gzip when ending in .gz
    #[arg(value_name = "FILE", required = true)]
    reports: Vec<PathBuf>,

    /// Out-file; `-` or `stdout` for standard output, gzip when ending in .gz [default: stdout]
    #[arg(short = 'o', long = "out", value_name = "STRING")]
    out: Option<String>,
}

fn main() {
    if std::env::args_os().len() == 1 {
        let _ = Args::command().print_help();
        process::exit(1);
    }
    let args = Args::parse();
    env_logger::init();

    if let Err(e) = run(&args) {
        if e.is_broken_pipe() {
            return;
        }
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let target = OutputTarget::from_arg(args.out.as_deref());
    let mut sink = target.open()?;

    let progress = ProgressBar::new(args.reports.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .expect("Invalid progress template"),
    );

    aggregate_reports(args.reports.as_slice(), &mut sink, target.label(), |path| {
        progress.set_message(report_file_name(path));
        progress.inc(1);
    })?;

    sink.finish().map_err(|e| Error::io(target.label(), e))?;
    progress.finish_and_clear();
    Ok(())
}
