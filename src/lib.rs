// src/lib.rs
pub mod types;
pub mod error;
pub mod compression;
pub mod report;
pub mod domain_stats;
pub mod calls;

use std::io::Write;
use std::path::Path;

use crate::calls::{plan_calls, CallTemplate};
use crate::domain_stats::{build_summary_row, header_line};
use crate::error::{Error, Result};
use crate::report::parse_kraken_report;
use crate::types::SummaryRow;

/// Last component of `path` as typed; empty if it ends in a separator.
pub fn report_file_name<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .to_string_lossy()
        .rsplit(std::path::is_separator)
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Parse one kraken report and turn it into its overview row.
pub fn summarize_report_file<P: AsRef<Path>>(path: P) -> Result<SummaryRow> {
    let path = path.as_ref();
    let summary = parse_kraken_report(path)?;
    Ok(build_summary_row(&report_file_name(path), &summary))
}

/// Write the domain overview of `reports` to `out`: a header, then one row
/// per report in the given order. `out_label` names `out` in errors and
/// `on_report` is called after each report has been written.
pub fn aggregate_reports<P, W, F>(
    reports: &[P],
    out: &mut W,
    out_label: &Path,
    mut on_report: F,
) -> Result<()>
where
    P: AsRef<Path>,
    W: Write,
    F: FnMut(&Path),
{
    let write_err = |e: std::io::Error| Error::io(out_label, e);

    out.write_all(header_line().as_bytes()).map_err(write_err)?;
    for path in reports {
        let path = path.as_ref();
        let row = summarize_report_file(path)?;
        out.write_all(row.to_line().as_bytes()).map_err(write_err)?;
        on_report(path);
    }
    out.flush().map_err(write_err)?;

    log::info!("Wrote overview of {} report(s) to {}", reports.len(), out_label.display());
    Ok(())
}

/// Print one kraken command per read file of `input_dir` to `out`, after
/// telling `diag` how many files were found. Returns that number.
pub fn generate_kraken_calls<W: Write, E: Write>(
    db: &str,
    input_dir: &str,
    output_dir: &str,
    template: &CallTemplate,
    out: &mut W,
    diag: &mut E,
) -> Result<usize> {
    let calls = plan_calls(input_dir, output_dir, template);

    writeln!(diag, "{} files found to process.", calls.len())
        .map_err(|e| Error::io("stderr", e))?;

    for call in &calls {
        log::debug!("kraken call for {}", call.input.display());
        out.write_all(call.to_command_line(template, db).as_bytes())
            .map_err(|e| Error::io("stdout", e))?;
    }
    out.flush().map_err(|e| Error::io("stdout", e))?;
    Ok(calls.len())
}
