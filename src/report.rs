//src/report.rs

use std::io::BufRead;
use std::path::Path;

use crate::compression::open_text_reader;
use crate::error::{Error, Result};
use crate::types::{DomainSummary, ReportRow, DOMAIN_RANK, UNCLASSIFIED};

/// Minimum number of tab-separated fields in a report row.
pub const MIN_FIELDS: usize = 6;

/// Splits one report line in the format:
/// ```text
/// <pct>\t<reads>\t<taxReads>\t<rank>\t<taxid>\t<taxname>[\t...]
/// ```
/// Returns the reason as `Err` when the line has fewer than six fields.
pub fn parse_report_line(line: &str) -> std::result::Result<ReportRow<'_>, String> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() < MIN_FIELDS {
        return Err(format!(
            "expected at least {MIN_FIELDS} tab-separated fields, found {}",
            parts.len()
        ));
    }
    Ok(ReportRow {
        reads: parts[1],
        rank: parts[3],
        name: parts[5],
    })
}

fn read_count(row: &ReportRow<'_>) -> std::result::Result<u64, String> {
    row.reads
        .trim()
        .parse()
        .map_err(|e| format!("read count {:?} is not a non-negative integer: {e}", row.reads))
}

/// Build the domain summary of a report read from `reader`.
///
/// `path` only labels errors. Rows named `unclassified` set the unclassified
/// count whatever their rank; domain rows (`D`) are keyed by their trimmed
/// name. A repeated name keeps the last count seen.
pub fn summarize_reader<R: BufRead, P: AsRef<Path>>(reader: R, path: P) -> Result<DomainSummary> {
    let path = path.as_ref();
    let mut summary = DomainSummary::new();

    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(|e| Error::io(path, e))?;
        let malformed = |reason: String| Error::MalformedRecord {
            path: path.to_path_buf(),
            line: idx + 1,
            reason,
        };

        let row = parse_report_line(&line).map_err(malformed)?;

        if row.name == UNCLASSIFIED {
            summary.set(UNCLASSIFIED, read_count(&row).map_err(malformed)?);
        }
        if row.rank == DOMAIN_RANK {
            summary.set(row.name.trim(), read_count(&row).map_err(malformed)?);
        }
    }
    Ok(summary)
}

/// Parse the kraken report at `path` (gzip when it ends in `.gz`).
pub fn parse_kraken_report<P: AsRef<Path>>(path: P) -> Result<DomainSummary> {
    let path = path.as_ref();
    let reader = open_text_reader(path)?;
    let summary = summarize_reader(reader, path)?;
    log::debug!(
        "{}: {} domain entries, {} reads",
        path.display(),
        summary.len(),
        summary.total()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn summarize(text: &str) -> Result<DomainSummary> {
        summarize_reader(Cursor::new(text), "test.report")
    }

    const REPORT: &str = "\
 28.57\t2000\t2000\tU\t0\tunclassified
 71.43\t5000\t0\t-\t1\troot
 71.43\t5000\t0\t-\t131567\t  cellular organisms
 71.43\t5000\t0\tD\t2\t    Bacteria
 40.00\t2800\t10\tP\t1224\t      Proteobacteria
";

    #[test]
    fn test_domain_and_unclassified_rows() {
        let summary = summarize(REPORT).unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary.get("Bacteria"), Some(5000));
        assert_eq!(summary.get("unclassified"), Some(2000));
        assert_eq!(summary.get("root"), None);
        assert_eq!(summary.total(), 7000);
    }

    #[test]
    fn test_unclassified_ignores_rank_code() {
        let summary = summarize("1.0\t42\t42\tS\t0\tunclassified\n").unwrap();
        assert_eq!(summary.get("unclassified"), Some(42));
    }

    #[test]
    fn test_last_domain_row_wins() {
        let text = "1\t10\t0\tD\t2\tBacteria\n1\t30\t0\tD\t2\t  Bacteria\n";
        let summary = summarize(text).unwrap();
        assert_eq!(summary.get("Bacteria"), Some(30));
        assert_eq!(summary.total(), 30);
    }

    #[test]
    fn test_unmatched_rows_are_not_parsed() {
        let text = "%\treads\ttaxReads\tkmers\tdup\tcov\ttaxID\trank\ttaxName\n\
                    1\t7\t0\tD\t10239\tViruses\n";
        let summary = summarize(text).unwrap();
        assert_eq!(summary.get("Viruses"), Some(7));
        assert_eq!(summary.len(), 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let summary = summarize("1\t3\t3\tU\t0\tunclassified\r\n").unwrap();
        assert_eq!(summary.get("unclassified"), Some(3));
    }

    #[test]
    fn test_short_row_is_fatal() {
        let text = "1\t3\t3\tU\t0\tunclassified\n1\t4\t4\tD\t2\n";
        match summarize(text) {
            Err(Error::MalformedRecord { line, reason, .. }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("found 5"), "{reason}");
            }
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_line_is_fatal() {
        let text = "1\t3\t3\tU\t0\tunclassified\n\n";
        assert!(matches!(
            summarize(text),
            Err(Error::MalformedRecord { line: 2, .. })
        ));
    }

    #[test]
    fn test_non_numeric_count_is_fatal() {
        let text = "1\tmany\t0\tD\t2\tArchaea\n";
        assert!(matches!(
            summarize(text),
            Err(Error::MalformedRecord { line: 1, .. })
        ));
    }

    #[test]
    fn test_empty_report() {
        let summary = summarize("").unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_parse_gzipped_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.report.gz");
        let file = std::fs::File::create(&path).unwrap();
        let mut enc = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        enc.write_all(REPORT.as_bytes()).unwrap();
        enc.finish().unwrap();

        let summary = parse_kraken_report(&path).unwrap();
        assert_eq!(summary.get("Bacteria"), Some(5000));
        assert_eq!(summary.get("unclassified"), Some(2000));
    }
}
