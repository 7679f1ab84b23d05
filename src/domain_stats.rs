// src/domain_stats.rs

use std::fmt::Write as _;

use crate::types::{DomainSummary, SummaryRow, DOMAINS};

/// Header of the overview table: the domains, then `<domain>(pct)` for each.
pub fn header_line() -> String {
    let mut header = String::from("File");
    for domain in DOMAINS {
        header.push('\t');
        header.push_str(domain);
    }
    for domain in DOMAINS {
        let _ = write!(header, "\t{domain}(pct)");
    }
    header.push('\n');
    header
}

/// Render a float the way the reference tables were written: shortest
/// round-trip digits, always with a fractional part, and scientific notation
/// with a signed two digit exponent outside `1e-4 <= |x| < 1e16`.
pub fn float_repr(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        let inf = if x > 0.0 { "inf" } else { "-inf" };
        return inf.to_string();
    }
    if x == 0.0 {
        let zero = if x.is_sign_negative() { "-0.0" } else { "0.0" };
        return zero.to_string();
    }

    let sci = format!("{x:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if (-4..16).contains(&exp) {
        let fixed = format!("{x}");
        if fixed.contains('.') {
            fixed
        } else {
            fixed + ".0"
        }
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.abs())
    }
}

/// Share of `count` in `total`, in percent. `0.0` for an empty report.
pub fn format_percentage(count: u64, total: u64) -> String {
    if total > 0 {
        float_repr(count as f64 * 100.0 / total as f64)
    } else {
        "0.0".to_string()
    }
}

/// Build the overview row for one report.
///
/// Domains missing from the summary are `0` in both groups. Percentages are
/// taken against every count in the summary, so domains outside [`DOMAINS`]
/// still lower the shares of the listed ones.
pub fn build_summary_row(file_name: &str, summary: &DomainSummary) -> SummaryRow {
    let total = summary.total();

    let counts = DOMAINS.map(|domain| match summary.get(domain) {
        Some(reads) => reads.to_string(),
        None => "0".to_string(),
    });
    let percentages = DOMAINS.map(|domain| match summary.get(domain) {
        Some(reads) => format_percentage(reads, total),
        None => "0".to_string(),
    });

    SummaryRow {
        file_name: file_name.to_string(),
        counts,
        percentages,
    }
}

impl SummaryRow {
    /// Tab separated line: name, four counts, four percentages.
    pub fn to_line(&self) -> String {
        let mut line = self.file_name.clone();
        for field in self.counts.iter().chain(self.percentages.iter()) {
            line.push('\t');
            line.push_str(field);
        }
        line.push('\n');
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(entries: &[(&str, u64)]) -> DomainSummary {
        let mut s = DomainSummary::new();
        for (name, reads) in entries {
            s.set(name, *reads);
        }
        s
    }

    #[test]
    fn test_header_line() {
        assert_eq!(
            header_line(),
            "File\tBacteria\tArchaea\tViruses\tunclassified\t\
             Bacteria(pct)\tArchaea(pct)\tViruses(pct)\tunclassified(pct)\n"
        );
    }

    #[test]
    fn test_bacteria_and_unclassified_row() {
        let row = build_summary_row("name", &summary(&[("unclassified", 2000), ("Bacteria", 5000)]));
        assert_eq!(
            row.to_line(),
            "name\t5000\t0\t0\t2000\t71.42857142857143\t0\t0\t28.571428571428573\n"
        );
    }

    #[test]
    fn test_empty_summary_row() {
        let row = build_summary_row("empty.report", &DomainSummary::new());
        assert_eq!(row.counts, ["0", "0", "0", "0"]);
        assert_eq!(row.percentages, ["0", "0", "0", "0"]);
    }

    #[test]
    fn test_zero_total_with_present_domains() {
        let row = build_summary_row("zero", &summary(&[("Bacteria", 0), ("Archaea", 0), ("Viruses", 0), ("unclassified", 0)]));
        assert_eq!(row.counts, ["0", "0", "0", "0"]);
        assert_eq!(row.percentages, ["0.0", "0.0", "0.0", "0.0"]);
    }

    #[test]
    fn test_percentages_sum_to_100_when_domains_cover_total() {
        let row = build_summary_row(
            "all",
            &summary(&[("Bacteria", 3), ("Archaea", 7), ("Viruses", 11), ("unclassified", 13)]),
        );
        let sum: f64 = row.percentages.iter().map(|p| p.parse::<f64>().unwrap()).sum();
        assert!((sum - 100.0).abs() < 1e-9, "sum was {sum}");
    }

    #[test]
    fn test_other_domains_count_towards_total() {
        let row = build_summary_row(
            "euk",
            &summary(&[("Bacteria", 50), ("Eukaryota", 50)]),
        );
        assert_eq!(row.counts, ["50", "0", "0", "0"]);
        assert_eq!(row.percentages, ["50.0", "0", "0", "0"]);
        let sum: f64 = row.percentages.iter().map(|p| p.parse::<f64>().unwrap()).sum();
        assert!(sum < 100.0);
    }

    #[test]
    fn test_full_share_keeps_fraction() {
        assert_eq!(format_percentage(9, 9), "100.0");
        assert_eq!(format_percentage(1, 4), "25.0");
        assert_eq!(format_percentage(1, 3), "33.333333333333336");
        assert_eq!(format_percentage(5, 0), "0.0");
    }

    #[test]
    fn test_float_repr_small_and_large() {
        assert_eq!(float_repr(0.0), "0.0");
        assert_eq!(float_repr(0.0001), "0.0001");
        assert_eq!(float_repr(0.00001), "1e-05");
        assert_eq!(float_repr(1.5e-7), "1.5e-07");
        assert_eq!(float_repr(1e16), "1e+16");
        assert_eq!(float_repr(1234.5), "1234.5");
        // 1 read in 10 million
        assert_eq!(format_percentage(1, 10_000_000), "1e-05");
    }
}
