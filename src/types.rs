//src/types.rs

use ahash::AHashMap;

/// The domains reported in the overview, in output order.
pub const DOMAINS: [&str; 4] = ["Bacteria", "Archaea", "Viruses", "unclassified"];

/// Name under which unassigned reads are reported.
pub const UNCLASSIFIED: &str = "unclassified";

/// Rank code of domain level rows.
pub const DOMAIN_RANK: &str = "D";

/// The fields of one kraken report row that the overview looks at.
///  pct  reads  taxReads  rank  taxID  taxName
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow<'a> {
    /// Clade read count (field 1), unparsed until the row is used
    pub reads: &'a str,
    /// Rank code (field 3), e.g. `D`
    pub rank: &'a str,
    /// Scientific name as written (field 5), including any indentation
    pub name: &'a str,
}

/// Read counts per domain name for a single report.
///
/// Later rows for the same name replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainSummary {
    counts: AHashMap<String, u64>,
}

impl DomainSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, reads: u64) {
        self.counts.insert(name.to_string(), reads);
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.counts.get(name).copied()
    }

    /// Sum over every entry, not only the fixed domains.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// One line of the overview table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub file_name: String,
    /// Counts for [`DOMAINS`], already rendered
    pub counts: [String; 4],
    /// Percentages for [`DOMAINS`], already rendered
    pub percentages: [String; 4],
}
