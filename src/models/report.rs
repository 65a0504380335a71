use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::UploadKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    MissingField,
    InvalidNumber,
    InvalidDate,
    InvalidCoordinate,
}

impl GapKind {
    pub fn label(&self) -> &'static str {
        match self {
            GapKind::MissingField => "missing field",
            GapKind::InvalidNumber => "invalid number",
            GapKind::InvalidDate => "invalid date",
            GapKind::InvalidCoordinate => "invalid coordinate",
        }
    }
}

/// One row that was excluded (or kept with a missing value) during normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoercionGap {
    /// 1-based data row, not counting the header.
    pub row: usize,
    pub column: String,
    pub raw: String,
    pub kind: GapKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub upload: UploadKind,
    pub rows_read: usize,
    pub rows_kept: usize,
    pub gaps: Vec<CoercionGap>,
}

impl IngestReport {
    pub fn new(upload: UploadKind) -> Self {
        Self {
            upload,
            rows_read: 0,
            rows_kept: 0,
            gaps: Vec::new(),
        }
    }

    pub fn record_gap(
        &mut self,
        row: usize,
        column: &str,
        raw: &str,
        kind: GapKind,
    ) {
        self.gaps.push(CoercionGap {
            row,
            column: column.to_string(),
            raw: raw.to_string(),
            kind,
        });
    }

    pub fn rows_dropped(&self) -> usize {
        self.rows_read - self.rows_kept
    }

    pub fn gap_counts(&self) -> BTreeMap<GapKind, usize> {
        let mut counts = BTreeMap::new();
        for gap in &self.gaps {
            *counts.entry(gap.kind).or_insert(0) += 1;
        }
        counts
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str(&format!("=== {} upload ===\n", self.upload));
        summary.push_str(&format!("Rows Read: {}\n", self.rows_read));
        summary.push_str(&format!("Rows Kept: {}\n", self.rows_kept));
        summary.push_str(&format!("Rows Dropped: {}\n", self.rows_dropped()));

        if !self.gaps.is_empty() {
            summary.push_str("\nCoercion Gaps:\n");
            for (kind, count) in self.gap_counts() {
                summary.push_str(&format!("  {}: {}\n", kind.label(), count));
            }

            summary.push_str("\nFirst 10 Gaps:\n");
            for gap in self.gaps.iter().take(10) {
                summary.push_str(&format!(
                    "  row {} [{}] {} '{}'\n",
                    gap.row,
                    gap.column,
                    gap.kind.label(),
                    gap.raw
                ));
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = IngestReport::new(UploadKind::Results);
        report.rows_read = 4;
        report.rows_kept = 2;
        report.record_gap(3, "ResultMeasureValue", "bad", GapKind::InvalidNumber);
        report.record_gap(4, "CharacteristicName", "", GapKind::MissingField);

        assert_eq!(report.rows_dropped(), 2);
        let counts = report.gap_counts();
        assert_eq!(counts[&GapKind::InvalidNumber], 1);
        assert_eq!(counts[&GapKind::MissingField], 1);

        let summary = report.summary();
        assert!(summary.contains("=== results upload ==="));
        assert!(summary.contains("row 3 [ResultMeasureValue] invalid number 'bad'"));
    }
}
