//! Best-effort parsing of the listing export into [`VehicleRecord`]s.
//!
//! Rows that cannot be used are dropped, never surfaced as errors. Each drop
//! is counted by reason in a [`ParseReport`] so operators can see how much of
//! the feed was lost and why.

use std::collections::HashSet;
use std::fmt;

use buscacar_core::VehicleRecord;
use serde::Serialize;

use crate::feed::{canonical_link, data_lines, split_fields};
use crate::normalize::{normalize_row, RawRow};
use crate::parse::MileageReading;

/// Number of leading records flagged as featured.
pub const FEATURED_COUNT: usize = 10;

/// Why a feed row was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    TooFewFields,
    DuplicateLink,
    InvalidYear,
    InvalidPrice,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooFewFields => write!(f, "too few fields"),
            SkipReason::DuplicateLink => write!(f, "duplicate listing link"),
            SkipReason::InvalidYear => write!(f, "invalid year"),
            SkipReason::InvalidPrice => write!(f, "invalid price"),
        }
    }
}

/// Row counts for one parse call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    /// Non-blank rows after the header.
    pub rows_seen: usize,
    pub rows_kept: usize,
    pub too_few_fields: usize,
    pub duplicate_link: usize,
    pub invalid_year: usize,
    pub invalid_price: usize,
    /// Kept rows whose mileage was present but unreadable, stored as `0`.
    pub mileage_defaulted: usize,
}

impl ParseReport {
    fn record_skip(&mut self, reason: SkipReason) {
        *self.counter_mut(reason) += 1;
    }

    fn counter_mut(&mut self, reason: SkipReason) -> &mut usize {
        match reason {
            SkipReason::TooFewFields => &mut self.too_few_fields,
            SkipReason::DuplicateLink => &mut self.duplicate_link,
            SkipReason::InvalidYear => &mut self.invalid_year,
            SkipReason::InvalidPrice => &mut self.invalid_price,
        }
    }

    #[must_use]
    pub fn skipped(&self, reason: SkipReason) -> usize {
        match reason {
            SkipReason::TooFewFields => self.too_few_fields,
            SkipReason::DuplicateLink => self.duplicate_link,
            SkipReason::InvalidYear => self.invalid_year,
            SkipReason::InvalidPrice => self.invalid_price,
        }
    }

    #[must_use]
    pub fn total_skipped(&self) -> usize {
        self.too_few_fields + self.duplicate_link + self.invalid_year + self.invalid_price
    }
}

/// Records kept from a feed, in feed order, plus the drop statistics.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub records: Vec<VehicleRecord>,
    pub report: ParseReport,
}

/// Parses raw feed text into deduplicated vehicle records.
///
/// The first non-blank line is a header and is discarded. A row is dropped
/// when it has fewer than eight fields, when its canonical link was already
/// seen earlier in the feed, or when its year or price does not parse. The
/// duplicate check runs before year/price validation, so a rejected row still
/// claims its link.
///
/// Parsing the same text twice yields identical outcomes.
#[must_use]
pub fn parse_feed(raw: &str) -> ParseOutcome {
    let mut records: Vec<VehicleRecord> = Vec::new();
    let mut report = ParseReport::default();
    let mut seen_links: HashSet<String> = HashSet::new();

    for (line_no, line) in data_lines(raw) {
        report.rows_seen += 1;

        let fields = split_fields(line);
        let Some(row) = RawRow::from_fields(&fields) else {
            skip(&mut report, line_no, SkipReason::TooFewFields);
            continue;
        };

        let link = canonical_link(row.link);
        if !seen_links.insert(link.clone()) {
            skip(&mut report, line_no, SkipReason::DuplicateLink);
            continue;
        }

        let featured = records.len() < FEATURED_COUNT;
        match normalize_row(&row, link, featured) {
            Ok(normalized) => {
                if normalized.mileage == MileageReading::Unreadable {
                    tracing::debug!(
                        line = line_no,
                        raw = row.mileage,
                        "unreadable mileage, using 0"
                    );
                    report.mileage_defaulted += 1;
                }
                records.push(normalized.record);
            }
            Err(reason) => skip(&mut report, line_no, reason),
        }
    }

    report.rows_kept = records.len();
    tracing::info!(
        rows_seen = report.rows_seen,
        rows_kept = report.rows_kept,
        too_few_fields = report.too_few_fields,
        duplicate_link = report.duplicate_link,
        invalid_year = report.invalid_year,
        invalid_price = report.invalid_price,
        mileage_defaulted = report.mileage_defaulted,
        "parsed vehicle feed"
    );

    ParseOutcome { records, report }
}

fn skip(report: &mut ParseReport, line_no: usize, reason: SkipReason) {
    tracing::debug!(line = line_no, %reason, "dropping feed row");
    report.record_skip(reason);
}
