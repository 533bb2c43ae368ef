//! The retention status engine.
//!
//! Pure date arithmetic: given a document date and a classification code,
//! derive which lifecycle phase a record is in. The same function runs at
//! intake, on every read, and during bulk recalculation, so stored status
//! can always be reproduced from the row itself.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::status::ArchiveStatus;

/// Average Gregorian year length in days. The leap-aware average keeps
/// decade-scale retention math from drifting.
const DAYS_PER_YEAR: f64 = 365.25;

/// Active retention applied when a record has no matching classification
/// rule and no explicit override.
pub const DEFAULT_ACTIVE_YEARS: i64 = 2;

/// One row of the retention schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassificationRule {
    /// First dot-segment of the classification code, e.g. `KU` in `KU.01.03`.
    pub prefix: &'static str,
    /// Archival subject name for the prefix.
    pub name: &'static str,
    /// Years the record stays in regular use.
    pub active_years: i64,
    /// Further years the record is retained for reference.
    pub inactive_years: i64,
}

/// The retention schedule (jadwal retensi arsip).
///
/// Static by design: the schedule changes through regulation, which in
/// practice means a code change followed by a recalculation run, not
/// runtime mutation.
pub const RETENTION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        prefix: "KU",
        name: "Keuangan",
        active_years: 10,
        inactive_years: 5,
    },
    ClassificationRule {
        prefix: "KP",
        name: "Kepegawaian",
        active_years: 10,
        inactive_years: 5,
    },
    ClassificationRule {
        prefix: "PL",
        name: "Perlengkapan dan Logistik",
        active_years: 7,
        inactive_years: 3,
    },
    ClassificationRule {
        prefix: "TK",
        name: "Teknis",
        active_years: 5,
        inactive_years: 2,
    },
    ClassificationRule {
        prefix: "HK",
        name: "Hukum",
        active_years: 5,
        inactive_years: 5,
    },
    ClassificationRule {
        prefix: "HM",
        name: "Hubungan Masyarakat",
        active_years: 2,
        inactive_years: 1,
    },
];

/// Find the schedule row for a classification code.
///
/// The match key is the code's first dot-segment, case-folded, so
/// `KU.01.03`, `ku.2024` and ` KU ` all resolve to the same rule.
pub fn lookup_rule(code: &str) -> Option<&'static ClassificationRule> {
    let prefix = code.trim().split('.').next()?.trim().to_uppercase();

    if prefix.is_empty() {
        return None;
    }
    RETENTION_RULES.iter().find(|rule| rule.prefix == prefix)
}

/// The result of running the engine against one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionAssessment {
    pub status: ArchiveStatus,
    /// Age of the document in years, truncated to one decimal place.
    pub years_elapsed: f64,
    pub active_years: i64,
    pub inactive_years: i64,
    pub total_years: i64,
    /// Subject name of the matched schedule row, if any.
    pub rule_name: Option<String>,
    pub is_active_phase: bool,
    pub is_inactive_phase: bool,
    pub should_dispose: bool,
}

/// Assess a record using the standard fallback for unclassified records.
pub fn assess(
    document_date: Option<NaiveDate>,
    classification_code: Option<&str>,
    as_of: NaiveDate,
) -> RetentionAssessment {
    assess_with_default(document_date, classification_code, DEFAULT_ACTIVE_YEARS, as_of)
}

/// Assess a record, using `fallback_active_years` when no schedule row
/// matches the classification code.
pub fn assess_with_default(
    document_date: Option<NaiveDate>,
    classification_code: Option<&str>,
    fallback_active_years: i64,
    as_of: NaiveDate,
) -> RetentionAssessment {
    let rule = classification_code.and_then(lookup_rule);

    // A record with no known document date cannot age; it is always
    // treated as currently active.
    let Some(document_date) = document_date else {
        return build(ArchiveStatus::Active, 0.0, DEFAULT_ACTIVE_YEARS, 0, rule);
    };

    let (active_years, inactive_years) = match rule {
        Some(rule) => (rule.active_years, rule.inactive_years),
        None => (fallback_active_years.max(0), 0),
    };

    let days = (as_of - document_date).num_days().max(0);
    let years_elapsed = days as f64 / DAYS_PER_YEAR;
    let status = classify(years_elapsed, active_years, inactive_years);

    build(status, years_elapsed, active_years, inactive_years, rule)
}

/// Phase boundaries are inclusive: a record is still active at exactly
/// `active_years` and still inactive at exactly the total. With zero
/// inactive years both boundaries coincide and the record moves straight
/// from active to dispose-eligible.
fn classify(years_elapsed: f64, active_years: i64, inactive_years: i64) -> ArchiveStatus {
    if years_elapsed <= active_years as f64 {
        ArchiveStatus::Active
    } else if years_elapsed <= (active_years + inactive_years) as f64 {
        ArchiveStatus::Inactive
    } else {
        ArchiveStatus::DisposeEligible
    }
}

fn build(
    status: ArchiveStatus,
    years_elapsed: f64,
    active_years: i64,
    inactive_years: i64,
    rule: Option<&'static ClassificationRule>,
) -> RetentionAssessment {
    RetentionAssessment {
        status,
        years_elapsed: truncate_tenths(years_elapsed),
        active_years,
        inactive_years,
        total_years: active_years + inactive_years,
        rule_name: rule.map(|rule| rule.name.to_string()),
        is_active_phase: status == ArchiveStatus::Active,
        is_inactive_phase: status == ArchiveStatus::Inactive,
        should_dispose: status == ArchiveStatus::DisposeEligible,
    }
}

// Reported ages are truncated, not rounded: 2.99 years reads as 2.9 and
// never claims a boundary the raw value has not crossed. Classification
// always uses the untruncated value.
fn truncate_tenths(years: f64) -> f64 {
    (years * 10.0).trunc() / 10.0
}
