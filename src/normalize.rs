// 🧹 Normalization Engine - raw scraped rows → canonical grant records
// Amount cleaning, organization aliasing, focus-area canonicalization,
// date parsing. Row failures are collected, never fatal to the batch.

use crate::record::{GrantMonth, GrantRecord, RawGrantRow};
use serde::{Deserialize, Serialize};

// ============================================================================
// AMOUNT POLICY
// ============================================================================

/// What to do with a row whose amount is missing or unparseable.
///
/// `Drop` is the default: a grant with no usable amount is excluded from the
/// normalized set and reported in the batch rejections. `ZeroFill` keeps the
/// row with an amount of 0 instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountPolicy {
    Drop,
    ZeroFill,
}

impl Default for AmountPolicy {
    fn default() -> Self {
        AmountPolicy::Drop
    }
}

// ============================================================================
// ROW ERRORS
// ============================================================================

/// Why a single row was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Amount cell was empty (under `AmountPolicy::Drop`).
    MissingAmount,

    /// Amount cell held something that is not a non-negative integer.
    BadAmount(String),

    /// Date cell matched neither "Month YYYY" nor "MM/YYYY".
    BadDate(String),

    /// The CSV layer could not decode the row at all.
    MalformedRow(String),
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::MissingAmount => write!(f, "amount is missing"),
            RejectReason::BadAmount(raw) => write!(f, "unparseable amount: {:?}", raw),
            RejectReason::BadDate(raw) => write!(f, "unparseable date: {:?}", raw),
            RejectReason::MalformedRow(msg) => write!(f, "malformed row: {}", msg),
        }
    }
}

/// A rejected row: where it was and why it was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// 1-based CSV line number, counting the header as line 1.
    pub line: usize,

    /// Grant name, if the row decoded far enough to have one.
    pub grant: String,

    pub reason: RejectReason,
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.grant.is_empty() {
            write!(f, "line {}: {}", self.line, self.reason)
        } else {
            write!(f, "line {} ({}): {}", self.line, self.grant, self.reason)
        }
    }
}

impl std::error::Error for RowError {}

// ============================================================================
// NORMALIZED BATCH
// ============================================================================

/// Normalizer output: the records that survived plus every rejection,
/// so callers can surface a diagnostic count.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub records: Vec<GrantRecord>,
    pub rejected: Vec<RowError>,
}

impl NormalizedBatch {
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    /// True when nothing usable came out of the batch.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// NORMALIZATION ENGINE
// ============================================================================

/// Known historical misspellings/renamings, mapped to canonical names.
const ORG_ALIASES: [(&str, &str); 2] = [
    ("Hellen Keller International", "Helen Keller International"),
    (
        "Alliance for Safety and Justice",
        "Alliance for Safety and Justice Action Fund",
    ),
];

pub struct NormalizationEngine {
    /// How to treat rows with missing or unparseable amounts.
    pub amount_policy: AmountPolicy,
}

impl NormalizationEngine {
    pub fn new() -> Self {
        NormalizationEngine {
            amount_policy: AmountPolicy::default(),
        }
    }

    pub fn with_policy(amount_policy: AmountPolicy) -> Self {
        NormalizationEngine { amount_policy }
    }

    /// Normalize a batch of raw rows. Line numbers in rejections assume the
    /// slice starts at CSV line 2 (line 1 being the header).
    pub fn normalize_batch(&self, rows: &[RawGrantRow]) -> NormalizedBatch {
        let mut batch = NormalizedBatch::default();

        for (i, row) in rows.iter().enumerate() {
            match self.normalize_row(row, i + 2) {
                Ok(record) => batch.records.push(record),
                Err(err) => batch.rejected.push(err),
            }
        }

        batch
    }

    /// Normalize one row. `line` is the CSV line number used in rejections.
    pub fn normalize_row(&self, row: &RawGrantRow, line: usize) -> Result<GrantRecord, RowError> {
        let grant = row.grant.trim().to_string();

        let reject = |reason| RowError {
            line,
            grant: grant.clone(),
            reason,
        };

        let month = GrantMonth::parse(&row.date)
            .ok_or_else(|| reject(RejectReason::BadDate(row.date.trim().to_string())))?;

        let amount = match row.amount.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => match parse_amount(raw) {
                Some(amount) => amount,
                None => match self.amount_policy {
                    AmountPolicy::ZeroFill => 0,
                    AmountPolicy::Drop => {
                        return Err(reject(RejectReason::BadAmount(raw.to_string())))
                    }
                },
            },
            None => match self.amount_policy {
                AmountPolicy::ZeroFill => 0,
                AmountPolicy::Drop => return Err(reject(RejectReason::MissingAmount)),
            },
        };

        Ok(GrantRecord {
            grant,
            organization: canonical_organization(&row.organization),
            focus_area: canonical_focus_area(&row.focus_area),
            amount,
            month,
        })
    }
}

impl Default for NormalizationEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// FIELD CLEANERS
// ============================================================================

/// Parse a snapshot amount cell into whole dollars.
///
/// Accepts "1234" and "$1,234". Anything negative, fractional, or
/// non-numeric is `None`.
pub fn parse_amount(raw: &str) -> Option<u64> {
    let cleaned = raw.trim();
    let cleaned = cleaned.strip_prefix('$').unwrap_or(cleaned);
    let cleaned: String = cleaned.chars().filter(|c| *c != ',').collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<u64>().ok()
}

/// Trim and map known historical name variants to their canonical form.
pub fn canonical_organization(name: &str) -> String {
    let name = name.trim();

    for (alias, canonical) in ORG_ALIASES {
        if name == alias {
            return canonical.to_string();
        }
    }

    name.to_string()
}

/// Trim and shorten the standing abbreviation: any occurrence of
/// "Artificial Intelligence" becomes "AI".
pub fn canonical_focus_area(area: &str) -> String {
    area.trim().replace("Artificial Intelligence", "AI")
}

// ============================================================================
// TESTS
// ============================================================================
