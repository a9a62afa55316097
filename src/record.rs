// 🗓️ Core Record Types - raw rows, canonical grants, month arithmetic
// GrantMonth is the calendar unit everything downstream buckets on

use chrono::{Month, NaiveDate};
use serde::{Deserialize, Serialize};

// ============================================================================
// GRANT MONTH
// ============================================================================

/// Calendar month/year value, the date granularity of every grant record.
///
/// Field order gives the derived `Ord` chronological meaning: years compare
/// first, then months. Invariant: `month` is in `1..=12` (upheld by `new`
/// and the parse functions).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GrantMonth {
    pub year: i32,
    pub month: u32,
}

impl GrantMonth {
    /// Create a month value, rejecting out-of-range month numbers.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(GrantMonth { year, month })
        } else {
            None
        }
    }

    /// Parse from either textual form the snapshot uses:
    /// - "January 2021" (full or abbreviated English month name)
    /// - "01/2021"
    ///
    /// Returns `None` when neither format matches.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();

        // "Month YYYY"
        if let Some((name, year)) = text.split_once(char::is_whitespace) {
            if let (Ok(month), Ok(year)) = (name.parse::<Month>(), year.trim().parse::<i32>()) {
                return GrantMonth::new(year, month.number_from_month());
            }
        }

        // "MM/YYYY"
        if let Some((month, year)) = text.split_once('/') {
            if let (Ok(month), Ok(year)) = (month.trim().parse::<u32>(), year.trim().parse::<i32>())
            {
                return GrantMonth::new(year, month);
            }
        }

        None
    }

    /// The month immediately after this one.
    pub fn succ(self) -> GrantMonth {
        if self.month == 12 {
            GrantMonth {
                year: self.year + 1,
                month: 1,
            }
        } else {
            GrantMonth {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Number of calendar months in `[start, end]` inclusive.
    /// Zero when `start > end`.
    pub fn count_inclusive(start: GrantMonth, end: GrantMonth) -> usize {
        if start > end {
            return 0;
        }
        let span = (end.year - start.year) * 12 + end.month as i32 - start.month as i32 + 1;
        span as usize
    }

    /// Every month in `[start, end]` inclusive, in chronological order.
    pub fn range_inclusive(start: GrantMonth, end: GrantMonth) -> Vec<GrantMonth> {
        let mut months = Vec::with_capacity(GrantMonth::count_inclusive(start, end));
        let mut current = start;
        while current <= end {
            months.push(current);
            current = current.succ();
        }
        months
    }

    /// First calendar day of the month.
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("valid month")
    }

    /// Last calendar day of the month. Charts plot monthly values on this
    /// date (end-of-month semantics).
    pub fn end_of_month(self) -> NaiveDate {
        self.succ().first_day().pred_opt().expect("valid date")
    }

    fn name(self) -> &'static str {
        match self.month {
            1 => "January",
            2 => "February",
            3 => "March",
            4 => "April",
            5 => "May",
            6 => "June",
            7 => "July",
            8 => "August",
            9 => "September",
            10 => "October",
            11 => "November",
            12 => "December",
            _ => "Invalid",
        }
    }
}

impl std::fmt::Display for GrantMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}

// ============================================================================
// RAW ROW
// ============================================================================

/// One row as read from the CSV snapshot, string-typed, field names bound to
/// the upstream header columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawGrantRow {
    #[serde(rename = "Grant")]
    pub grant: String,

    #[serde(rename = "Organization Name")]
    pub organization: String,

    #[serde(rename = "Focus Area")]
    pub focus_area: String,

    /// Either a raw integer ("1234") or currency-formatted ("$1,234").
    /// Empty cells deserialize to `None`.
    #[serde(rename = "Amount")]
    pub amount: Option<String>,

    /// "Month YYYY" or "MM/YYYY" depending on the snapshot variant.
    #[serde(rename = "Date")]
    pub date: String,
}

// ============================================================================
// CANONICAL RECORD
// ============================================================================

/// One donation event after normalization.
///
/// Invariants: `amount` is a non-negative integer number of dollars,
/// `organization` and `focus_area` are in canonical form, `month` parsed
/// successfully from the raw date text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantRecord {
    pub grant: String,
    pub organization: String,
    pub focus_area: String,
    pub amount: u64,
    pub month: GrantMonth,
}

// ============================================================================
// TESTS
// ============================================================================
