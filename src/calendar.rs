// 📅 Calendar Bucketer - monthly totals over the full observed range
// Enumerates every month between the earliest and latest grant, so a
// time-series chart shows zero months instead of silently skipping them.

use crate::record::{GrantMonth, GrantRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// MONTH BUCKET
// ============================================================================

/// Totals for one calendar month. Months without grants appear with zeros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub month: GrantMonth,
    pub total_amount: u64,
    pub grant_count: usize,
}

impl MonthBucket {
    /// Chart x-axis position for this bucket (end-of-month semantics).
    pub fn end_of_month(&self) -> NaiveDate {
        self.month.end_of_month()
    }
}

// ============================================================================
// BUCKETING
// ============================================================================

/// Bucket records into calendar months spanning `[min(month), max(month)]`
/// inclusive, in chronological order.
///
/// The range is enumerated explicitly rather than derived from observed
/// months, so interior months with no grants still get a zero bucket.
/// Empty input yields an empty Vec.
pub fn bucket_by_month(records: &[GrantRecord]) -> Vec<MonthBucket> {
    let (min, max) = match observed_range(records) {
        Some(range) => range,
        None => return Vec::new(),
    };

    let mut totals: HashMap<GrantMonth, (u64, usize)> = HashMap::new();
    for record in records {
        let entry = totals.entry(record.month).or_insert((0, 0));
        entry.0 += record.amount;
        entry.1 += 1;
    }

    GrantMonth::range_inclusive(min, max)
        .into_iter()
        .map(|month| {
            let (total_amount, grant_count) = totals.get(&month).copied().unwrap_or((0, 0));
            MonthBucket {
                month,
                total_amount,
                grant_count,
            }
        })
        .collect()
}

/// Earliest and latest month seen in the records, if any.
pub fn observed_range(records: &[GrantRecord]) -> Option<(GrantMonth, GrantMonth)> {
    let min = records.iter().map(|r| r.month).min()?;
    let max = records.iter().map(|r| r.month).max()?;
    Some((min, max))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn grant(org: &str, amount: u64, year: i32, month: u32) -> GrantRecord {
        GrantRecord {
            grant: format!("{} grant", org),
            organization: org.to_string(),
            focus_area: "Health".to_string(),
            amount,
            month: GrantMonth::new(year, month).unwrap(),
        }
    }

    fn ym(year: i32, month: u32) -> GrantMonth {
        GrantMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_gap_months_get_zero_buckets() {
        // Grants in Jan and Apr only: exactly 4 buckets, Feb/Mar zeroed
        let records = vec![grant("A", 100, 2020, 1), grant("B", 400, 2020, 4)];

        let buckets = bucket_by_month(&records);
        assert_eq!(buckets.len(), 4);

        assert_eq!(buckets[0].month, ym(2020, 1));
        assert_eq!(buckets[0].total_amount, 100);
        assert_eq!(buckets[1].month, ym(2020, 2));
        assert_eq!(buckets[1].total_amount, 0);
        assert_eq!(buckets[1].grant_count, 0);
        assert_eq!(buckets[2].total_amount, 0);
        assert_eq!(buckets[3].month, ym(2020, 4));
        assert_eq!(buckets[3].total_amount, 400);
    }

    #[test]
    fn test_same_month_grants_share_a_bucket() {
        let records = vec![
            grant("A", 100, 2021, 1),
            grant("B", 200, 2021, 1),
            grant("A", 50, 2021, 2),
        ];

        let buckets = bucket_by_month(&records);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].total_amount, 300);
        assert_eq!(buckets[0].grant_count, 2);
        assert_eq!(buckets[1].total_amount, 50);
        assert_eq!(buckets[1].grant_count, 1);
    }

    #[test]
    fn test_single_month_input() {
        let buckets = bucket_by_month(&[grant("A", 100, 2021, 6)]);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].month, ym(2021, 6));
        assert_eq!(buckets[0].grant_count, 1);
    }

    #[test]
    fn test_range_spans_year_boundary() {
        let records = vec![grant("A", 100, 2020, 11), grant("B", 200, 2021, 2)];

        let buckets = bucket_by_month(&records);
        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[1].month, ym(2020, 12));
        assert_eq!(buckets[2].month, ym(2021, 1));
    }

    #[test]
    fn test_empty_input() {
        assert!(bucket_by_month(&[]).is_empty());
        assert!(observed_range(&[]).is_none());
    }

    #[test]
    fn test_bucket_count_matches_calendar_span() {
        let records = vec![grant("A", 1, 2018, 3), grant("B", 1, 2020, 7)];

        let buckets = bucket_by_month(&records);
        assert_eq!(
            buckets.len(),
            GrantMonth::count_inclusive(ym(2018, 3), ym(2020, 7))
        );
        // Chronological order throughout
        for pair in buckets.windows(2) {
            assert!(pair[0].month < pair[1].month);
        }
    }
}
