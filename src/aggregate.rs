// 📊 Aggregation - per-organization and per-focus-area totals
// Grouping is exact-string over canonical keys; result order is the
// first-seen order of each key, which doubles as the tie-break order.

use crate::record::GrantRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// GROUP KEY
// ============================================================================

/// Which canonical field to group grants by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupKey {
    Organization,
    FocusArea,
}

impl GroupKey {
    /// Human-readable name for display
    pub fn name(&self) -> &str {
        match self {
            GroupKey::Organization => "Organization",
            GroupKey::FocusArea => "Focus Area",
        }
    }

    fn field<'a>(&self, record: &'a GrantRecord) -> &'a str {
        match self {
            GroupKey::Organization => &record.organization,
            GroupKey::FocusArea => &record.focus_area,
        }
    }
}

// ============================================================================
// AGGREGATE
// ============================================================================

/// Totals for one grouping key. `key` is always the full canonical string;
/// shortening for chart axes happens at display time only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyAggregate {
    pub key: String,
    pub total_amount: u64,
    pub grant_count: usize,
}

/// Sort direction for display ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

// ============================================================================
// OPERATIONS
// ============================================================================

/// Group records by `key`, summing amounts and counting grants per group.
///
/// The output is in first-seen key order. Totals and counts do not depend on
/// input order; only the ordering of the output does.
pub fn aggregate_by(records: &[GrantRecord], key: GroupKey) -> Vec<KeyAggregate> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut aggregates: Vec<KeyAggregate> = Vec::new();

    for record in records {
        let field = key.field(record);
        let slot = match index.get(field) {
            Some(&slot) => slot,
            None => {
                index.insert(field, aggregates.len());
                aggregates.push(KeyAggregate {
                    key: field.to_string(),
                    total_amount: 0,
                    grant_count: 0,
                });
                aggregates.len() - 1
            }
        };

        aggregates[slot].total_amount += record.amount;
        aggregates[slot].grant_count += 1;
    }

    aggregates
}

/// Sort aggregates by total for display. The sort is stable, so groups with
/// equal totals keep their first-seen relative order.
pub fn sort_by_total(aggregates: &mut [KeyAggregate], order: SortOrder) {
    match order {
        SortOrder::Ascending => aggregates.sort_by_key(|a| a.total_amount),
        SortOrder::Descending => {
            aggregates.sort_by_key(|a| std::cmp::Reverse(a.total_amount))
        }
    }
}

/// The `n` largest groups by total, descending.
pub fn top_n(mut aggregates: Vec<KeyAggregate>, n: usize) -> Vec<KeyAggregate> {
    sort_by_total(&mut aggregates, SortOrder::Descending);
    aggregates.truncate(n);
    aggregates
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::GrantMonth;

    fn grant(org: &str, area: &str, amount: u64, year: i32, month: u32) -> GrantRecord {
        GrantRecord {
            grant: format!("{} grant", org),
            organization: org.to_string(),
            focus_area: area.to_string(),
            amount,
            month: GrantMonth::new(year, month).unwrap(),
        }
    }

    #[test]
    fn test_aggregate_by_organization() {
        let records = vec![
            grant("A", "Health", 100, 2021, 1),
            grant("B", "Health", 200, 2021, 1),
            grant("A", "Health", 50, 2021, 2),
        ];

        let aggregates = aggregate_by(&records, GroupKey::Organization);
        assert_eq!(aggregates.len(), 2);

        assert_eq!(aggregates[0].key, "A");
        assert_eq!(aggregates[0].total_amount, 150);
        assert_eq!(aggregates[0].grant_count, 2);

        assert_eq!(aggregates[1].key, "B");
        assert_eq!(aggregates[1].total_amount, 200);
        assert_eq!(aggregates[1].grant_count, 1);
    }

    #[test]
    fn test_aggregate_by_focus_area() {
        let records = vec![
            grant("A", "Health", 100, 2021, 1),
            grant("B", "AI", 200, 2021, 1),
            grant("C", "Health", 300, 2021, 3),
        ];

        let aggregates = aggregate_by(&records, GroupKey::FocusArea);
        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[0].key, "Health");
        assert_eq!(aggregates[0].total_amount, 400);
        assert_eq!(aggregates[1].key, "AI");
        assert_eq!(aggregates[1].grant_count, 1);
    }

    #[test]
    fn test_totals_invariant_under_permutation() {
        let a = grant("A", "Health", 100, 2021, 1);
        let b = grant("B", "AI", 200, 2021, 1);
        let c = grant("A", "Health", 50, 2021, 2);

        let forward = aggregate_by(&[a.clone(), b.clone(), c.clone()], GroupKey::Organization);
        let shuffled = aggregate_by(&[c, b, a], GroupKey::Organization);

        let lookup = |aggs: &[KeyAggregate], key: &str| -> (u64, usize) {
            let agg = aggs.iter().find(|a| a.key == key).unwrap();
            (agg.total_amount, agg.grant_count)
        };

        for key in ["A", "B"] {
            assert_eq!(lookup(&forward, key), lookup(&shuffled, key));
        }
    }

    #[test]
    fn test_sort_descending() {
        let mut aggregates = aggregate_by(
            &[
                grant("Small", "Health", 10, 2021, 1),
                grant("Big", "Health", 500, 2021, 1),
                grant("Mid", "Health", 100, 2021, 1),
            ],
            GroupKey::Organization,
        );

        sort_by_total(&mut aggregates, SortOrder::Descending);
        let keys: Vec<&str> = aggregates.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["Big", "Mid", "Small"]);
    }

    #[test]
    fn test_equal_totals_keep_first_seen_order() {
        let records = vec![
            grant("First", "Health", 100, 2021, 1),
            grant("Second", "Health", 100, 2021, 1),
            grant("Third", "Health", 100, 2021, 1),
        ];

        let mut aggregates = aggregate_by(&records, GroupKey::Organization);
        sort_by_total(&mut aggregates, SortOrder::Ascending);

        let keys: Vec<&str> = aggregates.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["First", "Second", "Third"]);

        sort_by_total(&mut aggregates, SortOrder::Descending);
        let keys: Vec<&str> = aggregates.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_top_n() {
        let aggregates = aggregate_by(
            &[
                grant("A", "Health", 10, 2021, 1),
                grant("B", "Health", 500, 2021, 1),
                grant("C", "Health", 100, 2021, 1),
            ],
            GroupKey::Organization,
        );

        let top = top_n(aggregates, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].key, "B");
        assert_eq!(top[1].key, "C");
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_by(&[], GroupKey::Organization).is_empty());
    }
}
