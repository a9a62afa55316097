// 📋 Dashboard Views - the four chart-ready tables, bundled
// This is the boundary handed to the (external) presentation layer.
// Everything is recomputed from the full record set on each build.

use crate::aggregate::{self, GroupKey, KeyAggregate, SortOrder};
use crate::calendar::{self, MonthBucket};
use crate::cumulative::{self, CumulativePoint};
use crate::record::GrantRecord;
use serde::Serialize;

/// The derived views a grant dashboard charts from.
///
/// Organizations and focus areas are sorted ascending by total (bottom-up
/// bar charts); monthly and cumulative are chronological.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub organizations: Vec<KeyAggregate>,
    pub focus_areas: Vec<KeyAggregate>,
    pub monthly: Vec<MonthBucket>,
    pub cumulative: Vec<CumulativePoint>,
}

impl DashboardData {
    /// Sum of every grant amount, taken from the cumulative series.
    pub fn total_granted(&self) -> u64 {
        self.cumulative
            .last()
            .map(|point| point.running_total)
            .unwrap_or(0)
    }

    pub fn grant_count(&self) -> usize {
        self.cumulative.len()
    }
}

/// Build all four views. `None` is the explicit no-data result for an empty
/// record set (empty snapshot, or every row rejected): the caller renders an
/// empty state instead of handling an error.
pub fn build(records: &[GrantRecord]) -> Option<DashboardData> {
    if records.is_empty() {
        return None;
    }

    let mut organizations = aggregate::aggregate_by(records, GroupKey::Organization);
    aggregate::sort_by_total(&mut organizations, SortOrder::Ascending);

    let mut focus_areas = aggregate::aggregate_by(records, GroupKey::FocusArea);
    aggregate::sort_by_total(&mut focus_areas, SortOrder::Ascending);

    Some(DashboardData {
        organizations,
        focus_areas,
        monthly: calendar::bucket_by_month(records),
        cumulative: cumulative::cumulative_series(records),
    })
}

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
    fn test_build_assembles_all_views() {
        let records = vec![
            grant("A", "Health", 100, 2021, 1),
            grant("B", "AI", 200, 2021, 1),
            grant("A", "Health", 50, 2021, 2),
        ];

        let data = build(&records).unwrap();

        assert_eq!(data.organizations.len(), 2);
        assert_eq!(data.focus_areas.len(), 2);
        assert_eq!(data.monthly.len(), 2);
        assert_eq!(data.cumulative.len(), 3);
        assert_eq!(data.total_granted(), 350);
        assert_eq!(data.grant_count(), 3);
    }

    #[test]
    fn test_bar_views_sorted_ascending_by_total() {
        let records = vec![
            grant("Big", "Big Area", 500, 2021, 1),
            grant("Small", "Small Area", 10, 2021, 1),
            grant("Mid", "Mid Area", 100, 2021, 1),
        ];

        let data = build(&records).unwrap();

        let org_keys: Vec<&str> = data.organizations.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(org_keys, vec!["Small", "Mid", "Big"]);

        let area_keys: Vec<&str> = data.focus_areas.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(area_keys, vec!["Small Area", "Mid Area", "Big Area"]);
    }

    #[test]
    fn test_empty_records_is_no_data() {
        assert!(build(&[]).is_none());
    }

    #[test]
    fn test_views_serialize_to_json() {
        let records = vec![grant("A", "Health", 100, 2021, 1)];
        let data = build(&records).unwrap();

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["organizations"][0]["total_amount"], 100);
        assert_eq!(json["monthly"][0]["month"]["year"], 2021);
        assert_eq!(json["cumulative"][0]["running_total"], 100);
    }
}
