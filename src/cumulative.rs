// 📈 Cumulative Series - running grant totals ordered by month
// Pure prefix sum over a stable month sort: grants in the same month keep
// their original relative order.

use crate::record::{GrantMonth, GrantRecord};
use serde::{Deserialize, Serialize};

/// One grant with the running total through that grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativePoint {
    pub month: GrantMonth,
    pub grant: String,
    pub organization: String,
    pub amount: u64,
    pub running_total: u64,
}

/// Build the running-total series: one point per record, ascending by month,
/// ties preserving input order. The last point's `running_total` is the sum
/// of all amounts.
pub fn cumulative_series(records: &[GrantRecord]) -> Vec<CumulativePoint> {
    let mut ordered: Vec<&GrantRecord> = records.iter().collect();
    // sort_by_key is stable: same-month grants stay in input order
    ordered.sort_by_key(|r| r.month);

    let mut running_total: u64 = 0;
    ordered
        .into_iter()
        .map(|record| {
            running_total += record.amount;
            CumulativePoint {
                month: record.month,
                grant: record.grant.clone(),
                organization: record.organization.clone(),
                amount: record.amount,
                running_total,
            }
        })
        .collect()
}
