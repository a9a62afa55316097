// Grants Dashboard Pipeline - Core Library
// Exposes all modules for use in the CLI and tests

pub mod record;
pub mod normalize;
pub mod aggregate;
pub mod calendar;
pub mod cumulative;
pub mod display;
pub mod store;
pub mod views;

// Re-export commonly used types
pub use record::{GrantMonth, GrantRecord, RawGrantRow};
pub use normalize::{
    canonical_focus_area, canonical_organization, parse_amount, AmountPolicy,
    NormalizationEngine, NormalizedBatch, RejectReason, RowError,
};
pub use aggregate::{aggregate_by, sort_by_total, top_n, GroupKey, KeyAggregate, SortOrder};
pub use calendar::{bucket_by_month, observed_range, MonthBucket};
pub use cumulative::{cumulative_series, CumulativePoint};
pub use display::{display_labels, format_usd, truncate_label};
pub use store::GrantStore;
pub use views::{build as build_dashboard, DashboardData};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
