//! Core scan model: resource kinds, the scan window and per-resource activity.
//!
//! A scan walks every profile, enumerates the supported resource kinds,
//! resolves a "last seen active" timestamp per resource from CloudWatch and
//! finally classifies each resource against the fixed inactivity cutoff.
//!
//! ```text
//! profiles ─▶ Inventory ─▶ activity::resolve_last_activity ─▶ classify ─▶ report
//! ```

pub mod activity;
pub mod classify;
pub mod runner;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use activity::{MetricQuery, MetricSample, MetricSource, Statistic};
pub use classify::{Classification, classify, is_inactive};
pub use runner::{
    CacheGroup, Inventory, ProfileConnector, ProfileFailure, ScanOptions, ScanOutcome,
    scan_profile, scan_profiles,
};

/// Lookback used when the operator does not pick one.
pub const DEFAULT_MONTHS: u32 = 6;

/// A "month" of lookback, in days.
pub const DAYS_PER_MONTH: i64 = 30;

/// Resources without activity in this many days are reported as inactive.
pub const INACTIVITY_DAYS: i64 = 90;

/// Longest accepted lookback. CloudWatch keeps 15 months of data anyway.
pub const MAX_MONTHS: u32 = 1200;

/// Kind of managed resource being audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// ElastiCache replication group
    CacheGroup,
    /// DynamoDB table
    TableStore,
    /// DocumentDB cluster
    DocumentCluster,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::CacheGroup,
        ResourceKind::TableStore,
        ResourceKind::DocumentCluster,
    ];

    /// Label written to the report's `resource_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::CacheGroup => "elasticache-replication-group",
            ResourceKind::TableStore => "dynamodb",
            ResourceKind::DocumentCluster => "documentdb",
        }
    }

    /// Parse a report label back into a kind.
    #[cfg(test)]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == label)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time bounds for one scan.
///
/// The query window covers `months` thirty-day months back from `end`; the
/// inactivity cutoff is always [`INACTIVITY_DAYS`] back from `end`, whatever
/// the lookback. Lookbacks above [`MAX_MONTHS`] are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub cutoff: DateTime<Utc>,
    pub months: u32,
}

impl ScanWindow {
    pub fn ending_at(now: DateTime<Utc>, months: u32) -> Self {
        let months = months.min(MAX_MONTHS);
        let days_back = |days: i64| {
            now.checked_sub_signed(Duration::days(days))
                .unwrap_or(DateTime::<Utc>::MIN_UTC)
        };

        Self {
            start: days_back(DAYS_PER_MONTH * i64::from(months)),
            end: now,
            cutoff: days_back(INACTIVITY_DAYS),
            months,
        }
    }

    pub fn ending_now(months: u32) -> Self {
        Self::ending_at(Utc::now(), months)
    }
}

/// Resolved activity of one resource in one profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceActivity {
    pub profile: String,
    pub resource_type: ResourceKind,
    pub identifier: String,
    pub last_activity: Option<DateTime<Utc>>,
}

impl ResourceActivity {
    pub fn new(
        profile: impl Into<String>,
        resource_type: ResourceKind,
        identifier: impl Into<String>,
        last_activity: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            profile: profile.into(),
            resource_type,
            identifier: identifier.into(),
            last_activity,
        }
    }
}
