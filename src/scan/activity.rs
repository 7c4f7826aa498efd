//! Activity resolution: reduce several CloudWatch series to one timestamp.

use super::{ResourceKind, ScanWindow};
use crate::error::Result;
use chrono::{DateTime, Utc};
use log::debug;

/// CloudWatch statistic requested for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Sum,
    Average,
}

impl Statistic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Statistic::Sum => "Sum",
            Statistic::Average => "Average",
        }
    }
}

/// One named metric lookup for a single resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricQuery {
    pub namespace: &'static str,
    pub metric_name: &'static str,
    pub dimension_name: &'static str,
    pub dimension_value: String,
    pub statistic: Statistic,
}

/// A single datapoint of a metric series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl MetricSample {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Something that can answer a metric query over a window.
///
/// Series may come back in any order; CloudWatch returns them newest first.
#[allow(async_fn_in_trait)]
pub trait MetricSource {
    async fn fetch_series(
        &self,
        query: &MetricQuery,
        window: &ScanWindow,
    ) -> Result<Vec<MetricSample>>;
}

struct MetricSpec {
    metric_name: &'static str,
    statistic: Statistic,
}

const ELASTICACHE_METRICS: &[MetricSpec] = &[
    MetricSpec { metric_name: "CacheHits", statistic: Statistic::Sum },
    MetricSpec { metric_name: "CacheMisses", statistic: Statistic::Sum },
    MetricSpec { metric_name: "CurrConnections", statistic: Statistic::Average },
];

const DYNAMODB_METRICS: &[MetricSpec] = &[
    MetricSpec { metric_name: "ConsumedReadCapacityUnits", statistic: Statistic::Sum },
    MetricSpec { metric_name: "ConsumedWriteCapacityUnits", statistic: Statistic::Sum },
];

const DOCDB_METRICS: &[MetricSpec] = &[MetricSpec {
    metric_name: "DatabaseConnections",
    statistic: Statistic::Average,
}];

/// Build the fixed query set for a resource kind.
///
/// `dimension_value` is the cache *node* id for cache groups, the table name
/// for tables and the cluster identifier for document clusters.
pub fn queries_for(kind: ResourceKind, dimension_value: &str) -> Vec<MetricQuery> {
    let (namespace, dimension_name, specs) = match kind {
        ResourceKind::CacheGroup => ("AWS/ElastiCache", "CacheClusterId", ELASTICACHE_METRICS),
        ResourceKind::TableStore => ("AWS/DynamoDB", "TableName", DYNAMODB_METRICS),
        ResourceKind::DocumentCluster => ("AWS/DocDB", "DBClusterIdentifier", DOCDB_METRICS),
    };

    specs
        .iter()
        .map(|spec| MetricQuery {
            namespace,
            metric_name: spec.metric_name,
            dimension_name,
            dimension_value: dimension_value.to_string(),
            statistic: spec.statistic,
        })
        .collect()
}

/// Most recent timestamp in a series whose value is strictly positive.
pub fn latest_active(series: &[MetricSample]) -> Option<DateTime<Utc>> {
    series
        .iter()
        .filter(|sample| sample.value > 0.0)
        .map(|sample| sample.timestamp)
        .max()
}

/// Run every query and return the newest active timestamp across all of them.
pub async fn resolve_last_activity<M: MetricSource>(
    metrics: &M,
    queries: &[MetricQuery],
    window: &ScanWindow,
) -> Result<Option<DateTime<Utc>>> {
    let mut latest = None;

    for query in queries {
        let series = metrics.fetch_series(query, window).await?;
        let found = latest_active(&series);
        debug!(
            "{} {}={} -> {} samples, last active {:?}",
            query.metric_name,
            query.dimension_name,
            query.dimension_value,
            series.len(),
            found
        );
        // None orders below any Some
        latest = latest.max(found);
    }

    Ok(latest)
}
