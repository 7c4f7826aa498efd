//! CloudWatch metric lookups

use super::context::AwsContext;
use crate::error::{Result, ScanError};
use crate::scan::{MetricQuery, MetricSample, MetricSource, ScanWindow};
use aws_sdk_cloudwatch::{
    Client,
    operation::get_metric_data::GetMetricDataOutput,
    primitives::DateTime as AwsDateTime,
    types::{Dimension, Metric, MetricDataQuery, MetricDataResult, MetricStat, ScanBy},
};
use chrono::{DateTime, Utc};
use log::trace;

/// One datapoint per day.
const PERIOD_SECS: i32 = 86_400;

/// Metric source backed by `GetMetricData`.
pub struct CloudWatchMetrics {
    client: Client,
}

impl CloudWatchMetrics {
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.cloudwatch_client(),
        }
    }

    fn build_query(query: &MetricQuery) -> MetricDataQuery {
        MetricDataQuery::builder()
            .id("m1")
            .metric_stat(
                MetricStat::builder()
                    .metric(
                        Metric::builder()
                            .namespace(query.namespace)
                            .metric_name(query.metric_name)
                            .dimensions(
                                Dimension::builder()
                                    .name(query.dimension_name)
                                    .value(&query.dimension_value)
                                    .build(),
                            )
                            .build(),
                    )
                    .period(PERIOD_SECS)
                    .stat(query.statistic.as_str())
                    .build(),
            )
            .return_data(true)
            .build()
    }
}

impl MetricSource for CloudWatchMetrics {
    async fn fetch_series(
        &self,
        query: &MetricQuery,
        window: &ScanWindow,
    ) -> Result<Vec<MetricSample>> {
        let data_query = Self::build_query(query);
        let start = AwsDateTime::from_secs(window.start.timestamp());
        let end = AwsDateTime::from_secs(window.end.timestamp());

        let samples = collect_pages(query, |token| {
            let request = self
                .client
                .get_metric_data()
                .start_time(start)
                .end_time(end)
                .scan_by(ScanBy::TimestampDescending)
                .metric_data_queries(data_query.clone())
                .set_next_token(token);
            async move {
                request
                    .send()
                    .await
                    .map_err(|e| ScanError::aws("GetMetricData", e))
            }
        })
        .await?;

        trace!(
            "{}/{} {}={}: {} samples",
            query.namespace,
            query.metric_name,
            query.dimension_name,
            query.dimension_value,
            samples.len()
        );
        Ok(samples)
    }
}

/// Drain every page of one `GetMetricData` call, following `NextToken`.
async fn collect_pages<F, Fut>(query: &MetricQuery, mut fetch_page: F) -> Result<Vec<MetricSample>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<GetMetricDataOutput>>,
{
    let mut samples = Vec::new();
    let mut next_token: Option<String> = None;

    loop {
        let page = fetch_page(next_token.take()).await?;
        for result in page.metric_data_results() {
            samples.extend(samples_from_result(result, query)?);
        }

        match page.next_token() {
            Some(token) => next_token = Some(token.to_string()),
            None => break,
        }
    }

    Ok(samples)
}

/// Pair up the parallel timestamp and value lists of one result.
fn samples_from_result(result: &MetricDataResult, query: &MetricQuery) -> Result<Vec<MetricSample>> {
    let timestamps = result.timestamps();
    let values = result.values();
    if timestamps.len() != values.len() {
        return Err(ScanError::MetricData {
            metric: query.metric_name.to_string(),
            reason: format!("{} timestamps but {} values", timestamps.len(), values.len()),
        });
    }

    timestamps
        .iter()
        .zip(values)
        .map(|(ts, value)| Ok(MetricSample::new(to_utc(ts, query)?, *value)))
        .collect()
}

fn to_utc(ts: &AwsDateTime, query: &MetricQuery) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(ts.secs(), ts.subsec_nanos()).ok_or_else(|| ScanError::MetricData {
        metric: query.metric_name.to_string(),
        reason: format!("timestamp out of range: {}", ts.secs()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{ResourceKind, activity::queries_for};
    use std::collections::VecDeque;

    fn result(timestamps: &[i64], values: &[f64]) -> MetricDataResult {
        MetricDataResult::builder()
            .id("m1")
            .set_timestamps(Some(timestamps.iter().map(|s| AwsDateTime::from_secs(*s)).collect()))
            .set_values(Some(values.to_vec()))
            .build()
    }

    fn page(results: Vec<MetricDataResult>, next_token: Option<&str>) -> GetMetricDataOutput {
        GetMetricDataOutput::builder()
            .set_metric_data_results(Some(results))
            .set_next_token(next_token.map(String::from))
            .build()
    }

    #[test]
    fn test_build_query_carries_dimension_and_stat() {
        let query = &queries_for(ResourceKind::DocumentCluster, "catalog")[0];
        let built = CloudWatchMetrics::build_query(query);

        assert_eq!(built.id(), Some("m1"));
        let stat = built.metric_stat().unwrap();
        assert_eq!(stat.stat(), Some("Average"));
        assert_eq!(stat.period(), Some(PERIOD_SECS));

        let metric = stat.metric().unwrap();
        assert_eq!(metric.namespace(), Some("AWS/DocDB"));
        assert_eq!(metric.metric_name(), Some("DatabaseConnections"));
        let dimension = &metric.dimensions()[0];
        assert_eq!(dimension.name(), Some("DBClusterIdentifier"));
        assert_eq!(dimension.value(), Some("catalog"));
    }

    #[test]
    fn test_to_utc_keeps_seconds() {
        let query = &queries_for(ResourceKind::TableStore, "t")[0];
        let ts = AwsDateTime::from_secs(1_760_000_000);
        assert_eq!(to_utc(&ts, query).unwrap().timestamp(), 1_760_000_000);
    }

    #[test]
    fn test_samples_pair_timestamps_with_values() {
        let query = &queries_for(ResourceKind::TableStore, "orders")[0];
        let samples = samples_from_result(&result(&[1_760_000_000, 1_759_913_600], &[3.0, 0.0]), query).unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].timestamp.timestamp(), 1_760_000_000);
        assert_eq!(samples[0].value, 3.0);
        assert_eq!(samples[1].timestamp.timestamp(), 1_759_913_600);
        assert_eq!(samples[1].value, 0.0);
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let query = &queries_for(ResourceKind::TableStore, "orders")[0];
        let err = samples_from_result(&result(&[1_760_000_000, 1_759_913_600], &[3.0]), query).unwrap_err();

        match err {
            ScanError::MetricData { metric, reason } => {
                assert_eq!(metric, query.metric_name);
                assert_eq!(reason, "2 timestamps but 1 values");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_result_has_no_samples() {
        let query = &queries_for(ResourceKind::CacheGroup, "sessions-001")[0];
        assert!(samples_from_result(&result(&[], &[]), query).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_collect_pages_follows_next_token() {
        let query = &queries_for(ResourceKind::DocumentCluster, "catalog")[0];
        let mut pages = VecDeque::from(vec![
            page(vec![result(&[300, 200], &[1.0, 0.0])], Some("page-2")),
            page(vec![result(&[100], &[5.0])], Some("page-3")),
            page(vec![], None),
        ]);
        let mut tokens = Vec::new();

        let samples = collect_pages(query, |token| {
            tokens.push(token);
            let next = pages.pop_front();
            async move { Ok(next.expect("no page left")) }
        })
        .await
        .unwrap();

        assert_eq!(
            tokens,
            vec![None, Some("page-2".to_string()), Some("page-3".to_string())]
        );
        let seconds: Vec<i64> = samples.iter().map(|s| s.timestamp.timestamp()).collect();
        assert_eq!(seconds, vec![300, 200, 100]);
    }

    #[tokio::test]
    async fn test_collect_pages_stops_on_failed_page() {
        let query = &queries_for(ResourceKind::DocumentCluster, "catalog")[0];
        let mut calls = 0;

        let outcome = collect_pages(query, |_| {
            calls += 1;
            let first = calls == 1;
            async move {
                if first {
                    Ok(page(vec![result(&[300], &[1.0])], Some("page-2")))
                } else {
                    Err(ScanError::Aws {
                        operation: "GetMetricData",
                        message: "Throttling".to_string(),
                    })
                }
            }
        })
        .await;

        assert!(matches!(outcome, Err(ScanError::Aws { operation: "GetMetricData", .. })));
        assert_eq!(calls, 2);
    }
}
