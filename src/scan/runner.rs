//! Per-profile scan loop with failure isolation.

use super::activity::{self, MetricSource};
use super::{ResourceActivity, ResourceKind, ScanWindow};
use crate::error::Result;
use log::{debug, info, warn};

/// An ElastiCache replication group and its member node ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheGroup {
    pub id: String,
    pub member_clusters: Vec<String>,
}

/// Enumerates the auditable resources of one profile.
///
/// Implementations page through the whole listing before returning.
#[allow(async_fn_in_trait)]
pub trait Inventory {
    async fn cache_groups(&self) -> Result<Vec<CacheGroup>>;
    async fn tables(&self) -> Result<Vec<String>>;
    async fn document_clusters(&self) -> Result<Vec<String>>;
}

/// Opens the inventory and metric clients for a named profile.
#[allow(async_fn_in_trait)]
pub trait ProfileConnector {
    type Inventory: Inventory;
    type Metrics: MetricSource;

    async fn connect(&self, profile: &str) -> Result<(Self::Inventory, Self::Metrics)>;
}

/// Behaviour switches for a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Query every member node of a cache group instead of only the first.
    pub all_cache_nodes: bool,
}

/// A profile that was skipped, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFailure {
    pub profile: String,
    pub reason: String,
}

/// Everything gathered across all profiles.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScanOutcome {
    pub activities: Vec<ResourceActivity>,
    pub failures: Vec<ProfileFailure>,
    pub profiles_scanned: usize,
}

/// Scan a single profile's inventory.
pub async fn scan_profile<I, M>(
    profile: &str,
    inventory: &I,
    metrics: &M,
    window: &ScanWindow,
    options: ScanOptions,
) -> Result<Vec<ResourceActivity>>
where
    I: Inventory,
    M: MetricSource,
{
    let mut activities = Vec::new();

    for group in inventory.cache_groups().await? {
        let nodes: &[String] = if options.all_cache_nodes {
            &group.member_clusters
        } else {
            match group.member_clusters.first() {
                Some(first) => std::slice::from_ref(first),
                None => &[],
            }
        };
        if nodes.is_empty() {
            debug!("Skipping cache group {} without member clusters", group.id);
            continue;
        }

        let mut last = None;
        for node in nodes {
            let queries = activity::queries_for(ResourceKind::CacheGroup, node);
            last = last.max(activity::resolve_last_activity(metrics, &queries, window).await?);
        }
        activities.push(ResourceActivity::new(
            profile,
            ResourceKind::CacheGroup,
            group.id,
            last,
        ));
    }

    for table in inventory.tables().await? {
        let queries = activity::queries_for(ResourceKind::TableStore, &table);
        let last = activity::resolve_last_activity(metrics, &queries, window).await?;
        activities.push(ResourceActivity::new(profile, ResourceKind::TableStore, table, last));
    }

    for cluster in inventory.document_clusters().await? {
        let queries = activity::queries_for(ResourceKind::DocumentCluster, &cluster);
        let last = activity::resolve_last_activity(metrics, &queries, window).await?;
        activities.push(ResourceActivity::new(
            profile,
            ResourceKind::DocumentCluster,
            cluster,
            last,
        ));
    }

    Ok(activities)
}

/// Scan profiles one after another.
///
/// A failing profile is logged and recorded in [`ScanOutcome::failures`];
/// its partial results are dropped and the next profile is scanned.
pub async fn scan_profiles<C: ProfileConnector>(
    profiles: &[String],
    connector: &C,
    window: &ScanWindow,
    options: ScanOptions,
) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    for profile in profiles {
        info!("Scanning profile '{}'", profile);

        let result = match connector.connect(profile).await {
            Ok((inventory, metrics)) => {
                scan_profile(profile, &inventory, &metrics, window, options).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(found) => {
                info!("Profile '{}': {} resources checked", profile, found.len());
                outcome.profiles_scanned += 1;
                outcome.activities.extend(found);
            }
            Err(e) => {
                warn!("Skipping profile '{}': {}", profile, e);
                outcome.failures.push(ProfileFailure {
                    profile: profile.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    outcome
}
