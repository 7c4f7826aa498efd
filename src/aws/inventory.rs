//! Resource enumeration through the ElastiCache, DynamoDB and DocumentDB APIs.

use super::context::AwsContext;
use crate::error::{Result, ScanError};
use crate::scan::{CacheGroup, Inventory};
use aws_sdk_docdb::types::DbCluster;
use aws_sdk_elasticache::types::ReplicationGroup;
use log::debug;

/// `DescribeDBClusters` also lists Neptune and RDS clusters; only this
/// engine belongs to DocumentDB.
const DOCDB_ENGINE: &str = "docdb";

/// Inventory backed by the live AWS APIs of one profile.
pub struct AwsInventory {
    elasticache: aws_sdk_elasticache::Client,
    dynamodb: aws_sdk_dynamodb::Client,
    docdb: aws_sdk_docdb::Client,
}

impl AwsInventory {
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            elasticache: ctx.elasticache_client(),
            dynamodb: ctx.dynamodb_client(),
            docdb: ctx.docdb_client(),
        }
    }
}

impl Inventory for AwsInventory {
    async fn cache_groups(&self) -> Result<Vec<CacheGroup>> {
        let mut groups = Vec::new();
        let mut pages = self
            .elasticache
            .describe_replication_groups()
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| ScanError::aws("DescribeReplicationGroups", e))?;
            groups.extend(cache_groups_from_page(page.replication_groups()));
        }

        debug!("Found {} replication groups", groups.len());
        Ok(groups)
    }

    async fn tables(&self) -> Result<Vec<String>> {
        let mut tables = Vec::new();
        let mut pages = self.dynamodb.list_tables().into_paginator().send();

        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| ScanError::aws("ListTables", e))?;
            tables.extend(page.table_names().iter().cloned());
        }

        debug!("Found {} DynamoDB tables", tables.len());
        Ok(tables)
    }

    async fn document_clusters(&self) -> Result<Vec<String>> {
        let mut clusters = Vec::new();
        let mut pages = self.docdb.describe_db_clusters().into_paginator().send();

        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| ScanError::aws("DescribeDBClusters", e))?;
            clusters.extend(docdb_cluster_ids(page.db_clusters()));
        }

        debug!("Found {} DocumentDB clusters", clusters.len());
        Ok(clusters)
    }
}

/// Replication groups of one page; groups without an id are skipped.
fn cache_groups_from_page(groups: &[ReplicationGroup]) -> Vec<CacheGroup> {
    groups
        .iter()
        .filter_map(|group| {
            let id = group.replication_group_id()?;
            Some(CacheGroup {
                id: id.to_string(),
                member_clusters: group.member_clusters().to_vec(),
            })
        })
        .collect()
}

fn docdb_cluster_ids(clusters: &[DbCluster]) -> Vec<String> {
    clusters
        .iter()
        .filter(|cluster| cluster.engine() == Some(DOCDB_ENGINE))
        .filter_map(|cluster| cluster.db_cluster_identifier())
        .map(str::to_string)
        .collect()
}
