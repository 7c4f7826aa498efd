//! AWS-backed implementations of the scan traits.

pub mod cloudwatch;
pub mod context;
pub mod inventory;

pub use cloudwatch::CloudWatchMetrics;
pub use context::AwsContext;
pub use inventory::AwsInventory;

use crate::error::{Result, ScanError};
use crate::scan::ProfileConnector;
use log::debug;

/// Connects to AWS with the named shared-config profile.
#[derive(Debug, Clone, Default)]
pub struct AwsConnector {
    /// Region forced on every profile; `None` keeps each profile's own.
    pub region: Option<String>,
}

impl AwsConnector {
    pub fn new(region: Option<String>) -> Self {
        Self { region }
    }
}

impl ProfileConnector for AwsConnector {
    type Inventory = AwsInventory;
    type Metrics = CloudWatchMetrics;

    async fn connect(&self, profile: &str) -> Result<(AwsInventory, CloudWatchMetrics)> {
        let ctx = AwsContext::for_profile(profile, self.region.as_deref()).await;

        if ctx.region().is_none() {
            return Err(ScanError::Aws {
                operation: "LoadProfile",
                message: format!("no region configured for profile '{profile}'"),
            });
        }
        debug!("Loaded {:?}", ctx);

        Ok((
            AwsInventory::from_context(&ctx),
            CloudWatchMetrics::from_context(&ctx),
        ))
    }
}
