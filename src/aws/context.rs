//! Per-profile AWS configuration context
//!
//! Loads the SDK configuration for one named profile and hands out the
//! service clients the scan needs from that single config.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use std::sync::Arc;

/// Loaded AWS configuration for one profile.
#[derive(Clone)]
pub struct AwsContext {
    config: Arc<SdkConfig>,
    profile: String,
}

impl AwsContext {
    /// Load configuration for `profile`, optionally forcing a region.
    ///
    /// Without an override the region comes from the profile itself or the
    /// usual environment chain.
    pub async fn for_profile(profile: &str, region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).profile_name(profile);
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        let config = loader.load().await;

        Self {
            config: Arc::new(config),
            profile: profile.to_string(),
        }
    }

    pub fn sdk_config(&self) -> &SdkConfig {
        &self.config
    }

    /// Region the profile resolved to, if any.
    pub fn region(&self) -> Option<&str> {
        self.config.region().map(|r| r.as_ref())
    }

    pub fn elasticache_client(&self) -> aws_sdk_elasticache::Client {
        aws_sdk_elasticache::Client::new(self.sdk_config())
    }

    pub fn dynamodb_client(&self) -> aws_sdk_dynamodb::Client {
        aws_sdk_dynamodb::Client::new(self.sdk_config())
    }

    pub fn docdb_client(&self) -> aws_sdk_docdb::Client {
        aws_sdk_docdb::Client::new(self.sdk_config())
    }

    pub fn cloudwatch_client(&self) -> aws_sdk_cloudwatch::Client {
        aws_sdk_cloudwatch::Client::new(self.sdk_config())
    }
}

impl std::fmt::Debug for AwsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsContext")
            .field("profile", &self.profile)
            .field("region", &self.region())
            .finish_non_exhaustive()
    }
}
