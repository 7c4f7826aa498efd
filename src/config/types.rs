use crate::scan::DEFAULT_MONTHS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default report file name.
pub const DEFAULT_OUTPUT: &str = "inactive_resources.csv";

/// Tool configuration (`~/.idle-scan.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lookback offered at the prompt and used when prompting is skipped
    pub default_months: u32,
    /// Where the CSV report is written
    pub output: PathBuf,
    /// Profiles to scan; empty means discover them from the AWS shared files
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<String>,
    /// Region forced on every profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Inspect every node of a cache group, not just the first member
    pub all_cache_nodes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_months: DEFAULT_MONTHS,
            output: PathBuf::from(DEFAULT_OUTPUT),
            profiles: Vec::new(),
            region: None,
            all_cache_nodes: false,
        }
    }
}
