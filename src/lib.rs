//! # idle-scan
//!
//! Finds AWS data stores nobody is using. For every configured profile it
//! enumerates ElastiCache replication groups, DynamoDB tables and DocumentDB
//! clusters, asks CloudWatch when each one last showed connections or
//! throughput, and writes every resource idle for the last 90 days to a CSV
//! report.
//!
//! ## Example
//!
//! ```rust,no_run
//! use idle_scan::{aws::AwsConnector, scan::{self, ScanOptions, ScanWindow}};
//!
//! # async fn demo() {
//! let window = ScanWindow::ending_now(6);
//! let profiles = vec!["default".to_string()];
//! let outcome = scan::scan_profiles(&profiles, &AwsConnector::default(), &window, ScanOptions::default()).await;
//! let idle = scan::classify(outcome.activities, window.cutoff).inactive;
//! println!("{} idle resources", idle.len());
//! # }
//! ```

pub mod aws;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod prompt;
pub mod report;
pub mod scan;

// Re-export commonly used types and functions
pub use error::{Result, ScanError};
pub use scan::{ResourceActivity, ResourceKind, ScanWindow};
use cli::Commands;
use config::Config;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub async fn run_command(command: Option<Commands>, config: &Config) -> Result<()> {
    match command.unwrap_or_else(|| Commands::Scan(Default::default())) {
        Commands::Scan(args) => handlers::handle_scan(args, config).await,
        Commands::Profiles => handlers::handle_profiles(config),
    }
}
