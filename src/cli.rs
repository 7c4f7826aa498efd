use crate::scan::MAX_MONTHS;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "idle-scan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find idle ElastiCache, DynamoDB and DocumentDB resources")]
#[command(long_about = "Enumerates ElastiCache replication groups, DynamoDB tables and DocumentDB clusters in every AWS profile, checks their CloudWatch activity over a lookback window and writes the resources idle for the last 90 days to a CSV report.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan profiles and report inactive resources (default)
    Scan(ScanArgs),

    /// List the profiles a scan would cover
    Profiles,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanArgs {
    /// Months of metric history to check (skips the prompt)
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_MONTHS)))]
    pub months: Option<u32>,

    /// Never prompt; use the configured default lookback
    #[arg(long)]
    pub no_prompt: bool,

    /// Profile to scan; repeat for several. Defaults to every profile found
    /// in the AWS shared credentials and config files
    #[arg(short, long = "profile", value_name = "NAME")]
    pub profiles: Vec<String>,

    /// Region used for every profile instead of the profile's own
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// CSV report path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Check every node of a cache group instead of only the first member
    #[arg(long)]
    pub all_cache_nodes: bool,
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
