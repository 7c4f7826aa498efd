use crate::{
    aws::AwsConnector,
    cli::ScanArgs,
    config::{Config, profiles},
    prompt, report,
    scan::{self, ProfileConnector, ProfileFailure, ResourceActivity, ScanOptions, ScanWindow},
};
use colored::Colorize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Result of a finished scan, after the report was written.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSummary {
    pub inactive: Vec<ResourceActivity>,
    pub total_checked: usize,
    pub profiles_scanned: usize,
    pub failures: Vec<ProfileFailure>,
}

/// Fully resolved scan settings: flags first, then config file, then defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPlan {
    pub profiles: Vec<String>,
    pub region: Option<String>,
    pub output: PathBuf,
    pub options: ScanOptions,
}

impl ScanPlan {
    pub fn resolve(args: &ScanArgs, config: &Config) -> Self {
        let profiles = if !args.profiles.is_empty() {
            args.profiles.clone()
        } else if !config.profiles.is_empty() {
            config.profiles.clone()
        } else {
            profiles::discover_profiles()
        };

        Self {
            profiles,
            region: args.region.clone().or_else(|| config.region.clone()),
            output: args.output.clone().unwrap_or_else(|| config.output.clone()),
            options: ScanOptions {
                all_cache_nodes: args.all_cache_nodes || config.all_cache_nodes,
            },
        }
    }
}

/// Pick the lookback: explicit flag, then prompt when interactive, else default.
pub fn resolve_months(args: &ScanArgs, default: u32, interactive: bool) -> u32 {
    match args.months {
        Some(months) => months,
        None if args.no_prompt || !interactive => default,
        None => prompt::prompt_months(default),
    }
}

/// Scan every profile, classify, and write the inactive set to `output`.
///
/// Only a report write failure is returned as an error; profile failures
/// are carried in the summary.
pub async fn scan_and_report<C: ProfileConnector>(
    profiles: &[String],
    connector: &C,
    window: &ScanWindow,
    options: ScanOptions,
    output: &Path,
) -> crate::Result<ScanSummary> {
    let outcome = scan::scan_profiles(profiles, connector, window, options).await;
    let total_checked = outcome.activities.len();
    let classification = scan::classify(outcome.activities, window.cutoff);

    report::write_report(output, &classification.inactive, window.months)?;

    Ok(ScanSummary {
        inactive: classification.inactive,
        total_checked,
        profiles_scanned: outcome.profiles_scanned,
        failures: outcome.failures,
    })
}

pub async fn handle_scan(args: ScanArgs, config: &Config) -> crate::Result<()> {
    let months = resolve_months(&args, config.default_months, std::io::stdin().is_terminal());
    let plan = ScanPlan::resolve(&args, config);
    let window = ScanWindow::ending_now(months);

    println!(
        "🔍 Checking {} profile(s) for activity over the last {} months",
        plan.profiles.len(),
        months
    );
    println!("{}", format!("   profiles: {}", plan.profiles.join(", ")).dimmed());

    let connector = AwsConnector::new(plan.region.clone());
    let summary =
        scan_and_report(&plan.profiles, &connector, &window, plan.options, &plan.output).await?;

    report::print_summary(
        &summary.inactive,
        summary.total_checked,
        summary.profiles_scanned,
        &summary.failures,
        &plan.output,
    );
    Ok(())
}
