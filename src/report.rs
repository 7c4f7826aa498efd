//! CSV report and console summary.

use crate::error::Result;
use crate::scan::{ProfileFailure, ResourceActivity};
use chrono::{DateTime, SecondsFormat, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Written in place of a timestamp for resources never seen active.
pub const NEVER: &str = "never";

/// Report columns, in file order.
pub const COLUMNS: [&str; 5] = [
    "profile",
    "resource_type",
    "identifier",
    "last_activity_utc",
    "checked_months",
];

/// One line of the CSV report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub profile: String,
    pub resource_type: String,
    pub identifier: String,
    pub last_activity_utc: String,
    pub checked_months: u32,
}

impl ReportRow {
    pub fn from_activity(activity: &ResourceActivity, months: u32) -> Self {
        Self {
            profile: activity.profile.clone(),
            resource_type: activity.resource_type.as_str().to_string(),
            identifier: activity.identifier.clone(),
            last_activity_utc: format_last_activity(activity.last_activity),
            checked_months: months,
        }
    }
}

/// RFC 3339 in UTC, or [`NEVER`].
pub fn format_last_activity(last: Option<DateTime<Utc>>) -> String {
    match last {
        Some(ts) => ts.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => NEVER.to_string(),
    }
}

/// Serialize rows, header first, to any writer.
pub fn write_csv<W: io::Write>(out: W, inactive: &[ResourceActivity], months: u32) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(COLUMNS)?;
    for activity in inactive {
        writer.serialize(ReportRow::from_activity(activity, months))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the report file, creating parent directories as needed.
pub fn write_report(path: &Path, inactive: &[ResourceActivity], months: u32) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    write_csv(io::BufWriter::new(file), inactive, months)?;
    log::info!("Wrote {} rows to {}", inactive.len(), path.display());
    Ok(())
}

/// Console line for one inactive resource.
pub fn summary_line(activity: &ResourceActivity) -> String {
    format!(
        "[{}] {}: {} | last activity: {}",
        activity.profile,
        activity.resource_type,
        activity.identifier,
        format_last_activity(activity.last_activity)
    )
}

/// Closing console line with the scan totals.
pub fn totals_line(
    inactive: usize,
    total_checked: usize,
    profiles_scanned: usize,
    output: &Path,
) -> String {
    format!(
        "{} inactive of {} resources checked across {} profile(s). Report saved to: {}",
        inactive,
        total_checked,
        profiles_scanned,
        output.display()
    )
}

/// Print inactive resources, failed profiles and totals.
pub fn print_summary(
    inactive: &[ResourceActivity],
    total_checked: usize,
    profiles_scanned: usize,
    failures: &[ProfileFailure],
    output: &Path,
) {
    if inactive.is_empty() {
        println!("{}", "No inactive resources found.".green());
    }
    for activity in inactive {
        println!("{}", summary_line(activity).yellow());
    }

    for failure in failures {
        println!(
            "{} {}: {}",
            "✗".red(),
            format!("profile '{}' skipped", failure.profile).red(),
            failure.reason
        );
    }

    println!(
        "\n{}",
        totals_line(inactive.len(), total_checked, profiles_scanned, output).bold()
    );
}
