//! Inactivity classification against the fixed cutoff.

use super::ResourceActivity;
use chrono::{DateTime, Utc};

/// Resources split by whether they were seen after the cutoff.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Classification {
    pub active: Vec<ResourceActivity>,
    pub inactive: Vec<ResourceActivity>,
}

/// A resource is inactive when it was never seen, or last seen strictly
/// before `cutoff`.
pub fn is_inactive(activity: &ResourceActivity, cutoff: DateTime<Utc>) -> bool {
    match activity.last_activity {
        None => true,
        Some(last) => last < cutoff,
    }
}

/// Partition activities, keeping their original order in each half.
pub fn classify(activities: Vec<ResourceActivity>, cutoff: DateTime<Utc>) -> Classification {
    let (inactive, active): (Vec<_>, Vec<_>) = activities
        .into_iter()
        .partition(|activity| is_inactive(activity, cutoff));

    Classification { active, inactive }
}
