//! Interactive lookback prompt.

use crate::scan::MAX_MONTHS;
use colored::Colorize;
use inquire::{InquireError, Text};

/// Interpret the operator's answer.
///
/// An empty answer selects `default`; `None` means the answer was not a
/// whole number between 1 and [`MAX_MONTHS`].
pub fn parse_months(raw: &str, default: u32) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(default);
    }
    raw.parse::<u32>()
        .ok()
        .filter(|months| (1..=MAX_MONTHS).contains(months))
}

/// Ask how many months of history to check, falling back to `default`.
pub fn prompt_months(default: u32) -> u32 {
    let answer = Text::new("How many months of history should be checked?")
        .with_placeholder(&default.to_string())
        .with_help_message("Resources idle for the last 90 days are reported")
        .prompt();

    match answer {
        Ok(raw) => parse_months(&raw, default).unwrap_or_else(|| {
            println!(
                "{}",
                format!("Invalid value '{}', using the default of {} months.", raw.trim(), default)
                    .yellow()
            );
            default
        }),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            println!("{}", format!("Using the default of {} months.", default).dimmed());
            default
        }
        Err(e) => {
            log::warn!("Prompt failed ({}), using {} months", e, default);
            default
        }
    }
}
