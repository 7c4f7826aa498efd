// Handler modules
pub mod profiles;
pub mod scan;

// Re-export all handler functions
pub use profiles::handle_profiles;
pub use scan::{ScanPlan, ScanSummary, handle_scan, resolve_months, scan_and_report};
