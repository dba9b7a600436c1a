//! Output formatting helpers for the CLI.
//!
//! Every read command has a JSON form (`--json`) and a text form that is a
//! table on a terminal and space-separated rows when piped.

mod json;
mod text;

pub use json::{
    adjustment_json, alerts_json, compatibility_json, donation_json, inventory_json, logs_json,
    records_json, request_json,
};
pub use text::{
    print_adjustment, print_alerts, print_compatibility, print_donation, print_inventory,
    print_logs, print_records, print_report, print_request,
};

/// Result of a manual stock change, with the quantity after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Added { total: u64 },
    Removed { total: u64 },
}
