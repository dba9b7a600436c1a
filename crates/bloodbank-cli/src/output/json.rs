//! JSON output formatting.

use bloodbank_core::audit::AuditEntry;
use bloodbank_core::query::{InventoryLine, LowStockAlert};
use bloodbank_core::records::{DonationReceipt, RequestReceipt};
use bloodbank_core::storage::Record;
use bloodbank_core::BloodType;

use super::Adjustment;

pub fn inventory_json(lines: &[InventoryLine]) -> serde_json::Value {
    serde_json::json!(lines)
}

pub fn alerts_json(alerts: &[LowStockAlert]) -> serde_json::Value {
    serde_json::json!(alerts)
}

pub fn records_json(records: &[Record]) -> serde_json::Value {
    serde_json::json!(records)
}

pub fn donation_json(receipt: &DonationReceipt) -> serde_json::Value {
    serde_json::json!({
        "record": receipt.record,
        "new_total": receipt.new_total,
    })
}

pub fn request_json(receipt: &RequestReceipt) -> serde_json::Value {
    serde_json::json!({
        "record": receipt.record,
        "remaining": receipt.remaining,
        "compatible_donors": receipt.compatible_donors,
    })
}

pub fn adjustment_json(blood_type: BloodType, amount: i64, adjustment: Adjustment) -> serde_json::Value {
    let (action, total) = match adjustment {
        Adjustment::Added { total } => ("add", total),
        Adjustment::Removed { total } => ("remove", total),
    };
    serde_json::json!({
        "blood_type": blood_type,
        "action": action,
        "amount": amount,
        "total": total,
    })
}

pub fn compatibility_json(recipient: BloodType) -> serde_json::Value {
    serde_json::json!({
        "recipient": recipient,
        "compatible_donors": recipient.compatible_donors(),
    })
}

/// Audit lines split into timestamp and message. Lines without a
/// recognizable timestamp get `null`.
pub fn logs_json(lines: &[String]) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = lines
        .iter()
        .map(|line| {
            let entry = AuditEntry::parse(line);
            serde_json::json!({
                "timestamp": entry
                    .timestamp
                    .map(|t| t.format(bloodbank_core::audit::TIMESTAMP_FORMAT).to_string()),
                "message": entry.message,
            })
        })
        .collect();
    serde_json::Value::Array(entries)
}
