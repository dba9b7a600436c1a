//! Text and table output formatting.

use bloodbank_core::audit::AuditEntry;
use bloodbank_core::query::{InventoryLine, LowStockAlert, Report};
use bloodbank_core::records::{DonationReceipt, RequestReceipt};
use bloodbank_core::storage::Record;
use bloodbank_core::BloodType;

use super::Adjustment;
use crate::ui::{badge, header, kv, table, Badge, UiContext};

fn codes(types: &[BloodType]) -> String {
    types.iter().map(|bt| bt.code()).collect::<Vec<_>>().join(", ")
}

fn role(record: &Record) -> &'static str {
    match record {
        Record::Donor(_) => "donor",
        Record::Patient(_) => "patient",
    }
}

fn inventory_table(ctx: &UiContext, lines: &[InventoryLine]) -> String {
    let rows: Vec<Vec<String>> = lines
        .iter()
        .map(|line| {
            vec![
                line.blood_type.to_string(),
                line.amount.to_string(),
                line.status.to_string(),
            ]
        })
        .collect();
    table(ctx, &["Type", "Amount (ml)", "Status"], &rows)
}

pub fn print_inventory(ctx: &UiContext, lines: &[InventoryLine]) {
    println!("{}", inventory_table(ctx, lines));
}

fn alert_lines(ctx: &UiContext, alerts: &[LowStockAlert]) -> Vec<String> {
    if alerts.is_empty() {
        return vec![badge(ctx, Badge::Ok, "All blood types are at or above the threshold")];
    }
    alerts
        .iter()
        .map(|alert| badge(ctx, Badge::Warn, &alert.to_string()))
        .collect()
}

pub fn print_alerts(ctx: &UiContext, alerts: &[LowStockAlert]) {
    for line in alert_lines(ctx, alerts) {
        println!("{}", line);
    }
}

pub fn print_records(ctx: &UiContext, records: &[Record]) {
    if records.is_empty() {
        println!("{}", badge(ctx, Badge::Info, "No records found"));
        return;
    }
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            let identity = record.identity();
            vec![
                identity.id.to_string(),
                identity.name.clone(),
                role(record).to_string(),
                record.blood_type().to_string(),
                record.amount().to_string(),
                record.date().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        table(ctx, &["ID", "Name", "Role", "Type", "Amount (ml)", "Date"], &rows)
    );
}

pub fn print_donation(ctx: &UiContext, receipt: &DonationReceipt) {
    let record = &receipt.record;
    println!(
        "{}",
        badge(
            ctx,
            Badge::Ok,
            &format!(
                "Donation recorded: {} ml of {} from {} (stock now {} ml)",
                record.donated_amount, record.blood_type, record.identity.name, receipt.new_total
            ),
        )
    );
}

pub fn print_request(ctx: &UiContext, receipt: &RequestReceipt) {
    let record = &receipt.record;
    println!(
        "{}",
        badge(
            ctx,
            Badge::Ok,
            &format!(
                "Request fulfilled: {} ml of {} for {} ({} ml remaining)",
                record.required_amount, record.blood_type, record.identity.name, receipt.remaining
            ),
        )
    );
    println!(
        "{}",
        kv(ctx, "Compatible donor types", &codes(receipt.compatible_donors))
    );
}

fn adjustment_line(blood_type: BloodType, amount: i64, adjustment: Adjustment) -> String {
    match adjustment {
        Adjustment::Added { total } => {
            format!("Added {} ml to {} (stock now {} ml)", amount, blood_type, total)
        }
        Adjustment::Removed { total } => {
            format!("Removed {} ml from {} ({} ml remaining)", amount, blood_type, total)
        }
    }
}

pub fn print_adjustment(ctx: &UiContext, blood_type: BloodType, amount: i64, adjustment: Adjustment) {
    println!(
        "{}",
        badge(ctx, Badge::Ok, &adjustment_line(blood_type, amount, adjustment))
    );
}

pub fn print_compatibility(ctx: &UiContext, recipient: BloodType) {
    println!(
        "{}",
        kv(
            ctx,
            &format!("{} can receive from", recipient),
            &codes(recipient.compatible_donors())
        )
    );
}

pub fn print_logs(ctx: &UiContext, lines: &[String]) {
    if lines.is_empty() {
        println!("{}", badge(ctx, Badge::Info, "Audit log is empty"));
        return;
    }
    let rows: Vec<Vec<String>> = lines
        .iter()
        .map(|line| {
            let entry = AuditEntry::parse(line);
            vec![
                entry
                    .timestamp
                    .map(|t| t.format(bloodbank_core::audit::TIMESTAMP_FORMAT).to_string())
                    .unwrap_or_else(|| "-".to_string()),
                entry.message.to_string(),
            ]
        })
        .collect();
    if ctx.is_tty {
        println!("{}", table(ctx, &["Time", "Event"], &rows));
    } else {
        for line in lines {
            println!("{}", line);
        }
    }
}

pub fn print_report(ctx: &UiContext, report: &Report) {
    println!("{}", header(ctx, "Donations"));
    println!("{}", kv(ctx, "Count", &report.donations.count.to_string()));
    println!("{}", kv(ctx, "Total (ml)", &report.donations.amount.to_string()));
    println!();

    println!("{}", header(ctx, "Requests"));
    println!("{}", kv(ctx, "Count", &report.requests.count.to_string()));
    println!("{}", kv(ctx, "Total (ml)", &report.requests.amount.to_string()));
    println!();

    println!("{}", header(ctx, "Inventory"));
    println!("{}", inventory_table(ctx, &report.inventory));
    println!();

    println!("{}", header(ctx, "Activity by type"));
    let rows: Vec<Vec<String>> = report
        .activity
        .iter()
        .map(|(bt, activity)| {
            vec![
                bt.to_string(),
                activity.donated.to_string(),
                activity.requested.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        table(ctx, &["Type", "Donated (ml)", "Requested (ml)"], &rows)
    );
    println!();

    println!("{}", header(ctx, "Alerts"));
    for line in alert_lines(ctx, &report.alerts) {
        println!("{}", line);
    }
}
