//! Queries and reports.
//!
//! Nothing here changes stock or records. Search, history and the full report
//! each leave one audit line; the plain aggregations below do not.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::audit::AuditEvent;
use crate::blood_type::BloodType;
use crate::error::Result;
use crate::storage::traits::StorageBackend;
use crate::storage::types::{Collection, Document, Record};
use crate::store::DocumentStore;
use crate::validate;

/// Quantity below which a blood type is considered critically low.
pub const DEFAULT_CRITICAL_THRESHOLD_ML: u64 = 500;

/// A blood type whose stock is below the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LowStockAlert {
    pub blood_type: BloodType,
    pub amount: u64,
    pub threshold: u64,
}

impl fmt::Display for LowStockAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is critically low! Current level: {} ml (Threshold: {} ml)",
            self.blood_type, self.amount, self.threshold
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Good,
    Critical,
}

impl StockStatus {
    pub fn for_amount(amount: u64, threshold: u64) -> Self {
        if amount < threshold {
            StockStatus::Critical
        } else {
            StockStatus::Good
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::Good => f.write_str("Good"),
            StockStatus::Critical => f.write_str("Critical"),
        }
    }
}

/// One row of the inventory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryLine {
    pub blood_type: BloodType,
    pub amount: u64,
    pub status: StockStatus,
}

/// Record count and summed volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub count: usize,
    pub amount: u64,
}

impl Totals {
    fn add(&mut self, amount: u64) {
        self.count += 1;
        self.amount = self.amount.saturating_add(amount);
    }
}

/// Donated and requested volume for one blood type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeActivity {
    pub donated: u64,
    pub requested: u64,
}

/// Everything the report view shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub donations: Totals,
    pub requests: Totals,
    pub inventory: Vec<InventoryLine>,
    pub activity: BTreeMap<BloodType, TypeActivity>,
    pub alerts: Vec<LowStockAlert>,
}

/// Every type whose quantity is strictly below `threshold`, in code order.
pub fn low_stock(doc: &Document, threshold: u64) -> Vec<LowStockAlert> {
    doc.inventory()
        .iter()
        .filter(|(_, &amount)| amount < threshold)
        .map(|(&blood_type, &amount)| LowStockAlert {
            blood_type,
            amount,
            threshold,
        })
        .collect()
}

/// All eight types sorted by code, with their status against `threshold`.
pub fn inventory_listing(doc: &Document, threshold: u64) -> Vec<InventoryLine> {
    BloodType::ALL
        .into_iter()
        .map(|blood_type| {
            let amount = doc.quantity(blood_type);
            InventoryLine {
                blood_type,
                amount,
                status: StockStatus::for_amount(amount, threshold),
            }
        })
        .collect()
}

/// Count and total volume over one collection.
pub fn totals(doc: &Document, collection: Collection) -> Totals {
    let mut totals = Totals::default();
    for (_, amount) in amounts(doc, collection) {
        totals.add(amount);
    }
    totals
}

/// [`totals`] grouped by blood type. Every type is present.
pub fn totals_by_type(doc: &Document, collection: Collection) -> BTreeMap<BloodType, Totals> {
    let mut grouped: BTreeMap<BloodType, Totals> = BloodType::ALL
        .into_iter()
        .map(|bt| (bt, Totals::default()))
        .collect();
    for (blood_type, amount) in amounts(doc, collection) {
        grouped.entry(blood_type).or_default().add(amount);
    }
    grouped
}

fn amounts(doc: &Document, collection: Collection) -> Vec<(BloodType, u64)> {
    match collection {
        Collection::Donors => doc
            .donors()
            .iter()
            .map(|r| (r.blood_type, r.donated_amount))
            .collect(),
        Collection::Patients => doc
            .patients()
            .iter()
            .map(|r| (r.blood_type, r.required_amount))
            .collect(),
    }
}

/// Build the full report without logging it.
pub fn build_report(doc: &Document, threshold: u64) -> Report {
    let donated = totals_by_type(doc, Collection::Donors);
    let requested = totals_by_type(doc, Collection::Patients);
    let activity = BloodType::ALL
        .into_iter()
        .map(|bt| {
            let activity = TypeActivity {
                donated: donated.get(&bt).map(|t| t.amount).unwrap_or(0),
                requested: requested.get(&bt).map(|t| t.amount).unwrap_or(0),
            };
            (bt, activity)
        })
        .collect();

    Report {
        donations: totals(doc, Collection::Donors),
        requests: totals(doc, Collection::Patients),
        inventory: inventory_listing(doc, threshold),
        activity,
        alerts: low_stock(doc, threshold),
    }
}

/// Build the full report and note it in the audit log.
pub fn generate_report<B: StorageBackend>(
    store: &mut DocumentStore<B>,
    threshold: u64,
) -> Result<Report> {
    let report = build_report(store.document(), threshold);
    store.record(AuditEvent::ReportGenerated)?;
    Ok(report)
}

/// True when `record` matches an already normalized (trimmed, lowercased)
/// term: name substring, exact numeric id, or exact blood type code.
pub fn matches(record: &Record, term: &str) -> bool {
    let identity = record.identity();
    if identity.name.to_lowercase().contains(term) {
        return true;
    }
    if !term.is_empty() && term.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(id) = term.parse::<u64>() {
            if id == identity.id {
                return true;
            }
        }
    }
    record.blood_type().code().to_lowercase() == term
}

/// Search one collection and note the search in the audit log.
///
/// # Errors
///
/// `Validation` when the term is blank; nothing is logged in that case.
pub fn search<B: StorageBackend>(
    store: &mut DocumentStore<B>,
    collection: Collection,
    term: &str,
) -> Result<Vec<Record>> {
    let term = validate::search_term(term)?;
    let results: Vec<Record> = store
        .document()
        .records(collection)
        .into_iter()
        .filter(|record| matches(record, &term))
        .collect();
    store.record(AuditEvent::Searched {
        term,
        collection,
        found: results.len(),
    })?;
    Ok(results)
}

/// All records of one collection in insertion order, noted in the audit log.
pub fn history<B: StorageBackend>(
    store: &mut DocumentStore<B>,
    collection: Collection,
) -> Result<Vec<Record>> {
    let records = store.document().records(collection);
    store.record(AuditEvent::HistoryViewed { collection })?;
    Ok(records)
}
