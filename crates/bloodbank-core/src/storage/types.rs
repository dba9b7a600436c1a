//! Persisted data model.
//!
//! The on-disk shape is a single JSON object with `inventory`, `donors`,
//! `patients` and `logs`. [`RawDocument`] is what gets parsed (every
//! collection optional); [`Document`] is the defaulted in-memory form that
//! the rest of the crate works with.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::blood_type::BloodType;
use crate::error::ValidationError;

/// Quantity every blood type starts with when the inventory is first created.
pub const DEFAULT_STARTING_VOLUME_ML: u64 = 2000;

/// Identity fields shared by donors, patients and staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub age: u32,
    pub id: u64,
    #[serde(default)]
    pub phone: String,
}

/// A completed donation. Exists only if the matching credit was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationRecord {
    #[serde(flatten)]
    pub identity: Identity,
    pub donated_amount: u64,
    pub blood_type: BloodType,
    pub donation_date: NaiveDate,
    /// Links the record to the inventory mutation that produced it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txn_id: Option<Uuid>,
}

/// A fulfilled blood request. Exists only if the matching debit was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
    #[serde(flatten)]
    pub identity: Identity,
    pub required_amount: u64,
    pub blood_type: BloodType,
    pub request_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txn_id: Option<Uuid>,
}

/// A transaction record of either kind, as returned by search and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Record {
    Donor(DonationRecord),
    Patient(RequestRecord),
}

impl Record {
    pub fn identity(&self) -> &Identity {
        match self {
            Record::Donor(r) => &r.identity,
            Record::Patient(r) => &r.identity,
        }
    }

    pub fn blood_type(&self) -> BloodType {
        match self {
            Record::Donor(r) => r.blood_type,
            Record::Patient(r) => r.blood_type,
        }
    }

    /// Donated or required amount in ml.
    pub fn amount(&self) -> u64 {
        match self {
            Record::Donor(r) => r.donated_amount,
            Record::Patient(r) => r.required_amount,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Record::Donor(r) => r.donation_date,
            Record::Patient(r) => r.request_date,
        }
    }
}

/// Which record collection an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Donors,
    Patients,
}

impl Collection {
    /// Top-level document key for this collection.
    pub fn key(self) -> &'static str {
        match self {
            Collection::Donors => "donors",
            Collection::Patients => "patients",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Collection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "donors" | "donor" => Ok(Collection::Donors),
            "patients" | "patient" => Ok(Collection::Patients),
            _ => Err(ValidationError::UnknownCollection(s.trim().to_string())),
        }
    }
}

/// Document as read from disk, before defaulting.
///
/// Unknown top-level keys are kept in `extra` and written back unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub inventory: Option<BTreeMap<BloodType, u64>>,
    #[serde(default)]
    pub donors: Option<Vec<DonationRecord>>,
    #[serde(default)]
    pub patients: Option<Vec<RequestRecord>>,
    #[serde(default)]
    pub logs: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RawDocument {
    /// Fill every missing collection, returning the document and whether
    /// anything had to be filled.
    ///
    /// A missing inventory gets every type at `starting_volume`. An inventory
    /// that exists but lacks some types gets those types at 0, which is what
    /// they already read as. Existing values are never touched, so running
    /// this on its own output changes nothing.
    pub fn ensure_defaults(self, starting_volume: u64) -> (Document, bool) {
        let mut changed = false;

        let inventory = match self.inventory {
            Some(mut inventory) => {
                for bt in BloodType::ALL {
                    if !inventory.contains_key(&bt) {
                        inventory.insert(bt, 0);
                        changed = true;
                    }
                }
                inventory
            }
            None => {
                changed = true;
                BloodType::ALL
                    .into_iter()
                    .map(|bt| (bt, starting_volume))
                    .collect()
            }
        };

        let donors = self.donors.unwrap_or_else(|| {
            changed = true;
            Vec::new()
        });
        let patients = self.patients.unwrap_or_else(|| {
            changed = true;
            Vec::new()
        });
        let logs = self.logs.unwrap_or_else(|| {
            changed = true;
            Vec::new()
        });

        let doc = Document {
            inventory,
            donors,
            patients,
            logs,
            extra: self.extra,
        };
        (doc, changed)
    }
}

impl From<Document> for RawDocument {
    fn from(doc: Document) -> Self {
        RawDocument {
            inventory: Some(doc.inventory),
            donors: Some(doc.donors),
            patients: Some(doc.patients),
            logs: Some(doc.logs),
            extra: doc.extra,
        }
    }
}

/// The defaulted document. All collections are present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub(crate) inventory: BTreeMap<BloodType, u64>,
    pub(crate) donors: Vec<DonationRecord>,
    pub(crate) patients: Vec<RequestRecord>,
    pub(crate) logs: Vec<String>,
    #[serde(flatten)]
    pub(crate) extra: serde_json::Map<String, serde_json::Value>,
}

impl Document {
    /// A brand new document with every type at `starting_volume`.
    pub fn new(starting_volume: u64) -> Self {
        RawDocument::default().ensure_defaults(starting_volume).0
    }

    pub fn inventory(&self) -> &BTreeMap<BloodType, u64> {
        &self.inventory
    }

    pub fn donors(&self) -> &[DonationRecord] {
        &self.donors
    }

    pub fn patients(&self) -> &[RequestRecord] {
        &self.patients
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Records of one collection, in insertion order.
    pub fn records(&self, collection: Collection) -> Vec<Record> {
        match collection {
            Collection::Donors => self.donors.iter().cloned().map(Record::Donor).collect(),
            Collection::Patients => self.patients.iter().cloned().map(Record::Patient).collect(),
        }
    }
}
