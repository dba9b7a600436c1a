//! Donation and request flows.
//!
//! Both flows follow the same order: validate the form, change stock through
//! the ledger, then append the record. Stock change, record and audit line
//! are persisted together, so a record never exists without its stock
//! mutation and a mutation is never missing from the audit log.

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::audit::AuditEvent;
use crate::blood_type::BloodType;
use crate::error::{Result, ValidationError};
use crate::storage::traits::StorageBackend;
use crate::storage::types::{DonationRecord, Identity, RequestRecord};
use crate::store::DocumentStore;
use crate::validate;

/// Answer to the chronic-condition screening question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    ChronicCondition,
}

impl Eligibility {
    /// From the answer to "Do you suffer from a chronic disease?".
    pub fn from_chronic_condition(has_condition: bool) -> Self {
        if has_condition {
            Eligibility::ChronicCondition
        } else {
            Eligibility::Eligible
        }
    }
}

/// Unvalidated donation input.
#[derive(Debug, Clone)]
pub struct DonationForm {
    pub identity: Identity,
    pub eligibility: Eligibility,
    pub amount: i64,
    pub donation_date: NaiveDate,
    pub blood_type: String,
}

/// Unvalidated blood request input.
#[derive(Debug, Clone)]
pub struct RequestForm {
    pub identity: Identity,
    pub amount: i64,
    pub blood_type: String,
}

/// Result of a recorded donation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationReceipt {
    pub record: DonationRecord,
    pub new_total: u64,
}

/// Result of a fulfilled request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestReceipt {
    pub record: RequestRecord,
    pub remaining: u64,
    pub compatible_donors: &'static [BloodType],
}

/// Screen, credit and record a donation.
///
/// # Errors
///
/// `Validation` for a bad identity, an ineligible donor, an amount outside
/// 50–500 ml or an unknown blood type. In every error case neither the
/// inventory nor `donors` changes.
pub fn record_donation<B: StorageBackend>(
    store: &mut DocumentStore<B>,
    form: DonationForm,
) -> Result<DonationReceipt> {
    let identity = validate::identity(form.identity)?;
    if form.eligibility == Eligibility::ChronicCondition {
        return Err(ValidationError::Ineligible.into());
    }
    let amount = validate::donation_amount(form.amount)?;
    let blood_type = validate::blood_type(&form.blood_type)?;

    let receipt = store.transact(|doc, at| {
        let new_total = doc.apply_credit(blood_type, amount, at)?;
        let record = DonationRecord {
            identity,
            donated_amount: amount,
            blood_type,
            donation_date: form.donation_date,
            txn_id: Some(Uuid::now_v7()),
        };
        doc.donors.push(record.clone());
        Ok(DonationReceipt { record, new_total })
    })?;

    info!(
        donor_id = receipt.record.identity.id,
        blood_type = %blood_type,
        amount,
        "donation recorded"
    );
    Ok(receipt)
}

/// Debit and record a blood request dated today.
///
/// # Errors
///
/// `Validation` for a bad identity, a non-positive amount or an unknown
/// blood type; `InsufficientStock` when the type cannot cover the amount.
/// In every error case neither the inventory nor `patients` changes.
pub fn record_request<B: StorageBackend>(
    store: &mut DocumentStore<B>,
    form: RequestForm,
) -> Result<RequestReceipt> {
    let identity = validate::identity(form.identity)?;
    let amount = validate::positive_amount(form.amount)?;
    let blood_type = validate::blood_type(&form.blood_type)?;

    let receipt = store.transact(|doc, at| {
        let remaining = doc.apply_debit(blood_type, amount, at)?;
        let record = RequestRecord {
            identity,
            required_amount: amount,
            blood_type,
            request_date: at.date(),
            txn_id: Some(Uuid::now_v7()),
        };
        doc.patients.push(record.clone());
        Ok(RequestReceipt {
            record,
            remaining,
            compatible_donors: blood_type.compatible_donors(),
        })
    })?;

    info!(
        patient_id = receipt.record.identity.id,
        blood_type = %blood_type,
        amount,
        "request fulfilled"
    );
    Ok(receipt)
}

/// Log a staff registration. Only name and id are kept.
pub fn register_staff<B: StorageBackend>(
    store: &mut DocumentStore<B>,
    identity: Identity,
) -> Result<Identity> {
    let identity = validate::identity(identity)?;
    store.record(AuditEvent::StaffRegistered {
        name: identity.name.clone(),
        id: identity.id,
    })?;
    Ok(identity)
}
