//! Inventory ledger: validated credit and debit over the stored quantities.
//!
//! Credit and debit are the only ways stock changes. Each successful call
//! persists the document and appends exactly one audit line; a rejected call
//! changes nothing and writes nothing.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use tracing::info;

use crate::audit::AuditEvent;
use crate::blood_type::BloodType;
use crate::error::{BloodBankError, Result, ValidationError};
use crate::storage::traits::StorageBackend;
use crate::storage::types::Document;
use crate::store::DocumentStore;
use crate::validate;

/// Inventory operations borrowed from a [`DocumentStore`].
pub struct Ledger<'s, B: StorageBackend> {
    store: &'s mut DocumentStore<B>,
}

impl<'s, B: StorageBackend> Ledger<'s, B> {
    pub fn new(store: &'s mut DocumentStore<B>) -> Self {
        Self { store }
    }

    /// Current quantity for `blood_type`; 0 for unknown or absent codes.
    pub fn get_amount(&self, blood_type: &str) -> u64 {
        blood_type
            .parse::<BloodType>()
            .map(|bt| self.store.document().quantity(bt))
            .unwrap_or(0)
    }

    /// Add `amount` ml of `blood_type`. Returns the new total.
    ///
    /// # Errors
    ///
    /// `Validation` for an unknown code or a non-positive amount; `Storage`
    /// if the change could not be persisted (nothing is applied).
    pub fn credit(&mut self, blood_type: &str, amount: i64) -> Result<u64> {
        let blood_type = validate::blood_type(blood_type)?;
        let amount = validate::positive_amount(amount)?;
        self.store
            .transact(|doc, at| doc.apply_credit(blood_type, amount, at))
    }

    /// Remove `amount` ml of `blood_type`. Returns the remaining quantity.
    ///
    /// # Errors
    ///
    /// `Validation` as for [`Ledger::credit`]; `InsufficientStock` when
    /// `amount` exceeds the stored quantity. No partial debit is ever applied.
    pub fn debit(&mut self, blood_type: &str, amount: i64) -> Result<u64> {
        let blood_type = validate::blood_type(blood_type)?;
        let amount = validate::positive_amount(amount)?;
        self.store
            .transact(|doc, at| doc.apply_debit(blood_type, amount, at))
    }

    /// Owned copy of every type's quantity.
    pub fn snapshot(&self) -> BTreeMap<BloodType, u64> {
        self.store.document().inventory().clone()
    }
}

impl Document {
    pub fn quantity(&self, blood_type: BloodType) -> u64 {
        self.inventory.get(&blood_type).copied().unwrap_or(0)
    }

    /// In-memory credit plus its audit line. Callers persist.
    pub(crate) fn apply_credit(
        &mut self,
        blood_type: BloodType,
        amount: u64,
        at: NaiveDateTime,
    ) -> Result<u64> {
        let current = self.quantity(blood_type);
        let total = current
            .checked_add(amount)
            .ok_or(ValidationError::AmountTooLarge(amount))?;
        self.inventory.insert(blood_type, total);
        self.record_event(
            at,
            &AuditEvent::Credited {
                blood_type,
                amount,
                total,
            },
        );
        info!(blood_type = %blood_type, amount, total, "credited");
        Ok(total)
    }

    /// In-memory debit plus its audit line. Callers persist.
    pub(crate) fn apply_debit(
        &mut self,
        blood_type: BloodType,
        amount: u64,
        at: NaiveDateTime,
    ) -> Result<u64> {
        let available = self.quantity(blood_type);
        if amount > available {
            return Err(BloodBankError::InsufficientStock {
                blood_type,
                requested: amount,
                available,
            });
        }
        let remaining = available - amount;
        self.inventory.insert(blood_type, remaining);
        self.record_event(
            at,
            &AuditEvent::Debited {
                blood_type,
                amount,
                remaining,
            },
        );
        info!(blood_type = %blood_type, amount, remaining, "debited");
        Ok(remaining)
    }
}
