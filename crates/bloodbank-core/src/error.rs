//! Error types for blood bank core operations.
//!
//! Validation and stock errors are rejections: the operation did not change
//! any state. Storage errors mean the operation did not complete and the
//! in-memory document was rolled back. The CLI layer maps these to exit codes.

use thiserror::Error;

use crate::blood_type::BloodType;

/// Result type alias for blood bank operations.
pub type Result<T> = std::result::Result<T, BloodBankError>;

/// Core error type for blood bank operations.
#[derive(Debug, Error)]
pub enum BloodBankError {
    /// Input rejected by a domain rule
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Debit larger than the stored quantity
    #[error(
        "Insufficient stock: requested {requested} ml of {blood_type}, only {available} ml available"
    )]
    InsufficientStock {
        blood_type: BloodType,
        requested: u64,
        available: u64,
    },

    /// Persisted document could not be parsed and recovery is disabled
    #[error("Corrupt data file: {0}")]
    Corrupt(String),

    /// Persisted document is valid JSON but a field has the wrong shape.
    /// Never recovered automatically: resetting would discard real records.
    #[error("Data file does not match the expected layout: {0}")]
    InvalidDocument(String),

    /// Unrecoverable read or write failure
    #[error("Storage error: {0}")]
    Storage(String),
}

/// A specific violated input rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown blood type '{0}' (expected one of A+, A-, B+, B-, AB+, AB-, O+, O-)")]
    UnknownBloodType(String),

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    #[error("donation amount must be between {min} and {max} ml, got {got}")]
    DonationAmountOutOfRange { min: u64, max: u64, got: i64 },

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("age must be between {min} and {max}, got {got}")]
    AgeOutOfRange { min: u32, max: u32, got: u32 },

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("unknown collection '{0}' (expected donors or patients)")]
    UnknownCollection(String),

    #[error("amount {0} ml would overflow the stored quantity")]
    AmountTooLarge(u64),

    #[error("search term cannot be empty")]
    EmptySearchTerm,

    #[error("donor is not eligible: chronic condition reported")]
    Ineligible,
}

impl From<std::io::Error> for BloodBankError {
    fn from(err: std::io::Error) -> Self {
        BloodBankError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for BloodBankError {
    fn from(err: serde_json::Error) -> Self {
        BloodBankError::Storage(err.to_string())
    }
}

impl BloodBankError {
    /// True when the operation was rejected without touching state.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            BloodBankError::Validation(_) | BloodBankError::InsufficientStock { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_rule() {
        let err = BloodBankError::from(ValidationError::UnknownBloodType("XX".to_string()));
        assert!(err.to_string().contains("unknown blood type 'XX'"));

        let err = BloodBankError::InsufficientStock {
            blood_type: BloodType::ONeg,
            requested: 2500,
            available: 2000,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock: requested 2500 ml of O-, only 2000 ml available"
        );
    }

    #[test]
    fn test_rejection_classification() {
        assert!(BloodBankError::from(ValidationError::Ineligible).is_rejection());
        assert!(!BloodBankError::Storage("disk full".to_string()).is_rejection());
    }
}
