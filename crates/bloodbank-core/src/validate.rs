//! Per-field input validation.
//!
//! Each function checks one field and returns either the typed value or the
//! specific rule it broke. Nothing here knows about prompts or flags, so the
//! CLI and tests share the same boundary.

use std::ops::RangeInclusive;

use chrono::NaiveDate;

use crate::blood_type::BloodType;
use crate::error::ValidationError;
use crate::storage::types::Identity;

/// Allowed single-donation volume, in ml.
pub const DONATION_RANGE_ML: RangeInclusive<u64> = 50..=500;

/// Allowed age for donors, patients and staff.
pub const AGE_RANGE: RangeInclusive<u32> = 18..=65;

type Result<T> = std::result::Result<T, ValidationError>;

pub fn blood_type(code: &str) -> Result<BloodType> {
    code.parse()
}

/// Any amount greater than zero.
pub fn positive_amount(amount: i64) -> Result<u64> {
    if amount <= 0 {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    Ok(amount as u64)
}

/// A single donation, within [`DONATION_RANGE_ML`].
pub fn donation_amount(amount: i64) -> Result<u64> {
    let out_of_range = ValidationError::DonationAmountOutOfRange {
        min: *DONATION_RANGE_ML.start(),
        max: *DONATION_RANGE_ML.end(),
        got: amount,
    };
    let amount = u64::try_from(amount).map_err(|_| out_of_range.clone())?;
    if !DONATION_RANGE_ML.contains(&amount) {
        return Err(out_of_range);
    }
    Ok(amount)
}

/// A real calendar date from its parts (rejects e.g. February 30).
/// A `YYYY-MM-DD` date.
pub fn iso_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidDate(format!("{} (expected YYYY-MM-DD)", value.trim()))
    })
}

pub fn age(age: u32) -> Result<u32> {
    if !AGE_RANGE.contains(&age) {
        return Err(ValidationError::AgeOutOfRange {
            min: *AGE_RANGE.start(),
            max: *AGE_RANGE.end(),
            got: age,
        });
    }
    Ok(age)
}

/// A non-blank text field, trimmed.
pub fn required(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Check and normalize identity fields: name and email are required, age
/// must be in range, phone is trimmed but may be blank.
pub fn identity(identity: Identity) -> Result<Identity> {
    Ok(Identity {
        name: required("name", &identity.name)?,
        email: required("email", &identity.email)?,
        age: age(identity.age)?,
        id: identity.id,
        phone: identity.phone.trim().to_string(),
    })
}

/// Normalize a search term: trimmed, lowercased, non-empty.
pub fn search_term(term: &str) -> Result<String> {
    let normalized = term.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(ValidationError::EmptySearchTerm);
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_amount() {
        assert_eq!(positive_amount(1), Ok(1));
        assert_eq!(positive_amount(0), Err(ValidationError::NonPositiveAmount(0)));
        assert_eq!(positive_amount(-5), Err(ValidationError::NonPositiveAmount(-5)));
    }

    #[test]
    fn test_donation_amount_bounds_are_inclusive() {
        assert_eq!(donation_amount(50), Ok(50));
        assert_eq!(donation_amount(500), Ok(500));
        assert!(donation_amount(49).is_err());
        assert!(donation_amount(501).is_err());
        assert!(matches!(
            donation_amount(-10),
            Err(ValidationError::DonationAmountOutOfRange { got: -10, .. })
        ));
    }

    #[test]
    fn test_iso_date() {
        assert!(iso_date("2024-02-29").is_ok());
        assert!(iso_date("2025-02-29").is_err());
        assert!(iso_date("2025-13-01").is_err());
        assert!(iso_date("2025-04-31").is_err());
        assert_eq!(
            iso_date(" 2025-04-30 ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 30).unwrap()
        );
    }

    #[test]
    fn test_identity_normalizes_and_checks() {
        let ok = identity(Identity {
            name: "  Grace ".to_string(),
            email: "grace@example.com".to_string(),
            age: 40,
            id: 12,
            phone: " 555 ".to_string(),
        })
        .unwrap();
        assert_eq!(ok.name, "Grace");
        assert_eq!(ok.phone, "555");

        let young = identity(Identity { age: 17, ..ok.clone() });
        assert!(matches!(young, Err(ValidationError::AgeOutOfRange { got: 17, .. })));

        let nameless = identity(Identity {
            name: " ".to_string(),
            ..ok
        });
        assert_eq!(nameless, Err(ValidationError::MissingField("name")));
    }

    #[test]
    fn test_search_term() {
        assert_eq!(search_term("  AB+ "), Ok("ab+".to_string()));
        assert_eq!(search_term("   "), Err(ValidationError::EmptySearchTerm));
    }
}
