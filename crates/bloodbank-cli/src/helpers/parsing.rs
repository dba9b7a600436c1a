use chrono::NaiveDate;

use bloodbank_core::storage::Collection;
use bloodbank_core::{validate, BloodBankError};

/// Parse a collection name (`donors`, `patients`, or singular forms).
pub fn parse_collection(value: &str) -> anyhow::Result<Collection> {
    Ok(value.parse::<Collection>().map_err(BloodBankError::from)?)
}

/// Parse a `YYYY-MM-DD` date, falling back to `today` when absent.
pub fn parse_date(value: Option<&str>, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    match value {
        Some(raw) => Ok(validate::iso_date(raw).map_err(BloodBankError::from)?),
        None => Ok(today),
    }
}
