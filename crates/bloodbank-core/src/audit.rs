//! Audit log entries.
//!
//! Every mutating operation, and every search, history view and report,
//! leaves one human-readable line in the document's `logs` collection:
//! `"<YYYY-MM-DD HH:MM:SS> - <message>"`, local time, second precision.

use std::fmt;

use chrono::NaiveDateTime;

use crate::blood_type::BloodType;
use crate::storage::types::{Collection, Document};

/// Timestamp layout used at the start of every log line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SEPARATOR: &str = " - ";

/// Something worth recording in the audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditEvent {
    Credited {
        blood_type: BloodType,
        amount: u64,
        total: u64,
    },
    Debited {
        blood_type: BloodType,
        amount: u64,
        remaining: u64,
    },
    StaffRegistered {
        name: String,
        id: u64,
    },
    Searched {
        term: String,
        collection: Collection,
        found: usize,
    },
    HistoryViewed {
        collection: Collection,
    },
    ReportGenerated,
    Recovered {
        backup: String,
    },
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditEvent::Credited {
                blood_type,
                amount,
                total,
            } => write!(f, "Added {}ml to {} (new: {} ml)", amount, blood_type, total),
            AuditEvent::Debited {
                blood_type,
                amount,
                remaining,
            } => write!(
                f,
                "Removed {}ml from {} (remaining: {} ml)",
                amount, blood_type, remaining
            ),
            AuditEvent::StaffRegistered { name, id } => {
                write!(f, "Staff entry: {} (ID: {})", name, id)
            }
            AuditEvent::Searched {
                term,
                collection,
                found,
            } => write!(
                f,
                "Search performed for '{}' in {}. Found {} records.",
                term, collection, found
            ),
            AuditEvent::HistoryViewed { collection } => {
                write!(f, "Viewed {} transaction history.", collection)
            }
            AuditEvent::ReportGenerated => f.write_str("Generated comprehensive reports."),
            AuditEvent::Recovered { backup } => {
                write!(f, "Recovered from unreadable data file (backup: {})", backup)
            }
        }
    }
}

/// Render one log line.
pub fn format_entry(at: NaiveDateTime, message: &str) -> String {
    format!("{}{}{}", at.format(TIMESTAMP_FORMAT), SEPARATOR, message)
}

/// A log line split back into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry<'a> {
    /// `None` when the line does not start with a parseable timestamp
    pub timestamp: Option<NaiveDateTime>,
    pub message: &'a str,
}

impl<'a> AuditEntry<'a> {
    /// Split a stored line. Lines written by other tools (for example with
    /// fractional seconds) are tolerated; anything unparseable keeps the whole
    /// line as the message.
    pub fn parse(line: &'a str) -> Self {
        if let Some((stamp, message)) = line.split_once(SEPARATOR) {
            let parsed = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT)
                .or_else(|_| NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S%.f"));
            if let Ok(timestamp) = parsed {
                return Self {
                    timestamp: Some(timestamp),
                    message,
                };
            }
        }
        Self {
            timestamp: None,
            message: line,
        }
    }
}

impl Document {
    /// Append a log line in memory. Persisting is the caller's job.
    pub(crate) fn push_log(&mut self, at: NaiveDateTime, message: &str) {
        self.logs.push(format_entry(at, message));
    }

    pub(crate) fn record_event(&mut self, at: NaiveDateTime, event: &AuditEvent) {
        self.push_log(at, &event.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(9, 26, 53)
            .unwrap()
    }

    #[test]
    fn test_message_templates() {
        let credited = AuditEvent::Credited {
            blood_type: BloodType::APos,
            amount: 450,
            total: 2450,
        };
        assert_eq!(credited.to_string(), "Added 450ml to A+ (new: 2450 ml)");

        let debited = AuditEvent::Debited {
            blood_type: BloodType::ONeg,
            amount: 2000,
            remaining: 0,
        };
        assert_eq!(debited.to_string(), "Removed 2000ml from O- (remaining: 0 ml)");

        let searched = AuditEvent::Searched {
            term: "ada".to_string(),
            collection: Collection::Donors,
            found: 2,
        };
        assert_eq!(
            searched.to_string(),
            "Search performed for 'ada' in donors. Found 2 records."
        );
    }

    #[test]
    fn test_format_and_parse_entry() {
        let line = format_entry(at(), "Generated comprehensive reports.");
        assert_eq!(line, "2025-03-14 09:26:53 - Generated comprehensive reports.");

        let entry = AuditEntry::parse(&line);
        assert_eq!(entry.timestamp, Some(at()));
        assert_eq!(entry.message, "Generated comprehensive reports.");
    }

    #[test]
    fn test_parse_tolerates_foreign_lines() {
        let entry = AuditEntry::parse("free text - with a dash");
        assert_eq!(entry.timestamp, None);
        assert_eq!(entry.message, "free text - with a dash");
    }
}
