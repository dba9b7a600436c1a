//! CLI error types for structured error handling.
//!
//! Core errors travel through `anyhow`; at exit they are downcast back so
//! each failure class gets its own exit code.

use std::fmt;

use bloodbank_core::{BloodBankError, ValidationError};

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Data file or config not found
    NotFound { message: String, hint: String },

    /// Invalid user input that never reached the core
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, .. } => write!(f, "{}", message),
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            CliError::NotFound { hint, .. } => Some(hint),
            CliError::InvalidInput(_) => None,
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }
}

/// Exit code for any error returned by a command.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    if err.downcast_ref::<ValidationError>().is_some() {
        return exit_codes::INVALID_INPUT;
    }
    match err.downcast_ref::<BloodBankError>() {
        Some(BloodBankError::InsufficientStock { .. }) => exit_codes::INSUFFICIENT_STOCK,
        Some(core) if core.is_rejection() => exit_codes::INVALID_INPUT,
        Some(_) => exit_codes::STORAGE_FAILED,
        None => 1,
    }
}

/// Contextual hint for an error, if one helps.
pub fn hint(err: &anyhow::Error) -> Option<String> {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.hint().map(str::to_string);
    }
    match err.downcast_ref::<BloodBankError>() {
        Some(BloodBankError::InsufficientStock { blood_type, .. }) => Some(format!(
            "Run `bloodbank compatibility {}` to see which donor types can substitute.",
            blood_type
        )),
        Some(BloodBankError::Validation(ValidationError::UnknownBloodType(_))) => {
            Some("Blood types are case-sensitive, e.g. `AB+` or `O-`.".to_string())
        }
        Some(BloodBankError::Corrupt(_)) => Some(
            "Set `on_corrupt = \"recover\"` under [storage] to back up the file and start fresh."
                .to_string(),
        ),
        Some(BloodBankError::InvalidDocument(_)) => Some(
            "Correct the field named above by hand; the file has not been changed.".to_string(),
        ),
        _ => None,
    }
}
