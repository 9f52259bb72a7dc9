//! Unified error type for the lending data layer.
//!
//! Every service returns [`Result`], and nothing is retried internally: validation
//! failures, missing records and storage errors all surface to the caller as-is.

use rust_decimal::Decimal;
use thiserror::Error;

/// All failures the crate can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Any error reported by the storage layer
    #[error("Database error: {0}")]
    Database(String),

    /// A required field was absent or blank
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },

    /// Superuser creation was attempted without a password
    #[error("Password should not be none")]
    MissingPassword,

    /// A unique user field is already taken
    #[error("A user with this {field} already exists")]
    UserAlreadyExists {
        /// Name of the conflicting field
        field: &'static str,
    },

    /// No user with the given id
    #[error("User not found: {id}")]
    UserNotFound {
        /// Requested user id
        id: i64,
    },

    /// No advertised loan with the given id
    #[error("Advertised loan not found: {id}")]
    AdvertisedLoanNotFound {
        /// Requested advertised loan id
        id: i64,
    },

    /// No loan with the given id
    #[error("Loan not found: {id}")]
    LoanNotFound {
        /// Requested loan id
        id: i64,
    },

    /// Installment count must be at least one
    #[error("Invalid installment count: {times_to_pay} (must be at least 1)")]
    InvalidInstallmentCount {
        /// The rejected installment count
        times_to_pay: i32,
    },

    /// Repayment period out of range
    #[error("Invalid repayment period: {period} days")]
    InvalidPeriod {
        /// The rejected period in days
        period: i32,
    },

    /// Money amount out of range for the operation
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// The loan already has a repayment schedule
    #[error("Repayment schedule already exists for loan {loan_id}")]
    ScheduleAlreadyExists {
        /// Loan whose schedule was requested again
        loan_id: i64,
    },

    /// Password hashing or hash parsing failed
    #[error("Password hashing error: {message}")]
    PasswordHash {
        /// Underlying hasher message
        message: String,
    },

    /// Token encoding or verification failed
    #[error("Token error: {message}")]
    Token {
        /// Underlying token library message
        message: String,
    },
}

impl From<sea_orm::DbErr> for Error {
    fn from(value: sea_orm::DbErr) -> Self {
        Self::Database(value.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        Self::Token {
            message: value.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_err_converts_to_database_variant() {
        let err: Error = sea_orm::DbErr::RecordNotFound("users".to_string()).into();
        assert!(matches!(err, Error::Database(_)));
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            Error::MissingField { field: "email" }.to_string(),
            "Missing required field: email"
        );
        assert_eq!(
            Error::InvalidInstallmentCount { times_to_pay: 0 }.to_string(),
            "Invalid installment count: 0 (must be at least 1)"
        );
    }
}
