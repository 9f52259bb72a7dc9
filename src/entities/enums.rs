//! String-backed enumerations shared by several entities.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of identity document a user or beneficiary was verified with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerifyIdKind {
    /// Driver's license
    #[sea_orm(string_value = "DRIVERS_LICENCE")]
    DriversLicence,
    /// National identification number slip
    #[sea_orm(string_value = "NIN")]
    Nin,
    /// Voter's card
    #[sea_orm(string_value = "VOTERS_CARD")]
    VotersCard,
}

/// Category of a transaction history entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionTitle {
    /// Money left the wallet to an external destination
    #[sea_orm(string_value = "WITHDRAWAL")]
    Withdrawal,
    /// Money entered the wallet
    #[sea_orm(string_value = "DEPOSIT")]
    Deposit,
    /// Wallet-to-wallet transfer
    #[sea_orm(string_value = "TRANSFER")]
    Transfer,
    /// Payment towards a loan installment
    #[sea_orm(string_value = "LOAN_REPAYMENT")]
    LoanRepayment,
}
