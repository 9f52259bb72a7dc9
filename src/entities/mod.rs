//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod advertised_loan;
pub mod beneficiary_contact;
pub mod enums;
pub mod loan;
pub mod loan_repayment;
pub mod transaction_history;
pub mod user;

// Re-export specific types to avoid conflicts
pub use advertised_loan::{
    Column as AdvertisedLoanColumn, Entity as AdvertisedLoan, Model as AdvertisedLoanModel,
};
pub use beneficiary_contact::{
    Column as BeneficiaryContactColumn, Entity as BeneficiaryContact,
    Model as BeneficiaryContactModel,
};
pub use enums::{TransactionTitle, VerifyIdKind};
pub use loan::{Column as LoanColumn, Entity as Loan, Model as LoanModel};
pub use loan_repayment::{
    Column as LoanRepaymentColumn, Entity as LoanRepayment, Model as LoanRepaymentModel,
};
pub use transaction_history::{
    Column as TransactionHistoryColumn, Entity as TransactionHistory,
    Model as TransactionHistoryModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
