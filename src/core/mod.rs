/// Account factory: user creation, password hashing and lookups
pub mod accounts;
/// Loan offers published by lenders
pub mod advertised_loan;
/// Beneficiary contacts
pub mod beneficiary;
/// Loan disbursement
pub mod loan;
/// Money amounts and their stored minor units
pub mod money;
/// Repayment schedule generation
pub mod repayment;
/// Access/refresh token issuance
pub mod tokens;
/// Wallet transaction history
pub mod transaction_history;
