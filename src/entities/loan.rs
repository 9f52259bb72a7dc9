//! Loan entity - one disbursement of an advertised loan to a borrower.
//! Loans are never updated after creation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Loan database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "loans")]
pub struct Model {
    /// Unique identifier for the loan
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Offer this loan was disbursed from
    pub advertised_loan_id: Option<i64>,
    /// Borrower
    pub receiving_user_id: Option<i64>,
    /// Disbursed amount in minor units
    pub amount: i64,
    /// When the loan was created; installment due dates count from here
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Loan and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each loan comes from one advertised loan
    #[sea_orm(
        belongs_to = "super::advertised_loan::Entity",
        from = "Column::AdvertisedLoanId",
        to = "super::advertised_loan::Column::Id",
        on_delete = "SetNull"
    )]
    AdvertisedLoan,
    /// Each loan is received by one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReceivingUserId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    ReceivingUser,
    /// One loan has many repayment installments
    #[sea_orm(has_many = "super::loan_repayment::Entity")]
    Repayments,
}

impl Related<super::advertised_loan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdvertisedLoan.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReceivingUser.def()
    }
}

impl Related<super::loan_repayment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Repayments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
