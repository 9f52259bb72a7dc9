//! Loan repayment entity - one scheduled installment of a loan.
//!
//! Rows are written in a single batch when the loan is created and are never
//! regenerated afterwards.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Loan repayment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "loan_repayments")]
pub struct Model {
    /// Unique identifier for the installment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Loan this installment belongs to; removed with the loan
    pub loan_id: i64,
    /// Installment amount in minor units
    pub amount: i64,
    /// Due date
    pub date: DateTimeUtc,
    /// Whether the installment has been paid
    pub is_paid: bool,
    /// Outstanding balance after this installment, unset until paid
    pub remaining_balance: Option<i64>,
}

/// Defines relationships between `LoanRepayment` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each installment belongs to one loan
    #[sea_orm(
        belongs_to = "super::loan::Entity",
        from = "Column::LoanId",
        to = "super::loan::Column::Id",
        on_delete = "Cascade"
    )]
    Loan,
}

impl Related<super::loan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
