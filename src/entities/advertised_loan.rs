//! Advertised loan entity - a lender's loan offer template.
//!
//! `period` is the number of days repayments are spread over and `times_to_pay`
//! the number of installments; every loan disbursed from an offer inherits both.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Advertised loan database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "advertised_loans")]
pub struct Model {
    /// Unique identifier for the offer
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Lender who advertised the offer; cleared if the lender is deleted
    pub user_id: Option<i64>,
    /// Amount originally offered, in minor units
    pub initial_amount: Option<i64>,
    /// Amount still available to borrowers, in minor units
    pub total_amount_remaining: Option<i64>,
    /// Interest as quoted by the lender, in hundredths
    pub interest: Option<i64>,
    /// Number of days over which repayments are spread
    pub period: i32,
    /// Whether the offer is still open
    pub is_active: bool,
    /// When the offer was created
    pub created_at: DateTimeUtc,
    /// Number of repayment installments
    pub times_to_pay: i32,
}

/// Defines relationships between `AdvertisedLoan` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each offer belongs to one lender
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Lender,
    /// One offer is disbursed as many loans
    #[sea_orm(has_many = "super::loan::Entity")]
    Loans,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lender.def()
    }
}

impl Related<super::loan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loans.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
