//! Beneficiary contact entity - people a user sends money to.

use super::enums::VerifyIdKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Beneficiary contact database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "beneficiary_contacts")]
pub struct Model {
    /// Unique identifier for the contact
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owner of the contact; contacts are removed with their owner
    pub user_id: i64,
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Bank verification number
    pub bvn: Option<String>,
    /// Storage reference of the uploaded identity document
    pub verify_id: Option<String>,
    /// Kind of identity document uploaded
    pub verify_id_name: Option<VerifyIdKind>,
}

/// Defines relationships between `BeneficiaryContact` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each contact belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
