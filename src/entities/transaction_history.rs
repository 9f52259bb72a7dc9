//! Transaction history entity - an append-only record of wallet movements.
//!
//! `agent_id` is set when a cash agent performed the movement on the user's behalf.
use super::enums::TransactionTitle;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction history database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transaction_histories")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User whose wallet moved
    pub user_id: Option<i64>,
    /// Agent who handled the movement, if any
    pub agent_id: Option<i64>,
    /// Kind of movement
    pub title: Option<TransactionTitle>,
    /// Wallet balance after the movement, in minor units
    pub remaining_balance: Option<i64>,
    /// When the entry was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `TransactionHistory` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The user whose wallet moved
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    User,
    /// The agent who handled the movement
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AgentId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Agent,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
