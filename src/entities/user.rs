//! User entity - identity, wallet balance and verification details.
//!
//! The phone number is the login identifier and is unique; the email is unique
//! when present. Passwords are stored only as argon2id PHC strings, and a `None`
//! hash marks an account that cannot log in with a password.

use super::enums::VerifyIdKind;
use chrono::Utc;
use sea_orm::{Set, entity::prelude::*};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Given name
    #[sea_orm(column_type = "String(StringLen::N(50))", nullable)]
    pub first_name: Option<String>,
    /// Family name
    #[sea_orm(column_type = "String(StringLen::N(50))", nullable)]
    pub last_name: Option<String>,
    /// Normalized email address, unique when present
    #[sea_orm(unique, nullable)]
    pub email: Option<String>,
    /// Phone number used as the login identifier
    #[sea_orm(unique)]
    pub phone_number: String,
    /// Argon2id hash of the password; `None` when no usable password is set
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Wallet balance in minor units
    pub wallet: i64,
    /// One-time passcode sent for phone verification
    #[sea_orm(column_type = "String(StringLen::N(4))")]
    pub otp: String,
    /// Last known latitude
    pub location_lat: Option<f64>,
    /// Last known longitude
    pub location_long: Option<f64>,
    /// Home address
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,
    /// Credit score, maintained by an external collaborator
    pub credit_score: i32,
    /// Storage reference of the uploaded identity document
    pub verify_id: Option<String>,
    /// Kind of identity document uploaded
    pub verify_id_name: Option<VerifyIdKind>,
    /// National identification number
    pub nin: Option<String>,
    /// Bank verification number
    pub bvn: Option<String>,
    /// When the account was created
    pub date_joined: DateTimeUtc,
    /// When the account was last modified
    pub modified_date: DateTimeUtc,
    /// Administrative access flag
    pub is_admin: bool,
    /// Cash agent flag
    pub is_agent: bool,
    /// Staff access flag
    pub is_staff: bool,
    /// Inactive accounts are kept but cannot be used
    pub is_active: bool,
    /// Holds every permission
    pub is_superuser: bool,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user has many beneficiary contacts
    #[sea_orm(has_many = "super::beneficiary_contact::Entity")]
    BeneficiaryContacts,
    /// One user advertises many loan offers
    #[sea_orm(has_many = "super::advertised_loan::Entity")]
    AdvertisedLoans,
    /// One user receives many loans
    #[sea_orm(has_many = "super::loan::Entity")]
    Loans,
}

impl Related<super::beneficiary_contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BeneficiaryContacts.def()
    }
}

impl Related<super::advertised_loan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdvertisedLoans.def()
    }
}

impl Related<super::loan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loans.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Stamps `modified_date` on every update; inserts keep the value they were built with.
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.modified_date = Set(Utc::now());
        }
        Ok(self)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.email {
            Some(email) => write!(f, "{} - {}", self.phone_number, email),
            None => write!(f, "{} - None", self.phone_number),
        }
    }
}
