//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::{HashingConfig, JwtConfig, database},
    core::{
        accounts::{self, NewUser},
        advertised_loan::{self, NewAdvertisedLoan},
    },
    entities,
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    database::create_tables(&db).await?;
    Ok(db)
}

/// Argon2 parameters cheap enough for tests.
#[must_use]
pub const fn test_hashing_config() -> HashingConfig {
    HashingConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    }
}

/// Token settings with a fixed 32-byte secret and default lifetimes.
#[must_use]
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig::new("0123456789abcdef0123456789abcdef")
}

/// Creates a standard user without a password.
///
/// # Defaults
/// * `email`: `user<phone_number>@example.com`
pub async fn create_test_user(
    db: &DatabaseConnection,
    phone_number: &str,
) -> Result<entities::user::Model> {
    accounts::create_user(
        db,
        &test_hashing_config(),
        NewUser {
            phone_number: Some(phone_number.to_string()),
            email: Some(format!("user{phone_number}@example.com")),
            ..Default::default()
        },
    )
    .await
}

/// Creates a loan offer of 1000.00 with no interest.
pub async fn create_test_advertised_loan(
    db: &DatabaseConnection,
    lender_id: i64,
    period: i32,
    times_to_pay: i32,
) -> Result<entities::advertised_loan::Model> {
    advertised_loan::create_advertised_loan(
        db,
        NewAdvertisedLoan {
            lender_id,
            initial_amount: Decimal::new(100_000, 2),
            interest: None,
            period,
            times_to_pay,
        },
    )
    .await
}

/// Sets up a database with one lender and one offer.
/// Returns (db, lender, offer).
pub async fn setup_with_advertised_loan(
    period: i32,
    times_to_pay: i32,
) -> Result<(
    DatabaseConnection,
    entities::user::Model,
    entities::advertised_loan::Model,
)> {
    let db = setup_test_db().await?;
    let lender = create_test_user(&db, "+2348000000001").await?;
    let offer = create_test_advertised_loan(&db, lender.id, period, times_to_pay).await?;
    Ok((db, lender, offer))
}
