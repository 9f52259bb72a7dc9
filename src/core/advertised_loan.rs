//! Advertised loan business logic - lenders publishing loan offers.
//!
//! Offers are checked here so a zero installment count can never reach the
//! repayment scheduler through a newly created offer.

use crate::{
    core::money,
    entities::{AdvertisedLoan, User, advertised_loan},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Input for [`create_advertised_loan`]
#[derive(Debug, Clone)]
pub struct NewAdvertisedLoan {
    /// Lender publishing the offer
    pub lender_id: i64,
    /// Amount on offer
    pub initial_amount: Decimal,
    /// Quoted interest, if any
    pub interest: Option<Decimal>,
    /// Days over which repayments are spread
    pub period: i32,
    /// Number of repayment installments
    pub times_to_pay: i32,
}

/// Publishes a loan offer. The remaining amount starts equal to the initial one.
///
/// # Errors
/// * [`Error::InvalidInstallmentCount`] when `times_to_pay < 1`
/// * [`Error::InvalidPeriod`] when `period` is negative
/// * [`Error::InvalidAmount`] when the amount or interest is negative or has
///   more than two fraction digits
/// * [`Error::UserNotFound`] when the lender does not exist
pub async fn create_advertised_loan(
    db: &DatabaseConnection,
    offer: NewAdvertisedLoan,
) -> Result<advertised_loan::Model> {
    if offer.times_to_pay < 1 {
        return Err(Error::InvalidInstallmentCount {
            times_to_pay: offer.times_to_pay,
        });
    }
    if offer.period < 0 {
        return Err(Error::InvalidPeriod {
            period: offer.period,
        });
    }
    if offer.initial_amount.is_sign_negative() {
        return Err(Error::InvalidAmount {
            amount: offer.initial_amount,
        });
    }
    if let Some(interest) = offer.interest.filter(Decimal::is_sign_negative) {
        return Err(Error::InvalidAmount { amount: interest });
    }

    let initial_amount = money::to_minor_units(offer.initial_amount)?;
    let interest = money::to_optional_minor_units(offer.interest)?;

    User::find_by_id(offer.lender_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound {
            id: offer.lender_id,
        })?;

    let model = advertised_loan::ActiveModel {
        user_id: Set(Some(offer.lender_id)),
        initial_amount: Set(Some(initial_amount)),
        total_amount_remaining: Set(Some(initial_amount)),
        interest: Set(interest),
        period: Set(offer.period),
        is_active: Set(true),
        created_at: Set(chrono::Utc::now()),
        times_to_pay: Set(offer.times_to_pay),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        advertised_loan_id = model.id,
        lender_id = offer.lender_id,
        period = model.period,
        times_to_pay = model.times_to_pay,
        "Loan offer published"
    );
    Ok(model)
}

/// Finds an offer by id.
pub async fn get_advertised_loan_by_id(
    db: &DatabaseConnection,
    advertised_loan_id: i64,
) -> Result<Option<advertised_loan::Model>> {
    AdvertisedLoan::find_by_id(advertised_loan_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists open offers, newest first.
pub async fn get_active_advertised_loans(
    db: &DatabaseConnection,
) -> Result<Vec<advertised_loan::Model>> {
    AdvertisedLoan::find()
        .filter(advertised_loan::Column::IsActive.eq(true))
        .order_by_desc(advertised_loan::Column::CreatedAt)
        .order_by_desc(advertised_loan::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
