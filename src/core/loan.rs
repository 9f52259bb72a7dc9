//! Loan business logic - disbursing advertised loans to borrowers.
//!
//! Creating a loan always creates its repayment schedule: both writes happen in
//! one database transaction, so a loan is never visible without its
//! installments.

use crate::{
    core::{money, repayment},
    entities::{AdvertisedLoan, Loan, User, loan, loan_repayment},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::info;

/// A newly created loan together with its repayment schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLoan {
    /// The loan row
    pub loan: loan::Model,
    /// Its installments in due-date order
    pub repayments: Vec<loan_repayment::Model>,
}

/// Disburses `amount` from an advertised loan to a borrower and schedules the
/// repayments.
///
/// # Errors
/// * [`Error::InvalidAmount`] when `amount` is not positive or has more than
///   two fraction digits
/// * [`Error::AdvertisedLoanNotFound`] / [`Error::UserNotFound`] for unknown ids
/// * [`Error::InvalidInstallmentCount`] when the offer has no installments; the
///   loan is rolled back in that case
pub async fn create_loan(
    db: &DatabaseConnection,
    advertised_loan_id: i64,
    receiving_user_id: i64,
    amount: Decimal,
) -> Result<CreatedLoan> {
    if amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount { amount });
    }
    // Stored exactly, so the schedule is planned from the caller's amount
    let amount_minor = money::to_minor_units(amount)?;

    // Use a transaction so the loan and its schedule land together
    let txn = db.begin().await?;

    let advertised_loan = AdvertisedLoan::find_by_id(advertised_loan_id)
        .one(&txn)
        .await?
        .ok_or(Error::AdvertisedLoanNotFound {
            id: advertised_loan_id,
        })?;

    User::find_by_id(receiving_user_id)
        .one(&txn)
        .await?
        .ok_or(Error::UserNotFound {
            id: receiving_user_id,
        })?;

    let loan = loan::ActiveModel {
        advertised_loan_id: Set(Some(advertised_loan_id)),
        receiving_user_id: Set(Some(receiving_user_id)),
        amount: Set(amount_minor),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let repayments = repayment::generate_repayment_schedule(&txn, &loan, &advertised_loan).await?;

    txn.commit().await?;

    info!(
        loan_id = loan.id,
        advertised_loan_id,
        receiving_user_id,
        %amount,
        installments = repayments.len(),
        "Loan created"
    );
    Ok(CreatedLoan { loan, repayments })
}

/// Finds a loan by id.
pub async fn get_loan_by_id(db: &DatabaseConnection, loan_id: i64) -> Result<Option<loan::Model>> {
    Loan::find_by_id(loan_id).one(db).await.map_err(Into::into)
}

/// Lists the loans a user has received, newest first.
pub async fn get_loans_for_user(
    db: &DatabaseConnection,
    receiving_user_id: i64,
) -> Result<Vec<loan::Model>> {
    Loan::find()
        .filter(loan::Column::ReceivingUserId.eq(receiving_user_id))
        .order_by_desc(loan::Column::CreatedAt)
        .order_by_desc(loan::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::repayment::{get_repayments_for_loan, plan_installments};
    use crate::entities::{LoanRepayment, advertised_loan};
    use crate::test_utils::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_loan_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_loan(&db, 1, 1, Decimal::ZERO).await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: _ })));

        let result = create_loan(&db, 1, 1, dec!(-10.00)).await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: _ })));

        let result = create_loan(&db, 1, 1, dec!(10.001)).await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: _ })));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_loan_generates_schedule() -> Result<()> {
        let (db, _lender, offer) = setup_with_advertised_loan(30, 3).await?;
        let borrower = create_test_user(&db, "+2348000000002").await?;

        let created = create_loan(&db, offer.id, borrower.id, dec!(300.00)).await?;

        assert_eq!(created.loan.advertised_loan_id, Some(offer.id));
        assert_eq!(created.loan.receiving_user_id, Some(borrower.id));
        assert_eq!(created.loan.amount, 30_000);
        assert_eq!(created.repayments.len(), 3);
        for (index, repayment) in created.repayments.iter().enumerate() {
            let step = i64::try_from(index).unwrap() + 1;
            assert_eq!(repayment.loan_id, created.loan.id);
            assert_eq!(repayment.amount, 10_000);
            assert_eq!(
                repayment.date,
                created.loan.created_at + Duration::days(10 * step)
            );
            assert!(!repayment.is_paid);
            assert!(repayment.remaining_balance.is_none());
        }

        let stored = get_repayments_for_loan(&db, created.loan.id).await?;
        assert_eq!(stored, created.repayments);
        Ok(())
    }

    #[tokio::test]
    async fn test_each_loan_gets_its_own_schedule() -> Result<()> {
        let (db, _lender, offer) = setup_with_advertised_loan(28, 4).await?;
        let borrower = create_test_user(&db, "+2348000000002").await?;

        let first = create_loan(&db, offer.id, borrower.id, dec!(400.00)).await?;
        let second = create_loan(&db, offer.id, borrower.id, dec!(80.00)).await?;

        assert_eq!(LoanRepayment::find().all(&db).await?.len(), 8);
        assert!(first.repayments.iter().all(|r| r.loan_id == first.loan.id));
        assert!(
            second
                .repayments
                .iter()
                .all(|r| money::from_minor_units(r.amount) == dec!(20.00))
        );

        let loans = get_loans_for_user(&db, borrower.id).await?;
        assert_eq!(loans.len(), 2);
        assert_eq!(get_loan_by_id(&db, first.loan.id).await?, Some(first.loan));
        Ok(())
    }

    #[tokio::test]
    async fn test_large_loan_schedule_matches_plan() -> Result<()> {
        let (db, _lender, offer) = setup_with_advertised_loan(30, 3).await?;
        let borrower = create_test_user(&db, "+2348000000002").await?;
        let amount = dec!(123456789012345.67);

        let created = create_loan(&db, offer.id, borrower.id, amount).await?;

        let stored_loan = get_loan_by_id(&db, created.loan.id).await?.unwrap();
        assert_eq!(money::from_minor_units(stored_loan.amount), amount);

        let plan = plan_installments(amount, created.loan.created_at, 30, 3)?;
        let stored = get_repayments_for_loan(&db, created.loan.id).await?;
        assert_eq!(stored.len(), plan.len());
        for (repayment, installment) in stored.iter().zip(&plan) {
            assert_eq!(money::from_minor_units(repayment.amount), installment.amount);
            assert_eq!(repayment.amount, 4_115_226_300_411_522);
            assert_eq!(repayment.date, installment.due_date);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_references_rejected() -> Result<()> {
        let (db, lender, offer) = setup_with_advertised_loan(30, 3).await?;

        let result = create_loan(&db, 999, lender.id, dec!(10.00)).await;
        assert!(matches!(
            result,
            Err(Error::AdvertisedLoanNotFound { id: 999 })
        ));

        let result = create_loan(&db, offer.id, 999, dec!(10.00)).await;
        assert!(matches!(result, Err(Error::UserNotFound { id: 999 })));

        assert!(Loan::find().all(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_zero_installment_offer_rolls_back_loan() -> Result<()> {
        let (db, lender, offer) = setup_with_advertised_loan(30, 3).await?;

        // Simulate a legacy row that bypassed offer validation
        let mut broken: advertised_loan::ActiveModel = offer.into();
        broken.times_to_pay = Set(0);
        let broken = broken.update(&db).await?;

        let result = create_loan(&db, broken.id, lender.id, dec!(300.00)).await;

        assert!(matches!(
            result,
            Err(Error::InvalidInstallmentCount { times_to_pay: 0 })
        ));
        assert!(Loan::find().all(&db).await?.is_empty());
        assert!(LoanRepayment::find().all(&db).await?.is_empty());
        Ok(())
    }
}
