//! Repayment scheduling - splits a new loan into equal installments.
//!
//! A loan of amount `A` from an offer with `period = P` days and
//! `times_to_pay = N` installments gets N rows, each of `A / N`, with installment
//! `i` (1-based) due `i * P / N` days after the loan was created. Fractional days
//! are kept down to the microsecond.
//!
//! Each installment amount is `A / N` stored at two fraction digits using
//! banker's rounding. No remainder correction is applied, so when N does not
//! divide the minor units of `A` the installments sum to slightly more or less
//! than `A` (e.g. 100.00 / 3 → 3 × 33.33 = 99.99, 200.00 / 3 → 3 × 66.67 = 200.01).

use crate::{
    core::money::{self, MONEY_SCALE},
    entities::{LoanRepayment, advertised_loan, loan, loan_repayment},
    errors::{Error, Result},
};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

const MICROS_PER_DAY: i128 = 86_400_000_000;

/// One computed installment, before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installment {
    /// Amount due
    pub amount: Decimal,
    /// When it is due
    pub due_date: DateTime<Utc>,
}

/// Computes the installment plan for a loan without touching storage.
///
/// # Errors
/// * [`Error::InvalidInstallmentCount`] when `times_to_pay < 1`
/// * [`Error::InvalidPeriod`] when `period_days` is negative or the due dates
///   fall outside the representable range
pub fn plan_installments(
    amount: Decimal,
    created_at: DateTime<Utc>,
    period_days: i32,
    times_to_pay: i32,
) -> Result<Vec<Installment>> {
    if times_to_pay < 1 {
        return Err(Error::InvalidInstallmentCount { times_to_pay });
    }
    if period_days < 0 {
        return Err(Error::InvalidPeriod {
            period: period_days,
        });
    }

    let installment_amount = (amount / Decimal::from(times_to_pay))
        .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven);

    (1..=times_to_pay)
        .map(|step| -> Result<Installment> {
            // step * P / N days, scaled to microseconds before dividing
            let offset_micros = i128::from(step) * i128::from(period_days) * MICROS_PER_DAY
                / i128::from(times_to_pay);
            let due_date = i64::try_from(offset_micros)
                .ok()
                .and_then(|micros| created_at.checked_add_signed(Duration::microseconds(micros)))
                .ok_or(Error::InvalidPeriod {
                    period: period_days,
                })?;

            Ok(Installment {
                amount: installment_amount,
                due_date,
            })
        })
        .collect()
}

/// Builds and persists the repayment schedule for a freshly created loan.
///
/// Call it right after the loan row is inserted, on the same connection or
/// transaction. All installments are written in a single batch insert with
/// `is_paid = false` and no remaining balance.
///
/// # Errors
/// * [`Error::ScheduleAlreadyExists`] when the loan already has installments
/// * the errors of [`plan_installments`]
pub async fn generate_repayment_schedule<C>(
    db: &C,
    loan: &loan::Model,
    advertised_loan: &advertised_loan::Model,
) -> Result<Vec<loan_repayment::Model>>
where
    C: ConnectionTrait,
{
    let existing = LoanRepayment::find()
        .filter(loan_repayment::Column::LoanId.eq(loan.id))
        .count(db)
        .await?;
    if existing > 0 {
        return Err(Error::ScheduleAlreadyExists { loan_id: loan.id });
    }

    let plan = plan_installments(
        money::from_minor_units(loan.amount),
        loan.created_at,
        advertised_loan.period,
        advertised_loan.times_to_pay,
    )?;

    let rows = plan
        .iter()
        .map(|installment| -> Result<loan_repayment::ActiveModel> {
            Ok(loan_repayment::ActiveModel {
                loan_id: Set(loan.id),
                amount: Set(money::to_minor_units(installment.amount)?),
                date: Set(installment.due_date),
                is_paid: Set(false),
                remaining_balance: Set(None),
                ..Default::default()
            })
        })
        .collect::<Result<Vec<_>>>()?;

    LoanRepayment::insert_many(rows).exec(db).await?;
    debug!(
        loan_id = loan.id,
        installments = plan.len(),
        "Repayment schedule written"
    );

    get_repayments_for_loan(db, loan.id).await
}

/// Retrieves a loan's installments in due-date order.
pub async fn get_repayments_for_loan<C>(
    db: &C,
    loan_id: i64,
) -> Result<Vec<loan_repayment::Model>>
where
    C: ConnectionTrait,
{
    LoanRepayment::find()
        .filter(loan_repayment::Column::LoanId.eq(loan_id))
        .order_by_asc(loan_repayment::Column::Date)
        .order_by_asc(loan_repayment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
