//! Transaction history - append-only log of wallet movements.

use crate::{
    core::money,
    entities::{TransactionHistory, TransactionTitle, transaction_history},
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// Input for [`record_transaction`]
#[derive(Debug, Clone)]
pub struct NewTransactionRecord {
    /// User whose wallet moved
    pub user_id: Option<i64>,
    /// Agent who handled the movement
    pub agent_id: Option<i64>,
    /// Kind of movement
    pub title: TransactionTitle,
    /// Wallet balance after the movement
    pub remaining_balance: Option<Decimal>,
}

/// Appends an entry to the history.
///
/// # Errors
/// [`Error::InvalidAmount`](crate::errors::Error::InvalidAmount) when the balance
/// has more than two fraction digits.
pub async fn record_transaction(
    db: &DatabaseConnection,
    record: NewTransactionRecord,
) -> Result<transaction_history::Model> {
    let remaining_balance = money::to_optional_minor_units(record.remaining_balance)?;

    let model = transaction_history::ActiveModel {
        user_id: Set(record.user_id),
        agent_id: Set(record.agent_id),
        title: Set(Some(record.title)),
        remaining_balance: Set(remaining_balance),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    debug!(entry_id = model.id, title = ?record.title, "Transaction recorded");
    Ok(model)
}

/// Lists a user's history, newest first.
pub async fn get_transaction_history_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<transaction_history::Model>> {
    TransactionHistory::find()
        .filter(transaction_history::Column::UserId.eq(user_id))
        .order_by_desc(transaction_history::Column::CreatedAt)
        .order_by_desc(transaction_history::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_history_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "+2348000000001").await?;
        let agent = create_test_user(&db, "+2348000000002").await?;

        let deposit = record_transaction(
            &db,
            NewTransactionRecord {
                user_id: Some(user.id),
                agent_id: Some(agent.id),
                title: TransactionTitle::Deposit,
                remaining_balance: Some(dec!(500.00)),
            },
        )
        .await?;
        let repayment = record_transaction(
            &db,
            NewTransactionRecord {
                user_id: Some(user.id),
                agent_id: None,
                title: TransactionTitle::LoanRepayment,
                remaining_balance: Some(dec!(400.00)),
            },
        )
        .await?;

        let history = get_transaction_history_for_user(&db, user.id).await?;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, repayment.id);
        assert_eq!(history[0].title, Some(TransactionTitle::LoanRepayment));
        assert_eq!(history[1].id, deposit.id);
        assert_eq!(history[1].agent_id, Some(agent.id));
        assert_eq!(
            history[1].remaining_balance.map(money::from_minor_units),
            Some(dec!(500.00))
        );

        assert!(get_transaction_history_for_user(&db, agent.id).await?.is_empty());
        Ok(())
    }
}
