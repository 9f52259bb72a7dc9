//! Beneficiary contacts - people a user regularly sends money to.

use crate::{
    entities::{BeneficiaryContact, User, VerifyIdKind, beneficiary_contact},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Input for [`add_beneficiary`]
#[derive(Debug, Clone, Default)]
pub struct NewBeneficiary {
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Bank verification number
    pub bvn: Option<String>,
    /// Storage reference of an uploaded identity document
    pub verify_id: Option<String>,
    /// Kind of identity document
    pub verify_id_name: Option<VerifyIdKind>,
}

/// Saves a beneficiary contact for `user_id`.
pub async fn add_beneficiary(
    db: &DatabaseConnection,
    user_id: i64,
    contact: NewBeneficiary,
) -> Result<beneficiary_contact::Model> {
    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })?;

    let model = beneficiary_contact::ActiveModel {
        user_id: Set(user_id),
        first_name: Set(contact.first_name),
        last_name: Set(contact.last_name),
        bvn: Set(contact.bvn),
        verify_id: Set(contact.verify_id),
        verify_id_name: Set(contact.verify_id_name),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(user_id, beneficiary_id = model.id, "Beneficiary added");
    Ok(model)
}

/// Lists a user's contacts in the order they were added.
pub async fn get_beneficiaries_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<beneficiary_contact::Model>> {
    BeneficiaryContact::find()
        .filter(beneficiary_contact::Column::UserId.eq(user_id))
        .order_by_asc(beneficiary_contact::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_add_and_list_beneficiaries() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "+2348000000001").await?;
        let other = create_test_user(&db, "+2348000000002").await?;

        let contact = add_beneficiary(
            &db,
            owner.id,
            NewBeneficiary {
                first_name: Some("Chidi".to_string()),
                bvn: Some("22212345678".to_string()),
                verify_id_name: Some(VerifyIdKind::Nin),
                ..Default::default()
            },
        )
        .await?;
        add_beneficiary(&db, other.id, NewBeneficiary::default()).await?;

        let contacts = get_beneficiaries_for_user(&db, owner.id).await?;
        assert_eq!(contacts, vec![contact]);
        assert_eq!(contacts[0].verify_id_name, Some(VerifyIdKind::Nin));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_owner_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let result = add_beneficiary(&db, 42, NewBeneficiary::default()).await;
        assert!(matches!(result, Err(Error::UserNotFound { id: 42 })));
        Ok(())
    }
}
