//! Destructive bulk reset used by test setup and the seed binary.

use sea_orm::{DbConn, DbErr, EntityTrait, TransactionTrait};

use quill_core::error::RepoError;

use super::entity::{comment, post, user};

/// Delete every comment, post and user in one transaction.
///
/// The order matters: children go before parents so the foreign keys
/// never dangle mid-transaction.
pub async fn clear_all(db: &DbConn) -> Result<(), RepoError> {
    db.transaction::<_, (), DbErr>(|txn| {
        Box::pin(async move {
            comment::Entity::delete_many().exec(txn).await?;
            post::Entity::delete_many().exec(txn).await?;
            user::Entity::delete_many().exec(txn).await?;
            Ok(())
        })
    })
    .await
    .map_err(|e| RepoError::Query(e.to_string()))?;

    tracing::info!("Database cleared");
    Ok(())
}
