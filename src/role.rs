//! Role assignment helpers backed by the user_roles table.
//!
//! Roles are plain named flags. The voting rules only read [`VOTER`];
//! grant/revoke exist for the admin-side callers and the test fixtures.

use crate::orm::user_roles;
use chrono::Utc;
use sea_orm::{entity::*, query::*, ActiveValue::Set, ConnectionTrait, DbErr, PaginatorTrait};

/// Role required to cast votes.
pub static VOTER: &str = "voter";
/// Role for conference staff.
pub static ORGANIZER: &str = "organizer";

/// Returns whether the user currently holds the named role.
pub async fn has_role<C: ConnectionTrait>(db: &C, user_id: i32, role: &str) -> Result<bool, DbErr> {
    let assignments = user_roles::Entity::find()
        .filter(user_roles::Column::UserId.eq(user_id))
        .filter(user_roles::Column::Role.eq(role))
        .count(db)
        .await?;

    Ok(assignments > 0)
}

/// Grants a role to a user. Granting an already-held role is a no-op.
pub async fn grant_role<C: ConnectionTrait>(db: &C, user_id: i32, role: &str) -> Result<(), DbErr> {
    if has_role(db, user_id, role).await? {
        return Ok(());
    }

    user_roles::ActiveModel {
        user_id: Set(user_id),
        role: Set(role.to_owned()),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(())
}

/// Revokes a role from a user. Revoking a role the user does not hold is a
/// no-op.
pub async fn revoke_role<C: ConnectionTrait>(db: &C, user_id: i32, role: &str) -> Result<(), DbErr> {
    user_roles::Entity::delete_many()
        .filter(user_roles::Column::UserId.eq(user_id))
        .filter(user_roles::Column::Role.eq(role))
        .exec(db)
        .await?;

    Ok(())
}
