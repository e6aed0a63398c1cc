//! Conference lookup helpers.

use crate::orm::conferences;
use chrono::NaiveDateTime;
use sea_orm::{entity::*, query::*, ConnectionTrait, DbErr};

/// Returns the conference whose date window contains `now`.
///
/// Callers resolve the current conference once and pass the model down;
/// the voting rules never look it up on their own. When windows overlap
/// the most recently started conference wins.
pub async fn get_current<C: ConnectionTrait>(
    db: &C,
    now: NaiveDateTime,
) -> Result<Option<conferences::Model>, DbErr> {
    conferences::Entity::find()
        .filter(conferences::Column::StartsAt.lte(now))
        .filter(conferences::Column::EndsAt.gte(now))
        .order_by_desc(conferences::Column::StartsAt)
        .one(db)
        .await
}
