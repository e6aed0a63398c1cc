//! Test database setup and management
#![allow(dead_code)]

use podium::orm::{conferences, sessions, user_roles, users, votes};
use sea_orm::sea_query::Index;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema,
};

/// Creates a fresh in-memory database with the full voting schema.
///
/// Each test gets its own database, so tests are hermetic and can run in
/// parallel without cleanup between them.
pub async fn setup_test_database() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    // A single connection keeps every query in the same in-memory database.
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options).await?;

    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    db.execute(backend.build(&schema.create_table_from_entity(users::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(user_roles::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(conferences::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(sessions::Entity)))
        .await?;
    db.execute(backend.build(&schema.create_table_from_entity(votes::Entity)))
        .await?;

    // The race guard from the production schema: one vote per
    // (user, session, conference) triple.
    let unique_votes = Index::create()
        .name("idx_votes_user_session_conference")
        .table(votes::Entity)
        .col(votes::Column::UserId)
        .col(votes::Column::SessionId)
        .col(votes::Column::ConferenceId)
        .unique()
        .to_owned();
    db.execute(backend.build(&unique_votes)).await?;

    let unique_roles = Index::create()
        .name("idx_user_roles_user_role")
        .table(user_roles::Entity)
        .col(user_roles::Column::UserId)
        .col(user_roles::Column::Role)
        .unique()
        .to_owned();
    db.execute(backend.build(&unique_roles)).await?;

    Ok(db)
}
