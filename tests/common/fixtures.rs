//! Test fixtures for creating voting test data
#![allow(dead_code)]

use chrono::{Duration, Utc};
use podium::orm::{conferences, sessions, users, votes};
use podium::role;
use podium::vote::VOTE_LIMIT;
use sea_orm::{entity::*, ActiveValue::Set, DatabaseConnection, DbErr};

/// Create a plain user with no roles.
pub async fn create_test_user(db: &DatabaseConnection, name: &str) -> Result<users::Model, DbErr> {
    users::ActiveModel {
        name: Set(name.to_owned()),
        email: Set(format!("{}@example.com", name)),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Create a user holding the voter role.
pub async fn create_test_voter(db: &DatabaseConnection, name: &str) -> Result<users::Model, DbErr> {
    let user = create_test_user(db, name).await?;
    role::grant_role(db, user.id, role::VOTER).await?;
    Ok(user)
}

/// Create a conference whose date window contains now.
pub async fn create_test_conference(
    db: &DatabaseConnection,
    name: &str,
) -> Result<conferences::Model, DbErr> {
    let now = Utc::now().naive_utc();
    create_test_conference_with_window(db, name, now - Duration::days(1), now + Duration::days(1))
        .await
}

/// Create a conference with an explicit date window.
pub async fn create_test_conference_with_window(
    db: &DatabaseConnection,
    name: &str,
    starts_at: chrono::NaiveDateTime,
    ends_at: chrono::NaiveDateTime,
) -> Result<conferences::Model, DbErr> {
    conferences::ActiveModel {
        name: Set(name.to_owned()),
        starts_at: Set(starts_at),
        ends_at: Set(ends_at),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Create a session in the given conference with the given author.
pub async fn create_test_session(
    db: &DatabaseConnection,
    conference: &conferences::Model,
    author: &users::Model,
    title: &str,
) -> Result<sessions::Model, DbErr> {
    sessions::ActiveModel {
        conference_id: Set(conference.id),
        author_id: Set(author.id),
        second_author_id: Set(None),
        title: Set(title.to_owned()),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Create a session with both an author and a second author.
pub async fn create_test_session_with_second_author(
    db: &DatabaseConnection,
    conference: &conferences::Model,
    author: &users::Model,
    second_author: &users::Model,
    title: &str,
) -> Result<sessions::Model, DbErr> {
    sessions::ActiveModel {
        conference_id: Set(conference.id),
        author_id: Set(author.id),
        second_author_id: Set(Some(second_author.id)),
        title: Set(title.to_owned()),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Persist a vote directly, bypassing validation. The conference is taken
/// from the session.
pub async fn create_test_vote(
    db: &DatabaseConnection,
    user: &users::Model,
    session: &sessions::Model,
) -> Result<votes::Model, DbErr> {
    votes::ActiveModel {
        user_id: Set(user.id),
        session_id: Set(session.id),
        conference_id: Set(session.conference_id),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Fill the user's vote allowance for the conference, one vote per freshly
/// created session.
pub async fn create_votes_up_to_limit(
    db: &DatabaseConnection,
    user: &users::Model,
    conference: &conferences::Model,
) -> Result<(), DbErr> {
    for n in 0..VOTE_LIMIT {
        let author = create_test_user(db, &format!("author_u{}_{}", user.id, n)).await?;
        let session = create_test_session(
            db,
            conference,
            &author,
            &format!("Filler talk {} for user {}", n, user.id),
        )
        .await?;
        create_test_vote(db, user, &session).await?;
    }

    Ok(())
}
