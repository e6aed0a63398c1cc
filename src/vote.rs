//! Vote eligibility rules for conference sessions.
//!
//! A vote records one user's support for one session within one conference.
//! Admissibility is decided by an ordered list of independent checks; every
//! check runs and every failure is reported, so a submitter sees all
//! problems with their vote at once rather than one per attempt.

use crate::i18n::{self, MessageKey};
use crate::orm::{conferences, sessions, users, votes};
use crate::role;
use chrono::Utc;
use sea_orm::{
    entity::*, query::*, ActiveValue::Set, ConnectionTrait, DatabaseConnection, DbErr,
    PaginatorTrait, SqlErr, TransactionTrait,
};

/// Maximum number of votes a single user may cast within one conference.
pub const VOTE_LIMIT: u64 = 5;

/// Field a validation error is attached to. `Base` errors concern the vote
/// as a whole rather than a single field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VoteField {
    UserId,
    SessionId,
    ConferenceId,
    Base,
}

impl VoteField {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteField::UserId => "user_id",
            VoteField::SessionId => "session_id",
            VoteField::ConferenceId => "conference_id",
            VoteField::Base => "base",
        }
    }
}

/// A reason a vote candidate was rejected.
///
/// All variants are ordinary user-facing outcomes, not faults; handlers
/// resolve them to display text through the message catalog.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VoteError {
    /// A referenced user, session or conference does not exist.
    ReferenceMissing(VoteField),
    /// The user already voted for this session in this conference.
    DuplicateVote,
    /// The session belongs to a different conference than the vote.
    ConferenceMismatch,
    /// The user authored or co-authored the session.
    AuthorConflict,
    /// The user does not hold the voter role.
    NotAVoter,
    /// The user exhausted their vote allowance for the conference.
    LimitReached { limit: u64 },
}

impl VoteError {
    /// Field the error is reported under.
    pub fn field(&self) -> VoteField {
        match self {
            VoteError::ReferenceMissing(field) => *field,
            VoteError::DuplicateVote => VoteField::UserId,
            VoteError::ConferenceMismatch => VoteField::SessionId,
            VoteError::AuthorConflict => VoteField::UserId,
            VoteError::NotAVoter => VoteField::UserId,
            VoteError::LimitReached { .. } => VoteField::Base,
        }
    }

    /// Catalog key for the user-facing message.
    pub fn message_key(&self) -> MessageKey {
        match self {
            VoteError::ReferenceMissing(_) => MessageKey::MustExist,
            VoteError::DuplicateVote => MessageKey::AlreadyTaken,
            VoteError::ConferenceMismatch => MessageKey::SameConference,
            VoteError::AuthorConflict => MessageKey::VoteAuthor,
            VoteError::NotAVoter => MessageKey::VoteVoter,
            VoteError::LimitReached { .. } => MessageKey::VoteLimitReached,
        }
    }

    /// Interpolation argument for the message template, where one applies.
    pub fn count(&self) -> Option<u64> {
        match self {
            VoteError::LimitReached { limit } => Some(*limit),
            _ => None,
        }
    }

    /// Resolved display text for the given locale.
    pub fn message(&self, locale: &str) -> String {
        i18n::translate(self.message_key(), locale, self.count())
    }
}

/// A proposed vote before persistence.
///
/// Ids are optional so that a missing reference surfaces as a validation
/// error on the corresponding field rather than being unrepresentable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct VoteCandidate {
    pub user_id: Option<i32>,
    pub session_id: Option<i32>,
    pub conference_id: Option<i32>,
}

impl VoteCandidate {
    pub fn new(user_id: i32, session_id: i32, conference_id: i32) -> Self {
        Self {
            user_id: Some(user_id),
            session_id: Some(session_id),
            conference_id: Some(conference_id),
        }
    }
}

/// Outcome of [`cast`].
#[derive(Debug)]
pub enum CastError {
    /// The candidate failed validation; nothing was persisted.
    Rejected(Vec<VoteError>),
    /// The database failed; surfaced to the caller as a system error.
    Db(DbErr),
}

impl From<DbErr> for CastError {
    fn from(err: DbErr) -> Self {
        CastError::Db(err)
    }
}

/// Evaluates every eligibility rule against the candidate.
///
/// Returns the collected failures; an empty vector means the vote is
/// admissible. Read-only: evaluating the same candidate twice against
/// unchanged state yields the same errors. Rules that need a reference
/// which did not resolve are skipped, the existence error on that field
/// stands in for them.
pub async fn validate<C: ConnectionTrait>(
    db: &C,
    candidate: &VoteCandidate,
) -> Result<Vec<VoteError>, DbErr> {
    let mut errors = Vec::new();

    let user = match candidate.user_id {
        Some(id) => users::Entity::find_by_id(id).one(db).await?,
        None => None,
    };
    let session = match candidate.session_id {
        Some(id) => sessions::Entity::find_by_id(id).one(db).await?,
        None => None,
    };
    let conference = match candidate.conference_id {
        Some(id) => conferences::Entity::find_by_id(id).one(db).await?,
        None => None,
    };

    if user.is_none() {
        errors.push(VoteError::ReferenceMissing(VoteField::UserId));
    }
    if session.is_none() {
        errors.push(VoteError::ReferenceMissing(VoteField::SessionId));
    }
    if conference.is_none() {
        errors.push(VoteError::ReferenceMissing(VoteField::ConferenceId));
    }

    // One vote per (user, session, conference) triple.
    if let (Some(user), Some(session), Some(conference)) = (&user, &session, &conference) {
        let duplicates = votes::Entity::find()
            .filter(votes::Column::UserId.eq(user.id))
            .filter(votes::Column::SessionId.eq(session.id))
            .filter(votes::Column::ConferenceId.eq(conference.id))
            .count(db)
            .await?;

        if duplicates > 0 {
            errors.push(VoteError::DuplicateVote);
        }
    }

    if let (Some(session), Some(conference)) = (&session, &conference) {
        if session.conference_id != conference.id {
            errors.push(VoteError::ConferenceMismatch);
        }
    }

    if let (Some(user), Some(session)) = (&user, &session) {
        if session.author_id == user.id || session.second_author_id == Some(user.id) {
            errors.push(VoteError::AuthorConflict);
        }
    }

    if let Some(user) = &user {
        if !role::has_role(db, user.id, role::VOTER).await? {
            errors.push(VoteError::NotAVoter);
        }
    }

    if let (Some(user), Some(conference)) = (&user, &conference) {
        if !within_limit(db, Some(user), Some(conference)).await? {
            errors.push(VoteError::LimitReached { limit: VOTE_LIMIT });
        }
    }

    Ok(errors)
}

/// Returns whether `user` can still cast a vote in `conference`.
///
/// Absent references answer `false`. Counts committed votes at call time;
/// nothing is cached.
pub async fn within_limit<C: ConnectionTrait>(
    db: &C,
    user: Option<&users::Model>,
    conference: Option<&conferences::Model>,
) -> Result<bool, DbErr> {
    let (user, conference) = match (user, conference) {
        (Some(user), Some(conference)) => (user, conference),
        _ => return Ok(false),
    };

    let used = votes::Entity::find()
        .filter(votes::Column::UserId.eq(user.id))
        .filter(votes::Column::ConferenceId.eq(conference.id))
        .count(db)
        .await?;

    Ok(used < VOTE_LIMIT)
}

/// Validates and persists a vote in one transaction.
///
/// Validation is re-run inside the transaction so the uniqueness and limit
/// checks count committed votes at insert time. The unique index on
/// (user_id, session_id, conference_id) is the hard stop against a
/// concurrent double-submit; when the insert trips it, the outcome is
/// reported as an ordinary [`VoteError::DuplicateVote`] rejection. The
/// limit check remains count-then-insert under the connection's default
/// isolation; closing that residual window takes SERIALIZABLE isolation or
/// a user-row lock, which is a deployment policy rather than a rule here.
pub async fn cast(
    db: &DatabaseConnection,
    candidate: &VoteCandidate,
) -> Result<votes::Model, CastError> {
    let (user_id, session_id, conference_id) = match (
        candidate.user_id,
        candidate.session_id,
        candidate.conference_id,
    ) {
        (Some(user_id), Some(session_id), Some(conference_id)) => {
            (user_id, session_id, conference_id)
        }
        _ => return Err(CastError::Rejected(validate(db, candidate).await?)),
    };

    let txn = db.begin().await?;

    let errors = validate(&txn, candidate).await?;
    if !errors.is_empty() {
        txn.rollback().await?;
        return Err(CastError::Rejected(errors));
    }

    let vote = votes::ActiveModel {
        user_id: Set(user_id),
        session_id: Set(session_id),
        conference_id: Set(conference_id),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    let vote = match vote.insert(&txn).await {
        Ok(vote) => vote,
        Err(err) => {
            txn.rollback().await?;
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                return Err(CastError::Rejected(vec![VoteError::DuplicateVote]));
            }
            return Err(CastError::Db(err));
        }
    };

    txn.commit().await?;

    log::info!(
        "user {} voted for session {} in conference {}",
        vote.user_id,
        vote.session_id,
        vote.conference_id
    );

    Ok(vote)
}
