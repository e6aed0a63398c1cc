//! Session voting endpoints

use crate::db::get_db_pool;
use crate::i18n;
use crate::orm::{conferences, votes};
use crate::vote::{self, CastError, VoteCandidate, VOTE_LIMIT};
use actix_web::http::header;
use actix_web::{error, get, post, web, Error, HttpRequest, HttpResponse, Responder};
use sea_orm::{entity::*, query::*, ColumnTrait, PaginatorTrait};
use serde::Serialize;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(vote_on_session).service(remaining_votes);
}

#[derive(Serialize)]
struct RejectionEntry {
    field: &'static str,
    message: String,
}

#[derive(Serialize)]
struct RejectionBody {
    errors: Vec<RejectionEntry>,
}

#[derive(Serialize)]
struct RemainingBody {
    limit: u64,
    used: u64,
    remaining: u64,
}

/// Reads the authenticated user id from the session cookie.
fn require_login(session: &actix_session::Session) -> Result<i32, Error> {
    session
        .get::<i32>("user_id")
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorUnauthorized("Login required"))
}

/// Primary language tag from Accept-Language, for catalog lookups.
fn request_locale(req: &HttpRequest) -> String {
    req.headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|tag| tag.split(';').next())
        .map(|tag| tag.trim().to_owned())
        .unwrap_or_else(|| i18n::DEFAULT_LOCALE.to_owned())
}

#[post("/conferences/{conference_id}/sessions/{session_id}/vote")]
pub async fn vote_on_session(
    req: HttpRequest,
    cookies: actix_session::Session,
    path: web::Path<(i32, i32)>,
) -> Result<impl Responder, Error> {
    let user_id = require_login(&cookies)?;
    let (conference_id, session_id) = path.into_inner();
    let db = get_db_pool();

    let candidate = VoteCandidate::new(user_id, session_id, conference_id);

    match vote::cast(db, &candidate).await {
        Ok(_) => Ok(HttpResponse::SeeOther()
            .append_header((
                "Location",
                format!("/conferences/{}/sessions/{}", conference_id, session_id),
            ))
            .finish()),
        Err(CastError::Rejected(errors)) => {
            let locale = request_locale(&req);
            let body = RejectionBody {
                errors: errors
                    .iter()
                    .map(|e| RejectionEntry {
                        field: e.field().as_str(),
                        message: e.message(&locale),
                    })
                    .collect(),
            };
            Ok(HttpResponse::UnprocessableEntity().json(body))
        }
        Err(CastError::Db(err)) => Err(error::ErrorInternalServerError(err)),
    }
}

#[get("/conferences/{conference_id}/votes/remaining")]
pub async fn remaining_votes(
    cookies: actix_session::Session,
    path: web::Path<i32>,
) -> Result<impl Responder, Error> {
    let user_id = require_login(&cookies)?;
    let conference_id = path.into_inner();
    let db = get_db_pool();

    let conference = conferences::Entity::find_by_id(conference_id)
        .one(db)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("Conference not found."))?;

    // Same count the limit check runs.
    let used = votes::Entity::find()
        .filter(votes::Column::UserId.eq(user_id))
        .filter(votes::Column::ConferenceId.eq(conference.id))
        .count(db)
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(RemainingBody {
        limit: VOTE_LIMIT,
        used,
        remaining: VOTE_LIMIT.saturating_sub(used),
    }))
}
