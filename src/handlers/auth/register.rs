use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Json, extract::State, response::IntoResponse};
use diesel::{ExpressionMethods, QueryDsl, SelectableHelper, dsl::exists};
use diesel_async::RunQueryDsl;

use crate::{
    domain::auth::user::{NewUser, PublicUser},
    dto::{
        requests::auth::register_request::RegisterRequest,
        responses::{auth::session_response::SessionResponse, response_data::http_resp},
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    schema::users,
    util::{crypto::hash_pw::hash_pw, time::now::tokio_now},
};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = SessionResponse),
        (status = 400, description = "Invalid input or username/email already taken", body = CodeErrorResp),
        (status = 500, description = "Internal server error", body = CodeErrorResp)
    )
)]
pub async fn register_handler(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<RegisterRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let valid = request.validate()?;

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    // Uniqueness is case-sensitive, exactly as stored.
    let username_exists: bool = diesel::select(exists(
        users::table.filter(users::username.eq(&valid.username)),
    ))
    .get_result(&mut conn)
    .await
    .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?;

    if username_exists {
        return Err(CodeError::USERNAME_TAKEN.into());
    }

    let email_exists: bool = diesel::select(exists(
        users::table.filter(users::email.eq(&valid.email)),
    ))
    .get_result(&mut conn)
    .await
    .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?;

    if email_exists {
        return Err(CodeError::EMAIL_TAKEN.into());
    }

    let password_hash = hash_pw(valid.password.clone())
        .await
        .map_err(|e| code_err(CodeError::COULD_NOT_HASH_PW, e))?;

    let user: PublicUser = diesel::insert_into(users::table)
        .values(NewUser {
            username: &valid.username,
            email: &valid.email,
            password_hash: &password_hash,
        })
        .returning(PublicUser::as_returning())
        .get_result(&mut conn)
        .await
        .map_err(|e| map_unique_violation(e))?;

    drop(conn);

    let token = state
        .new_session(user.id, &user.username, None)
        .await
        .map_err(|e| code_err(CodeError::SESSION_CREATE_ERROR, e))?;

    Ok((
        StatusCode::CREATED,
        http_resp(SessionResponse { user, token }, (), start),
    ))
}

/// Races with the pre-checks still surface as the right conflict.
fn map_unique_violation(e: diesel::result::Error) -> CodeErrorResp {
    match &e {
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            info,
        ) => match info.constraint_name() {
            Some(name) if name.contains("email") => code_err(CodeError::EMAIL_TAKEN, e),
            Some(_) | None => code_err(CodeError::USERNAME_TAKEN, e),
        },
        _ => code_err(CodeError::DB_INSERTION_ERROR, e),
    }
}
