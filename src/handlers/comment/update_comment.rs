use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use diesel::{ExpressionMethods, QueryDsl, dsl::exists};
use diesel_async::RunQueryDsl;

use crate::{
    domain::blog::comment::fetch_comment_with_meta,
    dto::{
        requests::comment::update_comment_request::UpdateCommentRequest,
        responses::{comment::comment_response::CommentResponse, response_data::http_resp},
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    routers::middleware::auth::AuthedUser,
    schema::comments,
    util::time::now::tokio_now,
};

pub async fn update_comment(
    Extension(AuthedUser(user_id)): Extension<AuthedUser>,
    State(state): State<Arc<ServerState>>,
    Path(comment_id): Path<i32>,
    Json(request): Json<UpdateCommentRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let content = request.validate()?;

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    ensure_comment_owned(&mut conn, comment_id, user_id).await?;

    diesel::update(comments::table.filter(comments::id.eq(comment_id)))
        .set(comments::content.eq(&content))
        .execute(&mut conn)
        .await
        .map_err(|e| code_err(CodeError::DB_UPDATE_ERROR, e))?;

    let comment = fetch_comment_with_meta(&mut conn, comment_id)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?
        .ok_or(CodeError::COMMENT_NOT_FOUND)?;

    drop(conn);

    Ok(http_resp(CommentResponse { comment }, (), start))
}

/// Missing and not-owned collapse into the same 404.
pub async fn ensure_comment_owned(
    conn: &mut diesel_async::AsyncPgConnection,
    comment_id: i32,
    user_id: i32,
) -> Result<(), CodeErrorResp> {
    let owned: bool = diesel::select(exists(
        comments::table
            .filter(comments::id.eq(comment_id))
            .filter(comments::author_id.eq(user_id)),
    ))
    .get_result(conn)
    .await
    .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?;

    if owned {
        Ok(())
    } else {
        Err(CodeError::COMMENT_NOT_FOUND.into())
    }
}
