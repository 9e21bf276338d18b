use std::sync::Arc;

use axum::http::StatusCode;
use axum::{
    Extension, Json,
    extract::State,
    response::IntoResponse,
};
use diesel::prelude::Insertable;
use diesel::{ExpressionMethods, QueryDsl, dsl::exists};
use diesel_async::RunQueryDsl;

use crate::{
    domain::blog::{
        comment::{Comment, fetch_comment_with_meta},
        post::STATUS_PUBLISHED,
    },
    dto::{
        requests::comment::submit_comment_request::SubmitCommentRequest,
        responses::{comment::comment_response::CommentResponse, response_data::http_resp},
    },
    errors::code_error::{
        CodeError, CodeErrorResp, FieldError, HandlerResponse, code_err, validation_err,
    },
    init::state::ServerState,
    routers::middleware::auth::AuthedUser,
    schema::{comments, posts},
    util::time::now::tokio_now,
};

#[derive(Insertable)]
#[diesel(table_name = comments)]
struct NewComment<'a> {
    content: &'a str,
    author_id: i32,
    post_id: i32,
    parent_id: Option<i32>,
}

#[utoipa::path(
    post,
    path = "/api/comments",
    tag = "comment",
    request_body = SubmitCommentRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Invalid input", body = CodeErrorResp),
        (status = 401, description = "Missing or invalid token", body = CodeErrorResp),
        (status = 404, description = "Post not found or unauthorized", body = CodeErrorResp),
        (status = 500, description = "Internal server error", body = CodeErrorResp)
    )
)]
pub async fn submit_comment(
    Extension(AuthedUser(user_id)): Extension<AuthedUser>,
    State(state): State<Arc<ServerState>>,
    Json(request): Json<SubmitCommentRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let valid = request.validate()?;

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    // Drafts take no comments, not even from their author.
    let post_exists: bool = diesel::select(exists(
        posts::table
            .filter(posts::id.eq(valid.post_id))
            .filter(posts::status.eq(STATUS_PUBLISHED)),
    ))
    .get_result(&mut conn)
    .await
    .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?;

    if !post_exists {
        return Err(CodeError::POST_NOT_FOUND.into());
    }

    if let Some(parent_id) = valid.parent_id {
        let parent_matches: bool = diesel::select(exists(
            comments::table
                .filter(comments::id.eq(parent_id))
                .filter(comments::post_id.eq(valid.post_id)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?;

        if !parent_matches {
            return Err(validation_err(vec![FieldError {
                field: "parent_id",
                message: "parent_id must name a comment on the same post".to_string(),
            }]));
        }
    }

    let inserted: Comment = diesel::insert_into(comments::table)
        .values(NewComment {
            content: &valid.content,
            author_id: user_id,
            post_id: valid.post_id,
            parent_id: valid.parent_id,
        })
        .get_result(&mut conn)
        .await
        .map_err(|e| code_err(CodeError::DB_INSERTION_ERROR, e))?;

    let comment = fetch_comment_with_meta(&mut conn, inserted.id)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?
        .ok_or(CodeError::COMMENT_NOT_FOUND)?;

    drop(conn);

    Ok((
        StatusCode::CREATED,
        http_resp(CommentResponse { comment }, (), start),
    ))
}
