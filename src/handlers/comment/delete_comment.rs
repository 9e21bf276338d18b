use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, State},
    response::IntoResponse,
};
use diesel::{ExpressionMethods, QueryDsl};
use diesel_async::RunQueryDsl;

use crate::{
    dto::responses::{
        comment::delete_comment_response::DeleteCommentResponse, response_data::http_resp,
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    handlers::comment::update_comment::ensure_comment_owned,
    init::state::ServerState,
    routers::middleware::auth::AuthedUser,
    schema::comments,
    util::time::now::tokio_now,
};

#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    tag = "comment",
    params(("id" = i32, Path, description = "Comment id")),
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Comment and its replies deleted", body = DeleteCommentResponse),
        (status = 401, description = "Missing or invalid token", body = CodeErrorResp),
        (status = 404, description = "Comment not found or unauthorized", body = CodeErrorResp),
        (status = 500, description = "Internal server error", body = CodeErrorResp)
    )
)]
pub async fn delete_comment(
    Extension(AuthedUser(user_id)): Extension<AuthedUser>,
    State(state): State<Arc<ServerState>>,
    Path(comment_id): Path<i32>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    ensure_comment_owned(&mut conn, comment_id, user_id).await?;

    // Replies cascade with their parent.
    diesel::delete(comments::table.filter(comments::id.eq(comment_id)))
        .execute(&mut conn)
        .await
        .map_err(|e| code_err(CodeError::DB_DELETION_ERROR, e))?;

    drop(conn);

    Ok(http_resp(
        DeleteCommentResponse {
            message: "Comment deleted successfully".to_string(),
            deleted_comment_id: comment_id,
        },
        (),
        start,
    ))
}
