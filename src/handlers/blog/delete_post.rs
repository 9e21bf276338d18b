use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, State},
    response::IntoResponse,
};
use diesel::{ExpressionMethods, QueryDsl};
use diesel_async::RunQueryDsl;

use crate::{
    dto::responses::{blog::delete_post_response::DeletePostResponse, response_data::http_resp},
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    handlers::blog::update_post::ensure_post_owned,
    init::state::ServerState,
    routers::middleware::auth::AuthedUser,
    schema::posts,
    util::time::now::tokio_now,
};

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "blog",
    params(("id" = i32, Path, description = "Post id")),
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Post and its comments deleted", body = DeletePostResponse),
        (status = 401, description = "Missing or invalid token", body = CodeErrorResp),
        (status = 404, description = "Post not found or unauthorized", body = CodeErrorResp),
        (status = 500, description = "Internal server error", body = CodeErrorResp)
    )
)]
pub async fn delete_post(
    Extension(AuthedUser(user_id)): Extension<AuthedUser>,
    State(state): State<Arc<ServerState>>,
    Path(post_id): Path<i32>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    ensure_post_owned(&mut conn, post_id, user_id).await?;

    // Comments go with the post via ON DELETE CASCADE.
    diesel::delete(posts::table.filter(posts::id.eq(post_id)))
        .execute(&mut conn)
        .await
        .map_err(|e| code_err(CodeError::DB_DELETION_ERROR, e))?;

    drop(conn);

    Ok(http_resp(
        DeletePostResponse {
            message: "Post deleted successfully".to_string(),
            deleted_post_id: post_id,
        },
        (),
        start,
    ))
}
