use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    domain::blog::post::{STATUS_PUBLISHED, fetch_post_with_meta},
    dto::responses::{blog::post_response::PostResponse, response_data::http_resp},
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    routers::middleware::identity::AuthStatus,
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "blog",
    params(("id" = i32, Path, description = "Post id")),
    responses(
        (status = 200, description = "The requested post", body = PostResponse),
        (status = 404, description = "Post not found or unauthorized", body = CodeErrorResp),
        (status = 500, description = "Internal server error", body = CodeErrorResp)
    )
)]
pub async fn read_post(
    State(state): State<Arc<ServerState>>,
    Extension(auth_status): Extension<AuthStatus>,
    Path(post_id): Path<i32>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    let post = fetch_post_with_meta(&mut conn, post_id)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?
        .ok_or(CodeError::POST_NOT_FOUND)?;

    drop(conn);

    // Drafts exist only for their author. Everyone else gets the same
    // 404 a missing id would produce.
    let visible = post.post.status == STATUS_PUBLISHED
        || auth_status.user_id() == Some(post.post.author_id);

    if !visible {
        return Err(CodeError::POST_NOT_FOUND.into());
    }

    Ok(http_resp(PostResponse { post }, (), start))
}
