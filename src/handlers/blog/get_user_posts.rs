use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use diesel::{
    ExpressionMethods, NullableExpressionMethods, QueryDsl, SelectableHelper,
};
use diesel_async::RunQueryDsl;

use crate::{
    domain::blog::post::{Post, PostWithMeta, STATUS_PUBLISHED},
    dto::{
        requests::blog::get_user_posts_request::GetUserPostsRequest,
        responses::{blog::get_posts_response::GetPostsResponse, response_data::http_resp},
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    routers::middleware::identity::AuthStatus,
    schema::{categories, posts, users},
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/posts/user/{user_id}",
    tag = "blog",
    params(
        ("user_id" = i32, Path, description = "Author's user id"),
        ("limit" = Option<i64>, Query, description = "Page size, default 10"),
        ("offset" = Option<i64>, Query, description = "Rows to skip, default 0")
    ),
    responses(
        (status = 200, description = "The author's posts, newest first", body = GetPostsResponse),
        (status = 500, description = "Internal server error", body = CodeErrorResp)
    )
)]
pub async fn get_user_posts(
    State(state): State<Arc<ServerState>>,
    Extension(auth_status): Extension<AuthStatus>,
    Path(user_id): Path<i32>,
    Query(request): Query<GetUserPostsRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    let mut query = posts::table
        .inner_join(users::table)
        .left_join(categories::table)
        .filter(posts::author_id.eq(user_id))
        .select((
            Post::as_select(),
            users::username,
            users::avatar,
            categories::name.nullable(),
        ))
        .into_boxed();

    // Authors browsing their own page see drafts too.
    if auth_status.user_id() != Some(user_id) {
        query = query.filter(posts::status.eq(STATUS_PUBLISHED));
    }

    let rows: Vec<(Post, String, Option<String>, Option<String>)> = query
        .order(posts::created_at.desc())
        .limit(request.limit())
        .offset(request.offset())
        .load(&mut conn)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?;

    drop(conn);

    let posts: Vec<PostWithMeta> = rows.into_iter().map(PostWithMeta::from).collect();

    Ok(http_resp(GetPostsResponse { posts }, (), start))
}
