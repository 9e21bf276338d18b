use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use diesel::{
    BoolExpressionMethods, ExpressionMethods, NullableExpressionMethods, QueryDsl,
    SelectableHelper, TextExpressionMethods,
};
use diesel_async::RunQueryDsl;

use crate::{
    domain::blog::post::{Post, PostWithMeta, STATUS_PUBLISHED},
    dto::{
        requests::blog::get_posts_request::GetPostsRequest,
        responses::{blog::get_posts_response::GetPostsResponse, response_data::http_resp},
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    schema::{categories, posts, users},
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "blog",
    params(
        ("limit" = Option<i64>, Query, description = "Page size, default 10"),
        ("offset" = Option<i64>, Query, description = "Rows to skip, default 0"),
        ("category" = Option<String>, Query, description = "Filter by category name"),
        ("author" = Option<String>, Query, description = "Filter by author username"),
        ("search" = Option<String>, Query, description = "Substring match over title or content")
    ),
    responses(
        (status = 200, description = "Published posts, newest first", body = GetPostsResponse),
        (status = 500, description = "Internal server error", body = CodeErrorResp)
    )
)]
pub async fn get_posts(
    State(state): State<Arc<ServerState>>,
    Query(request): Query<GetPostsRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    // Optional filters AND onto the published-only base query. Every
    // caller-supplied value rides as a bound parameter; only the LIKE
    // wildcards are concatenated, and into the argument, not the SQL.
    let mut query = posts::table
        .inner_join(users::table)
        .left_join(categories::table)
        .filter(posts::status.eq(STATUS_PUBLISHED))
        .select((
            Post::as_select(),
            users::username,
            users::avatar,
            categories::name.nullable(),
        ))
        .into_boxed();

    if let Some(category) = &request.category {
        query = query.filter(categories::name.eq(category.clone()));
    }

    if let Some(author) = &request.author {
        query = query.filter(users::username.eq(author.clone()));
    }

    if let Some(search) = &request.search {
        let pattern = format!("%{search}%");
        query = query.filter(
            posts::title
                .like(pattern.clone())
                .or(posts::content.like(pattern)),
        );
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
