use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use diesel::{AsChangeset, ExpressionMethods, QueryDsl, dsl::exists};
use diesel_async::RunQueryDsl;

use crate::{
    domain::blog::post::fetch_post_with_meta,
    dto::{
        requests::blog::update_post_request::UpdatePostRequest,
        responses::{blog::post_response::PostResponse, response_data::http_resp},
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    handlers::blog::submit_post::map_category_fk_violation,
    init::state::ServerState,
    routers::middleware::auth::AuthedUser,
    schema::posts,
    util::time::now::tokio_now,
};

// Outer None skips the column; Some(None) writes NULL.
#[derive(AsChangeset)]
#[diesel(table_name = posts)]
struct PostChangeset<'a> {
    title: Option<&'a str>,
    content: Option<&'a str>,
    excerpt: Option<Option<&'a str>>,
    featured_image: Option<Option<&'a str>>,
    category_id: Option<Option<i32>>,
    status: Option<&'a str>,
    updated_at: DateTime<Utc>,
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "blog",
    params(("id" = i32, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Updated post", body = PostResponse),
        (status = 400, description = "Invalid input", body = CodeErrorResp),
        (status = 401, description = "Missing or invalid token", body = CodeErrorResp),
        (status = 404, description = "Post not found or unauthorized", body = CodeErrorResp),
        (status = 500, description = "Internal server error", body = CodeErrorResp)
    )
)]
pub async fn update_post(
    Extension(AuthedUser(user_id)): Extension<AuthedUser>,
    State(state): State<Arc<ServerState>>,
    Path(post_id): Path<i32>,
    Json(request): Json<UpdatePostRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    request.validate()?;

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    ensure_post_owned(&mut conn, post_id, user_id).await?;

    // updated_at always moves, even on a no-field body.
    diesel::update(posts::table.filter(posts::id.eq(post_id)))
        .set(PostChangeset {
            title: request.title.as_deref(),
            content: request.content.as_deref(),
            excerpt: request.excerpt.as_ref().map(|e| e.as_deref()),
            featured_image: request.featured_image.as_ref().map(|f| f.as_deref()),
            category_id: request.category_id,
            status: request.status.as_deref(),
            updated_at: Utc::now(),
        })
        .execute(&mut conn)
        .await
        .map_err(map_update_error)?;

    let post = fetch_post_with_meta(&mut conn, post_id)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?
        .ok_or(CodeError::POST_NOT_FOUND)?;

    drop(conn);

    Ok(http_resp(PostResponse { post }, (), start))
}

/// One 404 covers both a missing row and someone else's row, so a
/// caller cannot probe which ids exist.
pub async fn ensure_post_owned(
    conn: &mut diesel_async::AsyncPgConnection,
    post_id: i32,
    user_id: i32,
) -> Result<(), CodeErrorResp> {
    let owned: bool = diesel::select(exists(
        posts::table
            .filter(posts::id.eq(post_id))
            .filter(posts::author_id.eq(user_id)),
    ))
    .get_result(conn)
    .await
    .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?;

    if owned {
        Ok(())
    } else {
        Err(CodeError::POST_NOT_FOUND.into())
    }
}

fn map_update_error(e: diesel::result::Error) -> CodeErrorResp {
    match &e {
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ForeignKeyViolation,
            _,
        ) => map_category_fk_violation(e),
        _ => code_err(CodeError::DB_UPDATE_ERROR, e),
    }
}
