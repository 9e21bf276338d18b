use std::sync::Arc;

use axum::http::StatusCode;
use axum::{
    Extension, Json,
    extract::State,
    response::IntoResponse,
};
use diesel_async::RunQueryDsl;

use crate::{
    domain::blog::post::{NewPost, Post, fetch_post_with_meta},
    dto::{
        requests::blog::submit_post_request::SubmitPostRequest,
        responses::{blog::post_response::PostResponse, response_data::http_resp},
    },
    errors::code_error::{
        CodeError, CodeErrorResp, FieldError, HandlerResponse, code_err, validation_err,
    },
    init::state::ServerState,
    routers::middleware::auth::AuthedUser,
    schema::posts,
    util::time::now::tokio_now,
};

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "blog",
    request_body = SubmitPostRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Invalid input", body = CodeErrorResp),
        (status = 401, description = "Missing or invalid token", body = CodeErrorResp),
        (status = 500, description = "Internal server error", body = CodeErrorResp)
    )
)]
pub async fn submit_post(
    Extension(AuthedUser(user_id)): Extension<AuthedUser>,
    State(state): State<Arc<ServerState>>,
    Json(request): Json<SubmitPostRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let valid = request.validate()?;

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    let inserted: Post = diesel::insert_into(posts::table)
        .values(NewPost {
            title: &valid.title,
            content: &valid.content,
            excerpt: valid.excerpt.as_deref(),
            featured_image: valid.featured_image.as_deref(),
            author_id: user_id,
            category_id: valid.category_id,
            status: &valid.status,
        })
        .get_result(&mut conn)
        .await
        .map_err(map_category_fk_violation)?;

    let post = fetch_post_with_meta(&mut conn, inserted.id)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?
        .ok_or(CodeError::POST_NOT_FOUND)?;

    drop(conn);

    Ok((
        StatusCode::CREATED,
        http_resp(PostResponse { post }, (), start),
    ))
}

/// A dangling category id is the caller's mistake, not a server fault.
pub fn map_category_fk_violation(e: diesel::result::Error) -> CodeErrorResp {
    match &e {
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ForeignKeyViolation,
            _,
        ) => validation_err(vec![FieldError {
            field: "category_id",
            message: "category_id does not name an existing category".to_string(),
        }]),
        _ => code_err(CodeError::DB_INSERTION_ERROR, e),
    }
}
