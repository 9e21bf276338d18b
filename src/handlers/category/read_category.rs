use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;

use crate::{
    domain::blog::{
        category::{Category, CategoryWithCount},
        post::STATUS_PUBLISHED,
    },
    dto::responses::{category::category_response::CategoryResponse, response_data::http_resp},
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    schema::{categories, posts},
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "category",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "The requested category", body = CategoryResponse),
        (status = 404, description = "Category not found", body = CodeErrorResp),
        (status = 500, description = "Internal server error", body = CodeErrorResp)
    )
)]
pub async fn read_category(
    State(state): State<Arc<ServerState>>,
    Path(category_id): Path<i32>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    let category: Category = categories::table
        .filter(categories::id.eq(category_id))
        .select(Category::as_select())
        .first(&mut conn)
        .await
        .optional()
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?
        .ok_or(CodeError::CATEGORY_NOT_FOUND)?;

    let post_count: i64 = posts::table
        .filter(posts::category_id.eq(category_id))
        .filter(posts::status.eq(STATUS_PUBLISHED))
        .count()
        .get_result(&mut conn)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?;

    drop(conn);

    Ok(http_resp(
        CategoryResponse {
            category: CategoryWithCount::from_category_and_count(category, post_count),
        },
        (),
        start,
    ))
}
