use std::{collections::HashMap, sync::Arc};

use axum::{extract::State, response::IntoResponse};
use diesel::{ExpressionMethods, QueryDsl, SelectableHelper, dsl::count_star};
use diesel_async::RunQueryDsl;

use crate::{
    domain::blog::{
        category::{Category, CategoryWithCount},
        post::STATUS_PUBLISHED,
    },
    dto::responses::{
        category::get_categories_response::GetCategoriesResponse, response_data::http_resp,
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    schema::{categories, posts},
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "category",
    responses(
        (status = 200, description = "All categories with published-post counts", body = GetCategoriesResponse),
        (status = 500, description = "Internal server error", body = CodeErrorResp)
    )
)]
pub async fn get_categories(
    State(state): State<Arc<ServerState>>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    let all: Vec<Category> = categories::table
        .order(categories::name.asc())
        .select(Category::as_select())
        .load(&mut conn)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?;

    // One grouped count instead of a query per category.
    let counts: Vec<(Option<i32>, i64)> = posts::table
        .filter(posts::status.eq(STATUS_PUBLISHED))
        .group_by(posts::category_id)
        .select((posts::category_id, count_star()))
        .load(&mut conn)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?;

    drop(conn);

    let counts: HashMap<i32, i64> = counts
        .into_iter()
        .filter_map(|(category_id, count)| category_id.map(|id| (id, count)))
        .collect();

    let categories = all
        .into_iter()
        .map(|category| {
            let post_count = counts.get(&category.id).copied().unwrap_or(0);
            CategoryWithCount::from_category_and_count(category, post_count)
        })
        .collect();

    Ok(http_resp(GetCategoriesResponse { categories }, (), start))
}
