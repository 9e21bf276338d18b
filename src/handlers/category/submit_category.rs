use std::sync::Arc;

use axum::http::StatusCode;
use axum::{
    Extension, Json,
    extract::State,
    response::IntoResponse,
};
use diesel_async::RunQueryDsl;

use crate::{
    domain::blog::category::{Category, CategoryWithCount, NewCategory},
    dto::{
        requests::category::submit_category_request::SubmitCategoryRequest,
        responses::{category::category_response::CategoryResponse, response_data::http_resp},
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    routers::middleware::auth::AuthedUser,
    schema::categories,
    util::time::now::tokio_now,
};

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "category",
    request_body = SubmitCategoryRequest,
    security(("bearer_token" = [])),
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid input or name already taken", body = CodeErrorResp),
        (status = 401, description = "Missing or invalid token", body = CodeErrorResp),
        (status = 500, description = "Internal server error", body = CodeErrorResp)
    )
)]
pub async fn submit_category(
    Extension(AuthedUser(_user_id)): Extension<AuthedUser>,
    State(state): State<Arc<ServerState>>,
    Json(request): Json<SubmitCategoryRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let valid = request.validate()?;

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    let category: Category = diesel::insert_into(categories::table)
        .values(NewCategory {
            name: &valid.name,
            description: valid.description.as_deref(),
        })
        .get_result(&mut conn)
        .await
        .map_err(map_name_collision)?;

    drop(conn);

    Ok((
        StatusCode::CREATED,
        http_resp(
            CategoryResponse {
                // A brand-new category cannot have posts yet.
                category: CategoryWithCount::from_category_and_count(category, 0),
            },
            (),
            start,
        ),
    ))
}

fn map_name_collision(e: diesel::result::Error) -> CodeErrorResp {
    match &e {
        diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        ) => code_err(CodeError::CATEGORY_NAME_TAKEN, e),
        _ => code_err(CodeError::DB_INSERTION_ERROR, e),
    }
}
