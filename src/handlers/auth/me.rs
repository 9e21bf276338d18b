// An endpoint to get the user data if logged in.

use std::sync::Arc;

use axum::{Extension, extract::State, response::IntoResponse};
use diesel::{ExpressionMethods, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;

use crate::{
    domain::auth::user::PublicUser,
    dto::responses::{auth::me_response::MeResponse, response_data::http_resp},
    errors::code_error::{CodeError, HandlerResponse, code_err},
    init::state::ServerState,
    routers::middleware::auth::AuthedUser,
    schema::users,
    util::time::now::tokio_now,
};

pub async fn me_handler(
    Extension(AuthedUser(user_id)): Extension<AuthedUser>,
    State(state): State<Arc<ServerState>>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    // A live session for a deleted account counts as unauthorized.
    let user: PublicUser = users::table
        .filter(users::id.eq(user_id))
        .select(PublicUser::as_select())
        .first(&mut conn)
        .await
        .map_err(|e| match e {
            diesel::result::Error::NotFound => code_err(CodeError::UNAUTHORIZED_ACCESS, e),
            _ => code_err(CodeError::DB_QUERY_ERROR, e),
        })?;

    drop(conn);

    Ok(http_resp(MeResponse { user }, (), start))
}
