use std::{str::FromStr, sync::Arc};

use axum::{extract::State, response::IntoResponse};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use uuid::Uuid;

use crate::{
    dto::responses::{auth::logout_response::LogoutResponse, response_data::http_resp},
    errors::code_error::{CodeError, HandlerResponse, code_err},
    init::state::ServerState,
    util::time::now::tokio_now,
};

/// Revokes the presented bearer token. Runs behind the auth middleware,
/// so the header is known to be present and to name a live session.
pub async fn logout_handler(
    TypedHeader(bearer): TypedHeader<Authorization<Bearer>>,
    State(state): State<Arc<ServerState>>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let token = Uuid::from_str(bearer.token())
        .map_err(|e| code_err(CodeError::UNAUTHORIZED_ACCESS, e))?;

    state
        .remove_session(token)
        .await
        .map_err(|e| code_err(CodeError::UNAUTHORIZED_ACCESS, e))?;

    Ok(http_resp(
        LogoutResponse {
            message: "Logged out successfully".to_string(),
        },
        (),
        start,
    ))
}
