use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};
use serde_derive::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::responses::response_data::http_resp,
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    util::time::now::tokio_now,
};

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthcheckResponse {
    pub app_name_version: String,
    pub uptime_secs: u64,
    pub responses_handled: u64,
    pub active_sessions: usize,
}

/// Checks out a pooled connection so a wedged database fails the check.
#[utoipa::path(
    get,
    path = "/api/healthcheck",
    tag = "server",
    responses(
        (status = 200, description = "Server is healthy", body = HealthcheckResponse),
        (status = 500, description = "Database unreachable", body = CodeErrorResp)
    )
)]
pub async fn healthcheck(
    State(state): State<Arc<ServerState>>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    drop(conn);

    Ok(http_resp(
        HealthcheckResponse {
            app_name_version: state.get_app_name_version().to_string(),
            uptime_secs: state.get_uptime().as_secs(),
            responses_handled: state.get_responses_handled(),
            active_sessions: state.get_session_length(),
        },
        (),
        start,
    ))
}
