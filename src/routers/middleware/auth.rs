use std::{str::FromStr, sync::Arc};

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use uuid::Uuid;

use crate::{
    errors::code_error::{CodeError, HandlerResponse, code_err},
    init::state::ServerState,
};

/// Identity of the authenticated caller, inserted for protected handlers.
#[derive(Clone, Copy, Debug)]
pub struct AuthedUser(pub i32);

/// Rejects before any storage access: no token, malformed token, unknown
/// token and expired token all collapse into one 401.
pub async fn auth_middleware(
    State(state): State<Arc<ServerState>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request<Body>,
    next: Next,
) -> HandlerResponse<impl IntoResponse> {
    let Some(TypedHeader(bearer)) = bearer else {
        return Err(CodeError::UNAUTHORIZED_ACCESS.into());
    };

    let token = match Uuid::from_str(bearer.token()) {
        Ok(token) => token,
        Err(e) => return Err(code_err(CodeError::UNAUTHORIZED_ACCESS, e)),
    };

    let session = match state.get_session(&token).await {
        Ok(session) => session,
        Err(e) => return Err(code_err(CodeError::UNAUTHORIZED_ACCESS, e)),
    };

    if !session.is_unexpired() {
        let _ = state.remove_session(token).await;
        return Err(CodeError::UNAUTHORIZED_ACCESS.into());
    }

    request
        .extensions_mut()
        .insert(AuthedUser(session.get_user_id()));

    let response = next.run(request).await;

    Ok(response)
}
