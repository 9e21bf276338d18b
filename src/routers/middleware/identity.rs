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

use crate::{errors::code_error::HandlerResponse, init::state::ServerState};

/// Optional identity for public routes whose visibility rules depend on
/// who is asking (an author may see their own drafts).
#[derive(Clone, Copy)]
pub enum AuthStatus {
    LoggedIn(i32),
    LoggedOut,
}

impl AuthStatus {
    pub fn user_id(&self) -> Option<i32> {
        match self {
            AuthStatus::LoggedIn(user_id) => Some(*user_id),
            AuthStatus::LoggedOut => None,
        }
    }
}

pub async fn identity_middleware(
    State(state): State<Arc<ServerState>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request<Body>,
    next: Next,
) -> HandlerResponse<impl IntoResponse> {
    let auth_status = if let Some(TypedHeader(bearer)) = bearer {
        match Uuid::from_str(bearer.token()) {
            Ok(token) => match state.get_session(&token).await {
                Ok(session) if session.is_unexpired() => {
                    AuthStatus::LoggedIn(session.get_user_id())
                }
                _ => AuthStatus::LoggedOut,
            },
            Err(_) => AuthStatus::LoggedOut,
        }
    } else {
        AuthStatus::LoggedOut
    };

    request.extensions_mut().insert(auth_status);

    let response = next.run(request).await;

    Ok(response)
}
