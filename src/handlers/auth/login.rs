use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use diesel::{ExpressionMethods, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;

use crate::{
    domain::auth::user::{PublicUser, User},
    dto::{
        requests::auth::login_request::LoginRequest,
        responses::{auth::session_response::SessionResponse, response_data::http_resp},
    },
    errors::code_error::{CodeError, HandlerResponse, code_err},
    init::state::ServerState,
    schema::users,
    util::{crypto::verify_pw::verify_pw, time::now::tokio_now},
};

pub async fn login_handler(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<LoginRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let valid = request.validate()?;

    let mut conn = state
        .get_conn()
        .await
        .map_err(|e| code_err(CodeError::POOL_ERROR, e))?;

    let user: User = match users::table
        .filter(users::email.eq(&valid.email))
        .select(User::as_select())
        .first::<User>(&mut conn)
        .await
    {
        Ok(user) => user,
        Err(e) => match e {
            // Do not reveal whether the address is registered.
            diesel::result::Error::NotFound => {
                return Err(CodeError::INVALID_CREDENTIALS.into());
            }
            _ => {
                return Err(code_err(CodeError::DB_QUERY_ERROR, e));
            }
        },
    };

    drop(conn);

    match verify_pw(&valid.password, &user.password_hash).await {
        Ok(true) => (),
        Ok(false) => return Err(CodeError::INVALID_CREDENTIALS.into()),
        Err(e) => return Err(code_err(CodeError::COULD_NOT_VERIFY_PW, e)),
    }

    let token = state
        .new_session(user.id, &user.username, None)
        .await
        .map_err(|e| code_err(CodeError::SESSION_CREATE_ERROR, e))?;

    Ok(http_resp(
        SessionResponse {
            user: PublicUser::from(user),
            token,
        },
        (),
        start,
    ))
}
