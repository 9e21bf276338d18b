use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, Response},
    middleware::Next,
};
use tokio::time::Instant;

use crate::init::state::ServerState;

pub async fn log_middleware(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(info): ConnectInfo<SocketAddr>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let start = Instant::now();

    state.add_responses_handled();

    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    // Honor the proxy header when present; fall back to the socket peer.
    let client_ip: String = match request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        Some(val) => val.to_owned(),
        None => info.ip().to_string(),
    };

    let client_ip: Option<IpAddr> = client_ip.parse().ok();

    tracing::info!(kind = %"RECV", method = %method, path = %path, client_ip = ?client_ip);

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_success() {
        tracing::info!(kind = %"RESP", method = %method, path = %path, client_ip = ?client_ip, status = %status, duration = ?duration);
    } else {
        // Error detail was already logged at the CodeErrorResp boundary.
        tracing::warn!(kind = %"ERSP", method = %method, path = %path, client_ip = ?client_ip, status = %status, duration = ?duration);
    }

    response
}
