use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::anyhow;
use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use uuid::Uuid;

use super::builder::ServerStateBuilder;
use super::session::{DEFAULT_SESSION_DURATION, Session};

pub struct ServerState {
    pub(crate) app_name_version: String,
    pub(crate) server_start_time: tokio::time::Instant,
    pub(crate) pool: Pool<AsyncPgConnection>,
    pub(crate) responses_handled: AtomicU64,
    pub(crate) session_map: scc::HashMap<Uuid, Session>, // read/write
}

impl ServerState {
    pub fn builder() -> ServerStateBuilder {
        ServerStateBuilder::default()
    }

    pub async fn get_conn(&self) -> anyhow::Result<PooledConnection<'_, AsyncPgConnection>> {
        self.pool
            .get()
            .await
            .map_err(|e| anyhow!("Could not get connection from pool: {e}"))
    }

    pub async fn new_session(
        &self,
        user_id: i32,
        username: &str,
        valid_for: Option<chrono::Duration>,
    ) -> anyhow::Result<Uuid> {
        let token = Uuid::new_v4();
        let now = chrono::Utc::now();
        let expires_at = now + valid_for.unwrap_or(DEFAULT_SESSION_DURATION);

        match self
            .session_map
            .insert_async(
                token,
                Session {
                    token,
                    user_id,
                    username: username.to_string(),
                    created_at: now,
                    expires_at,
                },
            )
            .await
        {
            Ok(_) => Ok(token),
            Err(_) => Err(anyhow!(
                "Failed to insert session into scc::HashMap; key already exists!"
            )),
        }
    }

    pub async fn get_session(&self, token: &Uuid) -> anyhow::Result<Session> {
        match self.session_map.read_async(token, |_, v| v.clone()).await {
            Some(session) => Ok(session),
            None => Err(anyhow!("Session not found")),
        }
    }

    pub async fn remove_session(&self, token: Uuid) -> anyhow::Result<()> {
        match self.session_map.remove_async(&token).await {
            Some(_) => Ok(()),
            None => Err(anyhow!("Session not found")),
        }
    }

    pub fn get_session_length(&self) -> usize {
        self.session_map.len()
    }

    pub fn add_responses_handled(&self) {
        self.responses_handled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_responses_handled(&self) -> u64 {
        self.responses_handled.load(Ordering::Relaxed)
    }

    pub fn get_app_name_version(&self) -> &str {
        &self.app_name_version
    }

    pub fn get_uptime(&self) -> tokio::time::Duration {
        self.server_start_time.elapsed()
    }
}
