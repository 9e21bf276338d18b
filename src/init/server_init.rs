use std::net::SocketAddr;
use std::sync::Arc;

use diesel::prelude::QueryableByName;
use diesel_async::RunQueryDsl;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;
use tracing::info;

use crate::routers::main_router::build_router;

use super::config::{DbConfig, bind_addr};
use super::migrate::run_migrations;
use super::state::ServerState;

pub async fn server_init_proc(start: tokio::time::Instant) -> anyhow::Result<()> {
    let num_cores: u32 = num_cpus::get_physical() as u32;

    if std::env::var("DB_URL").is_err() && std::env::var("DB_HOST").is_err() {
        dotenvy::dotenv()?;
    }

    let db_url = DbConfig::from_env()?.to_url();

    let pool_config = AsyncDieselConnectionManager::<diesel_async::AsyncPgConnection>::new(db_url);

    let pool = Pool::builder()
        .min_idle(Some(num_cores))
        .max_size(num_cores * 10u32)
        .build(pool_config)
        .await?;

    let state = Arc::new(
        ServerState::builder()
            .app_name_version(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .pool(pool)
            .server_start_time(start)
            .build()?,
    );

    let mut conn = state.get_conn().await?;

    #[derive(QueryableByName)]
    struct PgVersion {
        #[diesel(sql_type = diesel::sql_types::Text)]
        version: String,
    }

    let pg_version: PgVersion = diesel::sql_query("SELECT version()")
        .get_result(&mut conn)
        .await?;

    info!("PostgreSQL version: {}", pg_version.version);

    run_migrations(&mut conn).await?;

    drop(conn);

    let listener = tokio::net::TcpListener::bind(bind_addr()).await?;

    info!("Backend server starting...");
    axum::serve(
        listener,
        build_router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
