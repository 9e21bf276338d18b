use bloghub::init::server_init::server_init_proc;
use mimalloc::MiMalloc;
use tracing::info;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

// main function
#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let start = tokio::time::Instant::now();
    tracing_subscriber::fmt().init();

    info!("Initializing server...");
    server_init_proc(start).await?;

    Ok(())
}
