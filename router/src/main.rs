use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(about = "SimpleBot chat server")]
struct Args {
    #[clap(short, long, env = "SIMPLEBOT_ADDRESS", default_value = "0.0.0.0:5000")]
    address: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    tracing::info!("args: {:?}", &args);

    let app = router::app();

    let listener = TcpListener::bind(&args.address)
        .await
        .with_context(|| format!("failed to bind {}", args.address))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server shutdown");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Error listening for Ctrl-C: {:?}", e);
        // Keep serving without a shutdown trigger.
        std::future::pending::<()>().await;
    }
}
