use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ironbale_api::IronbaleConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured JSON logs; RUST_LOG overrides the default filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ironbale=debug,tower_http=info,info")),
        )
        .with_target(false)
        .json()
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting Ironbale API");

    let config = IronbaleConfig::load()?.apply_profile();

    let host = env::var("IRONBALE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("IRONBALE_PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or(3000);

    info!(?host, ?port, "Configuring web server");

    let app = ironbale_api::create_app(config).await?;
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, "Web server started");
    axum::serve(listener, app).await?;

    Ok(())
}
