use clap::Parser;
use restaurant_relay::{build_router, AppState, RelayConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "restaurant-relay",
    about = "Restaurant search relay for Google Places Nearby Search",
    version
)]
struct Cli {
    /// Path to config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config)
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Environment variable holding the Google Maps API key (overrides config)
    #[arg(long)]
    api_key_env: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "restaurant_relay=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = RelayConfig::find_and_load(cli.config.as_deref())?;

    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(api_key_env) = cli.api_key_env {
        config.provider.api_key_env = api_key_env;
    }

    // Fail before binding if the credential is missing
    let api_key = config.resolve_api_key()?;

    info!("restaurant-relay v{}", env!("CARGO_PKG_VERSION"));
    info!("  Provider:  {}", config.nearby_search_url());
    info!("  Key env:   {}", config.provider.api_key_env);
    info!("  Timeout:   {}s", config.provider.timeout_secs);
    info!("  Port:      {}", config.port);

    let port = config.port;
    let state = Arc::new(AppState::new(config, api_key)?);

    let app = build_router(state);
    let bind_addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Server running on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
