/**
 * Streakly Server Entry Point
 *
 * Loads configuration, initializes tracing and serves the Axum app.
 */

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use streakly::backend::server::{config::ServerConfig, init::create_app};
    use tracing_subscriber::EnvFilter;

    // .env may set RUST_LOG, so load it before tracing
    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Optional TOML file plus STREAKLY_* overrides
    let config = ServerConfig::load()?;
    tracing::info!("Server initialization started");

    let app = create_app(&config).await;

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("Server requires the 'ssr' feature to be enabled.");
    eprintln!("Run with: cargo run --bin streakly-server --features ssr");
    std::process::exit(1);
}
