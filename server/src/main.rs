use anyhow::Context;
use orderhub_api::{build_router, docs, AppState};
use orderhub_auth::Authenticator;
use orderhub_config::load as load_config;
use orderhub_database::initialize_database;
use tokio::{net::TcpListener, signal};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(env_filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("starting OrderHub API");

    let config = load_config().context("failed to load configuration")?;

    let pool = initialize_database(&config.database)
        .await
        .context("failed to initialize database")?;

    let authenticator = Authenticator::new(pool.clone(), &config.auth);
    let state = AppState::new(pool, authenticator);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let local_url = format!("http://localhost:{}", config.http.port);
    let openapi = docs::openapi_document(&local_url, config.docs.prod_server_url.as_deref());

    let app = build_router(state, openapi);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening, docs at /docs");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    info!("server shut down");
    Ok(())
}

fn shutdown_signal() -> impl std::future::Future<Output = ()> {
    async {
        if let Err(error) = signal::ctrl_c().await {
            error!(?error, "failed to listen for shutdown signal");
        }
        info!("shutdown signal received");
    }
}
