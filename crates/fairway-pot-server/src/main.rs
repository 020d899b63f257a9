#![forbid(unsafe_code)]

use fairway_pot_ledger::PotLedger;
use fairway_pot_server::{build_router, ApiConfig, AppState, ENV_LOG};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ApiConfig::from_env();
    info!(
        bind_addr = %config.bind_addr,
        db_path = %config.db_path.display(),
        admin_enabled = config.admin_passphrase.is_some(),
        "starting fairway-pot server"
    );
    if config.admin_passphrase.is_none() {
        info!("no admin passphrase configured; admin routes will answer 503");
    }

    let ledger = PotLedger::open(&config.db_path)?;
    let addr = config.bind_addr.clone();
    let state = AppState::new(ledger, config);
    let router = build_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, "listening");
    axum::serve(listener, router).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        error!(error = %err, "server exited with error");
        std::process::exit(1);
    }
}
