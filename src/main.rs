use color_eyre::eyre::WrapErr;
use log::{info, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use usps_label::config::Config;
use usps_label::easypost::EasyPostConnector;
use usps_label::server::{app, AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = init() {
        eprintln!("cannot initialize: {:?}", e);
        std::process::exit(1);
    }

    if let Err(e) = run().await {
        log::error!("Error: {:?}", e);
        std::process::exit(1);
    }
}

fn init() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}

async fn run() -> color_eyre::Result<()> {
    let config = Config::from_env().wrap_err("invalid configuration")?;
    if config.label.api_key().is_none() {
        warn!("`EASYPOST_API_KEY` is not set, label requests will fail until it is");
    }

    let connector = EasyPostConnector::new(config.easypost_base_url.clone(), config.easypost_timeout);
    let router = app(AppState::new(config.label.clone(), connector));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .wrap_err_with(|| format!("cannot bind [{}]", config.bind_addr))?;
    info!("listening on [{}]", config.bind_addr);
    axum::serve(listener, router).await?;
    Ok(())
}
