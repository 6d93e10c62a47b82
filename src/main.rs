mod app;
mod config;
mod error;
mod handlers;
mod models;
mod rate_limit;
mod routes;
mod services;
mod state;

use actix_web::{HttpServer, web};
use anyhow::Context;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::{AppState, LIMITER_PRUNE_INTERVAL, spawn_limiter_pruning};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = Config::from_env().context("invalid configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let bind = (config.host.clone(), config.port);
    tracing::info!(
        "serving {} on {}:{}",
        config.data_path.display(),
        bind.0,
        bind.1
    );

    let state = web::Data::new(AppState::new(config));
    spawn_limiter_pruning(state.clone(), LIMITER_PRUNE_INTERVAL);

    HttpServer::new(move || app::build_app(state.clone()))
        .bind(bind)?
        .run()
        .await?;

    Ok(())
}
