use actix_web::web;
use governor::{DefaultKeyedRateLimiter, RateLimiter};
use std::net::IpAddr;
use std::time::Duration;
use tokio::time::interval;

use crate::config::Config;

pub type ClientRateLimiter = DefaultKeyedRateLimiter<IpAddr>;

pub const LIMITER_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Shared by every worker through `web::Data`
pub struct AppState {
    pub config: Config,
    pub limiter: ClientRateLimiter,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let limiter = RateLimiter::keyed(config.rate_limit);
        AppState { config, limiter }
    }

    /// Forgets clients whose quota has fully refilled. Returns how many remain.
    pub fn prune_limiter(&self) -> usize {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        self.limiter.len()
    }
}

/// Prunes the rate limiter on a fixed interval for as long as the server runs.
pub fn spawn_limiter_pruning(state: web::Data<AppState>, every: Duration) {
    actix_web::rt::spawn(async move {
        let mut ticker = interval(every);
        loop {
            ticker.tick().await;
            let remaining = state.prune_limiter();
            tracing::debug!(remaining, "pruned rate limiter");
        }
    });
}
