//! Pixel Poolside game server
//!
//! Holds the poolside world in memory and serves it to the browser client
//! over a small JSON API.

mod config;
mod entities;
mod error;
mod network;
mod world;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::{debug, error, info};

use crate::config::ServerConfig;
use crate::world::GameWorld;

/// Periodically forget conversations that went quiet
async fn sweep_idle_conversations(world: Arc<GameWorld>, every: Duration, max_idle: Duration) {
    let mut interval = tokio::time::interval(every);
    // First tick completes immediately
    interval.tick().await;

    loop {
        interval.tick().await;
        let evicted = world.evict_idle_conversations(max_idle).await;
        if evicted > 0 {
            info!("Evicted {} idle conversations", evicted);
        } else {
            debug!("No idle conversations to evict");
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::parse();

    info!("Starting Pixel Poolside server...");
    info!(
        "Conversations expire after {}s idle (sweep every {}s)",
        config.session_idle().as_secs(),
        config.sweep_interval().as_secs()
    );

    let world = match GameWorld::poolside() {
        Ok(world) => Arc::new(world),
        Err(e) => {
            error!("Failed to load the poolside scene: {}", e);
            return;
        }
    };

    tokio::spawn(sweep_idle_conversations(
        world.clone(),
        config.sweep_interval(),
        config.session_idle(),
    ));

    if let Err(e) = network::serve(&config, world).await {
        error!("Server stopped: {}", e);
    }
}
