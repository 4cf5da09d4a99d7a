// src/main.rs
mod announce;
mod config;
mod models;
mod names;
mod query;
mod registry;
mod render;
mod scheduler;
mod utils;

use env_logger::Env;
use log::info;
use std::sync::Arc;

use crate::announce::RconAnnouncer;
use crate::config::Config;
use crate::names::StaticNames;
use crate::query::Quake3Query;
use crate::render::MessageRenderer;
use crate::scheduler::{PollScheduler, Poller, Rotation};

#[tokio::main]
async fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    dotenv::dotenv().ok();

    let config = Config::load();
    if !config.enabled {
        info!("serverinfo is disabled, nothing to do");
        return;
    }

    let endpoints = registry::parse_endpoints(&config.servers);
    info!(
        "accepted {} of {} configured servers",
        endpoints.len(),
        config.servers.len()
    );

    let renderer = MessageRenderer::new(
        config.message.clone(),
        config.offline.clone(),
        Arc::new(StaticNames),
    );
    let poller = Poller::new(
        Rotation::new(endpoints),
        Arc::new(Quake3Query::new(config.query_timeout())),
        renderer,
        Arc::new(RconAnnouncer::new(
            config.rcon_address.clone(),
            config.rcon_password.clone(),
        )),
    );

    let mut scheduler = PollScheduler::new(poller, config.interval());
    scheduler.enable().await;
    info!("serverinfo started, polling every {}s", config.interval_secs);

    tokio::signal::ctrl_c().await.ok();
    info!("shutting down");
    scheduler.disable().await;
}
