//! Fixture bot server: JSON API over flat-file fixture storage.
//! Run with: cargo run --bin web -- --data-dir data --owner-id 1234
//! Listens on 0.0.0.0:8080 by default; see `--help` for the env overrides.

use actix_web::{web::Data, App, HttpServer};
use clap::Parser;
use fixture_bot::{api, Config, FixtureBot, JsonStore};
use std::io;
use std::time::Duration;

/// How often unanswered prompts are swept.
const PROMPT_SWEEP_INTERVAL: Duration = Duration::from_secs(30);

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::parse();
    let store = JsonStore::open(&config.data_dir).map_err(io::Error::other)?;
    let bot = FixtureBot::new(store, config.settings()).map_err(io::Error::other)?;
    if config.owner_id.is_none() {
        log::warn!("No OWNER_ID configured; delete-all is disabled");
    }
    let state = Data::new(bot);

    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(PROMPT_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = state_cleanup.sweep_prompts();
            if removed > 0 {
                log::info!("Dropped {removed} unanswered prompt(s); no action taken");
            }
        }
    });

    let bind = (config.host.clone(), config.port);
    log::info!(
        "Starting fixture bot at http://{}:{} (data in {})",
        bind.0,
        bind.1,
        config.data_dir.display()
    );

    HttpServer::new(move || App::new().app_data(state.clone()).configure(api::configure))
        .bind(bind)?
        .run()
        .await
}
