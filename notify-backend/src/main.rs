//! Unified Notification Intelligence API
//!
//! F7 traceability, F8 intelligence and F9 preferences over flat JSON tables.
//!
//! Default: http://0.0.0.0:8000/

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use dotenv::dotenv;
use std::sync::Arc;

mod config;
mod controllers;
mod db;
mod error;
mod intelligence;
mod services;

use config::{Config, StoreBackend};
use db::{JsonFileStore, MemoryStore, RecordStore};
use intelligence::{DateResolver, PhraseInterpreter, RelativeDateResolver, RuleBasedInterpreter};
use services::{IntelligenceService, PreferencesService, TraceabilityService};

pub struct AppState {
    pub config: Config,
    pub traceability: TraceabilityService,
    pub intelligence: IntelligenceService,
    pub preferences: PreferencesService,
}

impl AppState {
    /// Wire every service to the same store
    pub fn new(
        config: Config,
        store: Arc<dyn RecordStore>,
        interpreter: Arc<dyn PhraseInterpreter>,
        resolver: Arc<dyn DateResolver>,
    ) -> Self {
        Self {
            config,
            traceability: TraceabilityService::new(store.clone()),
            intelligence: IntelligenceService::new(store.clone(), interpreter, resolver),
            preferences: PreferencesService::new(store),
        }
    }

    /// State over an in-memory store with the built-in interpreter
    #[cfg(test)]
    pub fn in_memory(store: Arc<MemoryStore>) -> Self {
        let config = Config {
            port: config::defaults::PORT,
            bind_host: config::defaults::BIND_HOST.to_string(),
            data_dir: std::env::temp_dir(),
            store_backend: StoreBackend::Memory,
        };
        Self::new(
            config,
            store,
            Arc::new(RuleBasedInterpreter::new()),
            Arc::new(RelativeDateResolver),
        )
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    config::initialize_data_dir(&config.data_dir)?;

    let store: Arc<dyn RecordStore> = match config.store_backend {
        StoreBackend::File => Arc::new(JsonFileStore::new(config.data_dir.clone())),
        StoreBackend::Memory => {
            log::warn!("Using in-memory store; records are lost on restart");
            Arc::new(MemoryStore::new())
        }
    };
    let bind_addr = (config.bind_host.clone(), config.port);

    let state = web::Data::new(AppState::new(
        config,
        store,
        Arc::new(RuleBasedInterpreter::new()),
        Arc::new(RelativeDateResolver),
    ));

    log::info!(
        "Notification Intelligence API listening on http://{}:{} ({} store, data: {:?})",
        bind_addr.0,
        bind_addr.1,
        state.config.store_backend.as_ref(),
        state.config.data_dir
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .configure(controllers::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
