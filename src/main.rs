use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use cabanas_api::{
    config::{AppConfig, StoreBackend},
    db::{
        memory::InMemoryStore,
        mongo::{create_mongo_client, MongoStore},
        store::ReservationStore,
    },
    routes,
    services::search_scoring::RecommendationScorer,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let store: Arc<dyn ReservationStore> = match &config.store {
        StoreBackend::Mongo { uri, database } => {
            let client = create_mongo_client(uri)
                .await
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e))?;
            let store = MongoStore::new(client, database);
            if let Err(e) = store.ensure_indexes().await {
                log::error!("Failed to create indexes: {}", e);
                return Err(std::io::Error::new(std::io::ErrorKind::Other, e));
            }
            log::info!("MongoDB store ready (database {})", database);
            Arc::new(store)
        }
        StoreBackend::Memory => {
            log::warn!("Using the in-memory store; data is lost on restart");
            Arc::new(InMemoryStore::new())
        }
    };
    let store = web::Data::from(store);
    let scorer = web::Data::new(RecommendationScorer::new());
    let policy = web::Data::new(config.policy);
    log::info!("Stays are limited to {} nights", config.policy.max_nights);

    log::info!("Binding to {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(store.clone())
            .app_data(scorer.clone())
            .app_data(policy.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
