use actix_web::{middleware as actix_middleware, web, App, HttpServer};
use std::time::Duration;

use bookshelf::auth_token::TokenService;
use bookshelf::config::ServerConfig;
use bookshelf::configure_routes;
use bookshelf::store::{AccountRegistry, BookStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if it exists (for development)
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    log::info!("Starting Bookshelf server...");

    // Load configuration
    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/server.toml".to_string());

    let config = ServerConfig::load_from_file(&config_path).unwrap_or_else(|e| {
        log::warn!(
            "Failed to load config from '{}': {}. Falling back to default config.",
            config_path,
            e
        );
        ServerConfig::default()
    });

    let token_service = TokenService::new(
        config.token_secret.clone().into_bytes(),
        Duration::from_secs(config.token_ttl_secs),
    )
    .unwrap_or_else(|e| {
        eprintln!("Invalid token configuration: {}", e);
        std::process::exit(1);
    });

    log::info!("Token TTL set to {} seconds", config.token_ttl_secs);

    // Create shared state. All of it is in-memory; a restart discards
    // every account and book.
    let accounts = AccountRegistry::new();
    let books = BookStore::new();

    log::info!("Starting HTTP server at {}:{}...", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            // Shared state
            .app_data(web::Data::new(accounts.clone()))
            .app_data(web::Data::new(books.clone()))
            .app_data(web::Data::new(token_service.clone()))
            // Middleware
            .wrap(actix_middleware::Logger::default())
            .wrap(actix_middleware::Compress::default())
            .configure(configure_routes)
    })
    .bind((config.host.clone(), config.port))?
    .run()
    .await
}
