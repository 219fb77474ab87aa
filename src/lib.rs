// Library exports for testing and reuse

pub mod auth_token;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod store;

use actix_web::{middleware as actix_middleware, web};

/// Mounts the public surface and the token-gated book routes. Shared with
/// the integration tests so they drive the same route table the binary
/// serves.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Public routes (no authentication required)
    cfg.service(handlers::health_check)
        .service(handlers::signup)
        .service(handlers::login);
    // Protected routes (authentication required)
    cfg.service(
        web::scope("/books")
            .wrap(actix_middleware::from_fn(middleware::auth_middleware))
            .service(handlers::create_book)
            .service(handlers::update_book)
            .service(handlers::delete_book),
    );
}
