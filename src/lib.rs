pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::OrderService;
use crate::errors::AppError;
use crate::infrastructure::{DieselAddressDirectory, DieselCatalogReader, DieselOrderRepository};

pub use config::AppConfig;
pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// The order service wired to the Postgres adapters.
pub type AppOrderService =
    OrderService<DieselAddressDirectory, DieselCatalogReader, DieselOrderRepository>;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    if !applied.is_empty() {
        log::info!("Applied {} database migration(s)", applied.len());
    }
    Ok(())
}

pub fn order_service(pool: DbPool) -> AppOrderService {
    OrderService::new(
        DieselAddressDirectory::new(pool.clone()),
        DieselCatalogReader::new(pool.clone()),
        DieselOrderRepository::new(pool),
    )
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let service = web::Data::new(order_service(pool));
    let openapi = handlers::ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
            )
            .wrap(Logger::default())
            .service(
                web::scope("/orders")
                    .route("", web::post().to(handlers::orders::create_order))
                    .route("", web::get().to(handlers::orders::list_orders))
                    .route("/{id}", web::get().to(handlers::orders::get_order)),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
