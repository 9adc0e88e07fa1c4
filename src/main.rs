use std::io;

use dotenvy::dotenv;
use order_placement::{build_server, create_pool, run_migrations, AppConfig};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(io::Error::other)?;

    let pool = create_pool(&config.database_url, config.db_pool_max_size).map_err(io::Error::other)?;
    run_migrations(&pool).map_err(io::Error::other)?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);
    log::info!(
        "OpenAPI docs at http://{}:{}/swagger-ui/",
        config.host,
        config.port
    );

    build_server(pool, &config.host, config.port)?.await
}
