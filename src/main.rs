use actix_web::{App, HttpServer, middleware, web};

use slidedeck::config::Config;
use slidedeck::models::slide;
use slidedeck::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = Config::from_env();

    // Initialize database
    let pool = db::init_pool(&config.database_url, config.max_connections)
        .await
        .expect("Failed to open database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    // Demo deck for a fresh database; skipped once any slide exists
    if config.seed_demo {
        if let Err(e) = slide::seed_demo(&pool).await {
            log::error!("Demo seed failed: {e}");
        }
    }

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .configure(handlers::api::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(handlers::not_found))
    })
    .bind(config.bind_addr())?
    .run()
    .await
}
