use std::sync::Arc;

use actix_web::{
    middleware::{Logger, NormalizePath},
    web, App, HttpServer,
};
use env_logger::Env;
use log::{debug, info};

use crate::{
    config::{Config, Environment},
    errors::AppError,
    handlers::PageServiceType,
    middleware::RequestLogger,
    repositories::InMemoryPageRepository,
    routes, services,
    types::Result,
};

// Setup logging with custom format and configuration
fn setup_logging(config: &Config) -> Result<()> {
    // Configure log level based on environment and config
    let log_level = match config.app.environment {
        Environment::Development => config.app.log_level.clone(),
        Environment::Testing => "debug,actix_web=info".to_string(),
        Environment::Production => "info,actix_web=warn".to_string(),
    };

    let env = Env::default()
        .filter_or("RUST_LOG", log_level)
        .write_style_or("RUST_LOG_STYLE", "always");

    env_logger::try_init_from_env(env)
        .map_err(|e| AppError::Logger(format!("Failed to initialize logger: {}", e)))
}

pub async fn server() -> Result<()> {
    let config = Config::load()?;

    setup_logging(&config)?;

    info!("Starting {} v{}", config.app.name, config.app.version);
    info!("Environment: {:?}", config.app.environment);
    info!(
        "Binding to {}:{} with {} workers",
        config.server.host, config.server.port, config.server.workers
    );
    info!(
        "Page ids: collision policy {:?}, max {} attempts",
        config.pages.collision_policy, config.pages.max_id_attempts
    );

    if config.app.environment == Environment::Development {
        debug!("Debug logging enabled");
        debug!("Full configuration: {:?}", config);
    }

    let enable_debug_logging = config.app.environment != Environment::Production;

    let log_format = if enable_debug_logging {
        "%a \"%r\" %s %b %T %{X-Request-ID}o"
    } else {
        "%a \"%r\" %s %b %T \"%{Referer}i\" \"%{User-Agent}i\" %{X-Request-ID}o"
    };

    // One store for the whole process; every worker gets a handle to it
    let page_service: web::Data<PageServiceType> = web::Data::new(services::PageService::new(
        Arc::new(InMemoryPageRepository::new()),
        config.pages.clone(),
    ));

    let app_config = config.clone();

    HttpServer::new(move || {
        App::new()
            // Last wrap runs first: normalize, then access log, then request id
            .wrap(RequestLogger::new(enable_debug_logging))
            .wrap(Logger::new(log_format))
            .wrap(NormalizePath::trim())
            .configure(|cfg| services::register(page_service.clone(), cfg))
            .configure(|cfg| routes::configure_routes(cfg, &app_config.pages))
    })
    .workers(config.server.workers)
    .bind((config.server.host.to_string(), config.server.port))?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
