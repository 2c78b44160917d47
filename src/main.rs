use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use chrono::Local;  // timestamp in log lines
use std::sync::Arc;

use sms_auth_service::{
    config::Config,
    database::{Repository, SeaOrmRepository, create_pool, run_migrations},
    external::LogSmsSender,
    graphql::build_schema,
    handlers,
    middlewares::{BearerTokenMiddleware, create_cors},
    services::*,
    utils::{Clock, JwtService, RandomCodeGenerator, ZonedClock},
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    log::info!("sms-auth-service {} started", env!("CARGO_PKG_VERSION"));

    let config = Config::from_toml().context("Failed to load configuration")?;

    let clock: Arc<dyn Clock> =
        Arc::new(ZonedClock::new(&config.clock.timezone).context("Failed to load time zone")?);

    log::info!("connecting to the database: {}", config.database.name);
    let pool = create_pool(&config.database)
        .await
        .context("Failed to create database connection pool")?;

    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let repository: Arc<dyn Repository> = Arc::new(SeaOrmRepository::new(pool, clock.clone()));

    let jwt_service = JwtService::new(
        &config.token.secret_key,
        config.token.expires_in,
        clock.clone(),
    );

    // seeded once for the whole process
    let code_generator = Arc::new(RandomCodeGenerator::new());

    let auth_service = AuthService::new(
        repository.clone(),
        jwt_service,
        code_generator,
        Arc::new(LogSmsSender),
        clock,
        &config.sms,
    );
    let product_service = ProductService::new(repository);

    let schema = build_schema(auth_service, product_service);

    log::info!(
        "connect to http://localhost:{}/ for GraphQL playground",
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(BearerTokenMiddleware)
            .app_data(web::Data::new(schema.clone()))
            .configure(handlers::graphql_config)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await?;

    Ok(())
}
