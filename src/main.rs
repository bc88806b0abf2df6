use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use blog_backend::auth::{PasswordHasher, TokenVerifier};
use blog_backend::config::Config;
use blog_backend::db::{self, DbPool};
use blog_backend::routes::{self, AppState};

fn cors(origin: Option<&str>) -> Cors {
    let cors = match origin {
        Some(origin) => Cors::default().allowed_origin(origin),
        None => Cors::default().allow_any_origin(),
    };
    cors.allow_any_method().allow_any_header().max_age(3600)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    let pool = db::build_pool(&config.database_url, config.pool_size)?;
    db::run_migrations(&pool)?;

    let state = web::Data::new(AppState::new(pool, PasswordHasher::new(config.bcrypt_cost)));
    let verifier = web::Data::new(TokenVerifier::new(&config.jwt_secret));

    info!(
        "blog backend listening on {}:{} (pool size {})",
        config.host, config.port, config.pool_size
    );

    let cors_origin = config.cors_origin.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::NormalizePath::trim())
            .wrap(cors(cors_origin.as_deref()))
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .app_data(verifier.clone())
            .configure(routes::configure::<DbPool>)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
