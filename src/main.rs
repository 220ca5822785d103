mod config;
mod domain;
mod infrastructure;
mod presentation;
mod usecase;

use std::sync::Arc;

use axum::{Router, routing::get};
use sea_orm::{ConnectOptions, Database};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    domain::{
        models::registration::ValidationPolicy,
        repositories::user_repository::UserRepository,
        services::password_service::PasswordHasher,
    },
    infrastructure::{
        argon2_password_hasher::Argon2PasswordHasher, user_repository::SqlUserRepository,
    },
    presentation::handlers::user_handler::create_user_router,
    usecase::register_user_usecase::RegisterUserUsecase,
};

/// Build the HTTP application around a register use case
fn build_app<
    R: UserRepository + Send + Sync + 'static + Clone,
    P: PasswordHasher + Send + Sync + 'static + Clone,
>(
    register_user_usecase: RegisterUserUsecase<R, P>,
    validation_policy: ValidationPolicy,
) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(create_user_router(register_user_usecase, validation_policy))
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("registration_service=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    // a missing .env file is fine; real environment variables still apply
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }
    let cfg = config::load()?;
    info!("Configuration loaded, signing secret present");

    let mut opt = ConnectOptions::new(cfg.database_url.clone());
    opt.max_connections(cfg.db_max_connections)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    let user_repository = SqlUserRepository::new(Arc::new(db));
    user_repository.ensure_schema().await?;
    info!("Database initialized");

    let password_hasher = Argon2PasswordHasher::with_cost(cfg.password_hash_cost)?;
    info!(work_factor = password_hasher.work_factor(), "Password hasher ready");
    let register_user_usecase = RegisterUserUsecase::new(user_repository, password_hasher);

    let app = build_app(register_user_usecase, cfg.validation_policy());

    let listener = TcpListener::bind(cfg.bind_addr).await?;
    info!("Listening on {}", cfg.bind_addr);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
