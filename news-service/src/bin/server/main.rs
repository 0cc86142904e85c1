use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use news_service::config::AdminConfig;
use news_service::config::Config;
use news_service::domain::access::IdentityResolver;
use news_service::domain::article::service::ArticleService;
use news_service::domain::source::service::SourceService;
use news_service::domain::user::models::EmailAddress;
use news_service::domain::user::models::Password;
use news_service::domain::user::models::RegisterUserCommand;
use news_service::domain::user::models::Username;
use news_service::domain::user::ports::UserServicePort;
use news_service::domain::user::service::UserService;
use news_service::inbound::http::router::create_router;
use news_service::inbound::http::router::AppState;
use news_service::outbound::repositories::PostgresArticleRepository;
use news_service::outbound::repositories::PostgresSourceRepository;
use news_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "news_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "news-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_algorithm = %config.jwt.algorithm,
        jwt_expiration_minutes = config.jwt.expiration_minutes,
        admin_configured = config.admin.is_some(),
        "Configuration loaded"
    );

    let jwt_handler =
        JwtHandler::with_algorithm(config.jwt.secret.as_bytes(), &config.jwt.algorithm)?;
    let authenticator = Arc::new(Authenticator::new(
        jwt_handler,
        chrono::Duration::minutes(config.jwt.expiration_minutes),
    ));

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let source_repository = Arc::new(PostgresSourceRepository::new(pg_pool.clone()));
    let article_repository = Arc::new(PostgresArticleRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repository),
        Arc::clone(&authenticator),
    ));

    if let Some(admin) = &config.admin {
        provision_admin(user_service.as_ref(), admin).await?;
    }

    let state = AppState {
        user_service,
        source_service: Arc::new(SourceService::new(Arc::clone(&source_repository))),
        article_service: Arc::new(ArticleService::new(article_repository, source_repository)),
        identity_resolver: Arc::new(IdentityResolver::new(authenticator, user_repository)),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    Ok(())
}

async fn provision_admin(
    user_service: &impl UserServicePort,
    admin: &AdminConfig,
) -> Result<(), anyhow::Error> {
    let command = RegisterUserCommand::new(
        Username::new(admin.username.clone())?,
        EmailAddress::new(admin.email.clone())?,
        Password::new(admin.password.clone())?,
    );

    if user_service.provision_admin(command).await? {
        tracing::info!(username = %admin.username, "Administrator provisioned");
    }

    Ok(())
}
