use std::str::FromStr;
use std::sync::Arc;

use auth::Authenticator;
use marketplace_service::config::Config;
use marketplace_service::domain::access::models::AccessPolicy;
use marketplace_service::domain::access::service::AccessControl;
use marketplace_service::domain::account::service::AccountService;
use marketplace_service::domain::audit::service::AuditService;
use marketplace_service::domain::product::service::AuditPolicy;
use marketplace_service::domain::product::service::ProductService;
use marketplace_service::inbound::http::router::create_router;
use marketplace_service::inbound::http::router::AppState;
use marketplace_service::outbound::repositories::PostgresAccountRepository;
use marketplace_service::outbound::repositories::PostgresAuditRepository;
use marketplace_service::outbound::repositories::PostgresProductRepository;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marketplace_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "marketplace-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        statement_timeout_ms = config.database.statement_timeout_ms,
        token_ttl_hours = config.jwt.expiration_hours,
        audit_strict = config.audit.strict,
        "Configuration loaded"
    );

    let connect_options = PgConnectOptions::from_str(&config.database.url)?.options([(
        "statement_timeout",
        config.database.statement_timeout_ms.to_string(),
    )]);
    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect_with(connect_options)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        chrono::Duration::hours(config.jwt.expiration_hours),
    ));

    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let product_repository = Arc::new(PostgresProductRepository::new(pg_pool.clone()));
    let audit_repository = Arc::new(PostgresAuditRepository::new(pg_pool));

    let audit_service = Arc::new(AuditService::new(audit_repository));
    let product_service = Arc::new(ProductService::new(
        product_repository,
        Arc::clone(&audit_service),
        AuditPolicy::from_strict(config.audit.strict),
    ));
    let account_service = Arc::new(AccountService::new(
        account_repository,
        Arc::clone(&authenticator),
    ));
    let access_control = Arc::new(AccessControl::new(
        authenticator,
        AccessPolicy::marketplace_default(),
    ));

    let state = AppState {
        account_service,
        product_service,
        audit_service,
        access_control,
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
    tracing::info!("Server exited");

    Ok(())
}
