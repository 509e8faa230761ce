use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use auth::SigningKey;
use auth_service::account::models::EmailAddress;
use auth_service::account::models::Role;
use auth_service::account::models::SeedAccountCommand;
use auth_service::account::ports::AccountRepository;
use auth_service::account::ports::AuthServicePort;
use auth_service::config::Config;
use auth_service::config::SeedConfig;
use auth_service::domain::account::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryAccountRepository;
use auth_service::outbound::repositories::PostgresAccountRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        database = config.database.is_some(),
        jwt = ?config.jwt,
        "Configuration loaded"
    );

    // Loaded once; shared read-only by issuer and validator for the process lifetime.
    let signing_key = Arc::new(
        SigningKey::from_secret(config.jwt.secret.as_bytes()).context("Invalid jwt.secret")?,
    );
    let token_settings = config.jwt.token_settings().context("Invalid jwt settings")?;
    let authenticator = Arc::new(Authenticator::new(signing_key, token_settings));

    let auth_service: Arc<dyn AuthServicePort> = match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_service(PostgresAccountRepository::new(pg_pool), authenticator, &config).await?
        }
        None => {
            tracing::warn!("No database configured, accounts are kept in memory");
            build_service(InMemoryAccountRepository::new(), authenticator, &config).await?
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    if let Err(e) = axum::serve(http_listener, create_router(auth_service)).await {
        tracing::error!(error = %e, "Server error");
    }

    Ok(())
}

async fn build_service<AR>(
    repository: AR,
    authenticator: Arc<Authenticator>,
    config: &Config,
) -> Result<Arc<dyn AuthServicePort>, anyhow::Error>
where
    AR: AccountRepository,
{
    let service = AuthService::new(Arc::new(repository), authenticator)?;

    if let Some(seed) = &config.seed {
        seed_account(&service, seed).await?;
    }

    Ok(Arc::new(service))
}

async fn seed_account<S>(service: &S, seed: &SeedConfig) -> Result<(), anyhow::Error>
where
    S: AuthServicePort,
{
    let command = SeedAccountCommand::new(
        EmailAddress::new(seed.email.clone()).context("Invalid seed.email")?,
        seed.password.clone(),
        Role::new(seed.role.clone()).context("Invalid seed.role")?,
    );

    service.seed_account(command).await?;

    Ok(())
}
