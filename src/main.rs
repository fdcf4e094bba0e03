//! CliniKit API server.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use clinikit::adapters::ai::{AnthropicAssistant, AnthropicConfig};
use clinikit::adapters::auth::JwtSessionValidator;
use clinikit::adapters::email::ResendEmailSender;
use clinikit::adapters::http::{app_router, AppState};
use clinikit::adapters::postgres::{
    PostgresAppointmentRepository, PostgresClientRepository, PostgresClinicAccess,
    PostgresClinicRepository, PostgresInvoiceRepository, PostgresMemberRepository,
    PostgresNotificationRepository, PostgresPlanRepository, PostgresReportsReader,
    PostgresServiceTypeRepository, PostgresSubscriptionRepository,
};
use clinikit::adapters::stripe::{StripePaymentAdapter, StripeWebhookVerifier};
use clinikit::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level));

    if config.server.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting clinikit");

    config.validate()?;

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;
    tracing::info!("Database connection established");

    if config.database.run_migrations {
        tracing::info!("Running migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let assistant_config = AnthropicConfig::new(config.assistant.anthropic_api_key.clone())
        .with_model(config.assistant.model.clone())
        .with_max_tokens(config.assistant.max_tokens)
        .with_timeout(Duration::from_secs(config.assistant.timeout_secs));

    let state = AppState {
        clinics: Arc::new(PostgresClinicRepository::new(pool.clone())),
        members: Arc::new(PostgresMemberRepository::new(pool.clone())),
        clients: Arc::new(PostgresClientRepository::new(pool.clone())),
        service_types: Arc::new(PostgresServiceTypeRepository::new(pool.clone())),
        appointments: Arc::new(PostgresAppointmentRepository::new(pool.clone())),
        plans: Arc::new(PostgresPlanRepository::new(pool.clone())),
        subscriptions: Arc::new(PostgresSubscriptionRepository::new(pool.clone())),
        invoices: Arc::new(PostgresInvoiceRepository::new(pool.clone())),
        notifications: Arc::new(PostgresNotificationRepository::new(pool.clone())),
        reports: Arc::new(PostgresReportsReader::new(pool.clone())),
        access: Arc::new(PostgresClinicAccess::new(pool.clone())),
        payments: Arc::new(StripePaymentAdapter::new(
            config.billing.stripe_api_key.clone(),
        )),
        email: Arc::new(ResendEmailSender::new(
            config.email.resend_api_key.clone(),
            config.email.from_header(),
        )),
        assistant: Arc::new(AnthropicAssistant::new(assistant_config)),
        sessions: Arc::new(JwtSessionValidator::new(
            &config.auth.jwt_secret,
            config.auth.jwt_issuer.clone(),
        )),
        webhook_verifier: Arc::new(StripeWebhookVerifier::new(
            config.billing.stripe_webhook_secret.clone(),
            config.billing.webhook_tolerance_secs,
        )),
        frontend_base_url: config.server.frontend_base_url.clone(),
    };

    let cors = build_cors(config.server.cors_origins_list());

    let app = app_router(state)
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, environment = ?config.server.environment, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the CORS layer from the configured origin list.
///
/// An empty list allows no cross-origin browser access.
fn build_cors(origins: Vec<String>) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
}
