//! Downgrades expired trials to the free plan.
//!
//! Intended to run on a schedule (cron or similar). Exits nonzero when
//! any clinic failed to downgrade so the scheduler can alert.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use clinikit::adapters::postgres::{
    PostgresMemberRepository, PostgresNotificationRepository, PostgresPlanRepository,
    PostgresSubscriptionRepository,
};
use clinikit::application::handlers::billing::ProcessExpiredTrialsHandler;
use clinikit::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database.url)
        .await?;

    let handler = ProcessExpiredTrialsHandler::new(
        Arc::new(PostgresSubscriptionRepository::new(pool.clone())),
        Arc::new(PostgresPlanRepository::new(pool.clone())),
        Arc::new(PostgresMemberRepository::new(pool.clone())),
        Arc::new(PostgresNotificationRepository::new(pool)),
    );

    let result = handler.handle().await?;

    println!(
        "Processed {} expired trials ({} failed)",
        result.processed,
        result.failed.len()
    );
    for (clinic_id, message) in &result.failed {
        tracing::error!(%clinic_id, %message, "Trial downgrade failed");
    }

    if result.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}
