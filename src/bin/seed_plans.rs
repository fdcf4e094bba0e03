//! Seeds the plan catalog.
//!
//! Upserts by tier, so re-running refreshes prices and features
//! without duplicating rows or changing plan ids.

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use clinikit::adapters::postgres::PostgresPlanRepository;
use clinikit::config::AppConfig;
use clinikit::domain::billing::Plan;
use clinikit::ports::PlanRepository;

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
        .max_connections(1)
        .connect(&config.database.url)
        .await?;

    let repository = PostgresPlanRepository::new(pool);
    let catalog = Plan::catalog();

    for plan in &catalog {
        repository.upsert(plan).await?;
        println!("Seeded plan: {} ({})", plan.name, plan.tier);
    }

    println!("Seeded {} plans", catalog.len());
    Ok(())
}
