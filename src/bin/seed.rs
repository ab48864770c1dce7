use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invoice_dashboard::{
    db::{create_pool, run_migrations},
    seed,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "invoice_dashboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load .env file if it exists (development)
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

    let pool = create_pool(&database_url, 2).await?;
    run_migrations(&pool).await?;

    match seed::run(&pool).await {
        Ok(summary) => {
            tracing::info!("Database seeded: {:?}", summary);
        }
        Err(e) => {
            tracing::error!(
                "An error occurred while attempting to seed the database: {:?}",
                e
            );
            pool.close().await;
            return Err(e.into());
        }
    }

    pool.close().await;
    Ok(())
}
