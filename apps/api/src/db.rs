use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates the candidate-store connection pool. Pool size comes from
/// `Config` (`DB_MAX_CONNECTIONS`) so deployments can tune it without a
/// rebuild.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    info!("Connecting to the candidate store...");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    info!(max_connections, "Candidate store pool established");
    Ok(pool)
}
