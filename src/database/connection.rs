use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::errors::Result;

pub async fn get_db_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    // Apply pending migrations before serving traffic
    sqlx::migrate!("./migrations").run(&pool).await?;

    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&pool).await {
        Ok(_) => {
            tracing::info!("✅ Connected to database");
        }
        Err(e) => {
            tracing::error!("❌ Database is unreachable: {}", e);
            return Err(e.into());
        }
    }

    Ok(pool)
}
