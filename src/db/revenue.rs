use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::models::Revenue;

/// All revenue rows, in calendar order
pub async fn fetch_revenue(pool: &PgPool) -> Result<Vec<Revenue>> {
    tracing::debug!("Fetching revenue data...");

    let data = sqlx::query_as::<_, Revenue>(
        r#"
        SELECT month, revenue
        FROM revenue
        ORDER BY array_position(
            ARRAY['Jan', 'Feb', 'Mar', 'Apr', 'May', 'Jun',
                  'Jul', 'Aug', 'Sep', 'Oct', 'Nov', 'Dec']::VARCHAR[],
            month
        ) NULLS LAST, month
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(AppError::database("Failed to fetch revenue data."))?;

    tracing::debug!("Fetched {} revenue rows", data.len());

    Ok(data)
}
