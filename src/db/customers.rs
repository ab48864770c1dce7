use sqlx::PgPool;

use crate::currency::format_currency;
use crate::error::{AppError, Result};
use crate::models::{CustomerField, CustomerTotalsRow, FormattedCustomer};

use super::like_pattern;

/// Id and name of every customer, alphabetical
pub async fn fetch_customers(pool: &PgPool) -> Result<Vec<CustomerField>> {
    sqlx::query_as::<_, CustomerField>(
        r#"
        SELECT id, name
        FROM customers
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(AppError::database("Failed to fetch all customers."))
}

/// Customers whose name or email contains `query`, with invoice totals
pub async fn fetch_filtered_customers(
    pool: &PgPool,
    query: &str,
) -> Result<Vec<FormattedCustomer>> {
    let rows = sqlx::query_as::<_, CustomerTotalsRow>(
        r#"
        SELECT
            customers.id,
            customers.name,
            customers.email,
            customers.image_url,
            COUNT(invoices.id) AS total_invoices,
            COALESCE(SUM(invoices.amount) FILTER (WHERE invoices.status = 'pending'), 0)::BIGINT
                AS total_pending,
            COALESCE(SUM(invoices.amount) FILTER (WHERE invoices.status = 'paid'), 0)::BIGINT
                AS total_paid
        FROM customers
        LEFT JOIN invoices ON customers.id = invoices.customer_id
        WHERE customers.name ILIKE $1 OR customers.email ILIKE $1
        GROUP BY customers.id, customers.name, customers.email, customers.image_url
        ORDER BY customers.name ASC
        "#,
    )
    .bind(like_pattern(query))
    .fetch_all(pool)
    .await
    .map_err(AppError::database("Failed to fetch customer table."))?;

    Ok(rows
        .into_iter()
        .map(|row| FormattedCustomer {
            id: row.id,
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            total_invoices: row.total_invoices,
            total_pending: format_currency(row.total_pending),
            total_paid: format_currency(row.total_paid),
        })
        .collect())
}
