use sqlx::PgPool;
use uuid::Uuid;

use crate::constants::{ERR_UNKNOWN_CUSTOMER, ITEMS_PER_PAGE, LATEST_INVOICES_LIMIT};
use crate::currency::format_currency;
use crate::error::{AppError, Result};
use crate::models::{
    CardData, Invoice, InvoiceChanges, InvoiceWithCustomer, LatestInvoice, LatestInvoiceRow,
    NewInvoice,
};
use crate::pagination::{page_offset, total_pages};

use super::like_pattern;

/// Matches invoices whose customer name or email contains the pattern
/// (case-insensitive) or whose status text contains it (case-sensitive).
const INVOICE_SEARCH_FILTER: &str = r#"
    customers.name ILIKE $1
    OR customers.email ILIKE $1
    OR invoices.status::text LIKE $1
"#;

/// The five most recent invoices with their customers
pub async fn fetch_latest_invoices(pool: &PgPool) -> Result<Vec<LatestInvoice>> {
    let rows = sqlx::query_as::<_, LatestInvoiceRow>(
        r#"
        SELECT invoices.id, invoices.amount, customers.name, customers.email, customers.image_url
        FROM invoices
        JOIN customers ON invoices.customer_id = customers.id
        ORDER BY invoices.date DESC, invoices.id
        LIMIT $1
        "#,
    )
    .bind(LATEST_INVOICES_LIMIT)
    .fetch_all(pool)
    .await
    .map_err(AppError::database("Failed to fetch the latest invoices."))?;

    Ok(rows
        .into_iter()
        .map(|row| LatestInvoice {
            id: row.id,
            amount: format_currency(row.amount),
            name: row.name,
            email: row.email,
            image_url: row.image_url,
        })
        .collect())
}

/// Counts and per-status totals for the dashboard cards
pub async fn fetch_card_data(pool: &PgPool) -> Result<CardData> {
    let (number_of_invoices, number_of_customers, total_paid, total_pending) =
        sqlx::query_as::<_, (i64, i64, i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM invoices),
                (SELECT COUNT(*) FROM customers),
                COALESCE(SUM(amount) FILTER (WHERE status = 'paid'), 0)::BIGINT,
                COALESCE(SUM(amount) FILTER (WHERE status = 'pending'), 0)::BIGINT
            FROM invoices
            "#,
        )
        .fetch_one(pool)
        .await
        .map_err(AppError::database("Failed to fetch card data."))?;

    Ok(CardData {
        number_of_customers,
        number_of_invoices,
        total_paid_invoices: format_currency(total_paid),
        total_pending_invoices: format_currency(total_pending),
    })
}

/// One page of invoices matching `query`, newest first
pub async fn fetch_filtered_invoices(
    pool: &PgPool,
    query: &str,
    page: i64,
) -> Result<Vec<InvoiceWithCustomer>> {
    let sql = format!(
        r#"
        SELECT
            invoices.id,
            invoices.customer_id,
            invoices.amount,
            invoices.date,
            invoices.status,
            customers.name,
            customers.email,
            customers.image_url
        FROM invoices
        JOIN customers ON invoices.customer_id = customers.id
        WHERE {INVOICE_SEARCH_FILTER}
        ORDER BY invoices.date DESC, invoices.id
        LIMIT $2 OFFSET $3
        "#
    );

    let invoices = sqlx::query_as::<_, InvoiceWithCustomer>(&sql)
        .bind(like_pattern(query))
        .bind(ITEMS_PER_PAGE)
        .bind(page_offset(page))
        .fetch_all(pool)
        .await
        .map_err(AppError::database("Failed to fetch invoices."))?;

    tracing::debug!(
        "Fetched {} invoices for query {:?}, page {}",
        invoices.len(),
        query,
        page
    );

    Ok(invoices)
}

/// Number of pages of invoices matching `query`
pub async fn fetch_invoices_pages(pool: &PgPool, query: &str) -> Result<i64> {
    let sql = format!(
        r#"
        SELECT COUNT(*)
        FROM invoices
        JOIN customers ON invoices.customer_id = customers.id
        WHERE {INVOICE_SEARCH_FILTER}
        "#
    );

    let count = sqlx::query_scalar::<_, i64>(&sql)
        .bind(like_pattern(query))
        .fetch_one(pool)
        .await
        .map_err(AppError::database("Failed to fetch total number of invoices."))?;

    Ok(total_pages(count))
}

/// A single invoice; `None` when no invoice has this id
pub async fn fetch_invoice_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Invoice>> {
    sqlx::query_as::<_, Invoice>(
        r#"
        SELECT id, customer_id, amount, status, date
        FROM invoices
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(AppError::database("Failed to fetch invoice."))
}

/// Map a foreign-key violation to an input error, anything else to `context`
fn mutation_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
            tracing::warn!("{} Unknown customer: {}", context, db_err);
            AppError::InvalidInput(ERR_UNKNOWN_CUSTOMER.to_string())
        }
        _ => AppError::database(context)(e),
    }
}

pub async fn create_invoice(pool: &PgPool, invoice: &NewInvoice) -> Result<Invoice> {
    let created = sqlx::query_as::<_, Invoice>(
        r#"
        INSERT INTO invoices (customer_id, amount, status, date)
        VALUES ($1, $2, $3, $4)
        RETURNING id, customer_id, amount, status, date
        "#,
    )
    .bind(invoice.customer_id)
    .bind(invoice.amount)
    .bind(invoice.status)
    .bind(invoice.date)
    .fetch_one(pool)
    .await
    .map_err(mutation_error("Failed to create invoice."))?;

    tracing::info!("Invoice {} created", created.id);

    Ok(created)
}

pub async fn update_invoice(pool: &PgPool, id: Uuid, changes: &InvoiceChanges) -> Result<Invoice> {
    let updated = sqlx::query_as::<_, Invoice>(
        r#"
        UPDATE invoices
        SET customer_id = $1, amount = $2, status = $3
        WHERE id = $4
        RETURNING id, customer_id, amount, status, date
        "#,
    )
    .bind(changes.customer_id)
    .bind(changes.amount)
    .bind(changes.status)
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(mutation_error("Failed to update invoice."))?
    .ok_or(AppError::InvoiceNotFound)?;

    tracing::info!("Invoice {} updated", id);

    Ok(updated)
}

pub async fn delete_invoice(pool: &PgPool, id: Uuid) -> Result<Invoice> {
    let deleted = sqlx::query_as::<_, Invoice>(
        r#"
        DELETE FROM invoices
        WHERE id = $1
        RETURNING id, customer_id, amount, status, date
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(AppError::database("Failed to delete invoice."))?
    .ok_or(AppError::InvoiceNotFound)?;

    tracing::info!("Invoice {} deleted", id);

    Ok(deleted)
}
