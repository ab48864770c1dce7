//! Data-access layer.
//!
//! Every function takes the pool explicitly and maps storage failures to
//! [`AppError::Database`](crate::AppError::Database) carrying a
//! per-operation message.

pub mod customers;
pub mod invoices;
pub mod pool;
pub mod revenue;
pub mod users;

pub use customers::{fetch_customers, fetch_filtered_customers};
pub use invoices::{
    create_invoice, delete_invoice, fetch_card_data, fetch_filtered_invoices,
    fetch_invoice_by_id, fetch_invoices_pages, fetch_latest_invoices, update_invoice,
};
pub use pool::{create_pool, run_migrations};
pub use revenue::fetch_revenue;
pub use users::get_user;

/// Build a `LIKE`/`ILIKE` pattern matching `query` as a literal substring
///
/// NUL characters are dropped; Postgres text values cannot contain them.
pub(crate) fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.chars().filter(|&ch| ch != '\0') {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_query() {
        assert_eq!(like_pattern(""), "%%");
        assert_eq!(like_pattern("sam"), "%sam%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\d"), "%c:\\\\d%");
    }

    #[test]
    fn test_like_pattern_drops_nul() {
        assert_eq!(like_pattern("a\0b"), "%ab%");
        assert_eq!(like_pattern("\0"), "%%");
    }
}
