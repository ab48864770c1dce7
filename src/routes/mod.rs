pub mod actions;
pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod health;
pub mod invoices;
pub mod validation;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub use auth::{login, logout, require_session, SessionUser};
pub use health::health_check;
pub use validation::{parse_invoice_id, InvoiceForm};

use crate::AppState;

/// Build the application router
///
/// Everything under `/dashboard` requires a session.
pub fn router(state: AppState) -> Router {
    let dashboard = Router::new()
        .route("/dashboard", get(dashboard::overview))
        .route("/dashboard/revenue", get(dashboard::revenue))
        .route("/dashboard/latest-invoices", get(dashboard::latest_invoices))
        .route("/dashboard/cards", get(dashboard::cards))
        .route(
            "/dashboard/invoices",
            get(invoices::list_invoices).post(actions::create_invoice),
        )
        .route("/dashboard/invoices/create", get(invoices::create_form))
        .route(
            "/dashboard/invoices/:id",
            post(actions::update_invoice).delete(actions::delete_invoice),
        )
        .route("/dashboard/invoices/:id/edit", get(invoices::edit_form))
        .route(
            "/dashboard/invoices/:id/delete",
            post(actions::delete_invoice),
        )
        .route("/dashboard/customers", get(customers::list_customers))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .merge(dashboard)
        .with_state(state)
}
