use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use crate::db;
use crate::error::{AppError, Result};
use crate::models::FormattedCustomer;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CustomersQuery {
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CustomersResponse {
    pub customers: Vec<FormattedCustomer>,
}

/// Customers table, filtered by name or email
///
/// GET /dashboard/customers?query=<text>
pub async fn list_customers(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<CustomersQuery>, AppError>,
) -> Result<Json<CustomersResponse>> {
    let query = params.query.unwrap_or_default();
    let customers = db::fetch_filtered_customers(&state.pool, &query).await?;

    Ok(Json(CustomersResponse { customers }))
}
