use axum::{
    extract::{Path, Query, RawQuery, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::INVOICES_PATH;
use crate::db;
use crate::error::{AppError, Result};
use crate::models::{CustomerField, Invoice, InvoiceWithCustomer};
use crate::pagination::parse_page;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct InvoicesQuery {
    pub query: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicesResponse {
    pub invoices: Vec<InvoiceWithCustomer>,
    pub query: String,
    pub current_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct CreateFormResponse {
    pub customers: Vec<CustomerField>,
}

#[derive(Debug, Serialize)]
pub struct EditFormResponse {
    pub invoice: Invoice,
    pub customers: Vec<CustomerField>,
}

/// Invoice list with search and pagination
///
/// Carries a weak ETag tied to the list's revalidation generation; a
/// matching `If-None-Match` gets `304 Not Modified` without touching storage.
///
/// GET /dashboard/invoices?query=<text>&page=<n>
pub async fn list_invoices(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<InvoicesQuery>, AppError>,
    RawQuery(raw_query): RawQuery,
    headers: HeaderMap,
) -> Result<Response> {
    let etag = state
        .revalidator
        .etag(INVOICES_PATH, raw_query.as_deref().unwrap_or_default());

    let cached = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == etag);
    if cached {
        return Ok(with_etag(StatusCode::NOT_MODIFIED.into_response(), &etag));
    }

    let query = params.query.unwrap_or_default();
    let current_page = parse_page(params.page.as_deref());

    let (invoices, total_pages) = tokio::try_join!(
        db::fetch_filtered_invoices(&state.pool, &query, current_page),
        db::fetch_invoices_pages(&state.pool, &query),
    )?;

    let response = Json(InvoicesResponse {
        invoices,
        query,
        current_page,
        total_pages,
    })
    .into_response();

    Ok(with_etag(response, &etag))
}

fn with_etag(mut response: Response, etag: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(etag) {
        response.headers_mut().insert(header::ETAG, value);
    }
    response
}

/// Data for the "create invoice" form
///
/// GET /dashboard/invoices/create
pub async fn create_form(State(state): State<AppState>) -> Result<Json<CreateFormResponse>> {
    let customers = db::fetch_customers(&state.pool).await?;
    Ok(Json(CreateFormResponse { customers }))
}

/// Data for the "edit invoice" form; unknown ids get the not-found response
///
/// GET /dashboard/invoices/:id/edit
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EditFormResponse>> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::InvoiceNotFound)?;

    let (invoice, customers) = tokio::try_join!(
        db::fetch_invoice_by_id(&state.pool, id),
        db::fetch_customers(&state.pool),
    )?;

    let invoice = invoice.ok_or(AppError::InvoiceNotFound)?;

    Ok(Json(EditFormResponse { invoice, customers }))
}
