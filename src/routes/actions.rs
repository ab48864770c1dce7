//! Invoice mutations submitted from the dashboard forms.
//!
//! Each action validates its input, writes through the data-access layer,
//! revalidates the invoice list and redirects to it. Any failure returns an
//! error response and skips the redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
    Extension, Form,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;

use crate::constants::INVOICES_PATH;
use crate::db;
use crate::error::{AppError, Result};
use crate::routes::auth::SessionUser;
use crate::routes::validation::{parse_invoice_id, InvoiceForm};
use crate::AppState;

/// POST /dashboard/invoices
pub async fn create_invoice(
    State(state): State<AppState>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
    WithRejection(Form(form), _): WithRejection<Form<InvoiceForm>, AppError>,
) -> Result<Redirect> {
    let invoice = form.validate()?.into_new(Utc::now());

    let created = db::create_invoice(&state.pool, &invoice).await?;
    tracing::info!("User {} created invoice {}", user_id, created.id);

    Ok(revalidate_and_redirect(&state))
}

/// POST /dashboard/invoices/:id
pub async fn update_invoice(
    State(state): State<AppState>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
    Path(id): Path<String>,
    WithRejection(Form(form), _): WithRejection<Form<InvoiceForm>, AppError>,
) -> Result<Redirect> {
    let id = parse_invoice_id(&id)?;
    let changes = form.validate()?;

    db::update_invoice(&state.pool, id, &changes).await?;
    tracing::info!("User {} updated invoice {}", user_id, id);

    Ok(revalidate_and_redirect(&state))
}

/// DELETE /dashboard/invoices/:id, POST /dashboard/invoices/:id/delete
pub async fn delete_invoice(
    State(state): State<AppState>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id = parse_invoice_id(&id)?;

    db::delete_invoice(&state.pool, id).await?;
    tracing::info!("User {} deleted invoice {}", user_id, id);

    Ok(revalidate_and_redirect(&state))
}

fn revalidate_and_redirect(state: &AppState) -> Redirect {
    state.revalidator.revalidate_path(INVOICES_PATH);
    Redirect::to(INVOICES_PATH)
}
