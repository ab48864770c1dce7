use axum::{extract::State, Json};
use serde::Serialize;

use crate::db;
use crate::error::Result;
use crate::models::{CardData, LatestInvoice, Revenue};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub cards: CardData,
    pub revenue: Vec<Revenue>,
    pub latest_invoices: Vec<LatestInvoice>,
}

/// Dashboard overview: cards, revenue chart and latest invoices
///
/// GET /dashboard
pub async fn overview(State(state): State<AppState>) -> Result<Json<OverviewResponse>> {
    let (cards, revenue, latest_invoices) = tokio::try_join!(
        db::fetch_card_data(&state.pool),
        db::fetch_revenue(&state.pool),
        db::fetch_latest_invoices(&state.pool),
    )?;

    Ok(Json(OverviewResponse {
        cards,
        revenue,
        latest_invoices,
    }))
}

/// GET /dashboard/revenue
pub async fn revenue(State(state): State<AppState>) -> Result<Json<Vec<Revenue>>> {
    Ok(Json(db::fetch_revenue(&state.pool).await?))
}

/// GET /dashboard/latest-invoices
pub async fn latest_invoices(State(state): State<AppState>) -> Result<Json<Vec<LatestInvoice>>> {
    Ok(Json(db::fetch_latest_invoices(&state.pool).await?))
}

/// GET /dashboard/cards
pub async fn cards(State(state): State<AppState>) -> Result<Json<CardData>> {
    Ok(Json(db::fetch_card_data(&state.pool).await?))
}
