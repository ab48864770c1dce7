use serde::Serialize;
use uuid::Uuid;

/// Customer option for the invoice form's select box
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CustomerField {
    pub id: Uuid,
    pub name: String,
}

/// Customer with invoice aggregates (amounts in cents)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CustomerTotalsRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: i64,
    pub total_paid: i64,
}

/// Row of the customers table with display totals
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedCustomer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: String,
    pub total_paid: String,
}
