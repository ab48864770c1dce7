use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Invoice status; stored as the `invoice_status` Postgres enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "invoice_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(format!("Invalid invoice status: {other}")),
        }
    }
}

/// Invoice row as stored
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub customer_id: Uuid,
    /// Amount in cents
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: DateTime<Utc>,
}

/// Invoice joined with its customer, as listed on the invoices page
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceWithCustomer {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: i64,
    pub date: DateTime<Utc>,
    pub status: InvoiceStatus,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LatestInvoiceRow {
    pub id: Uuid,
    pub amount: i64,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Entry of the "latest invoices" panel with a display amount
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestInvoice {
    pub id: Uuid,
    pub amount: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Validated input for a new invoice
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub customer_id: Uuid,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: DateTime<Utc>,
}

/// Validated invoice form fields; the date is never edited
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceChanges {
    pub customer_id: Uuid,
    pub amount: i64,
    pub status: InvoiceStatus,
}

impl InvoiceChanges {
    /// Turn validated form fields into a new invoice dated `date`
    pub fn into_new(self, date: DateTime<Utc>) -> NewInvoice {
        NewInvoice {
            customer_id: self.customer_id,
            amount: self.amount,
            status: self.status,
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!("pending".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Pending));
        assert_eq!("paid".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Paid));
        assert!("PAID".parse::<InvoiceStatus>().is_err());
        assert!("overdue".parse::<InvoiceStatus>().is_err());
        assert!("".parse::<InvoiceStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&InvoiceStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(InvoiceStatus::Paid.to_string(), "paid");
    }
}
