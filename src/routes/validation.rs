use serde::Deserialize;
use uuid::Uuid;

use crate::constants::ERR_INVALID_INVOICE_ID;
use crate::currency::dollars_to_cents;
use crate::error::{AppError, FieldError, Result};
use crate::models::{InvoiceChanges, InvoiceStatus};

/// Raw invoice form as submitted (`application/x-www-form-urlencoded`)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceForm {
    pub customer_id: Option<String>,
    pub status: Option<String>,
    pub amount: Option<String>,
}

impl InvoiceForm {
    /// Validate every field, reporting all failures at once
    pub fn validate(&self) -> Result<InvoiceChanges> {
        let mut errors = Vec::new();

        let customer_id = match self.customer_id.as_deref().map(str::trim) {
            Some(raw) => match Uuid::parse_str(raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push(FieldError::new("customerId", "Please select a customer."));
                    None
                }
            },
            None => {
                errors.push(FieldError::new("customerId", "Please select a customer."));
                None
            }
        };

        let status = match self.status.as_deref().map(str::parse::<InvoiceStatus>) {
            Some(Ok(status)) => Some(status),
            _ => {
                errors.push(FieldError::new(
                    "status",
                    "Please select an invoice status.",
                ));
                None
            }
        };

        let amount = match self
            .amount
            .as_deref()
            .and_then(coerce_number)
            .and_then(dollars_to_cents)
        {
            Some(cents) => Some(cents),
            None => {
                errors.push(FieldError::new("amount", "Please enter a valid amount."));
                None
            }
        };

        match (customer_id, status, amount) {
            (Some(customer_id), Some(status), Some(amount)) if errors.is_empty() => {
                Ok(InvoiceChanges {
                    customer_id,
                    amount,
                    status,
                })
            }
            _ => {
                tracing::warn!("Rejected invoice form: {:?}", errors);
                Err(AppError::Validation(errors))
            }
        }
    }
}

/// Coerce a form value to a finite number; blank input counts as zero
pub fn coerce_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse an invoice id taken from the URL
pub fn parse_invoice_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidInput(ERR_INVALID_INVOICE_ID.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUSTOMER: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";

    fn form(customer_id: Option<&str>, status: Option<&str>, amount: Option<&str>) -> InvoiceForm {
        InvoiceForm {
            customer_id: customer_id.map(String::from),
            status: status.map(String::from),
            amount: amount.map(String::from),
        }
    }

    fn rejected_fields(err: AppError) -> Vec<&'static str> {
        match err {
            AppError::Validation(fields) => fields.into_iter().map(|f| f.field).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_form_converts_to_cents() {
        let changes = form(Some(CUSTOMER), Some("paid"), Some("157.95"))
            .validate()
            .unwrap();

        assert_eq!(changes.customer_id, Uuid::parse_str(CUSTOMER).unwrap());
        assert_eq!(changes.status, InvoiceStatus::Paid);
        assert_eq!(changes.amount, 15795);
    }

    #[test]
    fn test_amount_is_rounded_to_nearest_cent() {
        let changes = form(Some(CUSTOMER), Some("pending"), Some("0.29"))
            .validate()
            .unwrap();
        assert_eq!(changes.amount, 29);

        let changes = form(Some(CUSTOMER), Some("pending"), Some(" 12.5 "))
            .validate()
            .unwrap();
        assert_eq!(changes.amount, 1250);
    }

    #[test]
    fn test_blank_amount_coerces_to_zero() {
        let changes = form(Some(CUSTOMER), Some("pending"), Some(""))
            .validate()
            .unwrap();
        assert_eq!(changes.amount, 0);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        for status in ["overdue", "PAID", "", " paid"] {
            let err = form(Some(CUSTOMER), Some(status), Some("10"))
                .validate()
                .unwrap_err();
            assert_eq!(rejected_fields(err), vec!["status"], "status {status:?}");
        }
    }

    #[test]
    fn test_all_failures_reported_together() {
        let err = form(None, None, Some("abc")).validate().unwrap_err();
        assert_eq!(rejected_fields(err), vec!["customerId", "status", "amount"]);
    }

    #[test]
    fn test_non_finite_amounts_are_rejected() {
        for amount in ["NaN", "inf", "-infinity", "1e400"] {
            let err = form(Some(CUSTOMER), Some("paid"), Some(amount))
                .validate()
                .unwrap_err();
            assert_eq!(rejected_fields(err), vec!["amount"], "amount {amount:?}");
        }
    }

    #[test]
    fn test_parse_invoice_id() {
        assert!(parse_invoice_id(CUSTOMER).is_ok());
        assert!(matches!(
            parse_invoice_id("42"),
            Err(AppError::InvalidInput(_))
        ));
    }
}
