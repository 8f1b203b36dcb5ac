//! Deposit normalizer.
//!
//! Expected item shape:
//!   { "id", "status", "created_at", "completed_at",
//!     "value": { "amount", "currency" },
//!     "source": { "__typename", "last4"? } }

use anyhow::{Context, Result};
use serde_json::Value;

use crate::raw;
use crate::transaction::{SourceApi, Transaction};

pub fn normalize(item: &Value) -> Result<Vec<Transaction>> {
    let id = raw::str_at(item, "/id").unwrap_or_default().to_string();
    let status = raw::str_at(item, "/status");
    let completed_at = raw::str_at(item, "/completed_at");
    let created_at = raw::str_at(item, "/created_at");
    let amount = raw::f64_at(item, "/value/amount")
        .with_context(|| format!("deposit {id}: missing value.amount"))?;
    let institution = raw::str_at(item, "/source/__typename").unwrap_or_default();
    let last4 = raw::str_at(item, "/source/last4");
    let description = format!("Deposit from {institution} {}", last4.unwrap_or_default());

    let completed_day = completed_at.and_then(raw::day);
    let date = raw::day_with_fallback(completed_at, created_at, &format!("deposit {id}"))?;

    let mut tx = Transaction::new(SourceApi::Deposits, date, amount);
    tx.id = Some(id);
    tx.status = status.map(str::to_string);
    tx.created_at = created_at.map(str::to_string);
    tx.completed_at = completed_at.map(str::to_string);
    tx.amount = Some(amount);
    tx.currency = raw::str_at(item, "/value/currency").map(str::to_string);
    tx.funding_source = Some(institution.to_string());
    tx.last4 = last4.map(str::to_string);

    if status == Some("accepted") && completed_day.is_some() {
        tx.settle(description);
    }

    Ok(vec![tx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(status: &str) -> Value {
        json!({
            "id": "dep-9",
            "status": status,
            "created_at": "2023-04-30T10:00:00.000Z",
            "completed_at": "2023-05-01T09:00:00.000Z",
            "value": {"amount": "100.0", "currency": "CAD"},
            "source": {"__typename": "PaymentCard", "last4": "4242"}
        })
    }

    #[test]
    fn test_accepted_deposit_is_settled_and_positive() {
        let txs = normalize(&item("accepted")).unwrap();
        let tx = &txs[0];
        assert_eq!(tx.alternative_amount, 100.0);
        assert!(tx.alternative_amount > 0.0);
        let settlement = tx.settlement.as_ref().unwrap();
        assert_eq!(settlement.export_description, "Deposit from PaymentCard 4242");
        assert_eq!(settlement.export_amount, 100.0);
    }

    #[test]
    fn test_pending_deposit_has_no_quadruple() {
        let txs = normalize(&item("pending")).unwrap();
        assert!(txs[0].settlement.is_none());
        assert_eq!(txs[0].alternative_date.to_string(), "2023-05-01");
    }

    #[test]
    fn test_missing_completed_at_falls_back_to_created_at() {
        let mut pending = item("pending");
        pending["completed_at"] = json!("");
        let txs = normalize(&pending).unwrap();
        assert_eq!(txs[0].alternative_date.to_string(), "2023-04-30");
    }
}
