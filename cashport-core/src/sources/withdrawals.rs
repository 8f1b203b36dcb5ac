//! Withdrawal normalizer.
//!
//! Expected item shape:
//!   { "id", "status", "__typename", "created_at", "completed_at",
//!     "value": { "amount", "currency" },
//!     "source": { "id" }, "destination": { "__typename", "bank_account"? } }
//!
//! Withdrawal amounts arrive as positive magnitudes and are always negated
//! for transaction-list purposes.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::raw;
use crate::transaction::{SourceApi, Transaction};

pub fn normalize(item: &Value) -> Result<Vec<Transaction>> {
    let id = raw::str_at(item, "/id").unwrap_or_default().to_string();
    let status = raw::str_at(item, "/status");
    let completed_at = raw::str_at(item, "/completed_at");
    let created_at = raw::str_at(item, "/created_at");
    let magnitude = raw::f64_at(item, "/value/amount")
        .with_context(|| format!("withdrawal {id}: missing value.amount"))?;
    let amount = -magnitude;
    let description = format!(
        "{} to {}",
        raw::str_at(item, "/__typename").unwrap_or("Withdrawal"),
        raw::str_at(item, "/destination/__typename").unwrap_or_default()
    );

    let completed_day = completed_at.and_then(raw::day);
    let date = raw::day_with_fallback(completed_at, created_at, &format!("withdrawal {id}"))?;

    let mut tx = Transaction::new(SourceApi::Withdrawals, date, amount);
    tx.id = Some(id);
    tx.status = status.map(str::to_string);
    tx.created_at = created_at.map(str::to_string);
    tx.completed_at = completed_at.map(str::to_string);
    tx.amount = Some(magnitude);
    tx.currency = raw::str_at(item, "/value/currency").map(str::to_string);
    tx.funding_source = raw::str_at(item, "/source/id").map(str::to_string);
    tx.destination = raw::str_at(item, "/destination/bank_account/id").map(str::to_string);

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
            "id": "wdl-3",
            "__typename": "Withdrawal",
            "status": status,
            "created_at": "2023-05-09T10:00:00.000Z",
            "completed_at": "2023-05-10T09:00:00.000Z",
            "value": {"amount": "40.0", "currency": "CAD"},
            "source": {"id": "acc-1"},
            "destination": {"__typename": "BankAccountOwner", "bank_account": {"id": "ba-7"}}
        })
    }

    #[test]
    fn test_amount_is_always_negated() {
        let txs = normalize(&item("accepted")).unwrap();
        let tx = &txs[0];
        assert_eq!(tx.alternative_amount, -40.0);
        assert_eq!(tx.amount, Some(40.0));
        let settlement = tx.settlement.as_ref().unwrap();
        assert_eq!(settlement.export_amount, -40.0);
        assert_eq!(settlement.export_description, "Withdrawal to BankAccountOwner");
    }

    #[test]
    fn test_pending_withdrawal_is_not_settled() {
        let txs = normalize(&item("pending")).unwrap();
        assert!(txs[0].settlement.is_none());
        assert_eq!(txs[0].alternative_amount, -40.0);
    }
}
