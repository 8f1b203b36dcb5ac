//! Funding intent normalizer.
//!
//! Expected item shape (edge node):
//!   { "id", "state", "fundableType", "updatedAt",
//!     "fundableDetails": { "createdAt", "amount"? , "requestedAmountValue"?,
//!                          "finalAmount": { "amount", "currency" }? },
//!     "transferMetadata": { "sender_name"? } }
//!
//! Deposit intents report `amount`; withdrawal intents report
//! `requestedAmountValue` and are negated.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::raw;
use crate::transaction::{SourceApi, Transaction};

pub fn normalize(item: &Value) -> Result<Vec<Transaction>> {
    let id = raw::str_at(item, "/id").unwrap_or_default().to_string();
    let status = raw::str_at(item, "/state");
    let kind = raw::str_at(item, "/fundableType");
    let updated_at = raw::str_at(item, "/updatedAt");
    let created_at = raw::str_at(item, "/fundableDetails/createdAt");
    let magnitude = raw::f64_at(item, "/fundableDetails/amount")
        .or_else(|| raw::f64_at(item, "/fundableDetails/requestedAmountValue"))
        .with_context(|| format!("funding intent {id}: missing amount"))?;
    let amount = if kind == Some("Withdrawal") { -magnitude } else { magnitude };

    let description = if kind == Some("Deposit") {
        format!(
            "Deposit to {}",
            raw::str_at(item, "/transferMetadata/sender_name").unwrap_or_default()
        )
    } else {
        kind.unwrap_or_default().to_string()
    };

    let updated_day = updated_at.and_then(raw::day);
    let date = raw::day_with_fallback(updated_at, created_at, &format!("funding intent {id}"))?;

    let mut tx = Transaction::new(SourceApi::FundingIntents, date, amount);
    tx.id = Some(id);
    tx.status = status.map(str::to_string);
    tx.kind = kind.map(str::to_string);
    tx.created_at = created_at.map(str::to_string);
    tx.updated_at = updated_at.map(str::to_string);
    tx.amount = Some(magnitude);
    tx.final_amount = raw::f64_at(item, "/fundableDetails/finalAmount/amount");
    tx.final_amount_currency =
        raw::str_at(item, "/fundableDetails/finalAmount/currency").map(str::to_string);

    if status == Some("completed") && updated_day.is_some() {
        tx.settle(description);
    }

    Ok(vec![tx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(kind: &str, state: &str) -> Value {
        json!({
            "id": "fi-2",
            "state": state,
            "fundableType": kind,
            "updatedAt": "2023-03-05T00:00:00.000Z",
            "fundableDetails": {
                "createdAt": "2023-03-04T00:00:00.000Z",
                "amount": "75.0",
                "requestedAmountValue": "75.0",
                "finalAmount": {"amount": "75.0", "currency": "CAD"}
            },
            "transferMetadata": {"sender_name": "ACME Corp"}
        })
    }

    #[test]
    fn test_deposit_intent_keeps_positive_amount() {
        let txs = normalize(&item("Deposit", "completed")).unwrap();
        let tx = &txs[0];
        assert_eq!(tx.alternative_amount, 75.0);
        assert_eq!(
            tx.settlement.as_ref().unwrap().export_description,
            "Deposit to ACME Corp"
        );
    }

    #[test]
    fn test_withdrawal_intent_is_negated() {
        let txs = normalize(&item("Withdrawal", "completed")).unwrap();
        let tx = &txs[0];
        assert_eq!(tx.alternative_amount, -75.0);
        assert_eq!(tx.settlement.as_ref().unwrap().export_description, "Withdrawal");
    }

    #[test]
    fn test_incomplete_intent_is_not_settled() {
        let txs = normalize(&item("Deposit", "initiated")).unwrap();
        assert!(txs[0].settlement.is_none());
    }
}
