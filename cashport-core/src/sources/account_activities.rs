//! Ledger activity feed normalizer.
//!
//! Expected item shape:
//!   { "id", "type", "effective_date", "process_date", "description",
//!     "net_cash": { "amount", "currency" } }

use anyhow::{Context, Result};
use serde_json::Value;

use crate::raw;
use crate::transaction::{SourceApi, Transaction};

pub fn normalize(item: &Value) -> Result<Vec<Transaction>> {
    let id = raw::str_at(item, "/id").unwrap_or_default().to_string();
    let effective_date = raw::str_at(item, "/effective_date");
    let process_date = raw::str_at(item, "/process_date");
    let amount = raw::f64_at(item, "/net_cash/amount")
        .with_context(|| format!("ledger activity {id}: missing net_cash.amount"))?;
    let description = raw::str_at(item, "/description").unwrap_or_default().to_string();

    // Settled once the effective date is known; until then the record only
    // carries its processing date.
    let settled_day = effective_date.and_then(raw::day);
    let date = raw::day_with_fallback(effective_date, process_date, &format!("ledger activity {id}"))?;

    let mut tx = Transaction::new(SourceApi::AccountActivities, date, amount);
    tx.id = Some(id);
    tx.kind = raw::str_at(item, "/type").map(str::to_string);
    tx.process_date = process_date.map(str::to_string);
    tx.effective_date = effective_date.map(str::to_string);
    tx.amount = Some(amount);
    tx.currency = raw::str_at(item, "/net_cash/currency").map(str::to_string);
    tx.description = Some(description.clone());

    if settled_day.is_some() {
        tx.settle(description);
    }

    Ok(vec![tx])
}
