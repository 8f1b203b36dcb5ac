//! Interest payout normalizer.
//!
//! Expected item shape:
//!   { "id", "type", "process_date", "description",
//!     "net_cash": { "amount", "currency" } }

use anyhow::{Context, Result};
use serde_json::Value;

use crate::raw;
use crate::transaction::{SourceApi, Transaction};

pub fn normalize(item: &Value) -> Result<Vec<Transaction>> {
    let id = raw::str_at(item, "/id").unwrap_or_default().to_string();
    let process_date = raw::str_at(item, "/process_date");
    let amount = raw::f64_at(item, "/net_cash/amount")
        .with_context(|| format!("interest payout {id}: missing net_cash.amount"))?;
    let description = raw::str_at(item, "/description").unwrap_or_default().to_string();

    let date = process_date
        .and_then(raw::day)
        .with_context(|| format!("interest payout {id}: unparseable process_date {process_date:?}"))?;

    let mut tx = Transaction::new(SourceApi::InterestPayouts, date, amount);
    tx.id = Some(id);
    tx.kind = raw::str_at(item, "/type").map(str::to_string);
    tx.process_date = process_date.map(str::to_string);
    tx.amount = Some(amount);
    tx.currency = raw::str_at(item, "/net_cash/currency").map(str::to_string);
    tx.description = Some(description.clone());

    // A payout with a process date has happened; there is no pending state
    // on this endpoint.
    tx.settle(description);

    Ok(vec![tx])
}
