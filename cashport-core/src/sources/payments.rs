//! Peer-to-peer payment normalizer.
//!
//! Expected item shape:
//!   { "id", "__typename", "status", "type", "amount", "createdAt",
//!     "updatedAt", "senderContact": { "name"?, "identifier",
//!     "contactee": { "name" }? }, "receiverContact": { ... } }
//!
//! Amounts are unsigned cent-integer strings; `type == "send"` means money
//! left the account.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::money::cents_to_units;
use crate::raw;
use crate::transaction::{SourceApi, Transaction};

pub fn normalize(item: &Value) -> Result<Vec<Transaction>> {
    let id = raw::str_at(item, "/id").unwrap_or_default().to_string();
    let status = raw::str_at(item, "/status");
    let kind = raw::str_at(item, "/type");
    let updated_at = raw::str_at(item, "/updatedAt");
    let created_at = raw::str_at(item, "/createdAt");
    let raw_amount = raw::text_at(item, "/amount")
        .with_context(|| format!("p2p payment {id}: missing amount"))?;
    let signed = if kind == Some("send") {
        format!("-{raw_amount}")
    } else {
        format!("+{raw_amount}")
    };
    let amount =
        cents_to_units(&signed).with_context(|| format!("p2p payment {id}: bad amount"))?;

    let description = format!(
        "{} to {} ({})",
        raw::str_at(item, "/__typename").unwrap_or("P2PPayment"),
        raw::str_at(item, "/receiverContact/identifier").unwrap_or_default(),
        raw::str_at(item, "/receiverContact/name").unwrap_or_default()
    );

    let updated_day = updated_at.and_then(raw::day);
    let date = raw::day_with_fallback(updated_at, created_at, &format!("p2p payment {id}"))?;

    let mut tx = Transaction::new(SourceApi::Payments, date, amount);
    tx.id = Some(id);
    tx.status = status.map(str::to_string);
    tx.kind = kind.map(str::to_string);
    tx.created_at = created_at.map(str::to_string);
    tx.updated_at = updated_at.map(str::to_string);
    tx.amount = raw_amount.parse().ok();
    tx.sender_name = contact_name(item, "/senderContact");
    tx.receiver_name = contact_name(item, "/receiverContact");

    if status == Some("accepted") && updated_day.is_some() {
        tx.settle(description);
    }

    Ok(vec![tx])
}

// Contact name falls back to the linked profile when the contact entry has
// no display name of its own.
fn contact_name(item: &Value, contact: &str) -> Option<String> {
    raw::str_at(item, &format!("{contact}/name"))
        .or_else(|| raw::str_at(item, &format!("{contact}/contactee/name")))
        .map(str::to_string)
}
