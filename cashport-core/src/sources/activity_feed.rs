//! Activity feed item normalizer, shared by the legacy activity-list
//! endpoint and the current activity-feed endpoint (same item shape, two
//! API generations).
//!
//! Expected item shape (edge node):
//!   { "canonicalId", "type", "subType", "status", "occurredAt", "amount",
//!     "amountSign", "currency", "spendMerchant"?, "eTransferName"?,
//!     "eTransferEmail"?, "aftOriginatorName"?, "aftTransactionType"?,
//!     "p2pHandle"?, "p2pMessage"? }

use anyhow::{Context, Result};
use serde_json::Value;

use crate::raw;
use crate::transaction::{SourceApi, Transaction};

/// The only status the feed reports for not-yet-final items; everything
/// else counts as settled.
const UNSETTLED_STATUS: &str = "pending";

pub fn normalize_legacy(item: &Value) -> Result<Vec<Transaction>> {
    normalize_item(SourceApi::ActivityList, item)
}

pub fn normalize_current(item: &Value) -> Result<Vec<Transaction>> {
    normalize_item(SourceApi::ActivityFeed, item)
}

fn normalize_item(api: SourceApi, item: &Value) -> Result<Vec<Transaction>> {
    let id = raw::str_at(item, "/canonicalId").unwrap_or_default().to_string();
    let occurred_at = raw::str_at(item, "/occurredAt");
    let date = occurred_at
        .and_then(raw::day)
        .with_context(|| format!("feed item {id}: unparseable occurredAt {occurred_at:?}"))?;
    let magnitude = raw::f64_at(item, "/amount")
        .with_context(|| format!("feed item {id}: missing amount"))?;
    let amount = if raw::str_at(item, "/amountSign") == Some("negative") {
        -magnitude
    } else {
        magnitude
    };
    let status = raw::str_at(item, "/status");
    let description = describe(item);

    let mut tx = Transaction::new(api, date, amount);
    tx.id = Some(id);
    tx.status = status.map(str::to_string);
    tx.kind = raw::str_at(item, "/type").map(str::to_string);
    tx.sub_type = raw::str_at(item, "/subType").map(str::to_string);
    tx.occurred_at = occurred_at.map(str::to_string);
    tx.amount = Some(magnitude);
    tx.currency = raw::str_at(item, "/currency").map(str::to_string);
    tx.description = Some(description.clone());

    if status != Some(UNSETTLED_STATUS) {
        tx.settle(description);
    }

    Ok(vec![tx])
}

/// Human description via the type/subtype dispatch table, falling back to
/// `"{type}[ - {subType}]"` when the dispatch yields nothing.
fn describe(item: &Value) -> String {
    let kind = raw::str_at(item, "/type").unwrap_or_default();
    let sub = raw::str_at(item, "/subType").unwrap_or_default();

    let special = match (kind, sub) {
        ("SPEND", _) => raw::str_at(item, "/spendMerchant").map(str::to_string),
        ("WITHDRAWAL", "E_TRANSFER") => Some(format!(
            "{kind} - {} ({})",
            raw::str_at(item, "/eTransferName").unwrap_or_default(),
            raw::str_at(item, "/eTransferEmail").unwrap_or_default()
        )),
        ("DEPOSIT", "AFT") => Some(format!(
            "{} - {}",
            raw::str_at(item, "/aftTransactionType").unwrap_or_default(),
            raw::str_at(item, "/aftOriginatorName").unwrap_or_default()
        )),
        ("P2P_PAYMENT", _) => raw::str_at(item, "/p2pHandle").map(|handle| {
            match raw::str_at(item, "/p2pMessage").filter(|m| !m.is_empty()) {
                Some(message) => format!("{sub} - {handle} - {message}"),
                None => format!("{sub} - {handle}"),
            }
        }),
        _ => None,
    };

    match special.filter(|d| !d.is_empty()) {
        Some(d) => d,
        None if sub.is_empty() => kind.to_string(),
        None => format!("{kind} - {sub}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base(kind: &str, sub: &str) -> Value {
        json!({
            "canonicalId": "feed-1",
            "type": kind,
            "subType": sub,
            "status": "completed",
            "occurredAt": "2023-08-01T15:00:00.000Z",
            "amount": "12.34",
            "amountSign": "negative",
            "currency": "CAD"
        })
    }

    #[test]
    fn test_amount_sign_is_applied() {
        let txs = normalize_current(&base("SPEND", "")).unwrap();
        assert_eq!(txs[0].alternative_amount, -12.34);
        assert_eq!(txs[0].amount, Some(12.34));
    }

    #[test]
    fn test_spend_uses_merchant_name() {
        let mut item = base("SPEND", "");
        item["spendMerchant"] = json!("Corner Cafe");
        let txs = normalize_current(&item).unwrap();
        assert_eq!(txs[0].description.as_deref(), Some("Corner Cafe"));
    }

    #[test]
    fn test_etransfer_withdrawal_description() {
        let mut item = base("WITHDRAWAL", "E_TRANSFER");
        item["eTransferName"] = json!("Alice");
        item["eTransferEmail"] = json!("alice@example.com");
        let txs = normalize_current(&item).unwrap();
        assert_eq!(
            txs[0].description.as_deref(),
            Some("WITHDRAWAL - Alice (alice@example.com)")
        );
    }

    #[test]
    fn test_aft_deposit_description() {
        let mut item = base("DEPOSIT", "AFT");
        item["aftTransactionType"] = json!("Payroll");
        item["aftOriginatorName"] = json!("ACME Corp");
        let txs = normalize_current(&item).unwrap();
        assert_eq!(txs[0].description.as_deref(), Some("Payroll - ACME Corp"));
    }

    #[test]
    fn test_p2p_description_with_and_without_message() {
        let mut item = base("P2P_PAYMENT", "P2P_SEND");
        item["p2pHandle"] = json!("$friend");
        let txs = normalize_current(&item).unwrap();
        assert_eq!(txs[0].description.as_deref(), Some("P2P_SEND - $friend"));

        item["p2pMessage"] = json!("thanks!");
        let txs = normalize_current(&item).unwrap();
        assert_eq!(txs[0].description.as_deref(), Some("P2P_SEND - $friend - thanks!"));
    }

    #[test]
    fn test_dispatch_falls_back_to_type_and_subtype() {
        let txs = normalize_current(&base("INTEREST", "")).unwrap();
        assert_eq!(txs[0].description.as_deref(), Some("INTEREST"));

        let txs = normalize_current(&base("WITHDRAWAL", "BILL_PAY")).unwrap();
        assert_eq!(txs[0].description.as_deref(), Some("WITHDRAWAL - BILL_PAY"));

        // SPEND with a blank merchant falls through too.
        let mut item = base("SPEND", "PREPAID");
        item["spendMerchant"] = json!("");
        let txs = normalize_current(&item).unwrap();
        assert_eq!(txs[0].description.as_deref(), Some("SPEND - PREPAID"));
    }

    #[test]
    fn test_only_pending_is_unsettled() {
        let mut item = base("INTEREST", "");
        item["status"] = json!("pending");
        let txs = normalize_current(&item).unwrap();
        assert!(txs[0].settlement.is_none());

        let txs = normalize_current(&base("INTEREST", "")).unwrap();
        assert!(txs[0].settlement.is_some());
    }

    #[test]
    fn test_legacy_and_current_tag_their_source() {
        let legacy = normalize_legacy(&base("SPEND", "")).unwrap();
        assert_eq!(legacy[0].source_api, SourceApi::ActivityList);
        let current = normalize_current(&base("SPEND", "")).unwrap();
        assert_eq!(current[0].source_api, SourceApi::ActivityFeed);
    }
}
