//! Sequential fetch driver: runs every registered query to completion
//! (all pages) against one account and assembles the snapshot the
//! pipeline works from.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{Duration, SecondsFormat, Utc};
use serde_json::{Map, Value, json};

use cashport_client::paginator::fetch_all;
use cashport_client::queries;
use cashport_client::transport::QueryTransport;
use cashport_core::money::cents_to_units;
use cashport_core::sources::{SOURCES, normalize_response};
use cashport_core::transaction::Transaction;

/// Every query's fully merged response tree, keyed by query name. This is
/// also exactly what the raw-response cache persists.
pub struct AccountSnapshot {
    pub queries: BTreeMap<String, Value>,
}

impl AccountSnapshot {
    pub fn new(queries: BTreeMap<String, Value>) -> Self {
        Self { queries }
    }

    /// Settled balance for the reconciliation footer; reported by the
    /// platform as a cent-integer string.
    pub fn balance(&self) -> Result<f64> {
        let raw = self
            .queries
            .get(queries::CASH_ACCOUNT_BALANCE.name)
            .and_then(|data| cashport_core::raw::text_at(data, "/spendingBalance"))
            .context("snapshot has no spendingBalance")?;
        cents_to_units(&raw).context("bad spendingBalance")
    }

    /// Normalize every endpoint's records into canonical transactions.
    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        let mut out = Vec::new();
        for spec in SOURCES {
            if let Some(data) = self.queries.get(spec.query) {
                out.extend(normalize_response(spec, data)?);
            }
        }
        Ok(out)
    }
}

/// Fetch all endpoints in sequence. Pagination is inherently sequential
/// (each continuation token comes from the prior page), and the queries
/// themselves are run one after another for deterministic output.
pub async fn fetch_snapshot<T: QueryTransport>(
    transport: &T,
    account_id: &str,
) -> Result<AccountSnapshot> {
    let mut collected = BTreeMap::new();

    let balance = fetch_all(
        transport,
        &queries::CASH_ACCOUNT_BALANCE,
        vars(json!({"accountId": account_id})),
    )
    .await?;
    // The balance response carries the authoritative account id.
    let account_id = balance
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or(account_id)
        .to_string();
    collected.insert(queries::CASH_ACCOUNT_BALANCE.name.to_string(), balance);

    let future_date = (Utc::now().date_naive() + Duration::days(2))
        .format("%Y-%m-%d")
        .to_string();
    let end_date = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    let plan: Vec<(&queries::QuerySpec, Map<String, Value>)> = vec![
        (
            &queries::LIST_ACTIVITIES_FOR_ACCOUNT,
            vars(json!({
                "accountId": account_id,
                "futureDateString": future_date,
                "limit": 100,
                "offset": 0,
                "sortBy": "process_date",
                "sortOrder": "desc",
                "types": ["INT", "DEP", "WDL", "TRFIN", "TRFOUT", "REFUND", "REIMB"],
            })),
        ),
        (
            &queries::LIST_DEPOSITS_FOR_ACCOUNT,
            vars(json!({
                "accountId": account_id,
                "includeCancelled": false,
                "limit": 100,
                "offset": 0,
                "statuses": ["accepted", "pending", "pending_custodian_notification", "posted"],
            })),
        ),
        (
            &queries::LIST_WITHDRAWALS_FOR_ACCOUNT,
            vars(json!({
                "accountId": account_id,
                "includeCancelled": false,
                "limit": 100,
                "offset": 0,
                "statuses": ["pending", "accepted", "posted", "rejected", "cancelled"],
            })),
        ),
        (
            &queries::SPEND_TRANSACTIONS,
            vars(json!({"accountId": account_id, "first": 25})),
        ),
        (
            &queries::SEARCH_FUNDING_INTENTS,
            vars(json!({"accountId": account_id, "first": 25})),
        ),
        (&queries::PAYMENTS, vars(json!({"first": 25}))),
        (
            &queries::FETCH_INTEREST_PAYOUT,
            vars(json!({
                "accountId": account_id,
                "futureDateString": future_date,
                "sortBy": "process_date",
                "sortOrder": "desc",
            })),
        ),
        (
            &queries::FETCH_ACTIVITY_LIST,
            vars(json!({
                "accountIds": [account_id],
                "endDate": end_date,
                "first": 50,
                "types": [
                    "DEPOSIT", "WITHDRAWAL", "INTEREST", "P2P_PAYMENT", "SPEND",
                    "REFUND", "REIMBURSEMENT", "INTERNAL_TRANSFER", "PROMOTION", "FEE",
                ],
            })),
        ),
        (
            &queries::FETCH_ACTIVITY_FEED_ITEMS,
            vars(json!({
                "orderBy": "OCCURRED_AT_DESC",
                "condition": {"accountIds": [account_id], "endDate": end_date},
                "first": 50,
            })),
        ),
    ];

    for (query, variables) in plan {
        let data = fetch_all(transport, query, variables).await?;
        collected.insert(query.name.to_string(), data);
    }

    Ok(AccountSnapshot::new(collected))
}

fn vars(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_converts_cent_string() {
        let mut queries_map = BTreeMap::new();
        queries_map.insert(
            "cash_account_balance".to_string(),
            json!({"id": "acc-1", "spendingBalance": "12345"}),
        );
        let snapshot = AccountSnapshot::new(queries_map);
        assert_eq!(snapshot.balance().unwrap(), 123.45);
    }

    #[test]
    fn test_balance_missing_is_an_error() {
        let snapshot = AccountSnapshot::new(BTreeMap::new());
        assert!(snapshot.balance().is_err());
    }

    #[test]
    fn test_transactions_skip_missing_endpoints() {
        let mut queries_map = BTreeMap::new();
        queries_map.insert(
            "spend_transactions".to_string(),
            json!({"nodes": [{
                "id": "sp-1",
                "postedAt": "2023-06-15T12:00:00.000Z",
                "merchantName": "Corner Cafe",
                "status": "settled",
                "amount": "-1200",
            }]}),
        );
        let snapshot = AccountSnapshot::new(queries_map);
        let txs = snapshot.transactions().unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].alternative_amount, -12.00);
    }
}
