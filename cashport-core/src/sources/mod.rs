//! Endpoint-specific normalizers: each maps one raw item into zero, one or
//! two canonical [`Transaction`]s.

pub mod account_activities;
pub mod activity_feed;
pub mod deposits;
pub mod funding_intents;
pub mod interest_payouts;
pub mod payments;
pub mod spend;
pub mod withdrawals;

use anyhow::Result;
use serde_json::Value;

use crate::transaction::{SourceApi, Transaction};

/// Registry entry binding an endpoint to its merged-response layout and
/// normalizer. Dispatch is by enum + fn pointer, not string lookup.
pub struct SourceSpec {
    pub api: SourceApi,
    /// Query name; also the key the raw-response cache stores this under.
    pub query: &'static str,
    /// JSON pointer to the item list inside the merged response tree.
    pub items: &'static str,
    /// Connection-style lists wrap each item in an `{ "node": ... }` edge.
    pub edge_wrapped: bool,
    pub normalize: fn(&Value) -> Result<Vec<Transaction>>,
}

pub const SOURCES: &[SourceSpec] = &[
    SourceSpec {
        api: SourceApi::AccountActivities,
        query: "list_activities_for_account",
        items: "/paginatedActivities/results",
        edge_wrapped: false,
        normalize: account_activities::normalize,
    },
    SourceSpec {
        api: SourceApi::Deposits,
        query: "list_deposits_for_account",
        items: "/deposits/results",
        edge_wrapped: false,
        normalize: deposits::normalize,
    },
    SourceSpec {
        api: SourceApi::Withdrawals,
        query: "list_withdrawals_for_account",
        items: "/results",
        edge_wrapped: false,
        normalize: withdrawals::normalize,
    },
    SourceSpec {
        api: SourceApi::SpendTransactions,
        query: "spend_transactions",
        items: "/nodes",
        edge_wrapped: false,
        normalize: spend::normalize,
    },
    SourceSpec {
        api: SourceApi::FundingIntents,
        query: "search_funding_intents",
        items: "/edges",
        edge_wrapped: true,
        normalize: funding_intents::normalize,
    },
    SourceSpec {
        api: SourceApi::InterestPayouts,
        query: "fetch_interest_payout",
        items: "/paginatedActivities/results",
        edge_wrapped: false,
        normalize: interest_payouts::normalize,
    },
    SourceSpec {
        api: SourceApi::Payments,
        query: "payments",
        items: "/nodes",
        edge_wrapped: false,
        normalize: payments::normalize,
    },
    SourceSpec {
        api: SourceApi::ActivityList,
        query: "fetch_activity_list",
        items: "/edges",
        edge_wrapped: true,
        normalize: activity_feed::normalize_legacy,
    },
    SourceSpec {
        api: SourceApi::ActivityFeed,
        query: "fetch_activity_feed_items",
        items: "/edges",
        edge_wrapped: true,
        normalize: activity_feed::normalize_current,
    },
];

/// Normalize every item of one endpoint's merged response. Endpoints
/// return newest-first pages; items are walked in reverse so same-day
/// records keep the order the account UI shows. A missing list (endpoint
/// not fetched) normalizes to nothing.
pub fn normalize_response(spec: &SourceSpec, data: &Value) -> Result<Vec<Transaction>> {
    let Some(list) = data.pointer(spec.items).and_then(Value::as_array) else {
        return Ok(Vec::new());
    };
    let mut out = Vec::new();
    for entry in list.iter().rev() {
        let item = if spec.edge_wrapped {
            entry.get("node").unwrap_or(entry)
        } else {
            entry
        };
        out.extend((spec.normalize)(item)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_response_reverses_page_order() {
        let spec = SOURCES
            .iter()
            .find(|s| s.api == SourceApi::Deposits)
            .unwrap();
        let data = json!({"id": "acc-1", "deposits": {"results": [
            {"id": "d2", "status": "accepted", "completed_at": "2023-05-02",
             "created_at": "2023-05-02", "value": {"amount": "2.00", "currency": "CAD"},
             "source": {"__typename": "BankAccountOwner"}},
            {"id": "d1", "status": "accepted", "completed_at": "2023-05-01",
             "created_at": "2023-05-01", "value": {"amount": "1.00", "currency": "CAD"},
             "source": {"__typename": "BankAccountOwner"}},
        ]}});

        let txs = normalize_response(spec, &data).unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].id.as_deref(), Some("d1"));
        assert_eq!(txs[1].id.as_deref(), Some("d2"));
    }

    #[test]
    fn test_normalize_response_unwraps_edges() {
        let spec = SOURCES
            .iter()
            .find(|s| s.api == SourceApi::FundingIntents)
            .unwrap();
        let data = json!({"edges": [{"cursor": "c1", "node": {
            "id": "fi1", "state": "completed", "fundableType": "Deposit",
            "updatedAt": "2023-03-01T00:00:00.000Z",
            "fundableDetails": {"amount": "50.0", "createdAt": "2023-02-28T00:00:00.000Z"},
            "transferMetadata": {"sender_name": "ACME Corp"}
        }}]});

        let txs = normalize_response(spec, &data).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].id.as_deref(), Some("fi1"));
    }

    #[test]
    fn test_normalize_response_missing_list_is_empty() {
        let spec = &SOURCES[0];
        assert!(normalize_response(spec, &json!({})).unwrap().is_empty());
    }
}
