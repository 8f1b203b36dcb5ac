//! Cross-endpoint duplicate resolution.
//!
//! Several endpoints report the same underlying event. Each overlapping
//! endpoint keeps only the record types it is authoritative for, and the
//! two activity-feed generations split history at a fixed cutover date.
//! The rules are data, not code: the platform has changed which endpoint
//! is authoritative for a transaction type before.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::transaction::{SourceApi, Transaction};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InclusionRules {
    /// Ledger-activity record types to keep (the rest duplicate more
    /// specific endpoints).
    pub ledger_activity_keep: Vec<String>,
    /// Interest-payout record types to keep.
    pub interest_payout_keep: Vec<String>,
    /// Funding-intent record types to keep (withdrawal intents are covered
    /// by the withdrawals endpoint).
    pub funding_intent_keep: Vec<String>,
    /// The current feed owns records dated on/after this day; the legacy
    /// feed owns records dated before it.
    pub feed_cutover: NaiveDate,
}

impl Default for InclusionRules {
    fn default() -> Self {
        Self {
            ledger_activity_keep: vec!["REIMB".to_string()],
            interest_payout_keep: vec!["INT".to_string()],
            funding_intent_keep: vec!["Deposit".to_string()],
            feed_cutover: NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
        }
    }
}

impl InclusionRules {
    pub fn keeps(&self, tx: &Transaction) -> bool {
        let kind = tx.kind.as_deref().unwrap_or_default();
        match tx.source_api {
            SourceApi::AccountActivities => self.ledger_activity_keep.iter().any(|k| k == kind),
            SourceApi::InterestPayouts => self.interest_payout_keep.iter().any(|k| k == kind),
            SourceApi::FundingIntents => self.funding_intent_keep.iter().any(|k| k == kind),
            SourceApi::ActivityFeed => tx.alternative_date >= self.feed_cutover,
            SourceApi::ActivityList => tx.alternative_date < self.feed_cutover,
            _ => true,
        }
    }

    /// Drop every record another endpoint is authoritative for. Dropped
    /// records are duplicates, not errors.
    pub fn resolve(&self, transactions: Vec<Transaction>) -> Vec<Transaction> {
        transactions.into_iter().filter(|tx| self.keeps(tx)).collect()
    }
}
