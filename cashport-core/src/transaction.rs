//! Canonical transaction record shared by every endpoint normalizer.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which endpoint a record came from. The string form feeds the
/// `source_api` export column and synthetic export ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceApi {
    AccountActivities,
    Deposits,
    Withdrawals,
    SpendTransactions,
    /// Synthesized in-account cashback payout derived from a spend record.
    SpendCashback,
    Payments,
    FundingIntents,
    InterestPayouts,
    /// Legacy activity feed, authoritative before the cutover date.
    ActivityList,
    /// Current activity feed, authoritative from the cutover date on.
    ActivityFeed,
}

impl SourceApi {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceApi::AccountActivities => "list_activities_for_account",
            SourceApi::Deposits => "list_deposits_for_account",
            SourceApi::Withdrawals => "list_withdrawals_for_account",
            SourceApi::SpendTransactions => "spend_transactions",
            SourceApi::SpendCashback => "spend_transactions_cashback",
            SourceApi::Payments => "payments",
            SourceApi::FundingIntents => "search_funding_intents",
            SourceApi::InterestPayouts => "fetch_interest_payout",
            SourceApi::ActivityList => "fetch_activity_list",
            SourceApi::ActivityFeed => "fetch_activity_feed_items",
        }
    }
}

impl fmt::Display for SourceApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single spreadsheet/CSV cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn to_display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
        }
    }
}

/// The four `export_*` fields, present only once a transaction is
/// considered final. Modeled as one struct so the quadruple is
/// all-or-nothing by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub export_id: String,
    pub export_date: NaiveDate,
    pub export_description: String,
    pub export_amount: f64,
}

/// Normalized output of the endpoint normalizers (endpoint-agnostic).
///
/// `alternative_date` orders the export and `alternative_amount` feeds the
/// totals; both are mandatory. Everything else is display data carried
/// through from whichever raw fields the endpoint happens to expose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub source_api: SourceApi,
    pub id: Option<String>,
    pub status: Option<String>,
    /// Raw endpoint `type` code (DEP, WDL, REIMB, Deposit, SPEND, ...).
    pub kind: Option<String>,
    pub sub_type: Option<String>,
    pub process_date: Option<String>,
    pub effective_date: Option<String>,
    pub created_at: Option<String>,
    pub completed_at: Option<String>,
    pub updated_at: Option<String>,
    pub posted_at: Option<String>,
    pub occurred_at: Option<String>,
    /// Amount exactly as the endpoint reported it (cent-integer endpoints
    /// keep their raw magnitude here).
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub merchant_name: Option<String>,
    pub reward_amount: Option<f64>,
    pub reward_account_type: Option<String>,
    pub funding_source: Option<String>,
    pub last4: Option<String>,
    pub destination: Option<String>,
    pub sender_name: Option<String>,
    pub receiver_name: Option<String>,
    pub final_amount: Option<f64>,
    pub final_amount_currency: Option<String>,
    pub alternative_date: NaiveDate,
    pub alternative_amount: f64,
    pub settlement: Option<Settlement>,
}

impl Transaction {
    pub fn new(source_api: SourceApi, alternative_date: NaiveDate, alternative_amount: f64) -> Self {
        Self {
            source_api,
            id: None,
            status: None,
            kind: None,
            sub_type: None,
            process_date: None,
            effective_date: None,
            created_at: None,
            completed_at: None,
            updated_at: None,
            posted_at: None,
            occurred_at: None,
            amount: None,
            currency: None,
            description: None,
            merchant_name: None,
            reward_amount: None,
            reward_account_type: None,
            funding_source: None,
            last4: None,
            destination: None,
            sender_name: None,
            receiver_name: None,
            final_amount: None,
            final_amount_currency: None,
            alternative_date,
            alternative_amount,
            settlement: None,
        }
    }

    /// Mark the record as settled: populate the export quadruple from the
    /// canonical date/amount and the given description.
    pub fn settle(&mut self, description: impl Into<String>) {
        let id = self.id.clone().unwrap_or_default();
        self.settlement = Some(Settlement {
            export_id: format!("{}_{}", self.source_api, id),
            export_date: self.alternative_date,
            export_description: description.into(),
            export_amount: self.alternative_amount,
        });
    }

    pub fn is_settled(&self) -> bool {
        self.settlement.is_some()
    }

    /// Present fields as ordered `(column, cell)` pairs: raw display fields
    /// first, then the canonical pair, then the export quadruple. The
    /// aggregator derives the spreadsheet column set from these.
    pub fn fields(&self) -> Vec<(&'static str, CellValue)> {
        let mut out = vec![("source_api", CellValue::Text(self.source_api.to_string()))];
        push_text(&mut out, "id", &self.id);
        push_text(&mut out, "status", &self.status);
        push_text(&mut out, "type", &self.kind);
        push_text(&mut out, "sub_type", &self.sub_type);
        push_text(&mut out, "process_date", &self.process_date);
        push_text(&mut out, "effective_date", &self.effective_date);
        push_text(&mut out, "created_at", &self.created_at);
        push_text(&mut out, "completed_at", &self.completed_at);
        push_text(&mut out, "updated_at", &self.updated_at);
        push_text(&mut out, "posted_at", &self.posted_at);
        push_text(&mut out, "occurred_at", &self.occurred_at);
        push_number(&mut out, "amount", &self.amount);
        push_text(&mut out, "currency", &self.currency);
        push_text(&mut out, "description", &self.description);
        push_text(&mut out, "merchant_name", &self.merchant_name);
        push_number(&mut out, "reward_amount", &self.reward_amount);
        push_text(&mut out, "reward_account_type", &self.reward_account_type);
        push_text(&mut out, "funding_source", &self.funding_source);
        push_text(&mut out, "last4", &self.last4);
        push_text(&mut out, "destination", &self.destination);
        push_text(&mut out, "sender_name", &self.sender_name);
        push_text(&mut out, "receiver_name", &self.receiver_name);
        push_number(&mut out, "final_amount", &self.final_amount);
        push_text(&mut out, "final_amount_currency", &self.final_amount_currency);
        out.push((
            "alternative_date",
            CellValue::Text(self.alternative_date.format("%Y-%m-%d").to_string()),
        ));
        out.push(("alternative_amount", CellValue::Number(self.alternative_amount)));
        if let Some(settlement) = &self.settlement {
            out.push(("export_id", CellValue::Text(settlement.export_id.clone())));
            out.push((
                "export_date",
                CellValue::Text(settlement.export_date.format("%Y-%m-%d").to_string()),
            ));
            out.push((
                "export_description",
                CellValue::Text(settlement.export_description.clone()),
            ));
            out.push(("export_amount", CellValue::Number(settlement.export_amount)));
        }
        out
    }
}

fn push_text(out: &mut Vec<(&'static str, CellValue)>, name: &'static str, value: &Option<String>) {
    if let Some(v) = value {
        out.push((name, CellValue::Text(v.clone())));
    }
}

fn push_number(out: &mut Vec<(&'static str, CellValue)>, name: &'static str, value: &Option<f64>) {
    if let Some(v) = value {
        out.push((name, CellValue::Number(*v)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_settle_populates_full_quadruple() {
        let mut tx = Transaction::new(SourceApi::Deposits, day("2023-05-01"), 100.0);
        tx.id = Some("dep-1".to_string());
        assert!(!tx.is_settled());

        tx.settle("Deposit from BankAccountOwner 1234");
        let settlement = tx.settlement.as_ref().unwrap();
        assert_eq!(settlement.export_id, "list_deposits_for_account_dep-1");
        assert_eq!(settlement.export_date, day("2023-05-01"));
        assert_eq!(settlement.export_amount, 100.0);
    }

    #[test]
    fn test_fields_skip_absent_values() {
        let tx = Transaction::new(SourceApi::Payments, day("2024-01-02"), -5.0);
        let names: Vec<_> = tx.fields().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["source_api", "alternative_date", "alternative_amount"]);
    }

    #[test]
    fn test_fields_append_export_quadruple_last() {
        let mut tx = Transaction::new(SourceApi::Payments, day("2024-01-02"), -5.0);
        tx.id = Some("p1".to_string());
        tx.settle("P2PPayment to a@b.c (Alice)");
        let names: Vec<_> = tx.fields().into_iter().map(|(n, _)| n).collect();
        assert_eq!(
            &names[names.len() - 4..],
            &["export_id", "export_date", "export_description", "export_amount"]
        );
    }
}
