//! Card spend normalizer.
//!
//! Expected item shape:
//!   { "id", "postedAt", "merchantName", "status", "amount",
//!     "rewardAmount", "rewardPayoutCustodianAccountType" }
//!
//! Amounts and rewards are cent-integer strings with the sign already
//! applied upstream. A settled spend whose reward pays out into the cash
//! account itself never shows up as its own upstream transaction, so a
//! second record is synthesized for it here.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::money::cents_to_units;
use crate::raw;
use crate::transaction::{Settlement, SourceApi, Transaction};

/// Reward payout custodian account types with this prefix keep the payout
/// inside the cash account.
const IN_ACCOUNT_REWARD_PREFIX: &str = "ca_cash_";

pub fn normalize(item: &Value) -> Result<Vec<Transaction>> {
    let id = raw::str_at(item, "/id").unwrap_or_default().to_string();
    let posted_at = raw::str_at(item, "/postedAt")
        .with_context(|| format!("spend transaction {id}: missing postedAt"))?;
    let date = raw::day(posted_at)
        .with_context(|| format!("spend transaction {id}: unparseable postedAt {posted_at:?}"))?;
    let raw_amount = raw::text_at(item, "/amount")
        .with_context(|| format!("spend transaction {id}: missing amount"))?;
    let amount = cents_to_units(&raw_amount)
        .with_context(|| format!("spend transaction {id}: bad amount"))?;
    let merchant = raw::str_at(item, "/merchantName").unwrap_or_default().to_string();
    let status = raw::str_at(item, "/status");
    let reward_account_type = raw::str_at(item, "/rewardPayoutCustodianAccountType");

    // Refunds come back with a blank merchant and nothing else to identify them.
    let description = if merchant.is_empty() {
        "Missing description. Refund?".to_string()
    } else {
        merchant.clone()
    };

    let mut tx = Transaction::new(SourceApi::SpendTransactions, date, amount);
    tx.id = Some(id.clone());
    tx.status = status.map(str::to_string);
    tx.posted_at = Some(posted_at.to_string());
    tx.merchant_name = Some(merchant.clone());
    tx.amount = raw_amount.parse().ok();
    tx.reward_amount = raw::text_at(item, "/rewardAmount").and_then(|r| r.parse().ok());
    tx.reward_account_type = reward_account_type.map(str::to_string);

    if status != Some("settled") {
        return Ok(vec![tx]);
    }
    tx.settle(description);

    let mut out = vec![tx];
    if reward_account_type.is_some_and(|t| t.starts_with(IN_ACCOUNT_REWARD_PREFIX)) {
        let raw_reward = raw::text_at(item, "/rewardAmount")
            .with_context(|| format!("spend transaction {id}: in-account reward without rewardAmount"))?;
        let reward = cents_to_units(&raw_reward)
            .with_context(|| format!("spend transaction {id}: bad rewardAmount"))?;

        let mut cashback = Transaction::new(SourceApi::SpendCashback, date, reward);
        cashback.settlement = Some(Settlement {
            export_id: format!("{}_{id}_cashback", SourceApi::SpendTransactions),
            export_date: date,
            export_description: format!("Cashback for {merchant} ({amount:.2})"),
            export_amount: reward,
        });
        out.push(cashback);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(status: &str, reward_account_type: &str) -> Value {
        json!({
            "id": "sp-1",
            "postedAt": "2023-06-15T12:00:00.000Z",
            "merchantName": "Groceries R Us",
            "status": status,
            "amount": "-1500",
            "rewardAmount": "500",
            "rewardPayoutCustodianAccountType": reward_account_type
        })
    }

    #[test]
    fn test_cent_string_amount_is_converted() {
        let txs = normalize(&item("settled", "non_registered_tfsa")).unwrap();
        assert_eq!(txs.len(), 1);
        let tx = &txs[0];
        assert_eq!(tx.alternative_amount, -15.00);
        assert_eq!(tx.amount, Some(-1500.0));
        assert_eq!(
            tx.settlement.as_ref().unwrap().export_description,
            "Groceries R Us"
        );
    }

    #[test]
    fn test_in_account_reward_synthesizes_cashback_record() {
        let txs = normalize(&item("settled", "ca_cash_msb")).unwrap();
        assert_eq!(txs.len(), 2);

        let cashback = &txs[1];
        assert_eq!(cashback.source_api, SourceApi::SpendCashback);
        assert_eq!(cashback.alternative_amount, 5.00);
        assert_eq!(cashback.alternative_date, txs[0].alternative_date);

        let settlement = cashback.settlement.as_ref().unwrap();
        assert_eq!(settlement.export_amount, 5.00);
        assert_eq!(settlement.export_id, "spend_transactions_sp-1_cashback");
        assert_eq!(settlement.export_description, "Cashback for Groceries R Us (-15.00)");
    }

    #[test]
    fn test_unsettled_spend_never_synthesizes() {
        let txs = normalize(&item("pending", "ca_cash_msb")).unwrap();
        assert_eq!(txs.len(), 1);
        assert!(txs[0].settlement.is_none());
    }

    #[test]
    fn test_blank_merchant_marks_probable_refund() {
        let mut refund = item("settled", "");
        refund["merchantName"] = json!("");
        refund["amount"] = json!("1500");
        let txs = normalize(&refund).unwrap();
        assert_eq!(
            txs[0].settlement.as_ref().unwrap().export_description,
            "Missing description. Refund?"
        );
        assert_eq!(txs[0].alternative_amount, 15.00);
    }
}
