//! Final assembly: chronological ordering and the export column set.

use crate::transaction::Transaction;

/// All kept transactions in export order, plus the union of their present
/// field names in first-seen order (the spreadsheet column set).
#[derive(Debug, Clone)]
pub struct Aggregate {
    pub transactions: Vec<Transaction>,
    pub columns: Vec<&'static str>,
}

pub fn aggregate(mut transactions: Vec<Transaction>) -> Aggregate {
    // Stable sort: records sharing a day keep their incoming order, so
    // equal-timestamp output is deterministic.
    transactions.sort_by_key(|tx| tx.alternative_date);

    let mut columns: Vec<&'static str> = Vec::new();
    for tx in &transactions {
        for (name, _) in tx.fields() {
            if !columns.contains(&name) {
                columns.push(name);
            }
        }
    }

    Aggregate { transactions, columns }
}
