//! Export shaping: which columns each artifact gets, which rows qualify,
//! and the footer reconciliation formulas.

use anyhow::{Context, Result};
use std::collections::HashMap;

use cashport_core::aggregate::Aggregate;
use cashport_core::transaction::{CellValue, Transaction};

/// Fields with this prefix make up the ledger-import CSV.
pub const EXPORT_PREFIX: &str = "export_";
/// The column the totals sum over.
pub const AMOUNT_COLUMN: &str = "alternative_amount";

/// Spreadsheet column letter for a 1-indexed column (1 -> A, 26 -> Z,
/// 27 -> AA), used to build range references programmatically.
pub fn column_letter(index: usize) -> String {
    let mut letters = String::new();
    let mut n = index;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters
}

#[derive(Debug, Clone, PartialEq)]
pub struct FooterFormulas {
    pub grand_total: String,
    pub filtered_total: String,
}

/// Locate the amount column and build the footer formulas over the data
/// range (spreadsheet rows 2..=n+1, header at row 1). With no exported
/// records there is no amount column and no meaningful footer.
pub fn footer_formulas(aggregate: &Aggregate) -> Result<(usize, FooterFormulas)> {
    let amount_index = aggregate
        .columns
        .iter()
        .position(|c| *c == AMOUNT_COLUMN)
        .context("amount column missing from export columns (no transactions to export?)")?;
    let letter = column_letter(amount_index + 1);
    let last_data_row = aggregate.transactions.len() + 1;
    let range = format!("{letter}2:{letter}{last_data_row}");

    Ok((
        amount_index,
        FooterFormulas {
            grand_total: format!("=SUM({range})"),
            filtered_total: format!("=SUBTOTAL(109, {range})"),
        },
    ))
}

/// CSV header: the export-prefixed columns, alphabetically sorted so the
/// column order never depends on fetch order.
pub fn csv_columns(aggregate: &Aggregate) -> Vec<&'static str> {
    let mut columns: Vec<_> = aggregate
        .columns
        .iter()
        .copied()
        .filter(|c| c.starts_with(EXPORT_PREFIX))
        .collect();
    columns.sort_unstable();
    columns
}

/// CSV data rows: settled transactions only, in aggregate order. Unsettled
/// records are silently omitted; importing a transaction that later gets
/// reversed or voided would corrupt downstream ledgers.
pub fn csv_rows(aggregate: &Aggregate) -> Vec<Vec<String>> {
    let columns = csv_columns(aggregate);
    aggregate
        .transactions
        .iter()
        .filter(|tx| tx.is_settled())
        .map(|tx| {
            let cells = cell_map(tx);
            columns
                .iter()
                .map(|column| cells.get(column).map(CellValue::to_display).unwrap_or_default())
                .collect()
        })
        .collect()
}

/// Present fields of one transaction, keyed by column name.
pub fn cell_map(tx: &Transaction) -> HashMap<&'static str, CellValue> {
    tx.fields().into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashport_core::aggregate::aggregate;
    use cashport_core::transaction::{SourceApi, Transaction};
    use chrono::NaiveDate;

    fn tx(date: &str, amount: f64, settled: bool) -> Transaction {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        let mut tx = Transaction::new(SourceApi::Deposits, date, amount);
        tx.id = Some("d1".to_string());
        if settled {
            tx.settle("Deposit from BankAccountOwner ");
        }
        tx
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(3), "C");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(52), "AZ");
        assert_eq!(column_letter(702), "ZZ");
        assert_eq!(column_letter(703), "AAA");
    }

    #[test]
    fn test_footer_formulas_span_the_data_rows() {
        let agg = aggregate(vec![tx("2023-05-01", 1.0, true), tx("2023-05-02", 2.0, false)]);
        let (index, formulas) = footer_formulas(&agg).unwrap();
        let letter = column_letter(index + 1);
        assert_eq!(formulas.grand_total, format!("=SUM({letter}2:{letter}3)"));
        assert_eq!(formulas.filtered_total, format!("=SUBTOTAL(109, {letter}2:{letter}3)"));
    }

    #[test]
    fn test_footer_formulas_fail_without_records() {
        let agg = aggregate(Vec::new());
        assert!(footer_formulas(&agg).is_err());
    }

    #[test]
    fn test_csv_columns_are_sorted_export_fields() {
        let agg = aggregate(vec![tx("2023-05-01", 1.0, true)]);
        assert_eq!(
            csv_columns(&agg),
            vec!["export_amount", "export_date", "export_description", "export_id"]
        );
    }

    #[test]
    fn test_csv_rows_keep_settled_only() {
        let agg = aggregate(vec![tx("2023-05-01", 1.0, true), tx("2023-05-02", 2.0, false)]);
        let rows = csv_rows(&agg);
        assert_eq!(rows.len(), 1);
        // export_amount, export_date, export_description, export_id
        assert_eq!(rows[0][0], "1");
        assert_eq!(rows[0][1], "2023-05-01");
        assert_eq!(rows[0][3], "list_deposits_for_account_d1");
    }
}
