//! Reconciliation workbook writer: every transaction, every column, plus
//! footer totals to check against the reported balance.

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use cashport_core::aggregate::Aggregate;
use cashport_core::transaction::CellValue;

use crate::report;

const SHEET_NAME: &str = "Cash account data export";

/// Write the full spreadsheet: header, one row per transaction in sorted
/// order, one blank row, then the three reconciliation footer rows
/// (grand total, visible-rows subtotal, reported balance).
pub fn write_workbook(aggregate: &Aggregate, balance: f64, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let (amount_index, formulas) = report::footer_formulas(aggregate)?;
    let label_col = amount_index.saturating_sub(1) as u16;
    let amount_col = amount_index as u16;

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME).context("naming worksheet")?;

    for (col, name) in aggregate.columns.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }

    for (row, tx) in aggregate.transactions.iter().enumerate() {
        let cells = report::cell_map(tx);
        let row = (row + 1) as u32;
        for (col, name) in aggregate.columns.iter().enumerate() {
            match cells.get(name) {
                Some(CellValue::Text(s)) => {
                    sheet.write_string(row, col as u16, s)?;
                }
                Some(CellValue::Number(n)) => {
                    sheet.write_number(row, col as u16, *n)?;
                }
                None => {}
            }
        }
    }

    // Footer sits below one blank spacer row.
    let mut row = (aggregate.transactions.len() + 2) as u32;
    sheet.write_string(row, label_col, "Grand total")?;
    sheet.write_formula(row, amount_col, formulas.grand_total.as_str())?;
    row += 1;
    sheet.write_string(row, label_col, "Filtered total")?;
    sheet.write_formula(row, amount_col, formulas.filtered_total.as_str())?;
    row += 1;
    sheet.write_string(row, label_col, "Current balance")?;
    sheet.write_number(row, amount_col, balance)?;

    workbook
        .save(path)
        .with_context(|| format!("saving {}", path.display()))?;
    Ok(())
}
