//! cashport-export: derives the export shape (columns, rows, footer
//! formulas) from an aggregate and writes the ledger CSV and the
//! reconciliation workbook.

pub mod ledger_csv;
pub mod report;
pub mod workbook;

pub use ledger_csv::write_ledger_csv;
pub use report::{column_letter, csv_columns, csv_rows, footer_formulas};
pub use workbook::write_workbook;
