//! Ledger-import CSV writer: settled transactions only, export-prefixed
//! columns only.

use std::path::Path;

use anyhow::{Context, Result};

use cashport_core::aggregate::Aggregate;

use crate::report;

pub fn write_ledger_csv(aggregate: &Aggregate, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    writer.write_record(report::csv_columns(aggregate))?;
    for row in report::csv_rows(aggregate) {
        writer.write_record(&row)?;
    }
    writer.flush().with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
