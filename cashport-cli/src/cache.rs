//! Raw-response cache: one pretty-printed JSON object keyed by query name,
//! each value that query's fully merged response tree. The schema mirrors
//! live fetch output exactly, so downstream normalization cannot tell the
//! difference.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

pub fn save_cache(path: impl AsRef<Path>, data: &BTreeMap<String, Value>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn load_cache(path: impl AsRef<Path>) -> Result<BTreeMap<String, Value>> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)
        .with_context(|| format!("read {} (run `cashport fetch` first?)", path.display()))?;
    Ok(serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?)
}
