use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use cashport_core::overlap::InclusionRules;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiSection,
    pub account: AccountSection,
    pub rules: RulesSection,
    pub export: ExportSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    pub graphql_url: String,
    pub token_url: String,
    pub client_id: String,
    pub scope: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSection {
    /// Cash account id; the balance query response confirms or corrects it.
    pub id: String,
}

/// Duplicate-resolution rules, kept in config because the platform has
/// moved authority between endpoints before.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesSection {
    pub ledger_activity_keep: Vec<String>,
    pub interest_payout_keep: Vec<String>,
    pub funding_intent_keep: Vec<String>,
    /// YYYY-MM-DD day the current activity feed took over from the legacy one.
    pub feed_cutover: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSection {
    pub csv_file: String,
    pub workbook_file: String,
    pub cache_file: String,
}

impl Default for Config {
    fn default() -> Self {
        let rules = InclusionRules::default();
        Self {
            api: ApiSection {
                graphql_url: "https://my.wealthsimple.com/graphql".to_string(),
                token_url: "https://api.production.wealthsimple.com/v1/oauth/v2/token".to_string(),
                client_id: String::new(),
                scope: "invest.read trade.read tax.read".to_string(),
            },
            account: AccountSection { id: String::new() },
            rules: RulesSection {
                ledger_activity_keep: rules.ledger_activity_keep,
                interest_payout_keep: rules.interest_payout_keep,
                funding_intent_keep: rules.funding_intent_keep,
                feed_cutover: rules.feed_cutover.format("%Y-%m-%d").to_string(),
            },
            export: ExportSection {
                csv_file: "export.csv".to_string(),
                workbook_file: "full.xlsx".to_string(),
                cache_file: "cached-data.json".to_string(),
            },
        }
    }
}

impl RulesSection {
    pub fn inclusion_rules(&self) -> Result<InclusionRules> {
        let feed_cutover = chrono::NaiveDate::parse_from_str(&self.feed_cutover, "%Y-%m-%d")
            .with_context(|| format!("parse rules.feed_cutover {:?}", self.feed_cutover))?;
        Ok(InclusionRules {
            ledger_activity_keep: self.ledger_activity_keep.clone(),
            interest_payout_keep: self.interest_payout_keep.clone(),
            funding_intent_keep: self.funding_intent_keep.clone(),
            feed_cutover,
        })
    }
}

pub fn cashport_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".cashport"))
}

pub fn ensure_cashport_home() -> Result<PathBuf> {
    let dir = cashport_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_cashport_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_round_trip() {
        let cfg = Config::default();
        let rules = cfg.rules.inclusion_rules().unwrap();
        assert_eq!(rules.ledger_activity_keep, vec!["REIMB"]);
        assert_eq!(rules.feed_cutover.to_string(), "2023-04-01");
    }

    #[test]
    fn test_config_serializes_as_toml() {
        let cfg = Config::default();
        let s = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back.export.csv_file, "export.csv");
        assert_eq!(back.rules.feed_cutover, "2023-04-01");
    }
}
