// src/finals/dataset.rs

use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::{info, instrument};

use super::normalize::{extract_records, select_finals_table};
use super::types::{FinalRecord, WinCount};
use crate::config::Config;
use crate::fetch::fetch_page;
use crate::table::parse_tables;

/// Everything the dashboard serves, built once at startup and read-only after.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    /// Where the finals were scraped from.
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub finals: Vec<FinalRecord>,
    /// Ordered by wins descending, then country name.
    pub win_counts: Vec<WinCount>,
    /// Distinct winners, alphabetical. Feeds the country dropdown.
    pub countries: Vec<String>,
    /// Distinct final years, ascending. Feeds the year dropdown.
    pub years: Vec<u16>,
}

impl Dataset {
    /// Derive the summary and dropdown domains from a set of finals.
    pub fn from_records(source: impl Into<String>, finals: Vec<FinalRecord>) -> Self {
        let finals: Vec<FinalRecord> = finals.into_iter().map(FinalRecord::normalized).collect();
        let win_counts = summarize_wins(&finals);
        let countries = finals
            .iter()
            .map(|f| f.winner.clone())
            .filter(|w| !w.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let years = finals
            .iter()
            .map(|f| f.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Dataset {
            source: source.into(),
            loaded_at: Utc::now(),
            finals,
            win_counts,
            countries,
            years,
        }
    }

    /// Parse a fetched page into a dataset.
    pub fn from_html(source: impl Into<String>, html: &str, table_hint: Option<usize>) -> Result<Self> {
        let source = source.into();
        let tables = parse_tables(html);
        info!(source = %source, tables = tables.len(), "parsed page tables");

        let table = select_finals_table(&tables, table_hint)?;
        let finals = extract_records(table)?;
        info!(index = table.index, finals = finals.len(), "selected finals table");

        Ok(Self::from_records(source, finals))
    }

    pub fn wins_for(&self, country: &str) -> Option<u32> {
        self.win_counts
            .iter()
            .find(|wc| wc.country == country)
            .map(|wc| wc.wins)
    }

    pub fn final_for(&self, year: u16) -> Option<&FinalRecord> {
        self.finals.iter().find(|f| f.year == year)
    }

    pub fn total_wins(&self) -> u32 {
        self.win_counts.iter().map(|wc| wc.wins).sum()
    }
}

/// Count finals won per country.
pub fn summarize_wins(finals: &[FinalRecord]) -> Vec<WinCount> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for f in finals.iter().filter(|f| !f.winner.is_empty()) {
        *counts.entry(f.winner.as_str()).or_default() += 1;
    }
    let mut summary: Vec<WinCount> = counts
        .into_iter()
        .map(|(country, wins)| WinCount {
            country: country.to_string(),
            wins,
        })
        .collect();
    summary.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.country.cmp(&b.country)));
    summary
}

/// Fetch the configured page and build the dataset. One request, no retries.
#[instrument(level = "info", skip(client, config), fields(url = %config.finals_url))]
pub async fn load(client: &Client, config: &Config) -> Result<Dataset> {
    let html = fetch_page(client, &config.finals_url).await?;
    Dataset::from_html(config.finals_url.as_str(), &html, config.table_index)
}
