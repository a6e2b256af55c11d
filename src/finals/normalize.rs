// src/finals/normalize.rs

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, warn};

use super::types::FinalRecord;
use crate::error::LoadError;
use crate::table::HtmlTable;

/// Historical names folded into their successor state.
pub const COUNTRY_ALIASES: &[(&str, &str)] = &[("West Germany", "Germany")];

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})\b").expect("year regex should compile"));

/// The three columns the dashboard reads from the finals table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalColumn {
    Year,
    Winner,
    RunnerUp,
}

impl CanonicalColumn {
    pub const ALL: [CanonicalColumn; 3] = [
        CanonicalColumn::Year,
        CanonicalColumn::Winner,
        CanonicalColumn::RunnerUp,
    ];

    /// Header text on the source page.
    pub fn source_header(self) -> &'static str {
        match self {
            CanonicalColumn::Year => "Year",
            CanonicalColumn::Winner => "Winners",
            CanonicalColumn::RunnerUp => "Runners-up",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CanonicalColumn::Year => "Year",
            CanonicalColumn::Winner => "Winner",
            CanonicalColumn::RunnerUp => "RunnerUp",
        }
    }
}

/// Map a historical country name to the name it is counted under.
pub fn normalize_country(name: &str) -> String {
    let name = name.trim();
    COUNTRY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Source headers the table lacks; empty when it has the finals shape.
pub fn missing_columns(table: &HtmlTable) -> Vec<&'static str> {
    CanonicalColumn::ALL
        .iter()
        .map(|c| c.source_header())
        .filter(|h| table.column(h).is_none())
        .collect()
}

/// Rename source headers to their canonical names; other headers are untouched.
pub fn rename_columns(mut table: HtmlTable) -> HtmlTable {
    for header in table.headers.iter_mut() {
        if let Some(col) = CanonicalColumn::ALL
            .iter()
            .find(|c| c.source_header() == header.as_str())
        {
            *header = col.name().to_string();
        }
    }
    table
}

/// Pick the finals table: the hinted position if it has the finals columns,
/// otherwise the first table on the page that does.
pub fn select_finals_table(tables: &[HtmlTable], hint: Option<usize>) -> Result<&HtmlTable> {
    if let Some(idx) = hint {
        match tables.get(idx) {
            Some(table) => {
                let missing = missing_columns(table);
                if missing.is_empty() {
                    debug!(index = idx, "hinted table has the finals columns");
                    return Ok(table);
                }
                warn!(index = idx, ?missing, "hinted table lacks finals columns, scanning page");
            }
            None => warn!(
                index = idx,
                tables = tables.len(),
                "hinted table index out of range, scanning page"
            ),
        }
    }

    match tables.iter().find(|t| missing_columns(t).is_empty()) {
        Some(table) => Ok(table),
        None => bail!(LoadError::parse(format!(
            "none of {} tables has columns {:?}",
            tables.len(),
            CanonicalColumn::ALL.map(CanonicalColumn::source_header)
        ))),
    }
}

/// Turn the finals table into records, renaming columns and folding aliases.
///
/// Rows without a four-digit year are skipped, as are finals with no winner
/// yet. A repeated year or a winner without a runner-up is an error.
pub fn extract_records(table: &HtmlTable) -> Result<Vec<FinalRecord>> {
    let table = rename_columns(table.clone());
    let column = |c: CanonicalColumn| {
        table
            .column(c.name())
            .ok_or_else(|| LoadError::parse(format!("table {} has no {} column", table.index, c.name())))
    };
    let (year_col, winner_col, runner_up_col) = (
        column(CanonicalColumn::Year).map_err(anyhow::Error::msg)?,
        column(CanonicalColumn::Winner).map_err(anyhow::Error::msg)?,
        column(CanonicalColumn::RunnerUp).map_err(anyhow::Error::msg)?,
    );

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        let cell = |col: usize| row.get(col).map(|s| s.trim()).unwrap_or_default();

        let Some(year) = parse_year(cell(year_col)) else {
            debug!(cell = %cell(year_col), "skipping row without a year");
            continue;
        };
        let winner = cell(winner_col);
        if winner.is_empty() {
            debug!(year, "skipping final without a winner");
            continue;
        }
        let runner_up = cell(runner_up_col);
        if runner_up.is_empty() {
            bail!(LoadError::parse(format!(
                "final {} has winner {:?} but no runner-up",
                year, winner
            )));
        }
        if !seen.insert(year) {
            bail!(LoadError::parse(format!("year {} appears more than once", year)));
        }
        records.push(FinalRecord::new(year, winner, runner_up));
    }

    if records.is_empty() {
        bail!(LoadError::parse(format!(
            "table {} contains no played finals",
            table.index
        )));
    }
    Ok(records)
}

fn parse_year(text: &str) -> Option<u16> {
    YEAR_RE.captures(text)?.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::parse_tables;
    use crate::testdata::FINALS_PAGE;

    fn table(headers: &[&str], rows: &[&[&str]]) -> HtmlTable {
        HtmlTable {
            index: 0,
            caption: None,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_normalize_country() {
        assert_eq!(normalize_country("West Germany"), "Germany");
        assert_eq!(normalize_country(" West Germany "), "Germany");
        assert_eq!(normalize_country("Germany"), "Germany");
        assert_eq!(normalize_country("East Germany"), "East Germany");
        // exact match only
        assert_eq!(normalize_country("west germany"), "west germany");
    }

    #[test]
    fn test_west_germany_record_is_folded() {
        let rec = FinalRecord::new(1954, "West Germany", "Hungary");
        assert_eq!(rec, FinalRecord::new(1954, "Germany", "Hungary"));
        assert_eq!(rec.winner, "Germany");
        assert_eq!(rec.runner_up, "Hungary");
    }

    #[test]
    fn test_rename_columns() {
        let t = rename_columns(table(&["Year", "Winners", "Score", "Runners-up"], &[]));
        assert_eq!(t.headers, vec!["Year", "Winner", "Score", "RunnerUp"]);
    }

    #[test]
    fn test_select_uses_hint() -> Result<()> {
        let tables = parse_tables(FINALS_PAGE);
        let picked = select_finals_table(&tables, Some(3))?;
        assert_eq!(picked.index, 3);
        Ok(())
    }

    #[test]
    fn test_select_scans_when_hint_is_wrong() -> Result<()> {
        let tables = parse_tables(FINALS_PAGE);
        // the nations table has Winners and Runners-up but no Year
        assert_eq!(missing_columns(&tables[4]), vec!["Year"]);
        assert_eq!(select_finals_table(&tables, Some(4))?.index, 3);
        assert_eq!(select_finals_table(&tables, Some(42))?.index, 3);
        assert_eq!(select_finals_table(&tables, None)?.index, 3);
        Ok(())
    }

    #[test]
    fn test_select_fails_without_finals_shape() {
        let tables = vec![table(&["Team", "Winners"], &[&["Brazil", "5"]])];
        let err = select_finals_table(&tables, Some(0)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::Parse { .. })
        ));
    }

    #[test]
    fn test_extract_fixture_records() -> Result<()> {
        let tables = parse_tables(FINALS_PAGE);
        let records = extract_records(&tables[3])?;

        // 2026 has not been played and is skipped
        assert_eq!(records.len(), 22);
        assert_eq!(records[0], FinalRecord::new(1930, "Uruguay", "Argentina"));
        assert_eq!(records[4], FinalRecord::new(1954, "Germany", "Hungary"));
        assert!(records.iter().all(|r| r.year != 2026));
        assert!(records
            .iter()
            .all(|r| r.winner != "West Germany" && r.runner_up != "West Germany"));
        Ok(())
    }

    #[test]
    fn test_extract_skips_rows_without_year() -> Result<()> {
        let t = table(
            &["Year", "Winners", "Runners-up"],
            &[
                &["Notes", "", ""],
                &["1930[1]", "Uruguay", "Argentina"],
                &["2030", "", ""],
            ],
        );
        let records = extract_records(&t)?;
        assert_eq!(records, vec![FinalRecord::new(1930, "Uruguay", "Argentina")]);
        Ok(())
    }

    #[test]
    fn test_extract_rejects_duplicate_year() {
        let t = table(
            &["Year", "Winners", "Runners-up"],
            &[&["1930", "Uruguay", "Argentina"], &["1930", "Italy", "Hungary"]],
        );
        let err = extract_records(&t).unwrap_err();
        assert!(err.to_string().contains("1930"));
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::Parse { .. })
        ));
    }

    #[test]
    fn test_extract_rejects_missing_runner_up() {
        let t = table(&["Year", "Winners", "Runners-up"], &[&["1930", "Uruguay", ""]]);
        assert!(extract_records(&t).is_err());
    }

    #[test]
    fn test_extract_rejects_empty_table() {
        let t = table(&["Year", "Winners", "Runners-up"], &[]);
        assert!(extract_records(&t).is_err());
    }
}
