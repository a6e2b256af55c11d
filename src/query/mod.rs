// src/query/mod.rs

pub mod choropleth;

use std::sync::Arc;
use tracing::debug;

use crate::finals::Dataset;
pub use choropleth::ChoroplethFigure;

pub const COUNTRY_PROMPT: &str = "Select a country to view win count.";
pub const YEAR_PROMPT: &str = "Select a year to view the result.";

/// Lookups behind the dashboard widgets. Cheap to clone; every clone shares
/// the same read-only dataset.
#[derive(Debug, Clone)]
pub struct QueryService {
    dataset: Arc<Dataset>,
}

impl QueryService {
    pub fn new(dataset: Dataset) -> Self {
        Self::from_shared(Arc::new(dataset))
    }

    pub fn from_shared(dataset: Arc<Dataset>) -> Self {
        QueryService { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Sentence with the number of finals `country` has won.
    pub fn country_wins(&self, country: Option<&str>) -> String {
        let Some(country) = country.filter(|c| !c.is_empty()) else {
            return COUNTRY_PROMPT.to_string();
        };
        match self.dataset.wins_for(country) {
            Some(wins) => format!("{} has won the FIFA World Cup {} times.", country, wins),
            None => {
                debug!(country, "no win count");
                format!("No win data available for {}.", country)
            }
        }
    }

    /// Sentence naming the winner and runner-up of the final in `year`.
    pub fn year_result(&self, year: Option<u16>) -> String {
        let Some(record) = year.and_then(|y| self.dataset.final_for(y)) else {
            debug!(?year, "no final for year");
            return YEAR_PROMPT.to_string();
        };
        format!(
            "In {}, the winner was {} and the runner-up was {}.",
            record.year, record.winner, record.runner_up
        )
    }

    /// World map of wins. The selected country does not change the map.
    pub fn choropleth(&self) -> ChoroplethFigure {
        ChoroplethFigure::from_win_counts(&self.dataset.win_counts)
    }
}
