// src/finals/types.rs

use serde::{Deserialize, Serialize};

use super::normalize::normalize_country;

/// One World Cup final.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq, Hash)]
pub struct FinalRecord {
    pub year: u16,
    pub winner: String,
    pub runner_up: String,
}

impl FinalRecord {
    /// Build a record with both country names alias-normalized.
    pub fn new(year: u16, winner: impl AsRef<str>, runner_up: impl AsRef<str>) -> Self {
        FinalRecord {
            year,
            winner: normalize_country(winner.as_ref()),
            runner_up: normalize_country(runner_up.as_ref()),
        }
    }

    pub fn normalized(self) -> Self {
        FinalRecord::new(self.year, &self.winner, &self.runner_up)
    }
}

/// Number of finals a country has won.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq, Hash)]
pub struct WinCount {
    pub country: String,
    pub wins: u32,
}
