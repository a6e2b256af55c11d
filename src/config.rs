// src/config.rs

use anyhow::{Context, Result};
use std::{env, net::SocketAddr};
use tracing::warn;
use url::Url;

pub const DEFAULT_PORT: u16 = 8050;
pub const DEFAULT_FINALS_URL: &str = "https://en.wikipedia.org/wiki/List_of_FIFA_World_Cup_finals";
/// Position of the finals list among the tables on the source page.
pub const DEFAULT_TABLE_INDEX: usize = 3;

/// Process settings, read once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub finals_url: Url,
    /// Table tried first when looking for the finals list. `None` scans the
    /// whole page.
    pub table_index: Option<usize>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; `from_env` passes `env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, default = DEFAULT_PORT, "invalid PORT, using default");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let raw_url = lookup("FINALS_URL").unwrap_or_else(|| DEFAULT_FINALS_URL.to_string());
        let finals_url =
            Url::parse(raw_url.trim()).with_context(|| format!("invalid FINALS_URL {:?}", raw_url))?;

        let table_index = match lookup("FINALS_TABLE_INDEX") {
            None => Some(DEFAULT_TABLE_INDEX),
            Some(raw) => {
                let raw = raw.trim();
                if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
                    None
                } else {
                    match raw.parse() {
                        Ok(idx) => Some(idx),
                        Err(_) => {
                            warn!(value = %raw, default = DEFAULT_TABLE_INDEX, "invalid FINALS_TABLE_INDEX, using default");
                            Some(DEFAULT_TABLE_INDEX)
                        }
                    }
                }
            }
        };

        Ok(Config {
            port,
            finals_url,
            table_index,
        })
    }

    /// All interfaces on the configured port.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
