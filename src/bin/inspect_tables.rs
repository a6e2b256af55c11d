//! List every table on the finals page and whether it has the finals columns.
//!
//! Usage: `cargo run --bin inspect_tables -- [URL]` (defaults to `FINALS_URL`).

use anyhow::{Context, Result};
use std::env;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;
use wcfinals::{
    fetch::{build_client, fetch_page},
    finals::{normalize::missing_columns, select_finals_table},
    table::parse_tables,
    Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(env).init();

    let config = Config::from_env()?;
    let url = match env::args().nth(1) {
        Some(raw) => Url::parse(&raw).with_context(|| format!("invalid URL {:?}", raw))?,
        None => config.finals_url.clone(),
    };

    let client = build_client()?;
    let html = fetch_page(&client, &url).await?;
    let tables = parse_tables(&html);

    println!("→ {} tables on {}", tables.len(), url);
    for table in &tables {
        let missing = missing_columns(table);
        let shape = if missing.is_empty() {
            "finals shape".to_string()
        } else {
            format!("missing {:?}", missing)
        };
        println!(
            "[{:>2}] {} rows  {:?}  caption={:?}  ({})",
            table.index,
            table.rows.len(),
            table.headers,
            table.caption.as_deref().unwrap_or(""),
            shape
        );
    }

    match select_finals_table(&tables, config.table_index) {
        Ok(table) => println!("✔ finals table: index {}", table.index),
        Err(e) => println!("✘ {}", e),
    }
    Ok(())
}
