use anyhow::Result;
use std::env;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, EnvFilter};
use wcfinals::{fetch, finals, server, Config, QueryService};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) logging + config ─────────────────────────────────────────
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .init();

    let config = Config::from_env()?;
    info!(?config, "startup");

    // ─── 2) scrape the finals once; nothing is served without them ───
    let client = fetch::build_client()?;
    let dataset = match finals::load(&client, &config).await {
        Ok(ds) => ds,
        Err(e) => {
            error!("loading finals from {} failed: {:?}", config.finals_url, e);
            return Err(e);
        }
    };
    info!(
        finals = dataset.finals.len(),
        countries = dataset.countries.len(),
        "dataset ready"
    );

    // ─── 3) serve ────────────────────────────────────────────────────
    let routes = server::routes(QueryService::new(dataset));
    let addr = config.bind_addr();
    info!("Server starting on port {}", config.port);
    info!("Dashboard: http://localhost:{}/", config.port);
    info!("Health check: http://localhost:{}/health", config.port);

    warp::serve(routes).run(addr).await;

    Ok(())
}
