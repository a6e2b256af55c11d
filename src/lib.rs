pub mod config;
pub mod error;
pub mod fetch;
pub mod finals;
pub mod query;
pub mod render;
pub mod server;
pub mod table;

pub use config::Config;
pub use error::LoadError;
pub use finals::{Dataset, FinalRecord, WinCount};
pub use query::QueryService;

#[cfg(test)]
pub(crate) mod testdata {
    use crate::finals::{Dataset, FinalRecord};
    use std::net::SocketAddr;
    use warp::Filter;

    /// Trimmed copy of the finals page: five tables, the finals list at index 3.
    pub const FINALS_PAGE: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/testdata/finals_page.html"
    ));

    pub fn sample_dataset() -> Dataset {
        Dataset::from_records(
            "memory://sample",
            vec![
                FinalRecord::new(1954, "West Germany", "Hungary"),
                FinalRecord::new(1958, "Brazil", "Sweden"),
                FinalRecord::new(1962, "Brazil", "Czechoslovakia"),
                FinalRecord::new(2014, "Germany", "Argentina"),
                FinalRecord::new(2018, "France", "Croatia"),
            ],
        )
    }

    /// Serve the fixture page at `/finals` on an ephemeral local port.
    /// Must be called from inside a tokio runtime.
    pub fn serve_fixture() -> SocketAddr {
        let page = warp::path("finals").map(|| warp::reply::html(FINALS_PAGE));
        let (addr, server) = warp::serve(page).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        addr
    }
}
