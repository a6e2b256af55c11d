// src/server.rs

use serde::{Deserialize, Serialize};
use tracing::debug;
use warp::{reject::Rejection, reply::Reply, Filter};

use crate::query::QueryService;
use crate::render::render_dashboard;

pub const SERVICE_NAME: &str = "wcfinals";

#[derive(Debug, Default, Deserialize)]
pub struct CountryQuery {
    pub country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct YearQuery {
    /// Kept as text so a malformed year reads as "no selection" instead of a 400.
    pub year: Option<String>,
}

impl YearQuery {
    pub fn parsed(&self) -> Option<u16> {
        self.year.as_deref().and_then(|y| y.trim().parse().ok())
    }
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, Serialize)]
struct OptionsResponse<'a> {
    countries: &'a [String],
    years: &'a [u16],
}

/// Every route of the dashboard, sharing one `QueryService`.
pub fn routes(
    service: QueryService,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let with_service = warp::any().map(move || service.clone());

    let index = warp::path::end()
        .and(warp::get())
        .and(with_service.clone())
        .and_then(dashboard);

    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_service.clone())
        .and_then(health_check);

    let country = warp::path!("api" / "country")
        .and(warp::get())
        .and(warp::query::<CountryQuery>())
        .and(with_service.clone())
        .and_then(country_wins);

    let year = warp::path!("api" / "year")
        .and(warp::get())
        .and(warp::query::<YearQuery>())
        .and(with_service.clone())
        .and_then(year_result);

    let choropleth = warp::path!("api" / "choropleth")
        .and(warp::get())
        .and(with_service.clone())
        .and_then(choropleth);

    let finals = warp::path!("api" / "finals")
        .and(warp::get())
        .and(with_service.clone())
        .and_then(finals);

    let options = warp::path!("api" / "options")
        .and(warp::get())
        .and(with_service)
        .and_then(options);

    index
        .or(health)
        .or(country)
        .or(year)
        .or(choropleth)
        .or(finals)
        .or(options)
        .with(warp::trace::request())
}

async fn dashboard(service: QueryService) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::html(render_dashboard(service.dataset())))
}

async fn health_check(service: QueryService) -> Result<impl Reply, Rejection> {
    let ds = service.dataset();
    Ok(warp::reply::json(&serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "finals": ds.finals.len(),
        "loaded_at": ds.loaded_at,
    })))
}

async fn country_wins(query: CountryQuery, service: QueryService) -> Result<impl Reply, Rejection> {
    debug!(country = ?query.country, "country lookup");
    let message = service.country_wins(query.country.as_deref());
    Ok(warp::reply::json(&MessageResponse { message }))
}

async fn year_result(query: YearQuery, service: QueryService) -> Result<impl Reply, Rejection> {
    debug!(year = ?query.year, "year lookup");
    let message = service.year_result(query.parsed());
    Ok(warp::reply::json(&MessageResponse { message }))
}

async fn choropleth(service: QueryService) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&service.choropleth()))
}

async fn finals(service: QueryService) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&service.dataset().finals))
}

async fn options(service: QueryService) -> Result<impl Reply, Rejection> {
    let ds = service.dataset();
    Ok(warp::reply::json(&OptionsResponse {
        countries: &ds.countries,
        years: &ds.years,
    }))
}
