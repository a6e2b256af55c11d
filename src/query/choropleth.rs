// src/query/choropleth.rs

use serde::Serialize;

use crate::finals::WinCount;

/// Plasma, the sequential scale the map is colored with (dark = few wins).
pub const PLASMA: [&str; 10] = [
    "#0d0887", "#46039f", "#7201a8", "#9c179e", "#bd3786", "#d8576b", "#ed7953", "#fb9f3a",
    "#fdca26", "#f0f921",
];

pub const MAP_TITLE: &str = "FIFA World Cup Wins";

/// A Plotly figure holding a single choropleth trace; serializes to the JSON
/// `Plotly.newPlot` takes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethFigure {
    pub data: Vec<ChoroplethTrace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub locations: Vec<String>,
    pub locationmode: &'static str,
    pub z: Vec<u32>,
    pub colorscale: Vec<(f64, &'static str)>,
    pub colorbar: ColorBar,
    pub hovertemplate: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub geo: Geo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geo {
    pub projection: Projection,
    pub showframe: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// Evenly spaced `[position, color]` stops.
pub fn plasma_scale() -> Vec<(f64, &'static str)> {
    let last = (PLASMA.len() - 1) as f64;
    PLASMA
        .iter()
        .enumerate()
        .map(|(i, color)| (i as f64 / last, *color))
        .collect()
}

impl ChoroplethFigure {
    pub fn from_win_counts(win_counts: &[WinCount]) -> Self {
        let trace = ChoroplethTrace {
            kind: "choropleth",
            locations: win_counts.iter().map(|wc| wc.country.clone()).collect(),
            locationmode: "country names",
            z: win_counts.iter().map(|wc| wc.wins).collect(),
            colorscale: plasma_scale(),
            colorbar: ColorBar {
                title: Title { text: "Wins" },
            },
            hovertemplate: "%{location}<br>Wins=%{z}<extra></extra>",
        };
        ChoroplethFigure {
            data: vec![trace],
            layout: Layout {
                title: Title { text: MAP_TITLE },
                geo: Geo {
                    projection: Projection {
                        kind: "natural earth",
                    },
                    showframe: false,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryService;
    use crate::testdata::sample_dataset;
    use serde_json::json;

    #[test]
    fn test_plasma_scale_spans_unit_interval() {
        let scale = plasma_scale();
        assert_eq!(scale.len(), 10);
        assert_eq!(scale[0], (0.0, "#0d0887"));
        assert_eq!(scale[9], (1.0, "#f0f921"));
        assert!(scale.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_figure_covers_whole_summary() {
        let svc = QueryService::new(sample_dataset());
        let fig = svc.choropleth();
        assert_eq!(fig.data.len(), 1);
        let trace = &fig.data[0];
        assert_eq!(trace.locations, vec!["Brazil", "Germany", "France"]);
        assert_eq!(trace.z, vec![2, 2, 1]);
        assert_eq!(
            trace.z.iter().sum::<u32>() as usize,
            svc.dataset().finals.len()
        );
    }

    #[test]
    fn test_figure_json_shape() -> anyhow::Result<()> {
        let fig = ChoroplethFigure::from_win_counts(&[WinCount {
            country: "Spain".into(),
            wins: 1,
        }]);
        let value = serde_json::to_value(&fig)?;
        assert_eq!(value["data"][0]["type"], json!("choropleth"));
        assert_eq!(value["data"][0]["locationmode"], json!("country names"));
        assert_eq!(value["data"][0]["locations"], json!(["Spain"]));
        assert_eq!(value["data"][0]["z"], json!([1]));
        assert_eq!(value["data"][0]["colorscale"][0], json!([0.0, "#0d0887"]));
        assert_eq!(value["layout"]["title"]["text"], json!(MAP_TITLE));
        assert_eq!(value["layout"]["geo"]["projection"]["type"], json!("natural earth"));
        Ok(())
    }

    #[test]
    fn test_empty_summary_gives_empty_trace() {
        let fig = ChoroplethFigure::from_win_counts(&[]);
        assert!(fig.data[0].locations.is_empty());
        assert!(fig.data[0].z.is_empty());
    }
}
