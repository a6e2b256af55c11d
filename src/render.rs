// src/render.rs
//! Dashboard page. The page is static apart from the dropdown options; the
//! map and the two answers are fetched from the JSON routes.

use crate::finals::Dataset;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const DASHBOARD_CSS: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 0 auto; max-width: 1100px; padding: 1rem 2rem; color: #222; }
h1 { text-align: center; }
label { font-weight: bold; display: block; margin-top: 1.5rem; }
select { min-width: 16rem; padding: 0.3rem; margin: 0.4rem 0; }
.output { margin-bottom: 30px; min-height: 1.4em; }
#choropleth { height: 520px; }
footer { margin-top: 3rem; font-size: 0.8rem; color: #777; }
"#;

const DASHBOARD_SCRIPT: &str = r#"
async function getJson(path) {
  const resp = await fetch(path);
  if (!resp.ok) { throw new Error(path + ": " + resp.status); }
  return resp.json();
}

async function drawMap() {
  const fig = await getJson("/api/choropleth");
  Plotly.newPlot("choropleth", fig.data, fig.layout, { responsive: true });
}

async function showCountry() {
  const value = document.getElementById("country-dropdown").value;
  const q = value ? "?country=" + encodeURIComponent(value) : "";
  const body = await getJson("/api/country" + q);
  document.getElementById("country-output").textContent = body.message;
}

async function showYear() {
  const value = document.getElementById("year-dropdown").value;
  const q = value ? "?year=" + encodeURIComponent(value) : "";
  const body = await getJson("/api/year" + q);
  document.getElementById("year-output").textContent = body.message;
}

document.getElementById("country-dropdown").addEventListener("change", () => { showCountry(); drawMap(); });
document.getElementById("year-dropdown").addEventListener("change", showYear);
drawMap();
showCountry();
showYear();
"#;

pub fn render_dashboard(dataset: &Dataset) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>FIFA World Cup Dashboard</title>
    <style>{css}</style>
    <script src="{plotly}"></script>
</head>
<body>
    <h1>FIFA World Cup Dashboard</h1>

    <h3>World Cup Wins by Country</h3>
    <div id="choropleth"></div>

    <label for="country-dropdown">Select a Country:</label>
    <select id="country-dropdown">
        <option value="">Select a country</option>
{countries}
    </select>
    <div id="country-output" class="output"></div>

    <label for="year-dropdown">Select a Year:</label>
    <select id="year-dropdown">
        <option value="">Select a year</option>
{years}
    </select>
    <div id="year-output" class="output"></div>

    <footer>Source: <a href="{source}">{source}</a>, loaded {loaded_at}</footer>
    <script>{js}</script>
</body>
</html>"#,
        css = DASHBOARD_CSS,
        plotly = PLOTLY_CDN,
        countries = render_options(dataset.countries.iter().map(String::as_str)),
        years = render_options(dataset.years.iter().map(|y| y.to_string())),
        source = escape_html(&dataset.source),
        loaded_at = dataset.loaded_at.format("%Y-%m-%d %H:%M UTC"),
        js = DASHBOARD_SCRIPT,
    )
}

fn render_options<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| {
            let v = escape_html(v.as_ref());
            format!(r#"        <option value="{v}">{v}</option>"#, v = v)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finals::FinalRecord;
    use crate::table::parse_tables;
    use crate::testdata::sample_dataset;

    #[test]
    fn test_dashboard_lists_options_in_order() {
        let html = render_dashboard(&sample_dataset());
        let brazil = html.find(r#"<option value="Brazil">"#).expect("Brazil option");
        let france = html.find(r#"<option value="France">"#).expect("France option");
        let germany = html.find(r#"<option value="Germany">"#).expect("Germany option");
        assert!(brazil < france && france < germany);

        let y1954 = html.find(r#"<option value="1954">"#).expect("1954 option");
        let y2018 = html.find(r#"<option value="2018">"#).expect("2018 option");
        assert!(y1954 < y2018);
        assert!(!html.contains("West Germany"));
    }

    #[test]
    fn test_dashboard_has_widgets() {
        let html = render_dashboard(&sample_dataset());
        for id in ["choropleth", "country-dropdown", "country-output", "year-dropdown", "year-output"] {
            assert!(html.contains(&format!(r#"id="{}""#, id)), "missing {}", id);
        }
        // the page itself has no tables
        assert!(parse_tables(&html).is_empty());
    }

    #[test]
    fn test_options_are_escaped() {
        let ds = Dataset::from_records("memory", vec![FinalRecord::new(1999, "A & <B>", "C")]);
        let html = render_dashboard(&ds);
        assert!(html.contains(r#"<option value="A &amp; &lt;B&gt;">A &amp; &lt;B&gt;</option>"#));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }
}
