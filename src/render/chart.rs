//! Renders a temperature profile as a standalone plotly.js HTML page.

use crate::render::error::RenderError;
use crate::types::combined_record::CombinedRecord;
use crate::types::race::RaceParameters;
use log::info;
use serde_json::{json, Value};
use std::path::Path;

pub const DEFAULT_CHART_FILE: &str = "temperatureProfile.html";
const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const LOW_COLOR: &str = "rgb(69, 157, 230)";
const HIGH_COLOR: &str = "rgb(235, 117, 0)";
const ELEVATION_COLOR: &str = "rgb(120, 120, 120)";

/// Builds the plotly figure: the low/high temperature band on the left axis
/// and elevation on the right axis, both against distance in km.
pub fn build_figure(race: &RaceParameters, records: &[CombinedRecord]) -> Value {
    let distance_km: Vec<f64> = records.iter().map(CombinedRecord::distance_km).collect();
    let temp_low: Vec<f64> = records.iter().map(CombinedRecord::temp_low).collect();
    let temp_high: Vec<f64> = records.iter().map(CombinedRecord::temp_high).collect();
    let elevation: Vec<f64> = records.iter().map(CombinedRecord::elevation_m).collect();
    let time_labels: Vec<String> = records
        .iter()
        .map(|r| r.timestamp().format("%Y-%m-%d %H:%M UTC").to_string())
        .collect();

    let hours = race.total_duration().num_minutes() / 60;
    let minutes = race.total_duration().num_minutes() % 60;
    let title = format!(
        "Temperature profile, {} starting {} ({}h{:02}m)",
        race.race_type(),
        race.start_time().format("%Y-%m-%d %H:%M UTC"),
        hours,
        minutes
    );

    json!({
        "data": [
            {
                "type": "scatter",
                "mode": "lines",
                "name": "Temperature Low",
                "x": distance_km,
                "y": temp_low,
                "text": time_labels,
                "line": {"color": LOW_COLOR},
                "yaxis": "y"
            },
            {
                "type": "scatter",
                "mode": "lines",
                "name": "Temperature High",
                "x": distance_km,
                "y": temp_high,
                "text": time_labels,
                "fill": "tonexty",
                "fillcolor": "rgba(235, 117, 0, 0.15)",
                "line": {"color": HIGH_COLOR},
                "yaxis": "y"
            },
            {
                "type": "scatter",
                "mode": "lines",
                "name": "Elevation",
                "x": distance_km,
                "y": elevation,
                "line": {"color": ELEVATION_COLOR, "dash": "dot"},
                "yaxis": "y2"
            }
        ],
        "layout": {
            "title": {"text": title},
            "xaxis": {"title": {"text": "Distance (km)"}},
            "yaxis": {"title": {"text": "Temperature (°C)"}, "showgrid": false},
            "yaxis2": {
                "title": {"text": "Elevation (m)"},
                "overlaying": "y",
                "side": "right",
                "showgrid": false
            },
            "legend": {"x": 0.05, "y": 0.95},
            "hovermode": "x unified",
            "font": {"family": "Courier New, monospace", "size": 14}
        }
    })
}

pub fn render_html(
    race: &RaceParameters,
    records: &[CombinedRecord],
) -> Result<String, RenderError> {
    let figure = serde_json::to_string(&build_figure(race, records))?;
    // Keep "</script>" inside JSON strings from ending the script element.
    let figure = figure.replace("</", "<\\/");
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Birken temperature profile</title>
<script src="{cdn}"></script>
</head>
<body>
<div id="profile" style="width:100%;height:90vh;"></div>
<script>
const figure = {figure};
Plotly.newPlot("profile", figure.data, figure.layout, {{responsive: true}});
</script>
</body>
</html>
"#,
        cdn = PLOTLY_CDN,
        figure = figure
    ))
}

/// Writes the chart page to `path`, replacing any previous file.
pub async fn render_to_file(
    race: &RaceParameters,
    records: &[CombinedRecord],
    path: &Path,
) -> Result<(), RenderError> {
    let html = render_html(race, records)?;
    tokio::fs::write(path, html)
        .await
        .map_err(|e| RenderError::ChartWrite(path.to_path_buf(), e))?;
    info!("Wrote chart for {} points to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::race::RaceType;
    use chrono::{Duration, TimeZone, Utc};

    fn race() -> RaceParameters {
        let start = Utc.with_ymd_and_hms(2024, 3, 16, 8, 0, 0).unwrap();
        RaceParameters::new(
            RaceType::Rennet,
            start,
            Duration::hours(4) + Duration::minutes(30),
        )
        .unwrap()
    }

    fn records() -> Vec<CombinedRecord> {
        let start = Utc.with_ymd_and_hms(2024, 3, 16, 8, 0, 0).unwrap();
        vec![
            CombinedRecord::new(0.0, 250.0, start, -9.0, -6.0).unwrap(),
            CombinedRecord::new(1500.0, 410.0, start + Duration::minutes(6), -9.0, -6.0)
                .unwrap(),
            CombinedRecord::new(3250.0, 700.0, start + Duration::minutes(14), -11.5, -8.0)
                .unwrap(),
        ]
    }

    #[test]
    fn test_figure_traces() {
        let figure = build_figure(&race(), &records());
        let data = figure["data"].as_array().unwrap();
        assert_eq!(data.len(), 3);

        assert_eq!(data[0]["x"], json!([0.0, 1.5, 3.25]));
        assert_eq!(data[0]["y"], json!([-9.0, -9.0, -11.5]));
        assert_eq!(data[1]["y"], json!([-6.0, -6.0, -8.0]));
        assert_eq!(data[2]["y"], json!([250.0, 410.0, 700.0]));
        assert_eq!(data[2]["yaxis"], "y2");
        assert_eq!(figure["layout"]["yaxis2"]["side"], "right");

        let title = figure["layout"]["title"]["text"].as_str().unwrap();
        assert!(title.contains("rennet"));
        assert!(title.contains("4h30m"));
    }

    #[test]
    fn test_html_embeds_figure() {
        let html = render_html(&race(), &records()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(PLOTLY_CDN));
        assert!(html.contains("Temperature High"));
        assert!(html.contains("Plotly.newPlot(\"profile\""));
    }

    #[tokio::test]
    async fn test_render_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CHART_FILE);

        render_to_file(&race(), &records(), &path).await.unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(written.contains("Elevation (m)"));
    }
}
