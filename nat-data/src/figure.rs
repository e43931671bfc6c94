//! Line-chart descriptions handed to the D3.js renderer.
//!
//! A [`Figure`] is a complete, renderer-agnostic description of one
//! multi-series line chart: ordered year categories for the x-axis, one
//! [`Series`] per nationality, and the fixed styling of the chart. It
//! serializes to camelCase JSON, the shape `nationality-chart.js` reads.

use crate::format::hover_label;
use nat_db::models::FilingRecord;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub const X_AXIS_TITLE: &str = "Année";
pub const Y_AXIS_TITLE: &str = "Nombre d'itérations";
pub const LEGEND_TITLE: &str = "Nationalités";

/// Chart height in pixels.
pub const CHART_HEIGHT: u32 = 600;

/// Styling of the selected-nationalities chart.
pub const SELECTED_STYLE: ChartStyle = ChartStyle::with_lines(2.5, 0.85);

/// Styling of the top-N chart: heavier, fully opaque lines.
pub const TOP_STYLE: ChartStyle = ChartStyle::with_lines(3.0, 1.0);

/// Horizontal legend anchored above the plot area, right-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendLayout {
    pub orientation: &'static str,
    pub x: f64,
    pub y: f64,
    pub x_anchor: &'static str,
    pub y_anchor: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridStyle {
    pub show: bool,
    pub width: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartStyle {
    pub height: u32,
    pub background: &'static str,
    pub legend: LegendLayout,
    pub grid: GridStyle,
    pub line_width: f64,
    pub opacity: f64,
    pub markers: bool,
}

impl ChartStyle {
    /// White template, light-grey grid, horizontal legend, markers on.
    pub const fn with_lines(line_width: f64, opacity: f64) -> Self {
        Self {
            height: CHART_HEIGHT,
            background: "white",
            legend: LegendLayout {
                orientation: "h",
                x: 1.0,
                y: 1.02,
                x_anchor: "right",
                y_anchor: "bottom",
            },
            grid: GridStyle {
                show: true,
                width: 0.5,
                color: "lightgrey",
            },
            line_width,
            opacity,
            markers: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub year: String,
    pub value: u64,
    pub hover: String,
}

/// One line of the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Figure {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub legend_title: String,
    /// X-axis categories (years) in display order.
    pub categories: Vec<String>,
    /// Series ordered by nationality; the renderer assigns colours in this order.
    pub series: Vec<Series>,
    pub style: ChartStyle,
}

/// Sort key matching the SQL `ORDER BY CAST(year AS INTEGER), year`.
fn year_key(year: &str) -> (i64, &str) {
    (leading_integer(year), year)
}

/// Integer value of `text` the way SQLite's `CAST(.. AS INTEGER)` reads it:
/// optional sign and the longest run of leading digits, `0` if there are none.
fn leading_integer(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

impl Figure {
    /// Build a figure with one series per nationality found in `records`.
    ///
    /// Records may arrive in any order; series come out sorted by
    /// nationality and points sorted by year. No records gives an empty chart.
    pub fn from_records(title: impl Into<String>, records: &[FilingRecord], style: ChartStyle) -> Self {
        let mut by_nationality: BTreeMap<&str, Vec<&FilingRecord>> = BTreeMap::new();
        let mut years: BTreeSet<(i64, &str)> = BTreeSet::new();
        for record in records {
            by_nationality
                .entry(record.nationality.as_str())
                .or_default()
                .push(record);
            years.insert(year_key(&record.year));
        }

        let series = by_nationality
            .into_iter()
            .map(|(name, mut rows)| {
                rows.sort_by(|a, b| year_key(&a.year).cmp(&year_key(&b.year)));
                Series {
                    name: name.to_string(),
                    points: rows
                        .into_iter()
                        .map(|r| SeriesPoint {
                            year: r.year.clone(),
                            value: r.iteration_count,
                            hover: hover_label(name, &r.year, r.iteration_count),
                        })
                        .collect(),
                }
            })
            .collect();

        Self {
            title: title.into(),
            x_title: X_AXIS_TITLE.to_string(),
            y_title: Y_AXIS_TITLE.to_string(),
            legend_title: LEGEND_TITLE.to_string(),
            categories: years.into_iter().map(|(_, y)| y.to_string()).collect(),
            series,
            style,
        }
    }

    /// Series names in legend order.
    pub fn series_names(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(nationality: &str, year: &str, count: u64) -> FilingRecord {
        FilingRecord {
            nationality: nationality.to_string(),
            year: year.to_string(),
            iteration_count: count,
        }
    }

    #[test]
    fn year_order_follows_sqlite_integer_cast() {
        assert_eq!(leading_integer("2015a"), 2015);
        assert_eq!(leading_integer(" -12x"), -12);
        assert_eq!(leading_integer("+7"), 7);
        assert_eq!(leading_integer("n/a"), 0);

        let records = vec![
            record("Belge", "2016", 1),
            record("Belge", "2015a", 2),
            record("Belge", "2015", 3),
            record("Belge", "inconnue", 4),
        ];
        let figure = Figure::from_records("t", &records, SELECTED_STYLE);
        assert_eq!(figure.categories, vec!["inconnue", "2015", "2015a", "2016"]);
    }

    #[test]
    fn groups_records_into_sorted_series() {
        let records = vec![
            record("Suisse", "2016", 4),
            record("Belge", "2016", 20),
            record("Suisse", "2015", 3),
            record("Belge", "2015", 10),
        ];
        let figure = Figure::from_records("t", &records, SELECTED_STYLE);

        assert_eq!(figure.series_names(), vec!["Belge", "Suisse"]);
        assert_eq!(figure.categories, vec!["2015", "2016"]);
        let suisse: Vec<u64> = figure.series[1].points.iter().map(|p| p.value).collect();
        assert_eq!(suisse, vec![3, 4]);
    }

    #[test]
    fn categories_cover_every_series() {
        let records = vec![record("Belge", "2017", 1), record("Suisse", "2015", 2)];
        let figure = Figure::from_records("t", &records, TOP_STYLE);
        assert_eq!(figure.categories, vec!["2015", "2017"]);
    }

    #[test]
    fn empty_records_give_empty_figure() {
        let figure = Figure::from_records("vide", &[], SELECTED_STYLE);
        assert!(figure.is_empty());
        assert!(figure.categories.is_empty());
        assert_eq!(figure.title, "vide");
    }

    #[test]
    fn points_carry_hover_labels() {
        let figure = Figure::from_records("t", &[record("Belge", "2015", 1520)], SELECTED_STYLE);
        assert_eq!(
            figure.series[0].points[0].hover,
            "<b>Belge</b><br>Année: 2015<br>Itérations: 1,520"
        );
    }

    #[test]
    fn styles_differ_only_in_lines() {
        assert_eq!(SELECTED_STYLE.line_width, 2.5);
        assert_eq!(SELECTED_STYLE.opacity, 0.85);
        assert_eq!(TOP_STYLE.line_width, 3.0);
        assert_eq!(TOP_STYLE.opacity, 1.0);
        assert_eq!(SELECTED_STYLE.legend, TOP_STYLE.legend);
        assert_eq!(TOP_STYLE.height, 600);
    }

    #[test]
    fn serializes_to_camel_case() {
        let figure = Figure::from_records("t", &[record("Belge", "2015", 1)], TOP_STYLE);
        let json = serde_json::to_value(&figure).unwrap();
        assert_eq!(json["xTitle"], "Année");
        assert_eq!(json["legendTitle"], "Nationalités");
        assert_eq!(json["style"]["lineWidth"], 3.0);
        assert_eq!(json["style"]["legend"]["xAnchor"], "right");
        assert_eq!(json["style"]["grid"]["color"], "lightgrey");
    }
}
