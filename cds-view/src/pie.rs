//! Sentiment pie chart.

use cds_core::Selection;
use cds_db::Database;
use serde::Serialize;

/// DOM id of the pie chart container.
pub const PIE_CONTAINER_ID: &str = "sentiment-pie";

/// One slice: a sentiment label and how many observations carry it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub count: u64,
}

/// Everything the pie chart script needs to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    /// District the counts are restricted to, if any.
    pub district: Option<String>,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    /// Number of observations behind the chart.
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn count_of(&self, label: &str) -> Option<u64> {
        self.slices.iter().find(|s| s.label == label).map(|s| s.count)
    }

    /// Selection produced by clicking the slice with this label.
    pub fn click(&self, label: &str) -> Option<Selection> {
        self.slices
            .iter()
            .any(|s| s.label == label)
            .then(|| Selection::Sentiment(label.to_string()))
    }
}

fn title_for(district: Option<&str>) -> String {
    match district {
        Some(id) => format!("Sentiment in {}", id),
        None => "Sentiment (all districts)".to_string(),
    }
}

/// Render the pie for an optional district filter.
///
/// A district with no observations (or an unknown id) yields an empty chart.
pub fn render_pie(db: &Database, district: Option<&str>) -> anyhow::Result<PieChart> {
    let slices = db
        .query_sentiment_counts(district)?
        .into_iter()
        .map(|c| PieSlice {
            label: c.label,
            count: c.count,
        })
        .collect::<Vec<_>>();
    if slices.is_empty() {
        log::info!("pie: no observations for {:?}, rendering empty chart", district);
    }
    Ok(PieChart {
        title: title_for(district),
        district: district.map(str::to_string),
        slices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_db() -> Database {
        Database::from_csv(
            "\
CD,the_geom,AggregatedMetric,Shape_Leng,Shape_Area
cd1,\"POLYGON ((0 0, 1 0, 1 1, 0 0))\",A,1,1
cd2,\"POLYGON ((1 0, 2 0, 2 1, 1 0))\",B,1,1
cd5,\"POLYGON ((2 0, 3 0, 3 1, 2 0))\",B,1,1
",
            "\
CD,sentiment
cd1,positive
cd1,positive
cd1,negative
cd2,neutral
cd2,positive
",
        )
        .unwrap()
    }

    #[test]
    fn filtered_counts_only_matching_rows() {
        let db = sample_db();
        for district in ["cd1", "cd2"] {
            let pie = render_pie(&db, Some(district)).unwrap();
            let expected = if district == "cd1" { 3 } else { 2 };
            assert_eq!(pie.total(), expected, "counts for {} sum to its row count", district);
        }
        let pie = render_pie(&db, Some("cd1")).unwrap();
        assert_eq!(pie.count_of("positive"), Some(2));
        assert_eq!(pie.count_of("negative"), Some(1));
        assert_eq!(pie.count_of("neutral"), None);
    }

    #[test]
    fn unfiltered_uses_whole_table() {
        let pie = render_pie(&sample_db(), None).unwrap();
        assert_eq!(pie.total(), 5);
        assert_eq!(pie.district, None);
        assert_eq!(pie.title, "Sentiment (all districts)");
    }

    #[test]
    fn district_without_observations_is_empty_not_error() {
        let db = sample_db();
        let pie = render_pie(&db, Some("cd5")).unwrap();
        assert!(pie.is_empty());
        assert!(render_pie(&db, Some("nowhere")).unwrap().is_empty());
    }

    #[test]
    fn click_on_slice_selects_sentiment() {
        let pie = render_pie(&sample_db(), Some("cd1")).unwrap();
        assert_eq!(
            pie.click("positive"),
            Some(Selection::Sentiment("positive".to_string()))
        );
        assert_eq!(pie.click("neutral"), None);
    }

    #[test]
    fn serializes_for_chart_script() {
        let pie = render_pie(&sample_db(), Some("cd2")).unwrap();
        let json = serde_json::to_value(&pie).unwrap();
        assert_eq!(json["district"], "cd2");
        assert_eq!(json["slices"][0]["label"], "neutral");
        assert_eq!(json["slices"][0]["count"], 1);
    }
}
