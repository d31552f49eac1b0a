//! `validate`: load both tables and describe what was loaded.

use cds_db::models::DatasetSummary;
use cds_db::Database;
use serde::Serialize;
use std::fmt;

/// What `validate` prints.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ValidationReport {
    pub summary: DatasetSummary,
    /// Districts on the unfiltered map, in table order.
    pub district_ids: Vec<String>,
    pub metric_labels: Vec<String>,
    pub sentiment_labels: Vec<String>,
    /// Sentiment labels that also occur as a metric label. Only these can
    /// narrow the map when a slice is clicked.
    pub shared_labels: Vec<String>,
}

pub fn validate(db: &Database) -> anyhow::Result<ValidationReport> {
    let summary = db.query_summary()?;
    let district_ids = db.query_district_ids()?;
    let metric_labels = db.query_metric_labels()?;
    let sentiment_labels = db.query_sentiment_labels()?;
    let shared_labels = sentiment_labels
        .iter()
        .filter(|s| metric_labels.contains(s))
        .cloned()
        .collect();
    if summary.orphan_observations > 0 {
        log::warn!(
            "{} observations reference districts missing from the aggregated table",
            summary.orphan_observations
        );
    }
    Ok(ValidationReport {
        summary,
        district_ids,
        metric_labels,
        sentiment_labels,
        shared_labels,
    })
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "districts:              {}", self.summary.districts)?;
        writeln!(f, "  ids:                  {}", self.district_ids.join(", "))?;
        writeln!(f, "observations:           {}", self.summary.observations)?;
        writeln!(f, "  unknown district:     {}", self.summary.orphan_observations)?;
        writeln!(f, "  no sentiment:         {}", self.summary.unlabeled_observations)?;
        writeln!(f, "metric labels:          {}", self.metric_labels.join(", "))?;
        writeln!(f, "sentiment labels:       {}", self.sentiment_labels.join(", "))?;
        if self.shared_labels.is_empty() {
            writeln!(
                f,
                "note: no sentiment label matches a metric label; clicking a slice empties the map"
            )?;
        } else {
            writeln!(f, "slice labels that filter the map: {}", self.shared_labels.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_with_metrics(metrics: &[&str]) -> Database {
        let mut agg = String::from("CD,the_geom,AggregatedMetric,Shape_Leng,Shape_Area\n");
        for (i, m) in metrics.iter().enumerate() {
            agg.push_str(&format!(
                "cd{},\"POLYGON ((0 0, 1 0, 1 1, 0 0))\",{},1,1\n",
                i + 1,
                m
            ));
        }
        let unagg = "CD,sentiment\ncd1,positive\ncd2,negative\ncd77,positive\n";
        Database::from_csv(&agg, unagg).unwrap()
    }

    #[test]
    fn reports_counts_and_labels() {
        let report = validate(&db_with_metrics(&["A", "B"])).unwrap();
        assert_eq!(report.summary.districts, 2);
        assert_eq!(report.district_ids, vec!["cd1", "cd2"]);
        assert!(report.to_string().contains("ids:                  cd1, cd2"));
        assert_eq!(report.summary.observations, 3);
        assert_eq!(report.summary.orphan_observations, 1);
        assert_eq!(report.metric_labels, vec!["A", "B"]);
        assert_eq!(report.sentiment_labels, vec!["positive", "negative"]);
        assert!(report.shared_labels.is_empty());
        assert!(report.to_string().contains("clicking a slice empties the map"));
    }

    #[test]
    fn shared_labels_are_listed() {
        let report = validate(&db_with_metrics(&["positive", "B"])).unwrap();
        assert_eq!(report.shared_labels, vec!["positive"]);
        assert!(report.to_string().contains("slice labels that filter the map: positive"));
    }
}
