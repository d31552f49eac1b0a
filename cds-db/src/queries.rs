//! Typed query methods backing the pie and map views.
//!
//! Every filter is an exact string match. An absent filter (`None`) selects
//! the whole table, and a filter that matches nothing returns an empty
//! vector rather than an error.

use crate::models::{DatasetSummary, DistrictShape, SentimentCount};
use crate::Database;
use rusqlite::params;

impl Database {
    /// Count observations per sentiment label, optionally for one district.
    ///
    /// Ordered by count descending; ties keep the order in which labels
    /// first appear in the table. Blank labels are not counted.
    pub fn query_sentiment_counts(
        &self,
        district_id: Option<&str>,
    ) -> anyhow::Result<Vec<SentimentCount>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT sentiment, COUNT(*) AS n, MIN(rowid) AS first_seen
             FROM observations
             WHERE sentiment <> '' AND (?1 IS NULL OR district_id = ?1)
             GROUP BY sentiment
             ORDER BY n DESC, first_seen ASC",
        )?;
        let rows = stmt
            .query_map(params![district_id], |row| {
                Ok(SentimentCount {
                    label: row.get(0)?,
                    count: row.get::<_, i64>(1)? as u64,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: query_sentiment_counts({:?}) returned {} labels",
            district_id,
            rows.len()
        );
        Ok(rows)
    }

    /// Fetch district shapes, optionally only those with a given metric label.
    ///
    /// Rows keep the order of the aggregated table.
    pub fn query_districts(
        &self,
        metric_label: Option<&str>,
    ) -> anyhow::Result<Vec<DistrictShape>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT district_id, metric_label, shape_length, shape_area, geometry
             FROM districts
             WHERE ?1 IS NULL OR metric_label = ?1
             ORDER BY rowid",
        )?;
        let raw = stmt
            .query_map(params![metric_label], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut shapes = Vec::with_capacity(raw.len());
        for (district_id, aggregated_metric_label, shape_length, shape_area, geometry) in raw {
            shapes.push(DistrictShape {
                district_id,
                aggregated_metric_label,
                shape_length,
                shape_area,
                geometry: serde_json::from_str(&geometry)?,
            });
        }
        log::info!(
            "query: query_districts({:?}) returned {} districts",
            metric_label,
            shapes.len()
        );
        Ok(shapes)
    }

    /// All district ids in table order.
    pub fn query_district_ids(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare("SELECT district_id FROM districts ORDER BY rowid")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(ids)
    }

    /// Distinct metric labels of the aggregated table, in first-seen order.
    pub fn query_metric_labels(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT metric_label FROM districts
             GROUP BY metric_label
             ORDER BY MIN(rowid)",
        )?;
        let labels = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(labels)
    }

    /// Distinct non-blank sentiment labels, in first-seen order.
    pub fn query_sentiment_labels(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT sentiment FROM observations
             WHERE sentiment <> ''
             GROUP BY sentiment
             ORDER BY MIN(rowid)",
        )?;
        let labels = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(labels)
    }

    /// Row counts and integrity figures for both tables.
    pub fn query_summary(&self) -> anyhow::Result<DatasetSummary> {
        let conn = self.conn.borrow();
        let count = |sql: &str| -> rusqlite::Result<u64> {
            conn.query_row(sql, [], |row| row.get::<_, i64>(0))
                .map(|n| n as u64)
        };
        Ok(DatasetSummary {
            districts: count("SELECT COUNT(*) FROM districts")?,
            observations: count("SELECT COUNT(*) FROM observations")?,
            orphan_observations: count(
                "SELECT COUNT(*) FROM observations o
                 LEFT JOIN districts d ON o.district_id = d.district_id
                 WHERE d.district_id IS NULL",
            )?,
            unlabeled_observations: count("SELECT COUNT(*) FROM observations WHERE sentiment = ''")?,
        })
    }
}
