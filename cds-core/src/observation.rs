/// Unaggregated (per-record) table: one row per observation, many per district
use crate::error::{DataLoadError, Result, Table};
use csv::{ReaderBuilder, Terminator};
use serde::Serialize;
use std::path::Path;

pub const COL_DISTRICT: &str = "CD";
pub const COL_SENTIMENT: &str = "sentiment";

/// A single observation (e.g. one tweet).
///
/// `district_id` references a [`DistrictRecord`](crate::DistrictRecord) by
/// value only; unknown ids are kept and simply never match a filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationRecord {
    pub district_id: String,
    /// Sentiment label. Empty when the source cell was blank.
    pub sentiment: String,
}

impl ObservationRecord {
    /// A blank sentiment is a missing value and is never counted.
    pub fn has_sentiment(&self) -> bool {
        !self.sentiment.is_empty()
    }

    /// Parse the unaggregated table from a CSV string (with headers).
    ///
    /// Records end at `\n` only; free-text columns may carry stray `\r`.
    /// Required columns are `CD` and `sentiment`; others are ignored.
    pub fn parse_csv(csv_data: &str) -> Result<Vec<ObservationRecord>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .terminator(Terminator::Any(b'\n'))
            .from_reader(csv_data.as_bytes());

        let headers = rdr.headers()?.clone();
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or(DataLoadError::MissingColumn {
                    table: Table::Unaggregated,
                    column,
                })
        };
        let district_idx = find(COL_DISTRICT)?;
        let sentiment_idx = find(COL_SENTIMENT)?;

        let mut records = Vec::new();
        let mut blank = 0u32;
        for result in rdr.records() {
            let row = result?;
            let district_id = row.get(district_idx).unwrap_or("").trim();
            let sentiment = row.get(sentiment_idx).unwrap_or("").trim();
            if sentiment.is_empty() {
                blank += 1;
            }
            records.push(ObservationRecord {
                district_id: district_id.to_string(),
                sentiment: sentiment.to_string(),
            });
        }
        if blank > 0 {
            log::warn!("observation: {} rows without a sentiment label", blank);
        }
        log::info!("observation: parsed {} unaggregated rows", records.len());
        Ok(records)
    }

    /// Load the unaggregated table from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<ObservationRecord>> {
        let path = path.as_ref();
        let csv_data = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse_csv(&csv_data)
    }
}

/// `loadUnaggregated(path)`: read the unaggregated table.
pub fn load_unaggregated(path: impl AsRef<Path>) -> Result<Vec<ObservationRecord>> {
    ObservationRecord::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_unaggregated_rows() {
        let csv = "\
id,text,CD,sentiment
1,great park,cd1,positive
2,so loud,cd1,negative
3,ok,cd2,neutral
";
        let records = ObservationRecord::parse_csv(csv).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].district_id, "cd1");
        assert_eq!(records[1].sentiment, "negative");
        assert_eq!(records[2].district_id, "cd2");
    }

    #[test]
    fn carriage_return_inside_row_does_not_split_it() {
        let csv = "text,CD,sentiment\nline one\rline two,cd1,positive\nplain,cd2,neutral\n";
        let records = ObservationRecord::parse_csv(csv).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].district_id, "cd1");
        assert_eq!(records[0].sentiment, "positive");
    }

    #[test]
    fn blank_sentiment_is_kept_but_flagged() {
        let csv = "CD,sentiment\ncd1,\ncd1,positive\n";
        let records = ObservationRecord::parse_csv(csv).unwrap();
        assert_eq!(records.len(), 2);
        assert!(!records[0].has_sentiment());
        assert!(records[1].has_sentiment());
    }

    #[test]
    fn missing_sentiment_column_is_reported() {
        let csv = "CD,text\ncd1,hello\n";
        match ObservationRecord::parse_csv(csv) {
            Err(DataLoadError::MissingColumn { table, column }) => {
                assert_eq!(table, Table::Unaggregated);
                assert_eq!(column, COL_SENTIMENT);
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn unknown_district_is_kept() {
        let csv = "CD,sentiment\ncd404,positive\n";
        let records = ObservationRecord::parse_csv(csv).unwrap();
        assert_eq!(records[0].district_id, "cd404");
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_unaggregated("/nonexistent/unagg_tweet.csv"),
            Err(DataLoadError::Io { .. })
        ));
    }
}
