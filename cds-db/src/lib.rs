//! In-memory SQLite dataset store for the Community District dashboard.
//!
//! Holds the two source tables for the lifetime of the app:
//! - `districts` - the aggregated table (geometry, metric label, shape stats)
//! - `observations` - the unaggregated table (district id, sentiment)
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability in single-threaded WASM
//! - In-memory SQLite via `rusqlite`
//! - CSV data embedded via `include_str!` in the dashboard, or read from disk by the CLI
//! - Typed query methods returning serializable structs for JSON export to D3.js
//!
//! # Usage
//!
//! ```rust
//! use cds_db::Database;
//!
//! let db = Database::from_csv(
//!     "CD,the_geom,AggregatedMetric,Shape_Leng,Shape_Area\ncd1,\"POLYGON ((0 0, 1 0, 1 1, 0 0))\",A,4,0.5\n",
//!     "CD,sentiment\ncd1,positive\n",
//! ).unwrap();
//!
//! let counts = db.query_sentiment_counts(Some("cd1")).unwrap();
//! assert_eq!(counts[0].count, 1);
//! ```
//!
//! Nothing writes to either table once loading has finished.

pub mod schema;
mod loader;
mod queries;
pub mod models;

use cds_core::{DataLoadError, DistrictRecord, ObservationRecord};
use rusqlite::Connection;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// In-memory SQLite database holding both source tables.
///
/// Cheaply cloneable (via `Rc`) for sharing across Dioxus components in a
/// single-threaded WASM environment.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl PartialEq for Database {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.conn, &other.conn)
    }
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods
    /// to populate it.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }

    /// Build the store from parsed records.
    pub fn from_records(
        districts: &[DistrictRecord],
        observations: &[ObservationRecord],
    ) -> cds_core::Result<Self> {
        let storage = |e: anyhow::Error| DataLoadError::Storage(e.to_string());
        let db = Self::new().map_err(storage)?;
        db.load_districts(districts).map_err(storage)?;
        db.load_observations(observations).map_err(storage)?;
        Ok(db)
    }

    /// Build the store from the two CSV documents.
    pub fn from_csv(aggregated_csv: &str, unaggregated_csv: &str) -> cds_core::Result<Self> {
        let districts = DistrictRecord::parse_csv(aggregated_csv)?;
        let observations = ObservationRecord::parse_csv(unaggregated_csv)?;
        Self::from_records(&districts, &observations)
    }

    /// Build the store from the two CSV files.
    pub fn from_paths(
        aggregated_path: impl AsRef<Path>,
        unaggregated_path: impl AsRef<Path>,
    ) -> cds_core::Result<Self> {
        let districts = cds_core::district::load_aggregated(aggregated_path)?;
        let observations = cds_core::observation::load_unaggregated(unaggregated_path)?;
        Self::from_records(&districts, &observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGG: &str = "\
CD,the_geom,AggregatedMetric,Shape_Leng,Shape_Area
cd1,\"POLYGON ((0 0, 1 0, 1 1, 0 0))\",A,4,0.5
";

    #[test]
    fn database_creates_successfully() {
        let db = Database::new();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::from_csv(AGG, "CD,sentiment\ncd1,positive\n").unwrap();
        let db2 = db.clone();
        assert!(db == db2, "Clone should share the same connection");
        assert_eq!(db2.query_districts(None).unwrap().len(), 1);
    }

    #[test]
    fn from_csv_propagates_load_errors() {
        let err = Database::from_csv(AGG, "CD,text\ncd1,hi\n").err().unwrap();
        assert!(matches!(err, DataLoadError::MissingColumn { .. }));
    }

    #[test]
    fn from_paths_missing_file_is_fatal() {
        let err = Database::from_paths("/nonexistent/agg.csv", "/nonexistent/unagg.csv")
            .err()
            .unwrap();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }
}
