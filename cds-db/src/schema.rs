//! SQL schema definitions for the in-memory SQLite database.
//!
//! Both tables are written once at startup and only read afterwards.

/// Returns the full SQL schema as a single batch string.
///
/// - `districts` - Aggregated table: one row per Community District. The
///   boundary is stored as GeoJSON text, ready for D3.js.
/// - `observations` - Unaggregated table: one row per observation. Row order
///   (`rowid`) is the order of the source file and breaks count ties.
///
/// `observations.district_id` carries no foreign key; unknown districts are
/// allowed and simply never match a filter.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS districts (
        district_id TEXT PRIMARY KEY,
        metric_label TEXT NOT NULL,
        shape_length REAL NOT NULL,
        shape_area REAL NOT NULL,
        geometry TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_districts_metric ON districts(metric_label);

    CREATE TABLE IF NOT EXISTS observations (
        district_id TEXT NOT NULL,
        sentiment TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_obs_district ON observations(district_id);
    "#
}
