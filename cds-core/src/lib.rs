//! Core types for the Community District sentiment dashboard.
//!
//! - `district`: the aggregated (per-district) table and its CSV loader
//! - `observation`: the unaggregated (per-record) table and its CSV loader
//! - `geometry`: district boundaries parsed from WKT or GeoJSON
//! - `selection`: the click selection passed between the two views
//! - `error`: `DataLoadError`, the only failure the loaders produce

pub mod district;
pub mod error;
pub mod geometry;
pub mod observation;
pub mod selection;

pub use district::DistrictRecord;
pub use error::{DataLoadError, Result};
pub use geometry::MultiPolygon;
pub use observation::ObservationRecord;
pub use selection::Selection;

/// Fixed path of the aggregated table, relative to the workspace root.
pub const AGGREGATED_PATH: &str = "data/agg_cd_data.csv";

/// Fixed path of the unaggregated table, relative to the workspace root.
pub const UNAGGREGATED_PATH: &str = "data/unagg_tweet.csv";

/// District selected on first load, before any click.
pub const DEFAULT_DISTRICT: &str = "cd1";
