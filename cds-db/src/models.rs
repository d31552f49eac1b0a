//! Query result model structs.
//!
//! All structs derive `Serialize` so they can be passed to D3.js as JSON
//! from the Dioxus WASM frontend.

use serde::Serialize;

/// Number of observations carrying one sentiment label.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SentimentCount {
    pub label: String,
    pub count: u64,
}

/// One district row ready for the choropleth.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistrictShape {
    pub district_id: String,
    pub aggregated_metric_label: String,
    pub shape_length: f64,
    pub shape_area: f64,
    /// GeoJSON `MultiPolygon` geometry object.
    pub geometry: serde_json::Value,
}

/// Row counts for both tables, reported by the CLI `validate` command.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatasetSummary {
    pub districts: u64,
    pub observations: u64,
    /// Observations whose district id has no row in the aggregated table.
    pub orphan_observations: u64,
    /// Observations with a blank sentiment label.
    pub unlabeled_observations: u64,
}
