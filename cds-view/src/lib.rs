//! Chart models and cross-filtering for the district dashboard.
//!
//! This crate turns the dataset store into the JSON the chart scripts draw,
//! and decides which view redraws after a click:
//! - `pie`: sentiment breakdown, filtered by district
//! - `map`: district choropleth, filtered by aggregated metric label
//! - `cross_filter`: routes a click in one view into the other view's filter
//! - `dashboard`: store plus cross-filter, rendering whatever a click affects

pub mod cross_filter;
pub mod dashboard;
pub mod map;
pub mod pie;

pub use cross_filter::{CrossFilter, View};
pub use dashboard::{Dashboard, Rendered};
pub use map::{render_map, Choropleth, DistrictFeature};
pub use pie::{render_pie, PieChart, PieSlice};
