//! Community District choropleth.
//!
//! The map view is fixed on New York City: center and zoom never change,
//! only the set of districts drawn does.

use cds_core::Selection;
use cds_db::models::DistrictShape;
use cds_db::Database;
use serde::Serialize;

/// DOM id of the map container.
pub const MAP_CONTAINER_ID: &str = "cd-map";

pub const MAP_TITLE: &str = "Community Districts";

/// Reference coordinate the map is centered on.
pub const MAP_CENTER: LatLon = LatLon {
    lat: 40.7128,
    lon: -74.0060,
};

/// Web-mercator zoom level (256px tiles).
pub const MAP_ZOOM: f64 = 10.0;

/// Fill opacity of district polygons.
pub const MAP_OPACITY: f64 = 0.5;

/// Basemap style name. The chart script maps it to its background palette.
pub const BASE_STYLE: &str = "carto-positron";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// One polygon of the choropleth, keyed by district id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictFeature {
    pub district_id: String,
    pub shape_length: f64,
    pub shape_area: f64,
    /// Tooltip HTML shown on hover.
    pub hover_text: String,
    /// GeoJSON `MultiPolygon`.
    pub geometry: serde_json::Value,
}

/// Everything the choropleth script needs to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choropleth {
    pub title: String,
    /// Metric label the districts are restricted to, if any.
    pub metric_filter: Option<String>,
    pub center: LatLon,
    pub zoom: f64,
    pub opacity: f64,
    pub base_style: String,
    pub features: Vec<DistrictFeature>,
}

impl Choropleth {
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn district_ids(&self) -> Vec<&str> {
        self.features.iter().map(|f| f.district_id.as_str()).collect()
    }

    /// Selection produced by clicking the polygon of this district.
    pub fn click(&self, district_id: &str) -> Option<Selection> {
        self.features
            .iter()
            .any(|f| f.district_id == district_id)
            .then(|| Selection::District(district_id.to_string()))
    }
}

/// Hover text: district id in bold, then shape length and area to two decimals.
///
/// The chart script renders this as HTML, so the id is escaped.
pub fn hover_text(district_id: &str, shape_length: f64, shape_area: f64) -> String {
    format!(
        "<b>{}</b><br>Shape Length: {:.2}<br>Shape Area: {:.2}",
        escape_html(district_id),
        shape_length,
        shape_area
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

impl From<DistrictShape> for DistrictFeature {
    fn from(shape: DistrictShape) -> Self {
        Self {
            hover_text: hover_text(&shape.district_id, shape.shape_length, shape.shape_area),
            district_id: shape.district_id,
            shape_length: shape.shape_length,
            shape_area: shape.shape_area,
            geometry: shape.geometry,
        }
    }
}

/// Render the map for an optional aggregated-metric filter.
///
/// The filter is compared verbatim against each district's metric label. A
/// filter that matches no district yields an empty map.
pub fn render_map(db: &Database, metric_label: Option<&str>) -> anyhow::Result<Choropleth> {
    let features = db
        .query_districts(metric_label)?
        .into_iter()
        .map(DistrictFeature::from)
        .collect::<Vec<_>>();
    if features.is_empty() {
        log::info!("map: no districts match {:?}, rendering empty map", metric_label);
    }
    Ok(Choropleth {
        title: MAP_TITLE.to_string(),
        metric_filter: metric_label.map(str::to_string),
        center: MAP_CENTER,
        zoom: MAP_ZOOM,
        opacity: MAP_OPACITY,
        base_style: BASE_STYLE.to_string(),
        features,
    })
}
