/// Aggregated (per-district) table: one row per Community District
use crate::error::{DataLoadError, Result, Table};
use crate::geometry::MultiPolygon;
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashSet;
use std::path::Path;

pub const COL_DISTRICT: &str = "CD";
pub const COL_GEOMETRY: &str = "the_geom";
pub const COL_METRIC: &str = "AggregatedMetric";
pub const COL_SHAPE_LENGTH: &str = "Shape_Leng";
pub const COL_SHAPE_AREA: &str = "Shape_Area";

/// A single row of the aggregated table.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictRecord {
    /// Community District identifier, unique per row (e.g. "cd1").
    pub district_id: String,
    /// District boundary.
    pub geometry: MultiPolygon,
    /// Label of the aggregated metric for this district.
    pub aggregated_metric_label: String,
    /// Boundary length as published with the shapefile.
    pub shape_length: f64,
    /// Boundary area as published with the shapefile.
    pub shape_area: f64,
}

impl DistrictRecord {
    /// Parse the aggregated table from a CSV string (with headers).
    ///
    /// Required columns: `CD,the_geom,AggregatedMetric,Shape_Leng,Shape_Area`,
    /// in any order. Extra columns are ignored.
    ///
    /// # Example CSV
    /// ```text
    /// CD,the_geom,AggregatedMetric,Shape_Leng,Shape_Area
    /// cd1,"POLYGON ((0 0, 1 0, 1 1, 0 0))",A,4.0,0.5
    /// ```
    pub fn parse_csv(csv_data: &str) -> Result<Vec<DistrictRecord>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let columns = Columns::resolve(rdr.headers()?)?;
        let mut seen = HashSet::new();
        let mut records = Vec::new();
        for result in rdr.records() {
            let row = result?;
            let record = columns.record(&row)?;
            if !seen.insert(record.district_id.clone()) {
                return Err(DataLoadError::DuplicateDistrict(record.district_id));
            }
            records.push(record);
        }
        log::info!("district: parsed {} aggregated rows", records.len());
        Ok(records)
    }

    /// Load the aggregated table from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<DistrictRecord>> {
        let path = path.as_ref();
        let csv_data = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse_csv(&csv_data)
    }
}

/// `loadAggregated(path)`: read the aggregated table.
pub fn load_aggregated(path: impl AsRef<Path>) -> Result<Vec<DistrictRecord>> {
    DistrictRecord::load(path)
}

/// Header positions of the required columns.
struct Columns {
    district: usize,
    geometry: usize,
    metric: usize,
    shape_length: usize,
    shape_area: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or(DataLoadError::MissingColumn {
                    table: Table::Aggregated,
                    column,
                })
        };
        Ok(Self {
            district: find(COL_DISTRICT)?,
            geometry: find(COL_GEOMETRY)?,
            metric: find(COL_METRIC)?,
            shape_length: find(COL_SHAPE_LENGTH)?,
            shape_area: find(COL_SHAPE_AREA)?,
        })
    }

    fn record(&self, row: &StringRecord) -> Result<DistrictRecord> {
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let cell = |idx: usize| row.get(idx).unwrap_or("").trim();

        let district_id = cell(self.district);
        if district_id.is_empty() {
            return Err(DataLoadError::InvalidValue {
                table: Table::Aggregated,
                column: COL_DISTRICT,
                line,
                value: String::new(),
            });
        }

        let geometry =
            MultiPolygon::parse(cell(self.geometry)).map_err(|e| DataLoadError::InvalidGeometry {
                district: district_id.to_string(),
                reason: e.to_string(),
            })?;

        let measure = |idx: usize, column: &'static str| -> Result<f64> {
            let raw = cell(idx);
            match raw.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
                _ => Err(DataLoadError::InvalidValue {
                    table: Table::Aggregated,
                    column,
                    line,
                    value: raw.to_string(),
                }),
            }
        };

        Ok(DistrictRecord {
            district_id: district_id.to_string(),
            geometry,
            aggregated_metric_label: cell(self.metric).to_string(),
            shape_length: measure(self.shape_length, COL_SHAPE_LENGTH)?,
            shape_area: measure(self.shape_area, COL_SHAPE_AREA)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGGREGATED_CSV: &str = "\
CD,the_geom,AggregatedMetric,Shape_Leng,Shape_Area
cd1,\"POLYGON ((-74 40.7, -73.9 40.7, -73.9 40.8, -74 40.7))\",A,12.5,300.25
cd2,\"MULTIPOLYGON (((-73.9 40.7, -73.8 40.7, -73.8 40.8, -73.9 40.7)))\",B,8,120
";

    #[test]
    fn parse_aggregated_rows() {
        let records = DistrictRecord::parse_csv(AGGREGATED_CSV).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].district_id, "cd1");
        assert_eq!(records[0].aggregated_metric_label, "A");
        assert!((records[0].shape_length - 12.5).abs() < 1e-9);
        assert!((records[0].shape_area - 300.25).abs() < 1e-9);
        assert_eq!(records[1].geometry.polygons().len(), 1);
    }

    #[test]
    fn columns_in_any_order_with_extras() {
        let csv = "\
Shape_Area,extra,AggregatedMetric,CD,Shape_Leng,the_geom
1.5,ignored,positive,cd7,2.5,\"POLYGON ((0 0, 1 0, 1 1, 0 0))\"
";
        let records = DistrictRecord::parse_csv(csv).unwrap();
        assert_eq!(records[0].district_id, "cd7");
        assert_eq!(records[0].aggregated_metric_label, "positive");
        assert!((records[0].shape_area - 1.5).abs() < 1e-9);
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "CD,the_geom,Shape_Leng,Shape_Area\ncd1,\"POLYGON ((0 0, 1 0, 1 1, 0 0))\",1,1\n";
        match DistrictRecord::parse_csv(csv) {
            Err(DataLoadError::MissingColumn { table, column }) => {
                assert_eq!(table, Table::Aggregated);
                assert_eq!(column, COL_METRIC);
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn negative_or_non_numeric_shape_is_invalid() {
        let csv = "CD,the_geom,AggregatedMetric,Shape_Leng,Shape_Area\ncd1,\"POLYGON ((0 0, 1 0, 1 1, 0 0))\",A,-1,1\n";
        assert!(matches!(
            DistrictRecord::parse_csv(csv),
            Err(DataLoadError::InvalidValue { column: COL_SHAPE_LENGTH, line: 2, .. })
        ));

        let csv = "CD,the_geom,AggregatedMetric,Shape_Leng,Shape_Area\ncd1,\"POLYGON ((0 0, 1 0, 1 1, 0 0))\",A,1,n/a\n";
        assert!(matches!(
            DistrictRecord::parse_csv(csv),
            Err(DataLoadError::InvalidValue { column: COL_SHAPE_AREA, .. })
        ));
    }

    #[test]
    fn bad_geometry_names_the_district() {
        let csv = "CD,the_geom,AggregatedMetric,Shape_Leng,Shape_Area\ncd9,POINT (1 2),A,1,1\n";
        match DistrictRecord::parse_csv(csv) {
            Err(DataLoadError::InvalidGeometry { district, .. }) => assert_eq!(district, "cd9"),
            other => panic!("expected InvalidGeometry, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_district_is_rejected() {
        let csv = "\
CD,the_geom,AggregatedMetric,Shape_Leng,Shape_Area
cd1,\"POLYGON ((0 0, 1 0, 1 1, 0 0))\",A,1,1
cd1,\"POLYGON ((0 0, 1 0, 1 1, 0 0))\",B,1,1
";
        assert!(matches!(
            DistrictRecord::parse_csv(csv),
            Err(DataLoadError::DuplicateDistrict(id)) if id == "cd1"
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_aggregated("/nonexistent/agg_cd_data.csv").unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/agg_cd_data.csv"));
    }
}
