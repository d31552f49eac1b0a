//! Loading parsed records into the in-memory SQLite database.
//!
//! Parsing and validation happen in `cds-core`; these methods only insert.

use crate::Database;
use cds_core::{DistrictRecord, ObservationRecord};
use rusqlite::params;

impl Database {
    /// Insert the aggregated table. Returns the number of districts stored.
    ///
    /// Geometry is serialized to GeoJSON text once here so the map query
    /// hands it to D3.js without re-encoding.
    pub fn load_districts(&self, records: &[DistrictRecord]) -> anyhow::Result<usize> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "INSERT INTO districts (district_id, metric_label, shape_length, shape_area, geometry)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for r in records {
            let geometry = serde_json::to_string(&r.geometry.to_geojson())?;
            stmt.execute(params![
                r.district_id,
                r.aggregated_metric_label,
                r.shape_length,
                r.shape_area,
                geometry
            ])?;
        }
        log::info!("loader: Loaded {} districts", records.len());
        Ok(records.len())
    }

    /// Insert the unaggregated table. Returns the number of observations stored.
    pub fn load_observations(&self, records: &[ObservationRecord]) -> anyhow::Result<usize> {
        let conn = self.conn.borrow();
        conn.execute_batch("BEGIN")?;
        {
            let mut stmt =
                conn.prepare("INSERT INTO observations (district_id, sentiment) VALUES (?1, ?2)")?;
            for r in records {
                if let Err(e) = stmt.execute(params![r.district_id, r.sentiment]) {
                    conn.execute_batch("ROLLBACK")?;
                    return Err(e.into());
                }
            }
        }
        conn.execute_batch("COMMIT")?;
        log::info!("loader: Loaded {} observations", records.len());
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;
    use cds_core::{DistrictRecord, ObservationRecord};

    #[test]
    fn load_districts_stores_geojson() {
        let db = Database::new().unwrap();
        let records = DistrictRecord::parse_csv(
            "CD,the_geom,AggregatedMetric,Shape_Leng,Shape_Area\ncd1,\"POLYGON ((0 0, 1 0, 1 1, 0 0))\",A,4,0.5\n",
        )
        .unwrap();
        assert_eq!(db.load_districts(&records).unwrap(), 1);

        let conn = db.conn.borrow();
        let geometry: String = conn
            .query_row(
                "SELECT geometry FROM districts WHERE district_id = 'cd1'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(geometry.starts_with(r#"{"type":"MultiPolygon""#));
    }

    #[test]
    fn load_observations_keeps_every_row() {
        let db = Database::new().unwrap();
        let records = ObservationRecord::parse_csv(
            "CD,sentiment\ncd1,positive\ncd1,positive\ncd404,negative\ncd2,\n",
        )
        .unwrap();
        assert_eq!(db.load_observations(&records).unwrap(), 4);

        let conn = db.conn.borrow();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM observations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 4, "Unknown districts and blank sentiments are stored too");
    }

    #[test]
    fn duplicate_district_insert_fails() {
        let db = Database::new().unwrap();
        let records = DistrictRecord::parse_csv(
            "CD,the_geom,AggregatedMetric,Shape_Leng,Shape_Area\ncd1,\"POLYGON ((0 0, 1 0, 1 1, 0 0))\",A,4,0.5\n",
        )
        .unwrap();
        db.load_districts(&records).unwrap();
        assert!(db.load_districts(&records).is_err());
    }
}
