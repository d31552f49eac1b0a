//! `click-through`: drive the cross-filter the way a user would.

use anyhow::{anyhow, bail};
use cds_db::Database;
use cds_view::{Choropleth, CrossFilter, Dashboard, PieChart, Rendered};
use serde::Serialize;

/// The two renders produced by clicking a district and then its largest slice.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClickThrough {
    pub district: String,
    pub pie: PieChart,
    /// Largest slice of `pie`; absent when the district has no observations.
    pub slice: Option<String>,
    /// Map after clicking `slice`.
    pub map: Option<Choropleth>,
}

/// Start from the unfiltered map, click `district`, then click the first slice.
pub fn click_through(db: Database, district: &str) -> anyhow::Result<ClickThrough> {
    let mut dashboard = Dashboard::with_filter(db, CrossFilter::idle());

    let selection = dashboard
        .map()?
        .click(district)
        .ok_or_else(|| anyhow!("district {} is not on the map", district))?;
    let pie = match dashboard.click(selection)? {
        Some(Rendered::Pie(pie)) => pie,
        other => bail!("expected the pie to redraw, got {:?}", other),
    };

    let Some(slice) = pie.slices.first().map(|s| s.label.clone()) else {
        log::info!("district {} has no observations; stopping after the pie", district);
        return Ok(ClickThrough {
            district: district.to_string(),
            pie,
            slice: None,
            map: None,
        });
    };

    let selection = pie
        .click(&slice)
        .ok_or_else(|| anyhow!("slice {} is not on the pie", slice))?;
    let map = match dashboard.click(selection)? {
        Some(Rendered::Map(map)) => map,
        other => bail!("expected the map to redraw, got {:?}", other),
    };

    Ok(ClickThrough {
        district: district.to_string(),
        pie,
        slice: Some(slice),
        map: Some(map),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_db() -> Database {
        Database::from_csv(
            "\
CD,the_geom,AggregatedMetric,Shape_Leng,Shape_Area
cd1,\"POLYGON ((0 0, 1 0, 1 1, 0 0))\",A,1,1
cd2,\"POLYGON ((1 0, 2 0, 2 1, 1 0))\",B,1,1
cd3,\"POLYGON ((2 0, 3 0, 3 1, 2 0))\",positive,1,1
",
            "\
CD,sentiment
cd1,positive
cd1,positive
cd1,negative
cd2,neutral
",
        )
        .unwrap()
    }

    #[test]
    fn largest_slice_filters_map_by_label() {
        let walk = click_through(sample_db(), "cd1").unwrap();
        assert_eq!(walk.pie.count_of("positive"), Some(2));
        assert_eq!(walk.slice.as_deref(), Some("positive"));
        let map = walk.map.unwrap();
        assert_eq!(map.district_ids(), vec!["cd3"]);
    }

    #[test]
    fn district_without_observations_stops_at_pie() {
        let walk = click_through(sample_db(), "cd3").unwrap();
        assert!(walk.pie.is_empty());
        assert!(walk.slice.is_none());
        assert!(walk.map.is_none());
    }

    #[test]
    fn unknown_district_is_an_error() {
        assert!(click_through(sample_db(), "cd99").is_err());
    }
}
