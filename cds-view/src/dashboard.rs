//! Dataset store plus cross-filter: renders whichever view a click affects.

use crate::cross_filter::{CrossFilter, View};
use crate::map::{render_map, Choropleth};
use crate::pie::{render_pie, PieChart};
use cds_core::Selection;
use cds_db::Database;

/// Output of one render step.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Pie(PieChart),
    Map(Choropleth),
}

/// Both views over one shared, read-only store.
#[derive(Clone)]
pub struct Dashboard {
    db: Database,
    filter: CrossFilter,
}

impl Dashboard {
    /// Dashboard in its first-load state.
    pub fn new(db: Database) -> Self {
        Self::with_filter(db, CrossFilter::new())
    }

    pub fn with_filter(db: Database, filter: CrossFilter) -> Self {
        Self { db, filter }
    }

    pub fn filter(&self) -> &CrossFilter {
        &self.filter
    }

    pub fn pie(&self) -> anyhow::Result<PieChart> {
        render_pie(&self.db, self.filter.pie_filter())
    }

    pub fn map(&self) -> anyhow::Result<Choropleth> {
        render_map(&self.db, self.filter.map_filter())
    }

    /// Apply a click and render the one view it affects.
    pub fn click(&mut self, selection: Selection) -> anyhow::Result<Option<Rendered>> {
        match self.filter.apply(selection) {
            Some(View::Pie) => Ok(Some(Rendered::Pie(self.pie()?))),
            Some(View::Map) => Ok(Some(Rendered::Map(self.map()?))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGGREGATED_CSV: &str = "\
CD,the_geom,AggregatedMetric,Shape_Leng,Shape_Area
cd1,\"POLYGON ((-74 40.7, -73.9 40.7, -73.9 40.8, -74 40.7))\",A,10,100
cd2,\"POLYGON ((-73.9 40.7, -73.8 40.7, -73.8 40.8, -73.9 40.7))\",B,20,200
";

    const UNAGGREGATED_CSV: &str = "\
CD,sentiment
cd1,positive
cd1,positive
cd1,negative
cd2,neutral
";

    fn sample_dashboard() -> Dashboard {
        Dashboard::with_filter(
            Database::from_csv(AGGREGATED_CSV, UNAGGREGATED_CSV).unwrap(),
            CrossFilter::idle(),
        )
    }

    fn expect_pie(rendered: Option<Rendered>) -> PieChart {
        match rendered {
            Some(Rendered::Pie(pie)) => pie,
            other => panic!("expected a pie render, got {:?}", other),
        }
    }

    fn expect_map(rendered: Option<Rendered>) -> Choropleth {
        match rendered {
            Some(Rendered::Map(map)) => map,
            other => panic!("expected a map render, got {:?}", other),
        }
    }

    #[test]
    fn click_district_then_slice() {
        let mut dash = sample_dashboard();
        let map = dash.map().unwrap();
        assert_eq!(map.district_ids(), vec!["cd1", "cd2"]);

        let click = map.click("cd1").unwrap();
        let pie = expect_pie(dash.click(click).unwrap());
        assert_eq!(pie.count_of("positive"), Some(2));
        assert_eq!(pie.count_of("negative"), Some(1));
        assert_eq!(pie.slices.len(), 2);

        // The sentiment label is matched against the metric label ("A"/"B"),
        // so the map filter is "positive" and nothing matches.
        let click = pie.click("positive").unwrap();
        let map = expect_map(dash.click(click).unwrap());
        assert_eq!(map.metric_filter.as_deref(), Some("positive"));
        assert!(map.is_empty());

        // The pie keeps its district filter.
        assert_eq!(dash.pie().unwrap(), pie);
    }

    #[test]
    fn reselecting_district_replaces_filter() {
        let mut dash = sample_dashboard();
        expect_pie(dash.click(Selection::District("cd1".into())).unwrap());
        let pie = expect_pie(dash.click(Selection::District("cd2".into())).unwrap());
        assert_eq!(pie.total(), 1);
        assert_eq!(pie.count_of("neutral"), Some(1));
        assert_eq!(pie.count_of("positive"), None);
    }

    #[test]
    fn matching_metric_label_filters_map() {
        let mut dash = sample_dashboard();
        let map = expect_map(dash.click(Selection::Sentiment("B".into())).unwrap());
        assert_eq!(map.district_ids(), vec!["cd2"]);
    }

    #[test]
    fn first_load_shows_default_district() {
        let db = Database::from_csv(AGGREGATED_CSV, UNAGGREGATED_CSV).unwrap();
        let dash = Dashboard::new(db);
        assert_eq!(dash.pie().unwrap().total(), 3);
        assert_eq!(dash.map().unwrap().features.len(), 2);
    }

    #[test]
    fn none_selection_renders_nothing() {
        let mut dash = sample_dashboard();
        assert!(dash.click(Selection::None).unwrap().is_none());
    }
}
