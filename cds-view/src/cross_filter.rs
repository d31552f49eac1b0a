//! Cross-filter between the map and the pie.
//!
//! Each view is filtered only by the last click in the *other* view:
//! - map click on district `d` -> pie shows the observations of `d`
//! - pie click on label `s` -> map shows districts whose metric label is `s`
//!
//! A click replaces the target view's filter outright. There is no history,
//! no multi-select, no intersection of the two filters and no way to clear a
//! filter short of starting over from [`CrossFilter::new`].
//!
//! The pie -> map route compares a sentiment label against the aggregated
//! metric label verbatim. The two come from different vocabularies, so this
//! usually selects nothing and the map goes empty. That is the observed
//! behavior of the dashboard and is kept as is.

use cds_core::{Selection, DEFAULT_DISTRICT};

/// The two views of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Map,
    Pie,
}

/// Current filter of each view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossFilter {
    pie_district: Option<String>,
    map_metric: Option<String>,
}

impl Default for CrossFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl CrossFilter {
    /// State on first load: pie restricted to the default district, map unfiltered.
    pub fn new() -> Self {
        Self {
            pie_district: Some(DEFAULT_DISTRICT.to_string()),
            map_metric: None,
        }
    }

    /// Neither view filtered.
    pub fn idle() -> Self {
        Self {
            pie_district: None,
            map_metric: None,
        }
    }

    /// District the pie is restricted to.
    pub fn pie_filter(&self) -> Option<&str> {
        self.pie_district.as_deref()
    }

    /// Metric label the map is restricted to.
    pub fn map_filter(&self) -> Option<&str> {
        self.map_metric.as_deref()
    }

    /// Route a click. Returns the view that must re-render, never the view
    /// that was clicked.
    pub fn apply(&mut self, selection: Selection) -> Option<View> {
        match selection {
            Selection::None => None,
            Selection::District(district_id) => {
                log::info!("cross_filter: map click {} -> pie", district_id);
                self.pie_district = Some(district_id);
                Some(View::Pie)
            }
            Selection::Sentiment(label) => {
                log::info!("cross_filter: pie click {} -> map", label);
                self.map_metric = Some(label);
                Some(View::Map)
            }
        }
    }
}
