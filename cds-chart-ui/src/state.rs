//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use cds_db::Database;
use cds_view::CrossFilter;
use dioxus::prelude::*;

/// Shared application state for the dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Dataset store (None until loaded)
    pub db: Signal<Option<Database>>,
    /// Whether the tables are still loading
    pub loading: Signal<bool>,
    /// Fatal load error, if any
    pub error_msg: Signal<Option<String>>,
    /// Filter of each view, updated by clicks in the other view
    pub filter: Signal<CrossFilter>,
}

impl AppState {
    /// Create a new AppState in the first-load state.
    pub fn new() -> Self {
        Self {
            db: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            filter: Signal::new(CrossFilter::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
