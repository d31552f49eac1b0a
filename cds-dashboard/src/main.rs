//! Community District Sentiment Dashboard
//!
//! A single page with a choropleth of Community Districts and a pie of
//! observation sentiment, cross-filtered:
//! - clicking a district redraws the pie for that district only
//! - clicking a slice redraws the map for districts whose aggregated metric
//!   label equals the slice label
//!
//! Data flow:
//! 1. `build.rs` copies `agg_cd_data.csv` and `unagg_tweet.csv` into `OUT_DIR`.
//! 2. `include_str!` embeds both tables into the WASM binary.
//! 3. On mount, the tables are parsed into an in-memory SQLite store. A load
//!    error replaces the page with an error panel and nothing else runs.
//! 4. Clicks arrive over the selection channel and update the cross-filter.
//! 5. Each view re-renders only when its own filter changes.

use cds_chart_ui::components::{ChartContainer, ErrorDisplay, LoadingSpinner, ViewHeader};
use cds_chart_ui::js_bridge;
use cds_chart_ui::state::AppState;
use cds_db::Database;
use cds_view::map::{render_map, MAP_CONTAINER_ID};
use cds_view::pie::{render_pie, PIE_CONTAINER_ID};
use cds_view::View;
use dioxus::prelude::*;

/// Aggregated table: one row per Community District.
const AGGREGATED_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/agg_cd_data.csv"));
/// Unaggregated table: one row per tweet.
const UNAGGREGATED_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/unagg_tweet.csv"));

const PAGE_TITLE: &str = "Analysis Page";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // ─── Effect 1: Load both tables once on mount ───
    use_effect(move || {
        match Database::from_csv(AGGREGATED_CSV, UNAGGREGATED_CSV) {
            Ok(db) => {
                state.db.set(Some(db));
                js_bridge::init_charts();
            }
            Err(e) => {
                log::error!("Failed to load dashboard data: {}", e);
                state.error_msg.set(Some(e.to_string()));
            }
        }
        state.loading.set(false);
    });

    // ─── Click channel: route each selection into the other view's filter ───
    use_future(move || async move {
        let mut channel = js_bridge::open_selection_channel();
        while let Some(selection) = js_bridge::next_selection(&mut channel).await {
            let target = state.filter.write().apply(selection);
            log::info!("Selection routed to {:?}", target);
        }
    });

    // Each view subscribes to its own filter only, so a click never
    // redraws the view that was clicked.
    let pie_filter = use_memo(move || state.filter.read().pie_filter().map(str::to_string));
    let map_filter = use_memo(move || state.filter.read().map_filter().map(str::to_string));

    // ─── Effect 2: Render the pie whenever its district filter changes ───
    use_effect(move || {
        let district = pie_filter();
        if (state.loading)() {
            return;
        }
        let Some(db) = state.db.read().clone() else {
            return;
        };
        match render_pie(&db, district.as_deref()) {
            Ok(chart) => {
                let chart_json = serde_json::to_string(&chart).unwrap_or_default();
                js_bridge::render_pie_chart(PIE_CONTAINER_ID, &chart_json);
            }
            Err(e) => {
                log::warn!("Failed to render pie for {:?}: {}", district, e);
                js_bridge::destroy_chart(PIE_CONTAINER_ID);
            }
        }
    });

    // ─── Effect 3: Render the map whenever its metric filter changes ───
    use_effect(move || {
        let metric = map_filter();
        if (state.loading)() {
            return;
        }
        let Some(db) = state.db.read().clone() else {
            return;
        };
        match render_map(&db, metric.as_deref()) {
            Ok(chart) => {
                let chart_json = serde_json::to_string(&chart).unwrap_or_default();
                js_bridge::render_choropleth(MAP_CONTAINER_ID, &chart_json);
            }
            Err(e) => {
                log::warn!("Failed to render map for {:?}: {}", metric, e);
                js_bridge::destroy_chart(MAP_CONTAINER_ID);
            }
        }
    });

    // ─── Render ───
    rsx! {
        div {
            style: "max-width: 1200px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            h1 {
                style: "font-size: 24px; margin: 8px 0;",
                "{PAGE_TITLE}"
            }

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay { message: err }
            } else if (state.loading)() {
                LoadingSpinner {}
            } else {
                div {
                    style: "display: flex; flex-wrap: wrap; gap: 12px;",

                    div {
                        style: "flex: 2 1 520px;",
                        ViewHeader { view: View::Map }
                        ChartContainer {
                            id: MAP_CONTAINER_ID.to_string(),
                            min_height: 540,
                        }
                    }

                    div {
                        style: "flex: 1 1 340px;",
                        ViewHeader { view: View::Pie }
                        ChartContainer {
                            id: PIE_CONTAINER_ID.to_string(),
                            min_height: 400,
                        }
                    }
                }
            }
        }
    }
}
