//! Heading of one dashboard view: its title, what clicking it does, and the
//! filter it is currently drawn with.

use crate::state::AppState;
use cds_view::map::MAP_TITLE;
use cds_view::View;
use dioxus::prelude::*;

fn title(view: View) -> &'static str {
    match view {
        View::Map => MAP_TITLE,
        View::Pie => "Sentiment",
    }
}

fn click_hint(view: View) -> &'static str {
    match view {
        View::Map => "Click a district to break down its sentiment in the pie.",
        View::Pie => "Click a slice to show districts whose metric label matches it.",
    }
}

#[component]
pub fn ViewHeader(view: View) -> Element {
    let state = use_context::<AppState>();
    let active = {
        let filter = state.filter.read();
        match view {
            View::Map => filter
                .map_filter()
                .map(|label| format!("metric label \"{}\"", label)),
            View::Pie => filter.pie_filter().map(|id| format!("district {}", id)),
        }
        .unwrap_or_else(|| "all districts".to_string())
    };

    rsx! {
        div {
            style: "display: flex; align-items: baseline; justify-content: space-between; gap: 8px;",
            h3 {
                style: "margin: 0; font-size: 16px;",
                "{title(view)}"
            }
            span {
                style: "font-size: 11px; padding: 2px 6px; border-radius: 10px; background: #E3F2FD; color: #1565C0;",
                "{active}"
            }
        }
        div {
            style: "margin: 4px 0 8px 0; padding-left: 6px; border-left: 3px solid #90CAF9; font-size: 12px; color: #555;",
            "{click_hint(view)}"
        }
    }
}
