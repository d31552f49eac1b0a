//! Container div a D3.js chart renders into.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// DOM id the chart script looks up
    pub id: String,
    /// Minimum height in pixels, so the page does not jump while the chart loads
    #[props(default = 360)]
    pub min_height: u32,
}

/// A bordered box wrapping the chart container div.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "min-height: {}px; position: relative; border: 1px solid #E0E0E0; border-radius: 4px; padding: 8px;",
        props.min_height
    );

    rsx! {
        div {
            style: "{style}",
            div {
                id: "{props.id}",
                style: "width: 100%;",
            }
        }
    }
}
