//! Loading indicator shown while the tables are parsed.

use dioxus::prelude::*;

#[component]
pub fn LoadingSpinner(#[props(default = String::from("Loading districts..."))] label: String) -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 40px; color: #666;",
            "{label}"
        }
    }
}
