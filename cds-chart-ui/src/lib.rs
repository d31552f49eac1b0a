//! Shared Dioxus components and D3.js bridge for the district dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the D3.js pie and choropleth scripts, and
//!   the channel those scripts use to report clicks back to Rust
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (containers, headers, status)

pub mod js_bridge;
pub mod state;
pub mod components;
