//! Reusable Dioxus RSX components for the dashboard.

mod chart_container;
mod error_display;
mod loading_spinner;
mod view_header;

pub use chart_container::ChartContainer;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use view_header::ViewHeader;
