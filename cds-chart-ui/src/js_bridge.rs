//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! D3.js chart functions live in `assets/js/*.js`, are embedded at compile
//! time and evaluated as globals (no ES modules) once D3 has loaded.
//! Clicks travel the other way over a Dioxus eval channel: the scripts call
//! `window.__cdsSelect(kind, value)`, which forwards a [`Selection`] to Rust.

use cds_core::Selection;
use dioxus::document::{self, Eval};

// Embed all D3 chart JS files at compile time
static TOOLTIP_JS: &str = include_str!("../assets/js/tooltip.js");
static PIE_CHART_JS: &str = include_str!("../assets/js/pie-chart.js");
static CHOROPLETH_JS: &str = include_str!("../assets/js/choropleth.js");

/// Registers `window.__cdsSelect` and keeps the channel open for the page lifetime.
const SELECTION_CHANNEL_JS: &str = r#"
    window.__cdsSelect = function(kind, value) {
        dioxus.send({ kind: kind, value: value });
    };
    await new Promise(function() {});
"#;

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('CDS JS call failed:', e); }}",
        code
    );
    if let Err(e) = js_sys::eval(&wrapped) {
        log::warn!("js_bridge: eval failed: {:?}", e);
    }
}

/// Quote a JSON document as a JS string literal.
fn js_string(json: &str) -> String {
    serde_json::to_string(json).unwrap_or_else(|_| "''".to_string())
}

/// Initialize chart scripts with a wait-for-D3 polling loop.
///
/// The scripts are evaluated at global scope via indirect eval once D3 is
/// ready, then each entry point is promoted to `window.*`.
pub fn init_charts() {
    let all_js = [TOOLTIP_JS, PIE_CHART_JS, CHOROPLETH_JS].join("\n");

    let store_js = format!("window.__cdsChartScripts = {};", js_string(&all_js));
    if let Err(e) = js_sys::eval(&store_js) {
        log::error!("js_bridge: failed to stage chart scripts: {:?}", e);
        return;
    }

    let init_js = r#"
        (function() {
            var waitForD3 = setInterval(function() {
                if (typeof d3 !== 'undefined') {
                    clearInterval(waitForD3);
                    (0, eval)(window.__cdsChartScripts);
                    delete window.__cdsChartScripts;
                    if (typeof renderPieChart !== 'undefined') window.renderPieChart = renderPieChart;
                    if (typeof renderChoropleth !== 'undefined') window.renderChoropleth = renderChoropleth;
                    if (typeof initTooltip !== 'undefined') window.initTooltip = initTooltip;
                    if (typeof showTooltip !== 'undefined') window.showTooltip = showTooltip;
                    if (typeof hideTooltip !== 'undefined') window.hideTooltip = hideTooltip;
                    window.__cdsChartsReady = true;
                    console.log('CDS charts initialized');
                }
            }, 100);
        })();
    "#;
    call_js(init_js);
}

/// Wait for the scripts and the container, then call `window.<function>(id, json)`.
fn render_when_ready(function: &str, container_id: &str, chart_json: &str) {
    let chart = js_string(chart_json);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__cdsChartsReady &&
                    typeof window.{function} !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.{function}('{container_id}', {chart});
                    }} catch(e) {{ console.error('[CDS] {function} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Render the sentiment pie. `chart_json` is a serialized [`cds_view::PieChart`].
pub fn render_pie_chart(container_id: &str, chart_json: &str) {
    render_when_ready("renderPieChart", container_id, chart_json);
}

/// Render the district map. `chart_json` is a serialized [`cds_view::Choropleth`].
pub fn render_choropleth(container_id: &str, chart_json: &str) {
    render_when_ready("renderChoropleth", container_id, chart_json);
}

/// Clear whatever is drawn in the container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById('{}'); if (el) el.innerHTML = '';",
        container_id
    ));
}

/// Open the channel the chart scripts report clicks on.
pub fn open_selection_channel() -> Eval {
    document::eval(SELECTION_CHANNEL_JS)
}

/// Wait for the next click. `None` once the channel is closed.
pub async fn next_selection(channel: &mut Eval) -> Option<Selection> {
    match channel.recv::<Selection>().await {
        Ok(selection) => Some(selection),
        Err(e) => {
            log::warn!("js_bridge: selection channel closed: {:?}", e);
            None
        }
    }
}
