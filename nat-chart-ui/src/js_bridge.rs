//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The D3.js renderer lives in `assets/js/*.js`, is embedded at compile time
//! and evaluated at global scope once D3 has loaded. Figures cross the
//! boundary as JSON text passed as a JS string literal.

use nat_data::Figure;

static TOOLTIP_JS: &str = include_str!("../assets/js/tooltip.js");
static NATIONALITY_CHART_JS: &str = include_str!("../assets/js/nationality-chart.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('NAT JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Initialize chart scripts with a wait-for-D3 polling loop.
///
/// The scripts are stored on `window` and evaluated with an indirect `eval`
/// so their function declarations land at global scope, then promoted to
/// `window.*` explicitly. Safe to call repeatedly.
pub fn init_charts() {
    let all_js = [TOOLTIP_JS, NATIONALITY_CHART_JS].join("\n");
    let store_js = format!(
        "if (!window.__natChartsReady) {{ window.__natChartScripts = {}; }}",
        serde_json::to_string(&all_js).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            if (window.__natChartsReady || window.__natChartsPolling) { return; }
            window.__natChartsPolling = true;
            var waitForD3 = setInterval(function() {
                if (typeof d3 !== 'undefined') {
                    clearInterval(waitForD3);
                    (0, eval)(window.__natChartScripts);
                    delete window.__natChartScripts;
                    if (typeof renderNationalityChart !== 'undefined') window.renderNationalityChart = renderNationalityChart;
                    if (typeof destroyNationalityChart !== 'undefined') window.destroyNationalityChart = destroyNationalityChart;
                    if (typeof initTooltip !== 'undefined') window.initTooltip = initTooltip;
                    if (typeof showTooltip !== 'undefined') window.showTooltip = showTooltip;
                    if (typeof hideTooltip !== 'undefined') window.hideTooltip = hideTooltip;
                    window.__natChartsReady = true;
                    console.log('NAT charts initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Build the JS snippet that renders `figure` into `container_id`.
///
/// The snippet polls until the chart scripts are initialized and the
/// container exists, so it can be issued before either is ready.
pub fn render_script(container_id: &str, figure: &Figure) -> serde_json::Result<String> {
    let figure_json = serde_json::to_string(figure)?;
    // JSON text of the JSON text: a valid, fully escaped JS string literal
    let figure_literal = serde_json::to_string(&figure_json)?;
    let id_literal = serde_json::to_string(container_id)?;
    Ok(format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__natChartsReady &&
                    typeof window.renderNationalityChart !== 'undefined' &&
                    document.getElementById({id_literal})) {{
                    clearInterval(poll);
                    try {{
                        window.renderNationalityChart({id_literal}, {figure_literal});
                    }} catch(e) {{ console.error('[NAT] renderNationalityChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#
    ))
}

/// Render a figure into the container with the given DOM id.
pub fn render_figure(container_id: &str, figure: &Figure) {
    match render_script(container_id, figure) {
        Ok(script) => call_js(&script),
        Err(e) => log::error!("[NAT] could not serialize figure for {}: {}", container_id, e),
    }
}

/// Build the JS snippet that clears the chart in `container_id`.
///
/// Uses the chart script's own teardown (which also hides the tooltip) once
/// the scripts are loaded, and falls back to emptying the container before.
pub fn destroy_script(container_id: &str) -> serde_json::Result<String> {
    let id_literal = serde_json::to_string(container_id)?;
    Ok(format!(
        "if (typeof window.destroyNationalityChart === 'function') {{ \
             window.destroyNationalityChart({id_literal}); \
         }} else {{ \
             var el = document.getElementById({id_literal}); if (el) el.innerHTML = ''; \
         }}"
    ))
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    match destroy_script(container_id) {
        Ok(script) => call_js(&script),
        Err(e) => log::error!("[NAT] could not build teardown for {}: {}", container_id, e),
    }
}
