//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The chart functions themselves ship with the host page (a Chart.js or D3
//! bundle loaded via `<script>` tags) and are exposed as `window.*` globals.
//! This module only serializes data and calls those globals; the rendering
//! internals are outside this toolkit.

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('FYD JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Call one of the host page's render globals once it and the container
/// element exist. The chart bundle loads asynchronously, so poll instead of
/// assuming it beat the WASM module.
fn render_when_ready(function_name: &str, container_id: &str, data_json: &str) {
    let escaped_data = data_json.replace('\'', "\\'").replace('\n', "");
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (typeof window.{function_name} !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.{function_name}('{container_id}', '{escaped_data}');
                    }} catch(e) {{ console.error('[FYD] {function_name} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Render the yield trend line chart.
/// Expects `data_json` shaped `{{"dates": [...], "avg_yield": [...]}}`.
pub fn render_yield_trend(container_id: &str, data_json: &str) {
    render_when_ready("renderYieldTrend", container_id, data_json);
}

/// Render the defect pareto bar chart.
/// Expects `data_json` as a list of `{{"defect_type": ..., "count": ...}}`.
pub fn render_defect_pareto(container_id: &str, data_json: &str) {
    render_when_ready("renderDefectPareto", container_id, data_json);
}

/// Render the defect position scatter map.
/// Expects `data_json` as a list of `{{"x": ..., "y": ...}}` points.
pub fn render_defect_map(container_id: &str, data_json: &str) {
    render_when_ready("renderDefectMap", container_id, data_json);
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById('{}'); if (el) el.innerHTML = '';",
        container_id
    ));
}
