//! Manufacturing yield dashboard.
//!
//! Data flow:
//! 1. On mount: start the filter cascade (`begin()`) and walk the resulting
//!    fetch chain - dates, stations, recipes, lots - against the backend.
//! 2. Selector changes re-enter the cascade; each returned plan is executed
//!    sequentially, and stale responses are discarded by generation.
//! 3. Apply assembles the terminal query and fetches `/yield/trend`.
//! 4. A payload change re-renders the three chart panels via the JS bridge
//!    and the detail table in RSX.
//!
//! Sign-in happens outside this app; the host page may hand a bearer token
//! to `AppState.token` before mounting.

use fyd_chart_ui::components::{
    ApplyButton, ChartContainer, ChartHeader, DateRangePicker, DetailTable, ErrorDisplay,
    LoadingSpinner, LotSelector, RecipeSelector, StationSelector,
};
use fyd_chart_ui::state::AppState;
use fyd_chart_ui::{fetch, js_bridge};
use dioxus::prelude::*;

/// Backend base URL.
const API_BASE: &str = "http://127.0.0.1:8000";

/// DOM ids for the chart panels.
const TREND_CONTAINER_ID: &str = "yield-trend-chart";
const PARETO_CONTAINER_ID: &str = "defect-pareto-chart";
const MAP_CONTAINER_ID: &str = "defect-map-chart";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("dashboard-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // ─── Effect 1: start the filter chain once on mount ───
    use_effect(move || {
        state.base_url.set(API_BASE.to_string());
        let plan = state.cascade.write().begin();
        spawn(async move {
            fetch::run_chain(state, Some(plan)).await;
            state.loading.set(false);
            log::info!("filter chain settled");
        });
    });

    // ─── Effect 2: render the chart panels when a payload lands ───
    use_effect(move || {
        let Some(data) = state.dashboard.read().clone() else {
            return;
        };

        if data.is_empty() {
            state
                .error_msg
                .set(Some("No yield data for the selected filters.".to_string()));
            js_bridge::destroy_chart(TREND_CONTAINER_ID);
            js_bridge::destroy_chart(PARETO_CONTAINER_ID);
            js_bridge::destroy_chart(MAP_CONTAINER_ID);
            return;
        }

        let trend_json = serde_json::json!({
            "dates": data.dates,
            "avg_yield": data.avg_yield,
        })
        .to_string();
        js_bridge::render_yield_trend(TREND_CONTAINER_ID, &trend_json);

        let pareto_json = serde_json::to_string(&data.defect_pareto).unwrap_or_default();
        js_bridge::render_defect_pareto(PARETO_CONTAINER_ID, &pareto_json);

        let points: Vec<serde_json::Value> = data
            .defect_details
            .iter()
            .map(|detail| serde_json::json!({ "x": detail.x, "y": detail.y }))
            .collect();
        let map_json = serde_json::to_string(&points).unwrap_or_default();
        js_bridge::render_defect_map(MAP_CONTAINER_ID, &map_json);
    });

    // ─── Render ───
    rsx! {
        div {
            style: "max-width: 1100px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            h2 {
                style: "margin: 8px 0;",
                "Factory Yield Dashboard"
            }

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay { message: err.clone() }
            }

            if *state.loading.read() {
                LoadingSpinner {}
            } else {
                FilterBar {}

                div {
                    style: "display: grid; grid-template-columns: 1fr 1fr; gap: 16px; margin-top: 12px;",
                    div {
                        ChartHeader {
                            title: "Yield Trend".to_string(),
                            unit_description: "Daily average yield (%)".to_string(),
                        }
                        ChartContainer {
                            id: TREND_CONTAINER_ID.to_string(),
                            loading: *state.querying.read(),
                        }
                    }
                    div {
                        ChartHeader {
                            title: "Defect Pareto".to_string(),
                            unit_description: "Defect count by type".to_string(),
                        }
                        ChartContainer {
                            id: PARETO_CONTAINER_ID.to_string(),
                            loading: *state.querying.read(),
                        }
                    }
                }

                ChartHeader {
                    title: "Defect Map".to_string(),
                }
                ChartContainer {
                    id: MAP_CONTAINER_ID.to_string(),
                    loading: *state.querying.read(),
                }

                ChartHeader {
                    title: "Defect Details".to_string(),
                }
                DetailTable {}
            }
        }
    }
}

/// Filter selectors and the Apply action.
#[component]
fn FilterBar() -> Element {
    rsx! {
        div {
            style: "padding: 8px 12px; border: 1px solid #e0e0e0; border-radius: 4px;",
            DateRangePicker {}
            div {
                style: "display: flex; gap: 24px; flex-wrap: wrap;",
                StationSelector {}
                RecipeSelector {}
            }
            LotSelector {}
            ApplyButton {}
        }
    }
}
